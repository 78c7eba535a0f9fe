//! # Race Engine
//!
//! A small headless game engine core that games run their simulation against.
//!
//! ## Features
//!
//! - **Scene World**: Slot-map backed entities with transform, renderable and box collider
//! - **Spatial Queries**: Layer-filtered raycasts against box colliders
//! - **Input**: Held-key tracking for per-frame polling
//! - **HUD Text**: Simple on-screen text elements
//! - **Scheduling**: Immediate and time-deferred typed event queues
//! - **Fixed-Step Loop**: Deterministic headless main loop
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use race_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod physics;
pub mod spatial;
pub mod events;
pub mod input;
pub mod ui;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineConfig, EngineError,
        config::{Config, ConfigError},
        foundation::{
            math::{Vec2, Vec3, Quat, Transform},
            time::{Timer, Stopwatch},
        },
        ecs::{World, Entity, Renderable, Collider, Shape, Color},
        physics::{Ray, RayHit, Aabb, CollisionLayers},
        spatial::SpatialQuery,
        events::EventQueue,
        input::{InputManager, KeyCode},
        ui::{UiManager, UiText, UiNodeId},
    };
}
