//! Scene entity storage
//!
//! Entities live in a slot map owned by the [`World`]; games keep the returned
//! [`Entity`] handles and destroy them explicitly.

pub mod world;
pub mod entity;
pub mod components;

pub use world::{World, SceneEntity};
pub use entity::Entity;
pub use components::{Renderable, Collider, Shape, Color};
