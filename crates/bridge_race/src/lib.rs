//! # Bridge Race
//!
//! A two-runner race across a gap. Each runner collects blocks of its own
//! color on the start island, turns them into a bridge one segment at a time
//! and tries to reach the goal island first. Bumping into the other runner
//! knocks blocks out of the smaller stack.
//!
//! The game runs on [`race_engine`]; [`Simulation`] is the engine
//! application and [`RaceLevel`] the per-frame race logic.
//!
//! ```rust,no_run
//! use bridge_race::{GameConfig, Simulation};
//! use race_engine::Engine;
//!
//! let config = GameConfig::default();
//! let mut simulation = Simulation::new(config.clone()).with_quit_on_win(true);
//! Engine::run(config.engine, &mut simulation).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod bot;
pub mod bridge;
pub mod collectable;
pub mod collision;
pub mod color;
pub mod config;
pub mod hud;
pub mod level;
pub mod runner;
pub mod simulation;
pub mod spawner;

pub use color::BlockColor;
pub use config::GameConfig;
pub use hud::Winner;
pub use level::{FrameInput, FrameReport, RaceLevel};
pub use runner::{MoveIntentSource, Runner};
pub use simulation::{ScriptedInput, Simulation};
