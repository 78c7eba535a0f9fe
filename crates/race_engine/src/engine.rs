//! Core engine implementation

use crate::{
    application::Application,
    ecs::World,
    foundation::time::{Stopwatch, Timer},
    input::InputManager,
    ui::UiManager,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Simulation step in seconds
    pub fixed_timestep: f32,
    /// Stop after this many frames (unbounded when `None`)
    pub max_frames: Option<u64>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            fixed_timestep: 1.0 / 60.0,
            max_frames: None,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the simulation step
    pub fn with_fixed_timestep(mut self, step: f32) -> Self {
        self.fixed_timestep = step;
        self
    }

    /// Bound the main loop to a number of frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.fixed_timestep > 0.0 && self.fixed_timestep.is_finite()) {
            return Err(EngineError::InvalidConfig(format!(
                "fixed_timestep must be positive, got {}",
                self.fixed_timestep
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Main engine struct
///
/// The engine owns the scene world, input state, HUD text and frame timing,
/// and drives the application through a fixed-step main loop.
pub struct Engine {
    /// Scene world containing all entities
    pub world: World,

    /// Input handling system
    pub input: InputManager,

    /// On-screen text
    pub ui: UiManager,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine (step {:.4}s)...", config.fixed_timestep);

        Ok(Self {
            world: World::new(),
            input: InputManager::new(),
            ui: UiManager::new(),
            timer: Timer::new(),
            config,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::InitializationFailed(format!("App initialization: {e}")))?;

        log::info!("Starting main loop...");

        let wall_clock = Stopwatch::start_new();
        let result = engine.run_loop(app);

        // Cleanup runs even when an update failed
        app.cleanup(&mut engine);

        log::info!(
            "Engine shutdown complete after {} frames ({:.2}s simulated, {:.1}ms wall, {:.0} steps/s)",
            engine.frame_count(),
            engine.time(),
            wall_clock.elapsed_millis(),
            engine.timer.average_fps()
        );
        result
    }

    fn run_loop<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        while self.running {
            if self.config.max_frames.is_some_and(|max| self.frame_count() >= max) {
                log::info!("Frame limit reached");
                break;
            }
            self.step(app)?;
        }
        Ok(())
    }

    /// Advance one fixed step and update the application
    pub fn step<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        let delta_time = self.config.fixed_timestep;
        self.timer.advance(delta_time);

        app.update(self, delta_time)
            .map_err(|e| EngineError::ApplicationError(format!("App update: {e}")))
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Simulated time in seconds
    pub fn time(&self) -> f64 {
        self.timer.total_time()
    }

    /// Number of frames stepped so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Engine initialization failed
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// Invalid engine configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;

    #[derive(Default)]
    struct CountingApp {
        initialized: bool,
        updates: u32,
        quit_after: Option<u32>,
        cleaned_up: bool,
    }

    impl Application for CountingApp {
        fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
            self.initialized = true;
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            self.updates += 1;
            if self.quit_after == Some(self.updates) {
                engine.quit();
            }
            Ok(())
        }

        fn cleanup(&mut self, _engine: &mut Engine) {
            self.cleaned_up = true;
        }
    }

    #[test]
    fn test_run_stops_at_frame_limit() {
        let mut app = CountingApp::default();
        Engine::run(EngineConfig::new().with_max_frames(10), &mut app).unwrap();

        assert!(app.initialized);
        assert_eq!(app.updates, 10);
        assert!(app.cleaned_up);
    }

    #[test]
    fn test_quit_ends_loop() {
        let mut app = CountingApp {
            quit_after: Some(3),
            ..Default::default()
        };
        Engine::run(EngineConfig::new(), &mut app).unwrap();
        assert_eq!(app.updates, 3);
    }

    struct FailingApp;

    impl Application for FailingApp {
        fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
            Err(AppError::Config("missing level".to_string()))
        }

        fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            Ok(())
        }

        fn cleanup(&mut self, _engine: &mut Engine) {}
    }

    #[test]
    fn test_initialize_failure_is_reported() {
        let result = Engine::run(EngineConfig::new().with_max_frames(1), &mut FailingApp);
        assert!(matches!(result, Err(EngineError::InitializationFailed(_))));
    }

    #[test]
    fn test_invalid_timestep_rejected() {
        let config = EngineConfig::new().with_fixed_timestep(0.0);
        assert!(matches!(Engine::new(config), Err(EngineError::InvalidConfig(_))));
    }
}
