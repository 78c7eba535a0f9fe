//! The race as an engine application
//!
//! `Simulation` is the one context object for a run: it is built once,
//! creates the level in `initialize`, advances it every frame and destroys
//! everything again in `cleanup`.

use crate::config::GameConfig;
use crate::hud::Winner;
use crate::level::{FrameInput, RaceLevel};
use crate::runner::human_intent;
use race_engine::input::{InputManager, KeyCode};
use race_engine::{AppError, Application, Engine};

/// Timed key presses standing in for a human at the keyboard
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: Vec<(f64, Vec<KeyCode>)>,
}

impl ScriptedInput {
    /// Empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `keys` for `duration` seconds after the previous step
    pub fn then(mut self, duration: f32, keys: &[KeyCode]) -> Self {
        let start = self.duration();
        self.steps.push((start + f64::from(duration.max(0.0)), keys.to_vec()));
        self
    }

    /// Total length in seconds
    pub fn duration(&self) -> f64 {
        self.steps.last().map_or(0.0, |(end, _)| *end)
    }

    /// Keys held at `time`, empty once the script has ended
    pub fn keys_at(&self, time: f64) -> &[KeyCode] {
        self.steps
            .iter()
            .find(|(end, _)| time < *end)
            .map(|(_, keys)| keys.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the held keys with the ones scheduled for `time`
    pub fn apply(&self, time: f64, input: &mut InputManager) {
        input.release_all();
        for key in self.keys_at(time) {
            input.handle_key_input(*key, true);
        }
    }

    /// Sweep the start island row by row, then run down the lane to the goal
    pub fn sweep_then_cross(config: &GameConfig) -> Self {
        let speed = config.runner.player_speed;
        let edge = config.race.start_size / 2.0 - 2.0;
        let lane = config.race.player_lane_x;
        let row_spacing = 2.0 * config.runner.pickup_radius;
        let rows = ((config.race.gap_start_z - 2.0 - config.race.spawn_z()) / row_spacing)
            .floor()
            .max(0.0) as usize;

        let mut script = Self::new().then((lane + edge).abs() / speed, &[KeyCode::A]);
        let mut x = -edge;
        for _ in 0..rows {
            let key = if x < 0.0 { KeyCode::D } else { KeyCode::A };
            script = script
                .then(2.0 * edge / speed, &[key])
                .then(row_spacing / speed, &[KeyCode::W]);
            x = -x;
        }

        let toward_lane = if lane > x { KeyCode::D } else { KeyCode::A };
        let run_length = config.race.goal_z - config.race.spawn_z();
        script
            .then((lane - x).abs() / speed, &[toward_lane])
            .then(run_length / speed, &[KeyCode::W])
    }
}

/// A bridge race driven by the engine main loop
pub struct Simulation {
    config: GameConfig,
    level: Option<RaceLevel>,
    script: Option<ScriptedInput>,
    quit_on_win: bool,
    hud_log_interval: f64,
    next_hud_log: f64,
    winner: Option<Winner>,
}

impl Simulation {
    /// Create a simulation; nothing is built until the engine initializes it
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            level: None,
            script: None,
            quit_on_win: false,
            hud_log_interval: 5.0,
            next_hud_log: 0.0,
            winner: None,
        }
    }

    /// Drive the player from a key script instead of live input
    pub fn with_script(mut self, script: ScriptedInput) -> Self {
        self.script = Some(script);
        self
    }

    /// Stop the engine as soon as someone wins
    pub fn with_quit_on_win(mut self, quit_on_win: bool) -> Self {
        self.quit_on_win = quit_on_win;
        self
    }

    /// How often the HUD is written to the log, in race seconds
    pub fn with_hud_log_interval(mut self, seconds: f64) -> Self {
        self.hud_log_interval = seconds;
        self
    }

    /// The running level, between initialize and cleanup
    pub fn level(&self) -> Option<&RaceLevel> {
        self.level.as_ref()
    }

    /// Winner of the race, kept after cleanup
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }
}

impl Application for Simulation {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        self.config.validate()?;
        log::info!("Building race level...");
        self.level = Some(RaceLevel::new(&self.config, &mut engine.world, &mut engine.ui));
        self.next_hud_log = 0.0;
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        let level = self
            .level
            .as_mut()
            .ok_or_else(|| AppError::GameLogic("race updated before initialize".to_string()))?;

        if let Some(script) = &self.script {
            script.apply(engine.time(), &mut engine.input);
        }
        if engine.input.is_held(KeyCode::Escape) {
            engine.quit();
            return Ok(());
        }

        let (move_direction, jump) = human_intent(&engine.input);
        let report = level.update(
            &mut engine.world,
            &mut engine.ui,
            FrameInput {
                move_direction,
                jump,
            },
            delta_time,
        );

        if level.elapsed() >= self.next_hud_log {
            if let Some((Some(player), Some(bot))) = level.hud().map(|hud| hud.counters(&engine.ui)) {
                log::info!(
                    "[{:>5.1}s] {player} | {bot} | bridges {} / {}",
                    level.elapsed(),
                    level.player_lane().len(),
                    level.bot_lane().len()
                );
            }
            self.next_hud_log += self.hud_log_interval;
        }

        if let Some(winner) = report.new_winner {
            self.winner = Some(winner);
            if let Some(banner) = level.hud().and_then(|hud| hud.banner(&engine.ui)) {
                log::info!("*** {banner} ***");
            }
            if self.quit_on_win {
                engine.quit();
            }
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        if let Some(mut level) = self.level.take() {
            level.teardown(&mut engine.world, &mut engine.ui);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use race_engine::EngineConfig;

    #[test]
    fn test_script_steps_in_order() {
        let script = ScriptedInput::new()
            .then(1.0, &[KeyCode::W])
            .then(0.5, &[KeyCode::A, KeyCode::Space]);

        assert_eq!(script.keys_at(0.5), &[KeyCode::W]);
        assert_eq!(script.keys_at(1.2), &[KeyCode::A, KeyCode::Space]);
        assert!(script.keys_at(1.5).is_empty());

        let mut input = InputManager::new();
        script.apply(0.2, &mut input);
        assert!(input.is_held(KeyCode::W));
        script.apply(1.1, &mut input);
        assert!(!input.is_held(KeyCode::W));
        assert!(input.is_held(KeyCode::Space));
    }

    #[test]
    fn test_sweep_script_ends_running_forward() {
        let config = GameConfig::default();
        let script = ScriptedInput::sweep_then_cross(&config);
        assert!(script.duration() > 60.0);
        assert_eq!(script.keys_at(script.duration() - 0.1), &[KeyCode::W]);
    }

    #[test]
    fn test_run_cleans_up_scene() {
        let mut config = GameConfig::default();
        config.spawner.seed = Some(9);
        let mut simulation = Simulation::new(config);

        let engine_config = EngineConfig::new().with_max_frames(120);
        Engine::run(engine_config, &mut simulation).unwrap();
        assert!(simulation.level().is_none());
    }

    #[test]
    fn test_update_before_initialize_fails() {
        let mut simulation = Simulation::new(GameConfig::default());
        let mut engine = Engine::new(EngineConfig::new()).unwrap();
        assert!(matches!(
            simulation.update(&mut engine, 0.016),
            Err(AppError::GameLogic(_))
        ));
    }
}
