//! Headless bridge race
//!
//! Usage: `bridge_race [config.toml|config.ron]`
//!
//! The player is driven by a key script that sweeps the start island for
//! blocks and then runs for the goal.

use bridge_race::{GameConfig, ScriptedInput, Simulation};
use race_engine::config::Config;
use race_engine::foundation::logging;
use race_engine::Engine;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {panic_info}");
    }));

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = GameConfig::load_or_default(config_path.as_deref())?;

    logging::init_with_level(&config.engine.log_level);
    match &config_path {
        Some(path) => log::info!("Loaded config from {}", path.display()),
        None => log::info!("No config given, using defaults"),
    }
    config.validate()?;

    let mut simulation = Simulation::new(config.clone())
        .with_script(ScriptedInput::sweep_then_cross(&config))
        .with_quit_on_win(true);
    Engine::run(config.engine, &mut simulation)?;

    match simulation.winner() {
        Some(winner) => log::info!("Final result: {}", winner.banner_text()),
        None => log::info!("Final result: nobody reached the goal"),
    }
    Ok(())
}
