//! Game configuration
//!
//! Every tunable of the race lives here. The defaults reproduce the classic
//! layout: a 40x40 start island, a gap from z=20 to z=70 and a 20x20 goal
//! island centered at z=80.

use race_engine::config::Config;
use race_engine::{AppError, EngineConfig};
use serde::{Deserialize, Serialize};

/// Complete game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Level layout
    pub race: RaceConfig,

    /// Runner movement and steering
    pub runner: RunnerConfig,

    /// Bridge segment placement
    pub bridge: BridgeConfig,

    /// Runner-vs-runner bumps
    pub bump: BumpConfig,

    /// Periodic block spawner
    pub spawner: SpawnerConfig,

    /// Engine main loop
    pub engine: EngineConfig,
}

impl Config for GameConfig {}

/// Level layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Side length of the square start island
    pub start_size: f32,

    /// Side length of the square goal island
    pub goal_size: f32,

    /// First z without ground
    pub gap_start_z: f32,

    /// Last z without ground
    pub gap_end_z: f32,

    /// Z of the goal island center
    pub goal_z: f32,

    /// Lane the player builds on
    pub player_lane_x: f32,

    /// Lane the bot builds on
    pub bot_lane_x: f32,

    /// Height runners (re)spawn at
    pub spawn_height: f32,

    /// Runners below this height are respawned
    pub fall_reset_y: f32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            start_size: 40.0,
            goal_size: 20.0,
            gap_start_z: 20.0,
            gap_end_z: 70.0,
            goal_z: 80.0,
            player_lane_x: -2.0,
            bot_lane_x: 2.0,
            spawn_height: 1.0,
            fall_reset_y: -5.0,
        }
    }
}

impl RaceConfig {
    /// The gap between the islands
    pub fn gap(&self) -> GapSpan {
        GapSpan::new(self.gap_start_z, self.gap_end_z)
    }

    /// Z runners spawn and respawn at
    pub fn spawn_z(&self) -> f32 {
        -self.start_size / 4.0
    }

    /// Distance from the goal center that counts as arrival
    pub fn goal_radius(&self) -> f32 {
        self.goal_size / 2.0
    }
}

/// Runner movement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Player walking speed (units per second)
    pub player_speed: f32,

    /// Bot walking speed (units per second)
    pub bot_speed: f32,

    /// Upward velocity applied on jump
    pub jump_impulse: f32,

    /// Downward acceleration while airborne
    pub gravity: f32,

    /// Height above the feet that ground rays start from
    pub probe_offset: f32,

    /// Length of the ground check ray
    pub ground_probe_range: f32,

    /// Rate at which runners are pulled onto their lane inside the gap
    pub lane_snap_rate: f32,

    /// Pickup reach
    pub pickup_radius: f32,

    /// The bot stops collecting once it carries this many blocks
    pub bot_inventory_cap: u32,

    /// Distance before the gap where the bot waits when it has nothing to fetch
    pub bot_staging_offset: f32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            player_speed: 6.0,
            bot_speed: 5.2,
            jump_impulse: 7.5,
            gravity: 22.0,
            probe_offset: 0.1,
            ground_probe_range: 0.25,
            lane_snap_rate: 8.0,
            pickup_radius: 1.4,
            bot_inventory_cap: 6,
            bot_staging_offset: 0.1,
        }
    }
}

/// Bridge segment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Center height of the first step and the drop height of blocks
    pub block_y: f32,

    /// Height gained per step
    pub step_rise: f32,

    /// Vertical thickness of a segment
    pub segment_thickness: f32,

    /// Length of the "anything under me?" ray
    pub build_probe_range: f32,

    /// Segments closer than this in x and z count as the same step
    pub duplicate_tolerance: f32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            block_y: 0.5,
            step_rise: 0.03,
            segment_thickness: 0.2,
            build_probe_range: 1.2,
            duplicate_tolerance: 0.1,
        }
    }
}

/// Bump configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BumpConfig {
    /// Minimum race time between two bumps (seconds)
    pub cooldown: f32,

    /// Runners closer than this collide
    pub radius: f32,

    /// How far the loser is shoved
    pub push_distance: f32,

    /// Upper bound on blocks lost per bump
    pub max_drop: u32,

    /// Dropped blocks land up to this far from the loser on x and z
    pub drop_scatter: f32,

    /// Margin around the island edges where dropped blocks land on ground
    pub ground_zone_margin: f32,
}

impl Default for BumpConfig {
    fn default() -> Self {
        Self {
            cooldown: 0.8,
            radius: 1.2,
            push_distance: 1.0,
            max_drop: 5,
            drop_scatter: 1.0,
            ground_zone_margin: 0.05,
        }
    }
}

/// Block spawner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Seconds between spawns
    pub interval: f32,

    /// Blocks placed when the level is built
    pub initial_count: u32,

    /// Fixed seed for reproducible races
    pub seed: Option<u64>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            interval: 3.5,
            initial_count: 14,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Top surface height of both islands
    ///
    /// Matches the top of a segment at `block_y`, so runners step from the
    /// island onto the bridge without dropping.
    pub fn ground_y(&self) -> f32 {
        self.bridge.block_y + self.bridge.segment_thickness / 2.0
    }

    /// Initial bridge frontier for every runner
    pub fn first_frontier_z(&self) -> i32 {
        (self.race.gap_start_z + 1.0).floor() as i32
    }

    /// Check that the layout is usable
    pub fn validate(&self) -> Result<(), AppError> {
        let race = &self.race;
        if race.start_size <= 0.0 || race.goal_size <= 0.0 {
            return Err(AppError::Config(format!(
                "island sizes must be positive (start {}, goal {})",
                race.start_size, race.goal_size
            )));
        }
        if race.gap_end_z <= race.gap_start_z {
            return Err(AppError::Config(format!(
                "gap end {} must lie after gap start {}",
                race.gap_end_z, race.gap_start_z
            )));
        }
        if race.goal_z - race.goal_size / 2.0 < race.gap_end_z {
            return Err(AppError::Config(format!(
                "goal island at z={} overlaps the gap ending at {}",
                race.goal_z, race.gap_end_z
            )));
        }
        if self.spawner.interval <= 0.0 {
            return Err(AppError::Config("spawner interval must be positive".to_string()));
        }
        if self.bridge.segment_thickness <= 0.0 {
            return Err(AppError::Config("segment thickness must be positive".to_string()));
        }
        if !(self.bump.drop_scatter >= 0.0 && self.bump.drop_scatter.is_finite()) {
            return Err(AppError::Config(format!(
                "bump drop_scatter must be a non-negative number, got {}",
                self.bump.drop_scatter
            )));
        }
        self.engine.validate()?;
        Ok(())
    }
}

/// The z-range between the islands, with the margins the race logic tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapSpan {
    /// First z without ground
    pub start_z: f32,
    /// Last z without ground
    pub end_z: f32,
}

impl GapSpan {
    /// Create a span
    pub fn new(start_z: f32, end_z: f32) -> Self {
        Self { start_z, end_z }
    }

    /// Runners are pulled onto their lane here
    pub fn in_lane_snap_zone(&self, z: f32) -> bool {
        z >= self.start_z - 0.01 && z <= self.end_z + 0.01
    }

    /// Bridge building happens here
    pub fn in_build_zone(&self, z: f32) -> bool {
        z >= self.start_z - 1.0 && z <= self.end_z
    }

    /// Blocks can only be collected on the start island
    pub fn in_pickup_zone(&self, z: f32) -> bool {
        z <= self.start_z + 0.01
    }

    /// Still collecting, short of the gap entry
    pub fn before_entry(&self, z: f32) -> bool {
        z <= self.start_z - 0.2
    }

    /// Near either island edge, where there is ground to drop blocks on
    pub fn in_ground_zone(&self, z: f32, margin: f32) -> bool {
        z <= self.start_z + margin || z >= self.end_z - margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_match_classic_layout() {
        let config = GameConfig::default();
        assert_eq!(config.first_frontier_z(), 21);
        assert_relative_eq!(config.ground_y(), 0.6);
        assert_relative_eq!(config.race.spawn_z(), -10.0);
        assert_relative_eq!(config.race.goal_radius(), 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_gap() {
        let mut config = GameConfig::default();
        config.race.gap_end_z = 10.0;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_negative_scatter() {
        let mut config = GameConfig::default();
        config.bump.drop_scatter = -1.0;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        config.bump.drop_scatter = f32::NAN;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        config.bump.drop_scatter = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_timestep() {
        let mut config = GameConfig::default();
        config.engine.fixed_timestep = -1.0;
        assert!(matches!(config.validate(), Err(AppError::Engine(_))));
    }

    #[test]
    fn test_gap_zones() {
        let gap = GapSpan::new(20.0, 70.0);
        assert!(gap.in_pickup_zone(20.01));
        assert!(!gap.in_pickup_zone(20.02));
        assert!(gap.in_build_zone(19.0));
        assert!(!gap.in_build_zone(70.5));
        assert!(gap.before_entry(19.8));
        assert!(!gap.before_entry(19.9));
        assert!(gap.in_ground_zone(20.05, 0.05));
        assert!(!gap.in_ground_zone(45.0, 0.05));
        assert!(gap.in_ground_zone(69.95, 0.05));
    }

    #[test]
    fn test_sample_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/race.toml");
        let config = GameConfig::load_from_file(path).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawner.seed, Some(2024));
        assert_eq!(config.engine.max_frames, Some(7200));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let path = std::env::temp_dir().join("bridge_race_partial_config.toml");
        std::fs::write(&path, "[race]\ngap_end_z = 60.0\n\n[spawner]\nseed = 7\n").unwrap();

        let config = GameConfig::load_from_file(&path).unwrap();
        assert_relative_eq!(config.race.gap_end_z, 60.0);
        assert_relative_eq!(config.race.gap_start_z, 20.0);
        assert_eq!(config.spawner.seed, Some(7));
        assert_eq!(config.spawner.initial_count, 14);

        std::fs::remove_file(&path).ok();
    }
}
