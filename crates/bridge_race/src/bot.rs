//! Bot steering
//!
//! The bot keeps no plan between frames: every frame it looks at where it is,
//! what it carries and which of its blocks are lying around, and picks a
//! direction.

use crate::collectable::Collectable;
use crate::config::{GameConfig, GapSpan};
use crate::runner::Runner;
use race_engine::foundation::math::{utils, Vec3};

/// Fixed inputs of the steering heuristic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringParams {
    /// The gap between the islands
    pub gap: GapSpan,
    /// Z the bot heads for once it has crossed the entry margin
    pub goal_z: f32,
    /// Stop collecting at this many carried blocks
    pub inventory_cap: u32,
    /// How far before the gap the bot waits when it has nothing to collect
    pub staging_offset: f32,
}

impl SteeringParams {
    /// Build from config
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            gap: config.race.gap(),
            goal_z: config.race.goal_z,
            inventory_cap: config.runner.bot_inventory_cap,
            staging_offset: config.runner.bot_staging_offset,
        }
    }
}

/// Horizontal unit direction the bot wants to walk in, or zero
pub fn ai_move(bot: &Runner, collectables: &[Collectable], params: &SteeringParams) -> Vec3 {
    let target = if params.gap.before_entry(bot.position.z) {
        let wanted = (bot.inventory() < params.inventory_cap)
            .then(|| nearest_of_color(bot, collectables))
            .flatten();
        wanted.unwrap_or_else(|| {
            Vec3::new(bot.lane_x(), 0.5, params.gap.start_z - params.staging_offset)
        })
    } else {
        Vec3::new(bot.lane_x(), 0.5, params.goal_z)
    };

    log::trace!(
        "bot at ({:.2}, {:.2}) steering to ({:.2}, {:.2})",
        bot.position.x,
        bot.position.z,
        target.x,
        target.z
    );
    utils::planar_direction(bot.position, target)
}

fn nearest_of_color(bot: &Runner, collectables: &[Collectable]) -> Option<Vec3> {
    collectables
        .iter()
        .filter(|block| block.color == bot.color())
        .map(|block| block.position)
        .min_by(|a, b| {
            utils::planar_distance(bot.position, *a).total_cmp(&utils::planar_distance(bot.position, *b))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BlockColor;
    use approx::assert_relative_eq;
    use race_engine::ecs::World;

    fn setup() -> (GameConfig, Runner, World) {
        let config = GameConfig::default();
        let bot = Runner::bot(&config);
        (config, bot, World::new())
    }

    #[test]
    fn test_targets_nearest_block_of_own_color() {
        let (config, mut bot, mut world) = setup();
        bot.position = Vec3::new(0.0, 0.6, 0.0);
        let blocks = vec![
            Collectable::spawn(&mut world, BlockColor::Azure, Vec3::new(1.0, 0.5, 0.0)),
            Collectable::spawn(&mut world, BlockColor::Red, Vec3::new(0.0, 0.5, -5.0)),
            Collectable::spawn(&mut world, BlockColor::Red, Vec3::new(0.0, 0.5, 8.0)),
        ];

        let direction = ai_move(&bot, &blocks, &SteeringParams::from_config(&config));
        assert_relative_eq!(direction, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_full_inventory_heads_to_staging_point() {
        let (config, mut bot, mut world) = setup();
        bot.position = Vec3::new(2.0, 0.6, 0.0);
        bot.add_block(6);
        let blocks = vec![Collectable::spawn(&mut world, BlockColor::Red, Vec3::new(-5.0, 0.5, 0.0))];

        let direction = ai_move(&bot, &blocks, &SteeringParams::from_config(&config));
        assert_relative_eq!(direction, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_reaching_staging_point_switches_to_crossing() {
        let (config, mut bot, _) = setup();
        let params = SteeringParams::from_config(&config);
        bot.position = Vec3::new(2.0, 0.6, config.race.gap_start_z - params.staging_offset);

        // Past the entry margin the bot only walks towards the goal
        assert!(!params.gap.before_entry(bot.position.z));
        assert_relative_eq!(ai_move(&bot, &[], &params), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_zero_direction_at_target() {
        let (config, mut bot, _) = setup();
        bot.position = Vec3::new(2.0, 3.0, config.race.goal_z);
        assert_relative_eq!(
            ai_move(&bot, &[], &SteeringParams::from_config(&config)),
            Vec3::zeros()
        );
    }
}
