//! Pickups, runner-vs-runner bumps and fall recovery

use crate::collectable::Collectable;
use crate::color::BlockColor;
use crate::config::{GameConfig, GapSpan};
use crate::runner::Runner;
use race_engine::ecs::World;
use race_engine::foundation::math::{utils, Vec3};
use rand::Rng;

/// Fixed inputs of collision resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionParams {
    /// The gap between the islands
    pub gap: GapSpan,
    /// Pickup reach
    pub pickup_radius: f32,
    /// Minimum race time between bumps
    pub bump_cooldown: f64,
    /// Runners closer than this collide
    pub bump_radius: f32,
    /// How far the loser is shoved
    pub push_distance: f32,
    /// Upper bound on blocks lost per bump
    pub max_drop: u32,
    /// Horizontal scatter of dropped blocks
    pub drop_scatter: f32,
    /// Margin around the island edges that still counts as ground
    pub ground_zone_margin: f32,
    /// Height dropped blocks appear at
    pub block_y: f32,
    /// Runners below this are respawned
    pub fall_reset_y: f32,
    /// Respawn height
    pub respawn_y: f32,
    /// Respawn z
    pub respawn_z: f32,
}

impl CollisionParams {
    /// Build from config
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            gap: config.race.gap(),
            pickup_radius: config.runner.pickup_radius,
            bump_cooldown: f64::from(config.bump.cooldown),
            bump_radius: config.bump.radius,
            push_distance: config.bump.push_distance,
            max_drop: config.bump.max_drop,
            drop_scatter: config.bump.drop_scatter,
            ground_zone_margin: config.bump.ground_zone_margin,
            block_y: config.bridge.block_y,
            fall_reset_y: config.race.fall_reset_y,
            respawn_y: config.race.spawn_height,
            respawn_z: config.race.spawn_z(),
        }
    }
}

/// Result of a bump check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpOutcome {
    /// The last bump was too recent
    CoolingDown,
    /// The runners are not touching
    OutOfRange,
    /// Equal inventories, nobody loses anything
    Even,
    /// The loser has nothing to lose
    NothingToDrop,
    /// Blocks were knocked out of the loser's stack
    Resolved {
        /// Runner with the larger stack
        winner: BlockColor,
        /// Runner that lost blocks
        loser: BlockColor,
        /// Blocks taken from the loser
        dropped: u32,
        /// Blocks that landed on the ground as collectables
        spawned: u32,
    },
}

/// Collision bookkeeping for one race
#[derive(Debug)]
pub struct CollisionResolver {
    params: CollisionParams,
    last_bump: Option<f64>,
}

impl CollisionResolver {
    /// Resolver that has never seen a bump
    pub fn new(params: CollisionParams) -> Self {
        Self {
            params,
            last_bump: None,
        }
    }

    /// Race time of the last resolved bump
    pub fn last_bump(&self) -> Option<f64> {
        self.last_bump
    }

    /// Pick up at most one block of the runner's color within reach
    ///
    /// Only possible on the start island. Returns whether a block was taken.
    pub fn try_pickup_blocks(
        &self,
        runner: &mut Runner,
        collectables: &mut Vec<Collectable>,
        world: &mut World,
    ) -> bool {
        if !self.params.gap.in_pickup_zone(runner.position.z) {
            return false;
        }
        let Some(index) = collectables.iter().position(|block| {
            block.color == runner.color()
                && utils::distance(runner.position, block.position) < self.params.pickup_radius
        }) else {
            return false;
        };

        let block = collectables.remove(index);
        log::debug!(
            "{} picked up block at ({:.0}, {:.0})",
            runner.color(),
            block.position.x,
            block.position.z
        );
        block.despawn(world);
        runner.add_block(1);
        true
    }

    /// Resolve a collision between the two runners
    ///
    /// The runner with fewer blocks loses up to `max_drop` of them (at least
    /// one) and is pushed away. Lost blocks only reappear as collectables when
    /// the loser stands near an island edge; over the gap they are gone.
    pub fn handle_bump<R: Rng + ?Sized>(
        &mut self,
        first: &mut Runner,
        second: &mut Runner,
        collectables: &mut Vec<Collectable>,
        world: &mut World,
        rng: &mut R,
        now: f64,
    ) -> BumpOutcome {
        if self.last_bump.is_some_and(|last| now - last < self.params.bump_cooldown) {
            return BumpOutcome::CoolingDown;
        }
        if utils::distance(first.position, second.position) > self.params.bump_radius {
            return BumpOutcome::OutOfRange;
        }
        if first.inventory() == second.inventory() {
            return BumpOutcome::Even;
        }

        let (winner, loser) = if first.inventory() > second.inventory() {
            (first, second)
        } else {
            (second, first)
        };
        let difference = winner.inventory() - loser.inventory();
        let dropped = difference.max(1).min(self.params.max_drop).min(loser.inventory());
        if dropped == 0 {
            return BumpOutcome::NothingToDrop;
        }

        let mut spawned = 0;
        if self
            .params
            .gap
            .in_ground_zone(loser.position.z, self.params.ground_zone_margin)
        {
            let scatter = self.params.drop_scatter;
            for _ in 0..dropped {
                let position = Vec3::new(
                    loser.position.x + rng.gen_range(-scatter..=scatter),
                    self.params.block_y,
                    loser.position.z + rng.gen_range(-scatter..=scatter),
                );
                collectables.push(Collectable::spawn(world, loser.color(), position));
                spawned += 1;
            }
        }
        loser.consume_block(dropped);

        let push = utils::planar_direction(winner.position, loser.position);
        loser.nudge(push * self.params.push_distance);

        self.last_bump = Some(now);
        log::debug!(
            "bump: {} knocked {dropped} blocks off {} ({spawned} on the ground)",
            winner.color(),
            loser.color()
        );
        BumpOutcome::Resolved {
            winner: winner.color(),
            loser: loser.color(),
            dropped,
            spawned,
        }
    }

    /// Respawn a runner that fell into the gap
    ///
    /// Inventory, lane and bridge frontier are kept. Returns whether the
    /// runner was moved.
    pub fn reset_if_fall(&self, runner: &mut Runner) -> bool {
        if runner.position.y >= self.params.fall_reset_y {
            return false;
        }
        runner.teleport(Vec3::new(
            runner.lane_x(),
            self.params.respawn_y,
            self.params.respawn_z,
        ));
        log::debug!("{} fell and respawned", runner.color());
        true
    }
}
