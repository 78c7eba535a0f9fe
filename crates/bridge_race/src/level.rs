//! The race level
//!
//! `RaceLevel` owns everything in a race: both runners and their bridge
//! lanes, the blocks on the ground, the island scenery and the HUD. One call
//! to [`RaceLevel::update`] is one frame, in a fixed order: player, bot,
//! bump, HUD, win check.

use crate::bot::{ai_move, SteeringParams};
use crate::bridge::{try_place_bridge_step, BridgeLane, BridgeParams, BridgeStep};
use crate::collectable::Collectable;
use crate::collision::{BumpOutcome, CollisionParams, CollisionResolver};
use crate::config::{GameConfig, GapSpan};
use crate::hud::{Hud, Winner};
use crate::runner::{MoveIntentSource, Runner};
use crate::spawner::BlockSpawner;
use race_engine::ecs::{Collider, Color, Entity, Renderable, SceneEntity, Shape, World};
use race_engine::foundation::math::{utils, Transform, Vec3};
use race_engine::physics::CollisionLayers;
use race_engine::ui::UiManager;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Movement request for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Desired horizontal direction, any length
    pub move_direction: Vec3,
    /// Jump if grounded
    pub jump: bool,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Player bridge step
    pub player_step: BridgeStep,
    /// Bot bridge step
    pub bot_step: BridgeStep,
    /// Bump check result
    pub bump: BumpOutcome,
    /// Blocks dropped by the spawner
    pub spawned: usize,
    /// Set on the frame a winner is decided
    pub new_winner: Option<Winner>,
}

#[derive(Debug, Clone, Copy)]
struct LevelParams {
    gap: GapSpan,
    bridge: BridgeParams,
    steering: SteeringParams,
    goal_center: Vec3,
    goal_radius: f32,
}

/// A race in progress
#[derive(Debug)]
pub struct RaceLevel {
    player: Runner,
    bot: Runner,
    player_lane: BridgeLane,
    bot_lane: BridgeLane,
    collectables: Vec<Collectable>,
    scenery: Vec<Entity>,
    resolver: CollisionResolver,
    spawner: BlockSpawner,
    hud: Option<Hud>,
    rng: StdRng,
    params: LevelParams,
    winner: Option<Winner>,
    elapsed: f64,
}

impl RaceLevel {
    /// Build the islands, runners and HUD and drop the opening blocks
    pub fn new(config: &GameConfig, world: &mut World, ui: &mut UiManager) -> Self {
        let mut rng = match config.spawner.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let scenery = build_scenery(config, world);

        let mut player = Runner::player(config);
        let mut bot = Runner::bot(config);
        player.spawn_body(world);
        bot.spawn_body(world);

        let mut collectables = Vec::new();
        let mut spawner = BlockSpawner::new(config);
        spawner.start(0.0, world, &mut collectables, &mut rng);

        log::info!(
            "Race ready: gap {}..{}, goal at z={}, {} blocks on the island",
            config.race.gap_start_z,
            config.race.gap_end_z,
            config.race.goal_z,
            collectables.len()
        );

        Self {
            player_lane: BridgeLane::new(player.color()),
            bot_lane: BridgeLane::new(bot.color()),
            player,
            bot,
            collectables,
            scenery,
            resolver: CollisionResolver::new(CollisionParams::from_config(config)),
            spawner,
            hud: Some(Hud::new(ui)),
            rng,
            params: LevelParams {
                gap: config.race.gap(),
                bridge: BridgeParams::from_config(config),
                steering: SteeringParams::from_config(config),
                goal_center: Vec3::new(0.0, 0.0, config.race.goal_z),
                goal_radius: config.race.goal_radius(),
            },
            winner: None,
            elapsed: 0.0,
        }
    }

    /// Advance the race by one frame
    pub fn update(
        &mut self,
        world: &mut World,
        ui: &mut UiManager,
        input: FrameInput,
        delta_time: f32,
    ) -> FrameReport {
        self.elapsed += f64::from(delta_time);
        let spawned = self
            .spawner
            .update(self.elapsed, world, &mut self.collectables, &mut self.rng);

        let player_step = step_runner(
            &mut self.player,
            &mut self.player_lane,
            &mut self.collectables,
            world,
            &self.resolver,
            &self.params,
            input,
            delta_time,
        );
        let bot_step = step_runner(
            &mut self.bot,
            &mut self.bot_lane,
            &mut self.collectables,
            world,
            &self.resolver,
            &self.params,
            input,
            delta_time,
        );

        let bump = self.resolver.handle_bump(
            &mut self.player,
            &mut self.bot,
            &mut self.collectables,
            world,
            &mut self.rng,
            self.elapsed,
        );
        self.player.sync_to_world(world);
        self.bot.sync_to_world(world);

        if let Some(hud) = &self.hud {
            hud.update_counters(ui, self.player.inventory(), self.bot.inventory());
        }

        let new_winner = self.check_win();
        if let (Some(winner), Some(hud)) = (new_winner, self.hud.as_mut()) {
            hud.show_banner(ui, winner);
        }

        FrameReport {
            player_step,
            bot_step,
            bump,
            spawned,
            new_winner,
        }
    }

    /// Decide the winner if nobody has won yet
    ///
    /// The player is checked before the bot. Returns the winner only on the
    /// call that decides it.
    pub fn check_win(&mut self) -> Option<Winner> {
        if self.winner.is_some() {
            return None;
        }
        let arrived = |runner: &Runner| {
            utils::distance(runner.position, self.params.goal_center) < self.params.goal_radius
        };
        let winner = if arrived(&self.player) {
            Winner::Player
        } else if arrived(&self.bot) {
            Winner::Bot
        } else {
            return None;
        };

        self.winner = Some(winner);
        log::info!("{} after {:.1}s", winner.banner_text(), self.elapsed);
        Some(winner)
    }

    /// Remove every entity and HUD element the race created
    pub fn teardown(&mut self, world: &mut World, ui: &mut UiManager) {
        self.spawner.stop();
        for block in self.collectables.drain(..) {
            block.despawn(world);
        }
        self.player_lane.despawn_all(world);
        self.bot_lane.despawn_all(world);
        self.player.despawn(world);
        self.bot.despawn(world);
        for entity in self.scenery.drain(..) {
            world.destroy(entity);
        }
        if let Some(hud) = self.hud.take() {
            hud.remove(ui);
        }
        log::info!("Race torn down after {:.1}s", self.elapsed);
    }

    /// The human runner
    pub fn player(&self) -> &Runner {
        &self.player
    }

    /// The human runner, mutably
    pub fn player_mut(&mut self) -> &mut Runner {
        &mut self.player
    }

    /// The bot runner
    pub fn bot(&self) -> &Runner {
        &self.bot
    }

    /// The bot runner, mutably
    pub fn bot_mut(&mut self) -> &mut Runner {
        &mut self.bot
    }

    /// The player's bridge
    pub fn player_lane(&self) -> &BridgeLane {
        &self.player_lane
    }

    /// The bot's bridge
    pub fn bot_lane(&self) -> &BridgeLane {
        &self.bot_lane
    }

    /// Blocks waiting on the ground
    pub fn collectables(&self) -> &[Collectable] {
        &self.collectables
    }

    /// Remove all blocks from the ground
    pub fn clear_collectables(&mut self, world: &mut World) {
        for block in self.collectables.drain(..) {
            block.despawn(world);
        }
    }

    /// Winner, once decided
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    /// Race time in seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// The HUD, until teardown
    pub fn hud(&self) -> Option<&Hud> {
        self.hud.as_ref()
    }
}

fn intent_for(
    runner: &Runner,
    input: FrameInput,
    collectables: &[Collectable],
    steering: &SteeringParams,
) -> FrameInput {
    match runner.intent() {
        MoveIntentSource::HumanInput => input,
        MoveIntentSource::ReactiveAi => FrameInput {
            move_direction: ai_move(runner, collectables, steering),
            jump: false,
        },
    }
}

fn step_runner(
    runner: &mut Runner,
    lane: &mut BridgeLane,
    collectables: &mut Vec<Collectable>,
    world: &mut World,
    resolver: &CollisionResolver,
    params: &LevelParams,
    input: FrameInput,
    delta_time: f32,
) -> BridgeStep {
    let intent = intent_for(runner, input, collectables, &params.steering);
    runner.physics_update(intent.move_direction, intent.jump, delta_time, params.gap, &*world);
    resolver.try_pickup_blocks(runner, collectables, world);
    let step = try_place_bridge_step(runner, lane, world, &params.bridge);
    resolver.reset_if_fall(runner);
    step
}

fn build_scenery(config: &GameConfig, world: &mut World) -> Vec<Entity> {
    let ground_y = config.ground_y();
    let start_half = config.race.start_size / 2.0;
    let goal_half = config.race.goal_size / 2.0;
    let grass = Color::rgb(0.35, 0.7, 0.35);

    let mut scenery = vec![
        spawn_platform(world, Vec3::new(0.0, ground_y, 0.0), Vec3::new(start_half, 0.5, start_half), grass),
        spawn_platform(
            world,
            Vec3::new(0.0, ground_y, config.race.goal_z),
            Vec3::new(goal_half, 0.5, goal_half),
            grass,
        ),
    ];

    // Ledge joining the island edge to the near face of the first segment
    let gap_start = config.race.gap_start_z;
    let ledge_end = config.first_frontier_z() as f32 - 0.5;
    if ledge_end > gap_start {
        let half_depth = (ledge_end - gap_start) / 2.0;
        scenery.push(spawn_platform(
            world,
            Vec3::new(0.0, ground_y, gap_start + half_depth),
            Vec3::new(start_half, 0.5, half_depth),
            grass.tint(-0.1),
        ));
    }

    scenery.push(world.spawn(
        SceneEntity::new(Transform::from_position_scale(
            Vec3::new(0.0, 2.0, config.race.goal_z),
            Vec3::new(2.0, 4.0, 2.0),
        ))
        .with_renderable(Renderable::new(Shape::Cube, Color::rgb(1.0, 0.85, 0.0))),
    ));
    scenery
}

/// Ground box whose top face sits at `top.y`
fn spawn_platform(world: &mut World, top: Vec3, half_extents: Vec3, color: Color) -> Entity {
    let center = top - Vec3::new(0.0, half_extents.y, 0.0);
    world.spawn(
        SceneEntity::new(Transform::from_position_scale(center, half_extents * 2.0))
            .with_renderable(Renderable::new(Shape::Cube, color))
            .with_collider(Collider::cuboid(half_extents, CollisionLayers::GROUND)),
    )
}
