//! Runners: movement, inventory and the stack of carried blocks
//!
//! The player and the bot share one `Runner` type. What differs is where the
//! per-frame movement intent comes from, captured by [`MoveIntentSource`].

use crate::color::BlockColor;
use crate::config::{GameConfig, GapSpan};
use race_engine::ecs::{Collider, Entity, Renderable, SceneEntity, Shape, World};
use race_engine::foundation::math::{utils, Transform, Vec3};
use race_engine::input::{InputManager, KeyCode};
use race_engine::physics::CollisionLayers;
use race_engine::spatial::SpatialQuery;

/// Where a runner's movement intent comes from each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveIntentSource {
    /// Held keys
    HumanInput,
    /// The reactive steering heuristic in [`crate::bot`]
    ReactiveAi,
}

/// Movement tuning for one runner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunnerParams {
    /// Walking speed (units per second)
    pub speed: f32,
    /// Upward velocity applied on jump
    pub jump_impulse: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
    /// Height above the feet that ground rays start from
    pub probe_offset: f32,
    /// Length of the ground check ray
    pub ground_probe_range: f32,
    /// Lane pull rate inside the gap
    pub lane_snap_rate: f32,
}

impl RunnerParams {
    /// Shared tuning from config with the given walking speed
    pub fn from_config(config: &GameConfig, speed: f32) -> Self {
        Self {
            speed,
            jump_impulse: config.runner.jump_impulse,
            gravity: config.runner.gravity,
            probe_offset: config.runner.probe_offset,
            ground_probe_range: config.runner.ground_probe_range,
            lane_snap_rate: config.runner.lane_snap_rate,
        }
    }
}

const BODY_SCALE: Vec3 = Vec3::new(1.0, 2.0, 1.0);
const STACK_BASE: f32 = 0.6;
const STACK_SPACING: f32 = 0.23;
const STACK_BACK: f32 = -0.35;
const STACK_MARKER_SCALE: Vec3 = Vec3::new(0.8, 0.25, 0.8);

/// A racer, either the player or the bot
#[derive(Debug)]
pub struct Runner {
    /// Feet position
    pub position: Vec3,
    /// Vertical speed (positive is up)
    pub vertical_velocity: f32,
    /// Facing in degrees about +Y
    pub yaw: f32,
    lane_x: f32,
    inventory: u32,
    next_bridge_z: i32,
    safe_z: Option<f32>,
    color: BlockColor,
    intent: MoveIntentSource,
    params: RunnerParams,
    grounded: bool,
    stack: Vec<Transform>,
    body: Option<Entity>,
    stack_entities: Vec<Entity>,
}

impl Runner {
    /// Create a runner standing at `position` with an empty inventory
    pub fn new(
        color: BlockColor,
        intent: MoveIntentSource,
        lane_x: f32,
        position: Vec3,
        first_frontier_z: i32,
        params: RunnerParams,
    ) -> Self {
        Self {
            position,
            vertical_velocity: 0.0,
            yaw: 0.0,
            lane_x,
            inventory: 0,
            next_bridge_z: first_frontier_z,
            safe_z: None,
            color,
            intent,
            params,
            grounded: false,
            stack: Vec::new(),
            body: None,
            stack_entities: Vec::new(),
        }
    }

    /// The human-controlled azure runner
    pub fn player(config: &GameConfig) -> Self {
        let lane_x = config.race.player_lane_x;
        Self::new(
            BlockColor::Azure,
            MoveIntentSource::HumanInput,
            lane_x,
            Vec3::new(lane_x, config.race.spawn_height, config.race.spawn_z()),
            config.first_frontier_z(),
            RunnerParams::from_config(config, config.runner.player_speed),
        )
    }

    /// The red bot
    pub fn bot(config: &GameConfig) -> Self {
        let lane_x = config.race.bot_lane_x;
        Self::new(
            BlockColor::Red,
            MoveIntentSource::ReactiveAi,
            lane_x,
            Vec3::new(lane_x, config.race.spawn_height, config.race.spawn_z()),
            config.first_frontier_z(),
            RunnerParams::from_config(config, config.runner.bot_speed),
        )
    }

    /// Blocks carried
    pub fn inventory(&self) -> u32 {
        self.inventory
    }

    /// Next integer z this runner may place a segment at
    pub fn next_bridge_z(&self) -> i32 {
        self.next_bridge_z
    }

    /// Z of the last segment this runner placed
    pub fn safe_z(&self) -> Option<f32> {
        self.safe_z
    }

    /// Lane the runner builds on
    pub fn lane_x(&self) -> f32 {
        self.lane_x
    }

    /// Identity color
    pub fn color(&self) -> BlockColor {
        self.color
    }

    /// Where movement intent comes from
    pub fn intent(&self) -> MoveIntentSource {
        self.intent
    }

    /// Whether the last ground check found a surface
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Scene entity of the runner's body, once spawned
    pub fn body(&self) -> Option<Entity> {
        self.body
    }

    /// Local transforms of the carried-block markers, bottom first
    pub fn stack_markers(&self) -> &[Transform] {
        &self.stack
    }

    /// Add carried blocks
    pub fn add_block(&mut self, count: u32) {
        self.inventory = self.inventory.saturating_add(count);
        self.rebuild_stack();
    }

    /// Remove carried blocks, stopping at zero
    pub fn consume_block(&mut self, count: u32) {
        self.inventory = self.inventory.saturating_sub(count);
        self.rebuild_stack();
    }

    fn rebuild_stack(&mut self) {
        self.stack = (0..self.inventory)
            .map(|i| {
                Transform::from_position_scale(
                    Vec3::new(0.0, STACK_BASE + i as f32 * STACK_SPACING, STACK_BACK),
                    STACK_MARKER_SCALE,
                )
            })
            .collect();
    }

    /// Move the frontier one unit forward
    pub fn advance_frontier(&mut self) {
        self.next_bridge_z += 1;
    }

    /// Remember a freshly placed segment as the fallback position
    pub fn record_placement(&mut self, z: f32) {
        self.safe_z = Some(self.safe_z.map_or(z, |safe| safe.max(z)));
    }

    /// Put the runner somewhere and stop its vertical motion
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.vertical_velocity = 0.0;
    }

    /// Shift the runner sideways without touching vertical motion
    pub fn nudge(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// One frame of walking, jumping, gravity and lane pull
    pub fn physics_update<S: SpatialQuery + ?Sized>(
        &mut self,
        move_direction: Vec3,
        jump: bool,
        delta_time: f32,
        gap: GapSpan,
        spatial: &S,
    ) {
        if let Some(direction) = move_direction.try_normalize(f32::EPSILON) {
            self.position += direction * self.params.speed * delta_time;
            self.yaw = utils::yaw_degrees_from_direction(direction);
        }

        let probe_origin = self.position + Vec3::new(0.0, self.params.probe_offset, 0.0);
        let ground = spatial.probe_down(
            probe_origin,
            self.params.ground_probe_range,
            CollisionLayers::WALKABLE,
            self.body,
        );
        self.grounded = ground.is_some();

        match ground {
            Some(_) if jump => self.vertical_velocity = self.params.jump_impulse,
            Some(hit) => {
                self.vertical_velocity = self.vertical_velocity.max(0.0);
                // Settle onto the surface unless still rising from a jump
                if self.vertical_velocity <= 0.0 {
                    self.position.y = hit.point.y;
                }
            }
            None => self.vertical_velocity -= self.params.gravity * delta_time,
        }
        self.position.y += self.vertical_velocity * delta_time;

        if gap.in_lane_snap_zone(self.position.z) {
            let t = (delta_time * self.params.lane_snap_rate).min(1.0);
            self.position.x = utils::lerp(self.position.x, self.lane_x, t);
        }
    }

    fn body_transform(&self) -> Transform {
        let mut transform = Transform::from_position_scale(self.position, BODY_SCALE);
        transform.set_yaw_degrees(self.yaw);
        transform
    }

    /// Create the body entity in the scene
    pub fn spawn_body(&mut self, world: &mut World) {
        if self.body.is_some() {
            return;
        }
        let body = world.spawn(
            SceneEntity::new(self.body_transform())
                .with_renderable(Renderable::new(Shape::Cube, self.color.color()))
                .with_collider(
                    Collider::cuboid(Vec3::new(0.5, 1.0, 0.5), CollisionLayers::RUNNER)
                        .with_offset(Vec3::new(0.0, 1.0, 0.0)),
                ),
        );
        self.body = Some(body);
        self.sync_to_world(world);
    }

    /// Mirror position, facing and carried stack into the scene
    pub fn sync_to_world(&mut self, world: &mut World) {
        let Some(body) = self.body else {
            return;
        };
        let body_transform = self.body_transform();
        if let Some(scene_entity) = world.get_mut(body) {
            scene_entity.transform = body_transform.clone();
        }

        while self.stack_entities.len() > self.stack.len() {
            if let Some(marker) = self.stack_entities.pop() {
                world.destroy(marker);
            }
        }
        while self.stack_entities.len() < self.stack.len() {
            let marker = world.spawn(
                SceneEntity::new(Transform::identity())
                    .with_renderable(Renderable::new(Shape::Cube, self.color.color())),
            );
            self.stack_entities.push(marker);
        }
        for (marker, local) in self.stack_entities.iter().zip(&self.stack) {
            if let Some(scene_entity) = world.get_mut(*marker) {
                scene_entity.transform = body_transform.combine(local);
            }
        }
    }

    /// Remove the body and stack markers from the scene
    pub fn despawn(&mut self, world: &mut World) {
        for marker in self.stack_entities.drain(..) {
            world.destroy(marker);
        }
        if let Some(body) = self.body.take() {
            world.destroy(body);
        }
    }
}

/// Movement direction and jump request from the held keys
///
/// WASD and the arrow keys move, Space jumps. The direction is not
/// normalized; [`Runner::physics_update`] does that.
pub fn human_intent(input: &InputManager) -> (Vec3, bool) {
    let axis = |positive: [KeyCode; 2], negative: [KeyCode; 2]| {
        f32::from(u8::from(input.any_held(&positive))) - f32::from(u8::from(input.any_held(&negative)))
    };
    let direction = Vec3::new(
        axis([KeyCode::D, KeyCode::Right], [KeyCode::A, KeyCode::Left]),
        0.0,
        axis([KeyCode::W, KeyCode::Up], [KeyCode::S, KeyCode::Down]),
    );
    (direction, input.is_held(KeyCode::Space))
}
