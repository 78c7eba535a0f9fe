//! Bridge building
//!
//! Every frame a runner is near or inside the gap, [`try_place_bridge_step`]
//! turns one carried block into the next segment of its lane. Segments climb
//! a little with every step, so a bridge is a shallow ramp.

use crate::color::BlockColor;
use crate::config::{GameConfig, GapSpan};
use crate::runner::Runner;
use race_engine::ecs::{Collider, Entity, Renderable, SceneEntity, Shape, World};
use race_engine::foundation::math::{Transform, Vec3};
use race_engine::physics::CollisionLayers;
use race_engine::spatial::SpatialQuery;

/// One placed bridge segment
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeSegment {
    /// Segment center
    pub position: Vec3,
    /// Runner the segment belongs to
    pub owner: BlockColor,
    /// Scene entity of the segment
    pub entity: Entity,
}

/// The segments one runner has placed, in placement order
#[derive(Debug)]
pub struct BridgeLane {
    owner: BlockColor,
    segments: Vec<BridgeSegment>,
}

impl BridgeLane {
    /// Empty lane for `owner`
    pub fn new(owner: BlockColor) -> Self {
        Self {
            owner,
            segments: Vec::new(),
        }
    }

    /// Owner color
    pub fn owner(&self) -> BlockColor {
        self.owner
    }

    /// Placed segments
    pub fn segments(&self) -> &[BridgeSegment] {
        &self.segments
    }

    /// Number of placed segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether nothing has been placed yet
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Furthest segment along the race direction
    pub fn furthest(&self) -> Option<&BridgeSegment> {
        self.segments
            .iter()
            .max_by(|a, b| a.position.z.total_cmp(&b.position.z))
    }

    /// Whether a segment already sits within `tolerance` of `target` on x and z
    pub fn has_segment_near(&self, target: Vec3, tolerance: f32) -> bool {
        self.segments.iter().any(|segment| {
            (segment.position.x - target.x).abs() < tolerance
                && (segment.position.z - target.z).abs() < tolerance
        })
    }

    fn place(&mut self, world: &mut World, position: Vec3, thickness: f32) {
        let entity = world.spawn(
            SceneEntity::new(Transform::from_position_scale(
                position,
                Vec3::new(1.0, thickness, 1.0),
            ))
            .with_renderable(Renderable::new(Shape::Cube, self.owner.color().tint(-0.2)))
            .with_collider(Collider::cuboid(
                Vec3::new(0.5, thickness / 2.0, 0.5),
                CollisionLayers::BRIDGE,
            )),
        );
        self.segments.push(BridgeSegment {
            position,
            owner: self.owner,
            entity,
        });
    }

    /// Remove every segment from the scene
    pub fn despawn_all(&mut self, world: &mut World) {
        for segment in self.segments.drain(..) {
            world.destroy(segment.entity);
        }
    }
}

/// Fixed inputs of bridge placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BridgeParams {
    /// The gap between the islands
    pub gap: GapSpan,
    /// Center height of the step at index zero
    pub block_y: f32,
    /// Height gained per step
    pub step_rise: f32,
    /// Vertical thickness of a segment
    pub segment_thickness: f32,
    /// Height above the feet the build ray starts from
    pub probe_offset: f32,
    /// Length of the build ray
    pub probe_range: f32,
    /// Duplicate detection radius on x and z
    pub duplicate_tolerance: f32,
}

impl BridgeParams {
    /// Build from config
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            gap: config.race.gap(),
            block_y: config.bridge.block_y,
            step_rise: config.bridge.step_rise,
            segment_thickness: config.bridge.segment_thickness,
            probe_offset: config.runner.probe_offset,
            probe_range: config.bridge.build_probe_range,
            duplicate_tolerance: config.bridge.duplicate_tolerance,
        }
    }

    /// Center of the segment at integer `z` on `lane_x`
    pub fn segment_position(&self, lane_x: f32, z: i32) -> Vec3 {
        let step_index = (z as f32 - (self.gap.start_z - 1.0)).trunc();
        Vec3::new(lane_x, self.block_y + step_index * self.step_rise, z as f32)
    }
}

/// What a bridge step did this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BridgeStep {
    /// Not near the gap
    OutOfZone,
    /// Nothing to do
    Idle,
    /// A new segment now stands at `z`
    Placed {
        /// Integer z of the segment
        z: i32,
    },
    /// The lane already had a segment at `z`; the frontier moved on anyway
    SkippedDuplicate {
        /// Integer z that was skipped
        z: i32,
    },
    /// Out of blocks over open air: the runner was put back on its bridge
    Stalled {
        /// Z of the segment the runner was put on
        z: f32,
    },
}

/// Place the next segment, or rescue a runner that ran out of blocks
pub fn try_place_bridge_step(
    runner: &mut Runner,
    lane: &mut BridgeLane,
    world: &mut World,
    params: &BridgeParams,
) -> BridgeStep {
    if !params.gap.in_build_zone(runner.position.z) {
        return BridgeStep::OutOfZone;
    }

    let probe_origin = runner.position + Vec3::new(0.0, params.probe_offset, 0.0);
    let under_air = world
        .probe_down(
            probe_origin,
            params.probe_range,
            CollisionLayers::WALKABLE,
            runner.body(),
        )
        .is_none();

    let frontier = runner.next_bridge_z();
    if runner.inventory() > 0 && (under_air || runner.position.z >= frontier as f32) {
        let target = params.segment_position(runner.lane_x(), frontier);
        let step = if lane.has_segment_near(target, params.duplicate_tolerance) {
            log::debug!("{} lane already has a segment at z={frontier}", lane.owner());
            BridgeStep::SkippedDuplicate { z: frontier }
        } else {
            lane.place(world, target, params.segment_thickness);
            runner.consume_block(1);
            runner.record_placement(target.z);
            log::debug!(
                "{} placed segment at z={frontier} (y={:.2}), {} blocks left",
                lane.owner(),
                target.y,
                runner.inventory()
            );
            BridgeStep::Placed { z: frontier }
        };
        runner.advance_frontier();
        return step;
    }

    if runner.inventory() == 0 && under_air && runner.safe_z().is_some() {
        if let Some(last) = lane.furthest() {
            let snap = Vec3::new(runner.lane_x(), last.position.y + 1.0, last.position.z);
            runner.teleport(snap);
            log::debug!("{} out of blocks, back on segment z={}", lane.owner(), snap.z);
            return BridgeStep::Stalled { z: snap.z };
        }
    }

    BridgeStep::Idle
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn setup() -> (BridgeParams, Runner, BridgeLane, World) {
        let config = GameConfig::default();
        let runner = Runner::player(&config);
        let lane = BridgeLane::new(runner.color());
        (BridgeParams::from_config(&config), runner, lane, World::new())
    }

    #[test]
    fn test_segment_heights_climb() {
        let (params, ..) = setup();
        let first = params.segment_position(-2.0, 21);
        assert_relative_eq!(first, Vec3::new(-2.0, 0.56, 21.0), epsilon = 1e-5);
        let later = params.segment_position(-2.0, 30);
        assert_relative_eq!(later.y, 0.5 + 11.0 * 0.03, epsilon = 1e-5);
    }

    #[test]
    fn test_step_index_is_whole_steps() {
        let mut config = GameConfig::default();
        config.race.gap_start_z = 20.5;
        let params = BridgeParams::from_config(&config);
        assert_relative_eq!(params.segment_position(-2.0, 21).y, 0.53, epsilon = 1e-5);
        assert_relative_eq!(params.segment_position(-2.0, 23).y, 0.59, epsilon = 1e-5);
    }

    #[test]
    fn test_out_of_zone_does_nothing() {
        let (params, mut runner, mut lane, mut world) = setup();
        runner.add_block(3);
        runner.position = Vec3::new(-2.0, 0.6, 10.0);
        assert_eq!(
            try_place_bridge_step(&mut runner, &mut lane, &mut world, &params),
            BridgeStep::OutOfZone
        );
        assert!(lane.is_empty());
        assert_eq!(runner.inventory(), 3);
    }

    #[test]
    fn test_places_over_air_and_consumes_block() {
        let (params, mut runner, mut lane, mut world) = setup();
        runner.add_block(2);
        runner.position = Vec3::new(-2.0, 0.6, 20.6);

        let step = try_place_bridge_step(&mut runner, &mut lane, &mut world, &params);
        assert_eq!(step, BridgeStep::Placed { z: 21 });
        assert_eq!(runner.inventory(), 1);
        assert_eq!(runner.next_bridge_z(), 22);
        assert_eq!(runner.safe_z(), Some(21.0));
        assert_eq!(lane.len(), 1);
        assert!(world.is_alive(lane.segments()[0].entity));
    }

    #[test]
    fn test_idle_on_ground_behind_frontier() {
        let (params, mut runner, mut lane, mut world) = setup();
        world.spawn(
            SceneEntity::new(Transform::from_position(Vec3::new(0.0, 0.1, 0.0))).with_collider(
                Collider::cuboid(Vec3::new(20.0, 0.5, 20.5), CollisionLayers::GROUND),
            ),
        );
        runner.add_block(1);
        runner.position = Vec3::new(-2.0, 0.6, 19.5);

        assert_eq!(
            try_place_bridge_step(&mut runner, &mut lane, &mut world, &params),
            BridgeStep::Idle
        );
        assert_eq!(runner.next_bridge_z(), 21);
    }

    #[test]
    fn test_never_duplicates_a_step() {
        let (params, mut runner, mut lane, mut world) = setup();
        runner.add_block(3);
        runner.position = Vec3::new(-2.0, 0.6, 20.6);
        try_place_bridge_step(&mut runner, &mut lane, &mut world, &params);

        // Knocked back: pretend the frontier was never advanced past z=21
        let mut rewound = Runner::player(&GameConfig::default());
        rewound.add_block(1);
        rewound.position = Vec3::new(-2.0, 0.7, 21.0);
        let step = try_place_bridge_step(&mut rewound, &mut lane, &mut world, &params);

        assert_eq!(step, BridgeStep::SkippedDuplicate { z: 21 });
        assert_eq!(rewound.inventory(), 1);
        assert_eq!(rewound.next_bridge_z(), 22);
        assert_eq!(lane.len(), 1);
    }

    #[test]
    fn test_stall_snaps_onto_furthest_segment() {
        let (params, mut runner, mut lane, mut world) = setup();
        runner.add_block(2);
        runner.position = Vec3::new(-2.0, 0.6, 20.6);
        try_place_bridge_step(&mut runner, &mut lane, &mut world, &params);
        runner.position.z = 22.0;
        try_place_bridge_step(&mut runner, &mut lane, &mut world, &params);
        assert_eq!(runner.inventory(), 0);

        // Walked off the end of the bridge
        runner.position = Vec3::new(-1.7, 0.2, 22.8);
        runner.vertical_velocity = -3.0;
        let step = try_place_bridge_step(&mut runner, &mut lane, &mut world, &params);

        assert_eq!(step, BridgeStep::Stalled { z: 22.0 });
        assert_relative_eq!(runner.position, Vec3::new(-2.0, 1.59, 22.0), epsilon = 1e-5);
        assert_relative_eq!(runner.vertical_velocity, 0.0);
        assert_eq!(runner.next_bridge_z(), 23);
    }

    #[test]
    fn test_empty_handed_without_bridge_is_idle() {
        let (params, mut runner, mut lane, mut world) = setup();
        runner.position = Vec3::new(-2.0, 0.0, 25.0);
        assert_eq!(
            try_place_bridge_step(&mut runner, &mut lane, &mut world, &params),
            BridgeStep::Idle
        );
    }

    #[test]
    fn test_despawn_all_clears_scene() {
        let (params, mut runner, mut lane, mut world) = setup();
        runner.add_block(1);
        runner.position = Vec3::new(-2.0, 0.6, 20.6);
        try_place_bridge_step(&mut runner, &mut lane, &mut world, &params);
        lane.despawn_all(&mut world);
        assert!(world.is_empty());
        assert!(lane.is_empty());
    }
}
