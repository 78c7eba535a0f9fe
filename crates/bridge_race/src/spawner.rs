//! Periodic block spawner
//!
//! Spawning is driven by a self-rescheduling [`SpawnEvent`] on an engine
//! [`EventQueue`]. The queue is drained at the start of every frame, so a
//! spawn never interleaves with runner updates.

use crate::collectable::Collectable;
use crate::color::BlockColor;
use crate::config::GameConfig;
use race_engine::ecs::World;
use race_engine::events::EventQueue;
use race_engine::foundation::math::Vec3;
use rand::Rng;

/// Scheduled spawner work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnEvent {
    /// Drop one random block on the start island
    DropBlock,
}

/// Drops blocks of random color on the start island
#[derive(Debug)]
pub struct BlockSpawner {
    queue: EventQueue<SpawnEvent>,
    interval: f64,
    initial_count: u32,
    half_range: i32,
    block_y: f32,
}

impl BlockSpawner {
    /// Spawner for the configured start island
    pub fn new(config: &GameConfig) -> Self {
        Self {
            queue: EventQueue::new(),
            interval: f64::from(config.spawner.interval),
            initial_count: config.spawner.initial_count,
            half_range: ((config.race.start_size / 2.0) as i32 - 1).max(0),
            block_y: config.bridge.block_y,
        }
    }

    /// Drop the opening set of blocks and schedule the first periodic spawn
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        world: &mut World,
        collectables: &mut Vec<Collectable>,
        rng: &mut R,
    ) {
        for _ in 0..self.initial_count {
            collectables.push(self.spawn_block(world, rng));
        }
        self.queue.update_time(now);
        self.queue.post_in(self.interval, SpawnEvent::DropBlock);
        log::debug!("spawner started with {} blocks", self.initial_count);
    }

    /// Run any spawns that are due at race time `now`
    ///
    /// Returns how many blocks were dropped.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        world: &mut World,
        collectables: &mut Vec<Collectable>,
        rng: &mut R,
    ) -> usize {
        self.queue.update_time(now);
        let mut spawned = 0;
        for event in self.queue.drain() {
            match event {
                SpawnEvent::DropBlock => {
                    let block = self.spawn_block(world, rng);
                    log::debug!(
                        "spawned {} block at ({:.0}, {:.0})",
                        block.color,
                        block.position.x,
                        block.position.z
                    );
                    collectables.push(block);
                    spawned += 1;
                    self.queue.post_in(self.interval, SpawnEvent::DropBlock);
                }
            }
        }
        spawned
    }

    /// Drop nothing more
    pub fn stop(&mut self) {
        self.queue.clear();
    }

    fn spawn_block<R: Rng + ?Sized>(&self, world: &mut World, rng: &mut R) -> Collectable {
        let x = rng.gen_range(-self.half_range..=self.half_range);
        let z = rng.gen_range(-self.half_range..=self.half_range);
        Collectable::spawn(
            world,
            BlockColor::random(rng),
            Vec3::new(x as f32, self.block_y, z as f32),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (BlockSpawner, World, Vec<Collectable>, StdRng) {
        let spawner = BlockSpawner::new(&GameConfig::default());
        (spawner, World::new(), Vec::new(), StdRng::seed_from_u64(5))
    }

    #[test]
    fn test_start_drops_initial_blocks_on_island() {
        let (mut spawner, mut world, mut blocks, mut rng) = setup();
        spawner.start(0.0, &mut world, &mut blocks, &mut rng);

        assert_eq!(blocks.len(), 14);
        assert_eq!(world.len(), 14);
        for block in &blocks {
            assert!(block.position.x.abs() <= 19.0 && block.position.z.abs() <= 19.0);
            assert_eq!(block.position.x.fract(), 0.0);
            assert_eq!(block.position.y, 0.5);
        }
    }

    #[test]
    fn test_periodic_spawns_follow_interval() {
        let (mut spawner, mut world, mut blocks, mut rng) = setup();
        spawner.start(0.0, &mut world, &mut blocks, &mut rng);

        assert_eq!(spawner.update(3.0, &mut world, &mut blocks, &mut rng), 0);
        assert_eq!(spawner.update(3.5, &mut world, &mut blocks, &mut rng), 1);
        assert_eq!(spawner.update(6.0, &mut world, &mut blocks, &mut rng), 0);
        assert_eq!(spawner.update(7.0, &mut world, &mut blocks, &mut rng), 1);
        assert_eq!(blocks.len(), 16);
    }

    #[test]
    fn test_stop_cancels_schedule() {
        let (mut spawner, mut world, mut blocks, mut rng) = setup();
        spawner.start(0.0, &mut world, &mut blocks, &mut rng);
        spawner.stop();
        assert_eq!(spawner.update(100.0, &mut world, &mut blocks, &mut rng), 0);
    }
}
