//! Wave director
//!
//! Each wave adds one more enemy than the last. Classes are drawn by weight,
//! edges uniformly; every enemy starts 100 units in from its edge facing the
//! middle of the arena.

use glam::Vec2;
use rand::Rng;

use super::entity::Facing;
use super::state::{GameEvent, GameState};
use super::tank::{Enemy, EnemyClass};
use crate::consts::*;

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl SpawnEdge {
    pub const ALL: [SpawnEdge; 4] = [SpawnEdge::Top, SpawnEdge::Bottom, SpawnEdge::Left, SpawnEdge::Right];

    /// Heading that points into the arena from this edge
    pub fn inward(self) -> Facing {
        match self {
            SpawnEdge::Top => Facing::Down,
            SpawnEdge::Bottom => Facing::Up,
            SpawnEdge::Left => Facing::Right,
            SpawnEdge::Right => Facing::Left,
        }
    }

    /// Spawn point for a unit roll `along` the edge
    pub fn spawn_point(self, along: f32) -> Vec2 {
        let along = along.clamp(0.0, 1.0);
        let x = SPAWN_EDGE_OFFSET + along * (ARENA_WIDTH - 2.0 * SPAWN_EDGE_OFFSET);
        let y = SPAWN_EDGE_OFFSET + along * (ARENA_HEIGHT - 2.0 * SPAWN_EDGE_OFFSET);
        match self {
            SpawnEdge::Top => Vec2::new(x, ARENA_HEIGHT - SPAWN_EDGE_OFFSET),
            SpawnEdge::Bottom => Vec2::new(x, SPAWN_EDGE_OFFSET),
            SpawnEdge::Left => Vec2::new(SPAWN_EDGE_OFFSET, y),
            SpawnEdge::Right => Vec2::new(ARENA_WIDTH - SPAWN_EDGE_OFFSET, y),
        }
    }
}

/// Number of enemies in wave `wave_number`
pub fn wave_size(base_enemies_per_wave: u32, wave_number: u32) -> u32 {
    base_enemies_per_wave + wave_number
}

/// Roll one enemy: weighted class, uniform edge, random point along it.
/// Fire timers are staggered so a wave does not volley in unison.
pub fn roll_enemy(rng: &mut impl Rng) -> Enemy {
    let class = EnemyClass::from_roll(rng.random::<f64>());
    let edge = SpawnEdge::ALL[rng.random_range(0..SpawnEdge::ALL.len())];
    let pos = edge.spawn_point(rng.random::<f32>());
    let wander = rng.random_range(WANDER_TICKS_MIN..=WANDER_TICKS_MAX);
    let interval = class.stats().fire_interval;
    let fire = rng.random_range(interval / 2..=interval);
    Enemy::new(class, pos, edge.inward(), wander, fire)
}

/// Advance to the next wave and spawn its enemies
pub fn spawn_wave(state: &mut GameState) {
    state.wave_number += 1;
    let count = wave_size(state.config.base_enemies_per_wave, state.wave_number);
    for _ in 0..count {
        let enemy = roll_enemy(&mut state.rng);
        state.enemies.push(enemy);
    }
    state.events.push(GameEvent::WaveStarted {
        wave: state.wave_number,
        enemies: count,
    });
    log::info!("Wave {}: {} enemies", state.wave_number, count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SimConfig;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_wave_two_has_five_enemies() {
        let mut state = GameState::new(1, SimConfig::default());
        state.wave_number = 1;
        spawn_wave(&mut state);
        assert_eq!(state.wave_number, 2);
        assert_eq!(state.enemies.len(), 5);
    }

    #[test]
    fn test_spawn_points_inside_inset_and_face_inward() {
        for edge in SpawnEdge::ALL {
            for along in [0.0, 0.5, 1.0] {
                let p = edge.spawn_point(along);
                assert_eq!(crate::clamp_to_arena(p), p);
                let to_centre = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0) - p;
                assert!(edge.inward().dir().dot(to_centre) > 0.0);
            }
        }
        assert_eq!(SpawnEdge::Top.spawn_point(0.0), Vec2::new(SPAWN_EDGE_OFFSET, 500.0));
        assert_eq!(SpawnEdge::Left.spawn_point(1.0), Vec2::new(SPAWN_EDGE_OFFSET, 500.0));
    }

    #[test]
    fn test_class_mix_roughly_follows_weights() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            match roll_enemy(&mut rng).class {
                EnemyClass::Normal => counts[0] += 1,
                EnemyClass::Fast => counts[1] += 1,
                EnemyClass::Heavy => counts[2] += 1,
            }
        }
        assert!((5_600..6_400).contains(&counts[0]), "{counts:?}");
        assert!((2_200..2_800).contains(&counts[1]), "{counts:?}");
        assert!((1_200..1_800).contains(&counts[2]), "{counts:?}");
    }

    #[test]
    fn test_rolled_enemy_has_class_stats() {
        let mut rng = Pcg32::seed_from_u64(8);
        for _ in 0..50 {
            let enemy = roll_enemy(&mut rng);
            let stats = enemy.class.stats();
            assert_eq!(enemy.tank.health, stats.health);
            assert_eq!(enemy.tank.speed_multiplier, stats.speed_multiplier);
            assert!(enemy.fire_timer <= stats.fire_interval);
            assert!(enemy.fire_timer >= stats.fire_interval / 2);
        }
    }
}
