//! Read-only frame view for presentation layers
//!
//! A renderer never touches `GameState` directly; it is handed a snapshot
//! borrowing every collection for the duration of one frame.

use glam::Vec2;
use serde::Serialize;

use super::powerup::{ActiveEffects, PowerUp};
use super::projectile::Projectile;
use super::state::{Explosion, GamePhase, GameState, Obstacle, Particle};
use super::tank::{Enemy, Tank};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FrameSnapshot<'a> {
    pub arena_size: Vec2,
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub wave_number: u32,
    /// Live enemies left in the wave, for the HUD
    pub enemies_remaining: usize,
    pub time_ticks: u64,
    pub player: &'a Tank,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub obstacles: &'a [Obstacle],
    pub power_ups: &'a [PowerUp],
    pub effects: &'a ActiveEffects,
    pub explosions: &'a [Explosion],
    pub particles: &'a [Particle],
}

impl<'a> FrameSnapshot<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        Self {
            arena_size: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            phase: state.phase,
            score: state.score,
            high_score: state.high_score,
            wave_number: state.wave_number,
            enemies_remaining: state.enemies_remaining(),
            time_ticks: state.time_ticks,
            player: &state.player,
            enemies: &state.enemies,
            projectiles: &state.projectiles,
            obstacles: &state.obstacles,
            power_ups: &state.power_ups,
            effects: &state.effects,
            explosions: &state.explosions,
            particles: &state.particles,
        }
    }

    /// Enemies still on the field
    pub fn live_enemies(&self) -> impl Iterator<Item = &'a Enemy> + 'a {
        self.enemies.iter().filter(|e| e.tank.alive)
    }
}

/// Presentation backend fed once per frame
pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SimConfig;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(3, SimConfig::default());
        state.setup();
        let frame = FrameSnapshot::capture(&state);
        assert_eq!(frame.arena_size, Vec2::new(800.0, 600.0));
        assert_eq!(frame.phase, GamePhase::Playing);
        assert_eq!(frame.enemies.len(), state.enemies.len());
        assert_eq!(frame.obstacles.len(), state.obstacles.len());
        assert_eq!(frame.live_enemies().count(), 4);
        assert_eq!(frame.enemies_remaining, 4);
    }

    #[test]
    fn test_enemies_remaining_skips_destroyed() {
        let mut state = GameState::new(3, SimConfig::default());
        state.setup();
        // Killed this tick, not yet removed
        state.enemies[0].tank.take_damage(100);
        let frame = FrameSnapshot::capture(&state);
        assert_eq!(frame.enemies.len(), 4);
        assert_eq!(frame.enemies_remaining, 3);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut state = GameState::new(3, SimConfig::default());
        state.setup();
        let json = serde_json::to_value(FrameSnapshot::capture(&state)).unwrap();
        assert_eq!(json["wave_number"], 1);
        assert_eq!(json["enemies"].as_array().map(Vec::len), Some(4));
    }

    struct CountingRenderer(usize);

    impl Renderer for CountingRenderer {
        fn draw(&mut self, frame: &FrameSnapshot<'_>) {
            self.0 += frame.projectiles.len() + frame.enemies.len();
        }
    }

    #[test]
    fn test_renderer_receives_frame() {
        let mut state = GameState::new(3, SimConfig::default());
        state.setup();
        let mut renderer = CountingRenderer(0);
        renderer.draw(&FrameSnapshot::capture(&state));
        assert_eq!(renderer.0, 4);
    }
}
