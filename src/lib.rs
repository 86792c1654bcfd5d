//! Tank Arena - A top-down arcade tank shooter
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (movement, collisions, combat, waves, power-ups)
//! - `game`: Session shell (fixed-step accumulator, high-score persistence)
//! - `highscores`: Persisted single high score
//! - `settings`: JSON-backed player preferences
//! - `error`: Error type for persistence and config I/O

pub mod error;
pub mod game;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use error::{GameError, GameResult};
pub use game::Game;
pub use highscores::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
pub use settings::{AimMode, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Margin keeping tank centres inside the playfield
    pub const ARENA_INSET: f32 = 30.0;

    /// Tanks are 40x40
    pub const TANK_HALF_SIZE: f32 = 20.0;
    /// Player speed in units per tick
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_MAX_HEALTH: i32 = 5;
    /// Ticks between player shots
    pub const PLAYER_FIRE_DELAY: u32 = 15;
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 100.0;

    /// Enemy speed before the class multiplier, units per tick
    pub const BASE_ENEMY_SPEED: f32 = 2.0;
    /// Ticks between enemy shots for the normal class
    pub const BASE_ENEMY_FIRE_INTERVAL: u32 = 90;
    /// Enemy weapon cooldown (shared gate with the fire timer)
    pub const ENEMY_FIRE_DELAY: u32 = 20;
    pub const WANDER_TICKS_MIN: u32 = 30;
    pub const WANDER_TICKS_MAX: u32 = 90;

    /// Projectile speed in units per tick, all factions
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_BASE_DAMAGE: f32 = 1.0;

    /// Obstacles are 40x40 grid cells
    pub const OBSTACLE_HALF_SIZE: f32 = 20.0;
    pub const BRICK_HEALTH: i32 = 3;
    pub const OBSTACLE_COUNT: usize = 14;
    /// Share of obstacles that are destructible bricks
    pub const BRICK_RATIO: f64 = 0.65;

    /// Waves
    pub const BASE_ENEMIES_PER_WAVE: u32 = 3;
    /// Enemies spawn this far inward from their edge
    pub const SPAWN_EDGE_OFFSET: f32 = 100.0;

    /// Power-ups
    pub const POWERUP_HALF_SIZE: f32 = 12.0;
    pub const POWERUP_TTL: u32 = 300;
    pub const POWERUP_SPAWN_INTERVAL: u64 = 600;
    pub const OBSTACLE_DROP_CHANCE: f64 = 0.20;
    pub const ENEMY_DROP_CHANCE: f64 = 0.10;
    pub const SPEED_BOOST: f32 = 1.5;
    pub const SPEED_BOOST_TICKS: u64 = 10 * SIM_HZ as u64;
    pub const DAMAGE_BOOST: f32 = 2.0;
    pub const DAMAGE_BOOST_TICKS: u64 = 15 * SIM_HZ as u64;
    pub const RAPID_FIRE_DELAY: u32 = 5;
    pub const RAPID_FIRE_TICKS: u64 = 10 * SIM_HZ as u64;
    pub const HEALTH_PICKUP: i32 = 2;

    /// Scoring
    pub const OBSTACLE_SCORE: u64 = 10;

    /// Visual effects
    pub const EXPLOSION_TTL: u32 = 30;
    pub const MAX_EXPLOSIONS: usize = 64;
    pub const TRAIL_TTL: u32 = 20;
    pub const MAX_PARTICLES: usize = 256;
}

/// Clamp a tank centre to the playable area (arena minus inset)
#[inline]
pub fn clamp_to_arena(pos: Vec2) -> Vec2 {
    use consts::*;
    Vec2::new(
        pos.x.clamp(ARENA_INSET, ARENA_WIDTH - ARENA_INSET),
        pos.y.clamp(ARENA_INSET, ARENA_HEIGHT - ARENA_INSET),
    )
}

/// True if a point lies inside `[0, width] x [0, height]`
#[inline]
pub fn in_arena(pos: Vec2) -> bool {
    use consts::*;
    (0.0..=ARENA_WIDTH).contains(&pos.x) && (0.0..=ARENA_HEIGHT).contains(&pos.y)
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
