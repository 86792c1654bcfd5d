//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each collection)
//! - No rendering, file or platform dependencies

pub mod collision;
pub mod combat;
pub mod entity;
pub mod powerup;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tank;
pub mod tick;
pub mod wave;

pub use collision::{hits_obstacle, move_unconstrained, move_with_collision};
pub use combat::resolve_projectile_hits;
pub use entity::{Body, Facing};
pub use powerup::{ActiveEffects, EffectKind, PowerUp, PowerUpKind, TimedEffect};
pub use projectile::{Faction, Projectile, ProjectileStyle};
pub use snapshot::{FrameSnapshot, Renderer};
pub use state::{
    AimMode, Explosion, GameEvent, GamePhase, GameState, Obstacle, Particle, SimConfig,
};
pub use tank::{Enemy, EnemyClass, EnemyStats, Tank};
pub use tick::{TickInput, tick};
pub use wave::{SpawnEdge, spawn_wave, wave_size};
