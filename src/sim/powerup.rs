//! Power-ups and timed stat effects
//!
//! Pickups decay after `POWERUP_TTL` ticks. Timed kinds write a stat on the
//! player and register a revert entry keyed to an absolute tick; clearing the
//! entries on reset guarantees no stale revert reaches a new player.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use super::state::{GameEvent, GameState};
use super::tank::Tank;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Health,
    Speed,
    Damage,
    RapidFire,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Health,
        PowerUpKind::Speed,
        PowerUpKind::Damage,
        PowerUpKind::RapidFire,
    ];

    /// The timed effect this kind starts, if any
    pub fn effect(self) -> Option<EffectKind> {
        match self {
            PowerUpKind::Health => None,
            PowerUpKind::Speed => Some(EffectKind::Speed),
            PowerUpKind::Damage => Some(EffectKind::Damage),
            PowerUpKind::RapidFire => Some(EffectKind::RapidFire),
        }
    }
}

/// A pickup lying in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    /// Ticks until it despawns
    pub ttl: u32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            body: Body::square(pos, POWERUP_HALF_SIZE),
            kind,
            ttl: POWERUP_TTL,
        }
    }
}

/// Stat modifications that expire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Speed,
    Damage,
    RapidFire,
}

impl EffectKind {
    pub fn duration_ticks(self) -> u64 {
        match self {
            EffectKind::Speed => SPEED_BOOST_TICKS,
            EffectKind::Damage => DAMAGE_BOOST_TICKS,
            EffectKind::RapidFire => RAPID_FIRE_TICKS,
        }
    }

    fn apply(self, player: &mut Tank) {
        match self {
            EffectKind::Speed => player.speed_multiplier = SPEED_BOOST,
            EffectKind::Damage => player.damage_multiplier = DAMAGE_BOOST,
            EffectKind::RapidFire => player.fire_delay = RAPID_FIRE_DELAY,
        }
    }

    fn revert(self, player: &mut Tank) {
        match self {
            EffectKind::Speed => player.speed_multiplier = 1.0,
            EffectKind::Damage => player.damage_multiplier = 1.0,
            EffectKind::RapidFire => player.fire_delay = PLAYER_FIRE_DELAY,
        }
    }
}

/// A pending revert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub kind: EffectKind,
    pub expires_at_tick: u64,
}

/// Active power-up effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub timers: Vec<TimedEffect>,
}

impl ActiveEffects {
    /// Apply `kind` to the player at tick `now`. Re-applying a timed kind
    /// restarts its timer; magnitudes never stack.
    pub fn apply(&mut self, player: &mut Tank, kind: PowerUpKind, now: u64) {
        let Some(effect) = kind.effect() else {
            player.heal(HEALTH_PICKUP);
            return;
        };
        effect.apply(player);
        let expires_at_tick = now + effect.duration_ticks();
        match self.timers.iter_mut().find(|t| t.kind == effect) {
            Some(timer) => timer.expires_at_tick = expires_at_tick,
            None => self.timers.push(TimedEffect {
                kind: effect,
                expires_at_tick,
            }),
        }
    }

    /// Revert every effect due at or before `now`
    pub fn expire(&mut self, player: &mut Tank, now: u64) {
        self.timers.retain(|timer| {
            if timer.expires_at_tick <= now {
                timer.kind.revert(player);
                log::debug!("{:?} effect expired at tick {}", timer.kind, now);
                false
            } else {
                true
            }
        });
    }

    /// Ticks left on `kind`, if active
    pub fn remaining(&self, kind: EffectKind, now: u64) -> Option<u64> {
        self.timers
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.expires_at_tick.saturating_sub(now))
    }

    /// Drop all pending reverts
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

/// Uniformly random power-up kind
pub fn random_kind(rng: &mut impl Rng) -> PowerUpKind {
    PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())]
}

/// Roll `chance` and drop a random power-up at `pos` on success
pub fn maybe_drop(state: &mut GameState, pos: Vec2, chance: f64) {
    if state.rng.random_bool(chance) {
        let kind = random_kind(&mut state.rng);
        state.spawn_power_up(pos, kind);
    }
}

/// One tick of pickup bookkeeping: player collection, decay, and the
/// periodic forced spawn.
pub fn update_power_ups(state: &mut GameState) {
    let now = state.time_ticks;

    let player_body = state.player.body;
    let player_alive = state.player.alive;
    let mut collected = Vec::new();
    state.power_ups.retain_mut(|power_up| {
        if player_alive && power_up.body.overlaps(&player_body) {
            collected.push(power_up.kind);
            return false;
        }
        power_up.ttl = power_up.ttl.saturating_sub(1);
        power_up.ttl > 0
    });

    for kind in collected {
        state.effects.apply(&mut state.player, kind, now);
        state.events.push(GameEvent::PowerUpCollected { kind });
        log::debug!("Collected {:?} at tick {}", kind, now);
    }

    if now > 0 && now % POWERUP_SPAWN_INTERVAL == 0 {
        let pos = Vec2::new(
            state.rng.random_range(ARENA_INSET..=ARENA_WIDTH - ARENA_INSET),
            state.rng.random_range(ARENA_INSET..=ARENA_HEIGHT - ARENA_INSET),
        );
        let kind = random_kind(&mut state.rng);
        state.spawn_power_up(pos, kind);
    }
}
