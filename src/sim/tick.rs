//! Fixed timestep simulation tick
//!
//! Core game loop that advances the arena by one step.

use glam::Vec2;

use super::combat::resolve_projectile_hits;
use super::powerup::update_power_ups;
use super::projectile::advance_projectiles;
use super::state::{GameEvent, GamePhase, GameState};
use super::tank::update_player;
use super::wave::spawn_wave;

/// Input intent for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement directions
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire held
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start / restart
    pub confirm: bool,
    /// Back to menu
    pub cancel: bool,
    /// Pointer position in arena coordinates (aim mode)
    pub pointer: Option<Vec2>,
}

impl TickInput {
    /// Clear one-shot presses after a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        self.pause = false;
        self.confirm = false;
        self.cancel = false;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Menu => {
            if input.confirm {
                state.setup();
            }
            return;
        }
        GamePhase::GameOver => {
            if input.confirm {
                state.setup();
            } else if input.cancel {
                state.phase = GamePhase::Menu;
            }
            return;
        }
        GamePhase::Paused => {
            if input.cancel {
                state.phase = GamePhase::Menu;
            } else if input.pause {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Playing => {
            if input.cancel {
                state.phase = GamePhase::Menu;
                return;
            }
            if input.pause {
                state.phase = GamePhase::Paused;
                return;
            }
        }
    }

    state.time_ticks += 1;
    let now = state.time_ticks;

    // Reverts first, so a stat never outlives its timer by a tick
    state.effects.expire(&mut state.player, now);

    let aim_mode = state.config.aim_mode;
    if let Some(shell) = update_player(
        &mut state.player,
        input,
        aim_mode,
        &state.obstacles,
        &mut state.particles,
    ) {
        state.projectiles.push(shell);
        state.events.push(GameEvent::ShotFired { by_player: true });
    }

    for enemy in &mut state.enemies {
        if let Some(shell) = enemy.update(&state.player, Some(state.obstacles.as_slice()), &mut state.rng) {
            state.projectiles.push(shell);
            state.events.push(GameEvent::ShotFired { by_player: false });
        }
    }

    advance_projectiles(&mut state.projectiles);
    resolve_projectile_hits(state);
    update_power_ups(state);
    update_visuals(state);

    // Deferred removals
    state.projectiles.retain(|p| p.alive);
    state.enemies.retain(|e| e.tank.alive);
    state.obstacles.retain(|o| o.alive);

    if !state.player.alive {
        end_game(state);
    } else if state.enemies.is_empty() {
        spawn_wave(state);
    }
}

/// Age explosions and trail puffs
fn update_visuals(state: &mut GameState) {
    state.explosions.retain_mut(|e| {
        e.ttl = e.ttl.saturating_sub(1);
        e.ttl > 0
    });
    state.particles.retain_mut(|p| {
        p.pos += p.vel;
        p.size *= 0.95;
        p.ttl = p.ttl.saturating_sub(1);
        p.ttl > 0
    });
}

/// Switch to game over and settle the high score
fn end_game(state: &mut GameState) {
    let new_high_score = state.score > state.high_score;
    if new_high_score {
        state.high_score = state.score;
    }
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver {
        score: state.score,
        high_score: state.high_score,
        new_high_score,
    });
    log::info!(
        "Game over at wave {}: score {} (high {}{})",
        state.wave_number,
        state.score,
        state.high_score,
        if new_high_score { ", new record" } else { "" }
    );
}
