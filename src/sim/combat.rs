//! Projectile hit resolution
//!
//! Runs once per tick after shells have advanced. Each live shell is tested
//! against obstacles first, then against the targets of the opposing faction.
//! A shell stops at its first hit. Destroyed entities are only flagged here;
//! the frame step removes them after every pass has finished.

use glam::Vec2;

use super::collision::first_obstacle_hit;
use super::powerup::maybe_drop;
use super::projectile::Faction;
use super::state::{GameEvent, GameState, palette, push_explosion};
use crate::consts::*;

/// Resolve every shell hit for this tick
pub fn resolve_projectile_hits(state: &mut GameState) {
    // Drops roll the RNG and grow `power_ups`; queue them until the pass ends
    let mut drops: Vec<(Vec2, f64)> = Vec::new();

    for i in 0..state.projectiles.len() {
        let shot = &mut state.projectiles[i];
        if !shot.alive {
            continue;
        }

        if let Some(idx) = first_obstacle_hit(&shot.body, &state.obstacles) {
            shot.alive = false;
            let obstacle = &mut state.obstacles[idx];
            if obstacle.take_damage(shot.damage) {
                let pos = obstacle.body.pos;
                state.score += OBSTACLE_SCORE;
                push_explosion(&mut state.explosions, pos, palette::BRICK, OBSTACLE_HALF_SIZE);
                state.events.push(GameEvent::ObstacleDestroyed { pos });
                drops.push((pos, OBSTACLE_DROP_CHANCE));
            }
            continue;
        }

        match shot.faction {
            Faction::Player => {
                let Some(enemy) = state
                    .enemies
                    .iter_mut()
                    .find(|e| e.tank.alive && e.tank.body.overlaps(&shot.body))
                else {
                    continue;
                };
                shot.alive = false;
                if enemy.tank.take_damage(shot.damage) {
                    let stats = enemy.class.stats();
                    let pos = enemy.tank.pos();
                    state.score += stats.score;
                    push_explosion(&mut state.explosions, pos, stats.color, TANK_HALF_SIZE * 1.5);
                    state.events.push(GameEvent::EnemyKilled {
                        class: enemy.class,
                        score: stats.score,
                    });
                    drops.push((pos, ENEMY_DROP_CHANCE));
                    log::debug!("{:?} enemy destroyed, score {}", enemy.class, state.score);
                }
            }
            Faction::Enemy => {
                let player = &mut state.player;
                if !player.alive || !player.body.overlaps(&shot.body) {
                    continue;
                }
                shot.alive = false;
                player.take_damage(shot.damage);
                if player.alive {
                    push_explosion(&mut state.explosions, shot.body.pos, palette::PLAYER_HIT, TANK_HALF_SIZE * 0.5);
                }
                state.events.push(GameEvent::PlayerHit {
                    health: player.health,
                });
            }
        }
    }

    for (pos, chance) in drops {
        maybe_drop(state, pos, chance);
    }
}
