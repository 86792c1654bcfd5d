//! Tank shells
//!
//! Shells travel orthogonally at a fixed speed and vanish on leaving the
//! arena or on their first hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Facing};
use crate::consts::*;
use crate::in_arena;

/// Which side fired a shell; decides what it can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Render metadata carried by a shell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileStyle {
    pub color: u32,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub vel: Vec2,
    pub damage: i32,
    pub faction: Faction,
    pub style: ProjectileStyle,
    pub alive: bool,
}

impl Projectile {
    /// New shell at `origin` heading along `facing`. Damage is clamped to at least 1.
    pub fn spawn(origin: Vec2, facing: Facing, damage: i32, faction: Faction, style: ProjectileStyle) -> Self {
        Self {
            body: Body::square(origin, style.radius),
            vel: facing.dir() * PROJECTILE_SPEED,
            damage: damage.max(1),
            faction,
            style,
            alive: true,
        }
    }

    /// Move one tick. Returns false once the shell has left the arena.
    pub fn advance(&mut self) -> bool {
        self.body.pos += self.vel;
        if !in_arena(self.body.pos) {
            self.alive = false;
        }
        self.alive
    }
}

/// Advance every shell and drop those that left the arena this tick
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>) {
    projectiles.retain_mut(|p| p.advance());
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const STYLE: ProjectileStyle = ProjectileStyle {
        color: 0xFFFFFF,
        radius: 4.0,
    };

    #[test]
    fn test_velocity_is_orthogonal() {
        for facing in Facing::ALL {
            let p = Projectile::spawn(Vec2::new(400.0, 300.0), facing, 1, Faction::Player, STYLE);
            assert_eq!(p.vel.length(), PROJECTILE_SPEED);
            assert!(p.vel.x == 0.0 || p.vel.y == 0.0);
            assert_eq!(p.vel.normalize(), facing.dir());
        }
    }

    #[test]
    fn test_damage_at_least_one() {
        let p = Projectile::spawn(Vec2::ZERO, Facing::Up, 0, Faction::Enemy, STYLE);
        assert_eq!(p.damage, 1);
    }

    #[test]
    fn test_removed_on_the_tick_it_leaves() {
        let mut shots = vec![
            Projectile::spawn(Vec2::new(ARENA_WIDTH - 2.0, 300.0), Facing::Right, 1, Faction::Player, STYLE),
            Projectile::spawn(Vec2::new(400.0, 300.0), Facing::Right, 1, Faction::Player, STYLE),
        ];
        advance_projectiles(&mut shots);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].body.pos, Vec2::new(400.0 + PROJECTILE_SPEED, 300.0));
    }

    #[test]
    fn test_edge_position_is_still_inside() {
        let mut shot = Projectile::spawn(Vec2::new(400.0, ARENA_HEIGHT - PROJECTILE_SPEED), Facing::Up, 1, Faction::Enemy, STYLE);
        assert!(shot.advance());
        assert!(!shot.advance());
    }

    proptest! {
        #[test]
        fn prop_outbound_shell_culled_within_one_tick_of_crossing(
            x in 0.0f32..=ARENA_WIDTH,
            y in 0.0f32..=ARENA_HEIGHT,
            dir in 0usize..4,
        ) {
            let facing = Facing::ALL[dir];
            let mut shots = vec![Projectile::spawn(Vec2::new(x, y), facing, 1, Faction::Player, STYLE)];
            let mut ticks = 0;
            while !shots.is_empty() {
                let before = shots[0].body.pos;
                advance_projectiles(&mut shots);
                ticks += 1;
                let after = before + facing.dir() * PROJECTILE_SPEED;
                // Still present means still inside
                prop_assert_eq!(shots.is_empty(), !in_arena(after));
                prop_assert!(ticks < 200);
            }
        }
    }
}
