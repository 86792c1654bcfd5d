//! Tanks: the player and the three enemy classes
//!
//! Both sides share [`Tank`] (health, heading, weapon cooldown, stat
//! multipliers). Enemies wrap it with an [`EnemyClass`] and the timers that
//! drive their wander/aim/fire loop.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{hits_obstacle, move_unconstrained, move_with_collision};
use super::entity::{Body, Facing};
use super::projectile::{Faction, Projectile, ProjectileStyle};
use super::state::{AimMode, Obstacle, Particle, palette};
use super::tick::TickInput;
use crate::consts::*;

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyClass {
    Normal,
    Fast,
    Heavy,
}

/// Fixed per-class tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub speed_multiplier: f32,
    pub health: i32,
    pub damage_multiplier: f32,
    /// Ticks between shot attempts
    pub fire_interval: u32,
    /// Awarded on kill
    pub score: u64,
    /// Relative spawn probability
    pub spawn_weight: f64,
    /// Hull and explosion color
    pub color: u32,
    pub shell: ProjectileStyle,
}

const ENEMY_STATS: [EnemyStats; 3] = [
    // Normal
    EnemyStats {
        speed_multiplier: 1.0,
        health: 2,
        damage_multiplier: 1.0,
        fire_interval: BASE_ENEMY_FIRE_INTERVAL,
        score: 100,
        spawn_weight: 0.60,
        color: 0xD2_32_32,
        shell: ProjectileStyle { color: 0xFF_50_50, radius: 4.0 },
    },
    // Fast
    EnemyStats {
        speed_multiplier: 1.6,
        health: 1,
        damage_multiplier: 1.0,
        fire_interval: BASE_ENEMY_FIRE_INTERVAL / 2,
        score: 150,
        spawn_weight: 0.25,
        color: 0xFF_A0_1E,
        shell: ProjectileStyle { color: 0xFF_C8_3C, radius: 3.0 },
    },
    // Heavy
    EnemyStats {
        speed_multiplier: 0.6,
        health: 4,
        damage_multiplier: 2.0,
        fire_interval: BASE_ENEMY_FIRE_INTERVAL * 2,
        score: 250,
        spawn_weight: 0.15,
        color: 0x78_14_50,
        shell: ProjectileStyle { color: 0xC8_3C_C8, radius: 6.0 },
    },
];

impl EnemyClass {
    pub const ALL: [EnemyClass; 3] = [EnemyClass::Normal, EnemyClass::Fast, EnemyClass::Heavy];

    pub fn stats(self) -> &'static EnemyStats {
        match self {
            EnemyClass::Normal => &ENEMY_STATS[0],
            EnemyClass::Fast => &ENEMY_STATS[1],
            EnemyClass::Heavy => &ENEMY_STATS[2],
        }
    }

    /// Weighted pick from a uniform roll in `[0, 1)`
    pub fn from_roll(roll: f64) -> EnemyClass {
        let mut acc = 0.0;
        for class in Self::ALL {
            acc += class.stats().spawn_weight;
            if roll < acc {
                return class;
            }
        }
        // Weights sum to 1.0; float slack lands on the last class
        EnemyClass::Heavy
    }
}

/// Shared tank state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub body: Body,
    pub alive: bool,
    pub health: i32,
    pub max_health: i32,
    pub facing: Facing,
    /// Ticks until the weapon is ready; fire only at 0
    pub shoot_cooldown: u32,
    pub speed_multiplier: f32,
    pub damage_multiplier: f32,
    /// Cooldown applied after each shot
    pub fire_delay: u32,
}

impl Tank {
    fn new(pos: Vec2, health: i32, facing: Facing, damage_multiplier: f32, fire_delay: u32) -> Self {
        Self {
            body: Body::square(pos, TANK_HALF_SIZE),
            alive: true,
            health,
            max_health: health,
            facing,
            shoot_cooldown: 0,
            speed_multiplier: 1.0,
            damage_multiplier,
            fire_delay,
        }
    }

    /// Fresh player tank facing up
    pub fn player(pos: Vec2) -> Self {
        Self::new(pos, PLAYER_MAX_HEALTH, Facing::Up, 1.0, PLAYER_FIRE_DELAY)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// Subtract health. Returns true only on the hit that destroys the tank;
    /// further damage to a dead tank is ignored.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = (self.health - amount).max(0);
        if self.health == 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Restore health up to the maximum
    pub fn heal(&mut self, amount: i32) {
        if self.alive {
            self.health = (self.health + amount).min(self.max_health);
        }
    }

    /// Count the weapon cooldown down by one tick
    pub fn tick_cooldown(&mut self) {
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    pub fn can_fire(&self) -> bool {
        self.alive && self.shoot_cooldown == 0
    }

    /// Damage carried by this tank's shells: floor of the multiplied base, at least 1
    pub fn projectile_damage(&self) -> i32 {
        ((PROJECTILE_BASE_DAMAGE * self.damage_multiplier).floor() as i32).max(1)
    }

    /// Fire a shell toward `facing` if the weapon is ready
    pub fn fire(&mut self, facing: Facing, faction: Faction, style: ProjectileStyle) -> Option<Projectile> {
        if !self.can_fire() {
            return None;
        }
        self.shoot_cooldown = self.fire_delay;
        Some(Projectile::spawn(
            self.pos(),
            facing,
            self.projectile_damage(),
            faction,
            style,
        ))
    }
}

/// Player shell appearance
pub const PLAYER_SHELL: ProjectileStyle = ProjectileStyle {
    color: palette::SHELL,
    radius: 4.0,
};

/// Apply one tick of player intent: heading, movement and firing.
///
/// Returns the shell fired this tick, if any. Movement leaves a trail puff
/// behind the tank.
pub fn update_player(
    player: &mut Tank,
    input: &TickInput,
    aim_mode: AimMode,
    obstacles: &[Obstacle],
    particles: &mut Vec<Particle>,
) -> Option<Projectile> {
    if !player.alive {
        return None;
    }
    player.tick_cooldown();

    let mut axis = Vec2::ZERO;
    let mut held_facing = None;
    if input.left {
        axis.x -= 1.0;
        held_facing = Some(Facing::Left);
    }
    if input.right {
        axis.x += 1.0;
        held_facing = Some(Facing::Right);
    }
    if input.up {
        axis.y += 1.0;
        held_facing = Some(Facing::Up);
    }
    if input.down {
        axis.y -= 1.0;
        held_facing = Some(Facing::Down);
    }

    match (aim_mode, input.pointer) {
        (AimMode::Pointer, Some(pointer)) => {
            let offset = pointer - player.pos();
            if offset != Vec2::ZERO {
                player.facing = Facing::from_angle(offset.y.atan2(offset.x));
            }
        }
        _ => {
            if let Some(facing) = held_facing {
                player.facing = facing;
            }
        }
    }

    let delta = axis * PLAYER_SPEED * player.speed_multiplier;
    // A blocked full displacement rejects the whole move
    if delta != Vec2::ZERO && !hits_obstacle(&player.body.translated(delta), obstacles) {
        let moved = move_with_collision(&mut player.body, delta.x, delta.y, obstacles);
        if moved != Vec2::ZERO {
            emit_trail(player, moved, particles);
        }
    }

    if input.fire {
        return player.fire(player.facing, Faction::Player, PLAYER_SHELL);
    }
    None
}

/// Dust puff behind a moving tank
fn emit_trail(tank: &Tank, moved: Vec2, particles: &mut Vec<Particle>) {
    if particles.len() >= MAX_PARTICLES {
        particles.remove(0);
    }
    let back = -moved.normalize_or_zero();
    particles.push(Particle {
        pos: tank.pos() + back * tank.body.half.x,
        vel: back * 0.5,
        color: palette::TRAIL,
        ttl: TRAIL_TTL,
        size: 3.0,
    });
}

/// An enemy tank and its behaviour timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub tank: Tank,
    pub class: EnemyClass,
    /// Ticks until a new random heading
    pub wander_timer: u32,
    /// Ticks until the next shot attempt
    pub fire_timer: u32,
}

impl Enemy {
    pub fn new(class: EnemyClass, pos: Vec2, facing: Facing, wander_timer: u32, fire_timer: u32) -> Self {
        let stats = class.stats();
        let mut tank = Tank::new(pos, stats.health, facing, stats.damage_multiplier, ENEMY_FIRE_DELAY);
        tank.speed_multiplier = stats.speed_multiplier;
        Self {
            tank,
            class,
            wander_timer,
            fire_timer,
        }
    }

    /// Movement speed in units per tick
    pub fn speed(&self) -> f32 {
        BASE_ENEMY_SPEED * self.tank.speed_multiplier
    }

    /// One tick of wander, move, aim and fire.
    ///
    /// With `obstacles` set to `None` the tank moves unconstrained (arena
    /// clamp only). The aim heading is used for the shot alone; the wander
    /// heading is left untouched so movement continues next tick.
    pub fn update(
        &mut self,
        target: &Tank,
        obstacles: Option<&[Obstacle]>,
        rng: &mut impl Rng,
    ) -> Option<Projectile> {
        if !self.tank.alive {
            return None;
        }
        self.tank.tick_cooldown();

        self.wander_timer = self.wander_timer.saturating_sub(1);
        if self.wander_timer == 0 {
            self.tank.facing = Facing::ALL[rng.random_range(0..Facing::ALL.len())];
            self.wander_timer = rng.random_range(WANDER_TICKS_MIN..=WANDER_TICKS_MAX);
        }

        let delta = self.tank.facing.dir() * self.speed();
        match obstacles {
            Some(obstacles) => move_with_collision(&mut self.tank.body, delta.x, delta.y, obstacles),
            None => move_unconstrained(&mut self.tank.body, delta.x, delta.y),
        };

        self.fire_timer = self.fire_timer.saturating_sub(1);
        if self.fire_timer == 0 && target.alive {
            let aim = Facing::toward(target.pos() - self.tank.pos());
            let shell = self.tank.fire(aim, Faction::Enemy, self.class.stats().shell);
            // A cooling weapon leaves the timer expired so the next tick retries
            if shell.is_some() {
                self.fire_timer = self.class.stats().fire_interval;
            }
            return shell;
        }
        None
    }
}
