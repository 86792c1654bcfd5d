//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. Nothing here
//! survives `setup()` except the seeded RNG stream and the high score.

use glam::Vec2;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use super::powerup::{ActiveEffects, PowerUp, PowerUpKind};
use super::projectile::Projectile;
use super::tank::{EnemyClass, Enemy, Tank};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation frozen
    Paused,
    /// Player destroyed, waiting for restart or menu
    GameOver,
}

/// How the player's turret heading is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AimMode {
    /// Facing follows the last held movement key
    #[default]
    Keyboard,
    /// Facing follows the pointer quadrant relative to the player
    Pointer,
}

/// Per-session gameplay knobs supplied by settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub aim_mode: AimMode,
    pub base_enemies_per_wave: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            aim_mode: AimMode::Keyboard,
            base_enemies_per_wave: BASE_ENEMIES_PER_WAVE,
        }
    }
}

/// A static arena block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: Body,
    pub destructible: bool,
    /// Only meaningful for destructible obstacles
    pub health: i32,
    pub alive: bool,
}

impl Obstacle {
    /// Indestructible wall
    pub fn steel(body: Body) -> Self {
        Self {
            body,
            destructible: false,
            health: 0,
            alive: true,
        }
    }

    /// Destructible wall with the given health
    pub fn brick(body: Body, health: i32) -> Self {
        Self {
            body,
            destructible: true,
            health,
            alive: true,
        }
    }

    /// Apply projectile damage. Returns true if this hit destroyed the obstacle.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.destructible || !self.alive {
            return false;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

/// Explosion flash (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub color: u32,
    pub radius: f32,
    pub ttl: u32,
}

/// A trail puff for visual effects (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub ttl: u32,
    pub size: f32,
}

/// Colors for visual-only effects
pub mod palette {
    pub const BRICK: u32 = 0xB5_5A_30;
    pub const PLAYER_HIT: u32 = 0xFF_F0_A0;
    pub const SHELL: u32 = 0xFF_E0_40;
    pub const TRAIL: u32 = 0x6E_5A_3C;
}

/// Push an explosion, dropping the oldest past the cap
pub fn push_explosion(explosions: &mut Vec<Explosion>, pos: Vec2, color: u32, radius: f32) {
    if explosions.len() >= MAX_EXPLOSIONS {
        explosions.remove(0);
    }
    explosions.push(Explosion {
        pos,
        color,
        radius,
        ttl: EXPLOSION_TTL,
    });
}

/// Things that happened during a tick, drained by audio/HUD collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveStarted { wave: u32, enemies: u32 },
    ShotFired { by_player: bool },
    EnemyKilled { class: EnemyClass, score: u64 },
    ObstacleDestroyed { pos: Vec2 },
    PlayerHit { health: i32 },
    PowerUpCollected { kind: PowerUpKind },
    GameOver { score: u64, high_score: u64, new_high_score: bool },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub config: SimConfig,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score known to the session, mirrored from persistence
    pub high_score: u64,
    /// Waves spawned so far this session (0 before the first wave)
    pub wave_number: u32,
    /// Simulation tick counter, reset by `setup`
    pub time_ticks: u64,
    pub player: Tank,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    /// Pending stat reverts
    pub effects: ActiveEffects,
    pub explosions: Vec<Explosion>,
    pub particles: Vec<Particle>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle state at the menu. Collections are empty until `setup`.
    pub fn new(seed: u64, config: SimConfig) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            phase: GamePhase::Menu,
            score: 0,
            high_score: 0,
            wave_number: 0,
            time_ticks: 0,
            player: Tank::player(player_start()),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            effects: ActiveEffects::default(),
            explosions: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Start a fresh session: wipe every collection, lay out the arena and
    /// spawn wave 1.
    pub fn setup(&mut self) {
        self.score = 0;
        self.wave_number = 0;
        self.time_ticks = 0;
        self.player = Tank::player(player_start());
        self.enemies.clear();
        self.projectiles.clear();
        self.obstacles.clear();
        self.power_ups.clear();
        self.effects.clear();
        self.explosions.clear();
        self.particles.clear();

        self.layout_obstacles();
        super::wave::spawn_wave(self);
        self.phase = GamePhase::Playing;

        log::info!(
            "New session: {} obstacles, high score {}",
            self.obstacles.len(),
            self.high_score
        );
    }

    /// Scatter obstacles over the interior grid, clear of the spawn lanes
    /// and the player start.
    fn layout_obstacles(&mut self) {
        let cells = obstacle_cells();
        let count = OBSTACLE_COUNT.min(cells.len());
        for i in index::sample(&mut self.rng, cells.len(), count) {
            let body = Body::square(cells[i], OBSTACLE_HALF_SIZE);
            let obstacle = if self.rng.random_bool(BRICK_RATIO) {
                Obstacle::brick(body, BRICK_HEALTH)
            } else {
                Obstacle::steel(body)
            };
            self.obstacles.push(obstacle);
        }
    }

    /// Live enemies left in the current wave
    pub fn enemies_remaining(&self) -> usize {
        self.enemies.iter().filter(|e| e.tank.alive).count()
    }

    /// Drop a power-up of `kind` at `pos`
    pub fn spawn_power_up(&mut self, pos: Vec2, kind: PowerUpKind) {
        self.power_ups.push(PowerUp::new(pos, kind));
    }
}

/// Player spawn point, bottom centre
pub fn player_start() -> Vec2 {
    Vec2::new(PLAYER_START_X, PLAYER_START_Y)
}

/// Centres of the cells obstacles may occupy
fn obstacle_cells() -> Vec<Vec2> {
    let cell = OBSTACLE_HALF_SIZE * 2.0;
    // Keep one cell clear of the enemy spawn lines on every side
    let min = SPAWN_EDGE_OFFSET + TANK_HALF_SIZE + cell;
    let max_x = ARENA_WIDTH - min;
    let max_y = ARENA_HEIGHT - min;

    let mut cells = Vec::new();
    let mut y = min + OBSTACLE_HALF_SIZE;
    while y + OBSTACLE_HALF_SIZE <= max_y {
        let mut x = min + OBSTACLE_HALF_SIZE;
        while x + OBSTACLE_HALF_SIZE <= max_x {
            cells.push(Vec2::new(x, y));
            x += cell;
        }
        y += cell;
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_menu() {
        let state = GameState::new(7, SimConfig::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.enemies.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.wave_number, 0);
    }

    #[test]
    fn test_setup_spawns_first_wave() {
        let mut state = GameState::new(7, SimConfig::default());
        state.setup();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.wave_number, 1);
        assert_eq!(state.enemies.len(), (BASE_ENEMIES_PER_WAVE + 1) as usize);
        assert_eq!(state.obstacles.len(), OBSTACLE_COUNT);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_obstacles_clear_of_player_and_each_other() {
        let mut state = GameState::new(99, SimConfig::default());
        state.setup();
        for (i, a) in state.obstacles.iter().enumerate() {
            assert!(!a.body.overlaps(&state.player.body));
            for b in &state.obstacles[i + 1..] {
                assert!(!a.body.overlaps(&b.body));
            }
        }
    }

    #[test]
    fn test_setup_clears_previous_session() {
        let mut state = GameState::new(3, SimConfig::default());
        state.setup();
        state.score = 1234;
        state.spawn_power_up(Vec2::new(50.0, 50.0), PowerUpKind::Speed);
        state.player.health = 1;
        state.setup();
        assert_eq!(state.score, 0);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(state.wave_number, 1);
    }

    #[test]
    fn test_steel_ignores_damage() {
        let mut steel = Obstacle::steel(Body::square(Vec2::ZERO, 20.0));
        assert!(!steel.take_damage(100));
        assert!(steel.alive);

        let mut brick = Obstacle::brick(Body::square(Vec2::ZERO, 20.0), 3);
        assert!(!brick.take_damage(2));
        assert!(brick.take_damage(1));
        assert!(!brick.alive);
        // Already destroyed: no second report
        assert!(!brick.take_damage(1));
    }
}
