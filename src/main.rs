//! Tank Arena entry point
//!
//! Headless native runner: loads settings, plays a session with a simple
//! autopilot at the fixed tick rate and reports the outcome. Presentation
//! layers drive `Game` the same way, feeding real input instead.

use tank_arena::consts::*;
use tank_arena::sim::{FrameSnapshot, GameEvent, GamePhase, TickInput};
use tank_arena::{FileHighScoreStore, Game, Settings};

/// Session length cap for the demo (five minutes of game time)
const MAX_DEMO_TICKS: u64 = 5 * 60 * SIM_HZ as u64;

fn main() {
    env_logger::init();
    log::info!("Tank Arena (native) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tank_arena_settings.json".to_string());
    let settings = Settings::load_or_default(&settings_path);
    let store = FileHighScoreStore::new(&settings.high_score_path);
    let mut game = Game::new(&settings, store);

    let start = TickInput {
        confirm: true,
        ..Default::default()
    };
    game.update(SIM_DT, &start);

    let mut kills = 0u32;
    while game.phase() == GamePhase::Playing && game.state().time_ticks < MAX_DEMO_TICKS {
        let input = autopilot(&game.snapshot());
        for event in game.update(SIM_DT, &input) {
            match event {
                GameEvent::EnemyKilled { .. } => kills += 1,
                GameEvent::WaveStarted { wave, enemies } => {
                    log::info!("Wave {} underway ({} enemies)", wave, enemies);
                }
                _ => {}
            }
        }
    }

    let state = game.state();
    log::info!(
        "Demo finished after {} ticks: wave {}, {} kills, score {}, high score {}",
        state.time_ticks,
        state.wave_number,
        kills,
        state.score,
        state.high_score
    );
}

/// Line up on the nearest enemy along one axis and keep firing
fn autopilot(frame: &FrameSnapshot<'_>) -> TickInput {
    let me = frame.player.pos();
    let nearest = frame
        .live_enemies()
        .map(|e| e.tank.pos())
        .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)));

    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };
    let Some(target) = nearest else {
        return input;
    };

    let delta = target - me;
    if delta.x.abs() <= TANK_HALF_SIZE {
        // In the column: turn to face it
        input.up = delta.y > 0.0;
        input.down = delta.y <= 0.0;
    } else {
        input.left = delta.x < 0.0;
        input.right = delta.x > 0.0;
    }
    input.pointer = Some(target);
    input
}
