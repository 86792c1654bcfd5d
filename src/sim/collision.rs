//! Axis-separated movement against static obstacles
//!
//! Tanks never overlap an obstacle. Each axis is resolved on its own so a tank
//! pushing diagonally into a wall keeps sliding along it.

use glam::Vec2;

use super::entity::Body;
use super::state::Obstacle;
use crate::clamp_to_arena;

/// True if `body` overlaps any live obstacle
pub fn hits_obstacle(body: &Body, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| o.alive && body.overlaps(&o.body))
}

/// Index of the first live obstacle overlapping `body`
pub fn first_obstacle_hit(body: &Body, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|o| o.alive && body.overlaps(&o.body))
}

/// Largest step along `axis` (a unit vector) not exceeding `delta` that keeps
/// `body` clear of obstacles.
///
/// The full step is tried first, then the step shrinks one unit at a time
/// toward zero. Probes run on copies so a rejected step leaves no trace.
fn resolve_axis(body: &Body, axis: Vec2, delta: f32, obstacles: &[Obstacle]) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    let sign = delta.signum();
    let mut step = delta;
    loop {
        if !hits_obstacle(&body.translated(axis * step), obstacles) {
            return step;
        }
        if step.abs() <= 1.0 {
            return 0.0;
        }
        step -= sign;
    }
}

/// Translate `body` by `(dx, dy)` without entering any obstacle, then clamp
/// the centre to the arena inset.
///
/// X is resolved before Y. Returns the displacement actually applied.
pub fn move_with_collision(body: &mut Body, dx: f32, dy: f32, obstacles: &[Obstacle]) -> Vec2 {
    let start = body.pos;

    let step_x = resolve_axis(body, Vec2::X, dx, obstacles);
    body.pos.x += step_x;

    let step_y = resolve_axis(body, Vec2::Y, dy, obstacles);
    body.pos.y += step_y;

    body.pos = clamp_to_arena(body.pos);
    body.pos - start
}

/// Translate without obstacle checks (arena clamp still applies)
pub fn move_unconstrained(body: &mut Body, dx: f32, dy: f32) -> Vec2 {
    let start = body.pos;
    body.pos = clamp_to_arena(body.pos + Vec2::new(dx, dy));
    body.pos - start
}
