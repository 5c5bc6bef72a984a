//! Pure game-logic functions.
//!
//! Every public function takes immutable references to the current state
//! (and, where needed, a wander source) and returns brand-new values.  Side
//! effects are limited to the injected `WanderSource`.

use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{Actor, ActorKind, Countdown, GameSession, GameStatus, Ghost, Rect};
use crate::input::InputState;
use crate::state::{apply_event, GameEvent};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Strict AABB overlap.  Boxes that only share an edge do not intersect.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

pub fn hits_any(rect: &Rect, obstacles: &[Rect]) -> bool {
    obstacles.iter().any(|o| intersects(rect, o))
}

fn clamp_into(actor: Actor, arena: &Rect) -> Actor {
    let x = actor.x.max(arena.x).min(arena.right() - actor.width);
    let y = actor.y.max(arena.y).min(arena.bottom() - actor.height);
    Actor { x, y, ..actor }
}

// ── Movement ──────────────────────────────────────────────────────────────────

/// Move `actor` one tick along the desired direction.
///
/// The direction is normalised and scaled by the actor's speed.  X and Y are
/// then applied one at a time; an axis whose displacement would put the box
/// inside any obstacle is rolled back while the other axis still goes ahead,
/// which lets actors slide along obstacle edges.  With `Some(arena)` the
/// result is finally clamped inside the arena.
///
/// A zero direction is a no-op (nothing to normalise, and no clamp either).
pub fn resolve_move(
    actor: &Actor,
    dx: f64,
    dy: f64,
    obstacles: &[Rect],
    arena: Option<&Rect>,
) -> Actor {
    let magnitude = (dx * dx + dy * dy).sqrt();
    if magnitude == 0.0 {
        return actor.clone();
    }

    let vx = dx / magnitude * actor.speed;
    let vy = dy / magnitude * actor.speed;

    let mut moved = actor.clone();

    moved.x += vx;
    if hits_any(&moved.bounds(), obstacles) {
        moved.x = actor.x;
    }

    moved.y += vy;
    if hits_any(&moved.bounds(), obstacles) {
        moved.y = actor.y;
    }

    match arena {
        Some(arena) => clamp_into(moved, arena),
        None => moved,
    }
}

// ── Chase AI ──────────────────────────────────────────────────────────────────

/// Source of random wander directions for a stuck ghost.
pub trait WanderSource {
    /// Two independent values, each uniform in `[-0.5, 0.5)`.
    fn wander(&mut self) -> (f64, f64);
}

impl<R: Rng> WanderSource for R {
    fn wander(&mut self) -> (f64, f64) {
        (self.gen_range(-0.5..0.5), self.gen_range(-0.5..0.5))
    }
}

/// Where the ghost wants to go this tick: straight at the player, or a
/// random wander once it has been stuck for long enough.
pub fn ghost_intent(
    ghost: &Ghost,
    player: &Actor,
    config: &GameConfig,
    wander: &mut impl WanderSource,
) -> (f64, f64) {
    if ghost.stuck_counter > config.wander_after {
        wander.wander()
    } else {
        (player.x - ghost.body.x, player.y - ghost.body.y)
    }
}

/// Advance the ghost one tick and update its stuck counter.
///
/// The ghost is never clamped to the arena.
pub fn step_ghost(
    ghost: &Ghost,
    player: &Actor,
    config: &GameConfig,
    wander: &mut impl WanderSource,
) -> Ghost {
    let (dx, dy) = ghost_intent(ghost, player, config, wander);

    // No intent, no attempt: standing still on purpose is not being stuck.
    if dx == 0.0 && dy == 0.0 {
        return ghost.clone();
    }

    let body = resolve_move(&ghost.body, dx, dy, &config.obstacles, None);
    let stayed = body.x == ghost.body.x && body.y == ghost.body.y;

    let mut stuck_counter = if stayed { ghost.stuck_counter + 1 } else { 0 };
    if stuck_counter > config.stuck_reset_after {
        debug!(frames = stuck_counter, "ghost wander expired, resuming pursuit");
        stuck_counter = 0;
    } else if stayed && stuck_counter == config.wander_after + 1 {
        debug!(x = body.x, y = body.y, "ghost stuck, switching to wander");
    }

    Ghost { body, stuck_counter }
}

// ── Constructors ──────────────────────────────────────────────────────────────

/// A session waiting for its assets: actors on their spawn points and a full,
/// stopped timer.
pub fn init_state(config: GameConfig) -> GameSession {
    GameSession {
        player: config.player.spawn(ActorKind::Player),
        ghost: Ghost {
            body: config.ghost.spawn(ActorKind::Ghost),
            stuck_counter: 0,
        },
        status: GameStatus::Loading,
        timer: Countdown {
            seconds_left: config.round_seconds,
            active: None,
            generation: 0,
        },
        frame: 0,
        config,
    }
}

// ── Per-frame update ─────────────────────────────────────────────────────────

/// One display tick.  A reset request is handled first (and ignored while
/// playing); actors only move while the game is being played.
pub fn frame(state: &GameSession, input: &InputState, wander: &mut impl WanderSource) -> GameSession {
    let state = if input.reset {
        apply_event(state, GameEvent::ResetRequested)
    } else {
        state.clone()
    };

    let frame = state.frame + 1;
    if state.status != GameStatus::Playing {
        return GameSession { frame, ..state };
    }

    let (dx, dy) = input.direction();
    let player = resolve_move(
        &state.player,
        dx,
        dy,
        &state.config.obstacles,
        Some(&state.config.arena),
    );
    let ghost = step_ghost(&state.ghost, &player, &state.config, wander);

    let caught = intersects(&player.bounds(), &ghost.body.bounds());
    let next = GameSession {
        player,
        ghost,
        frame,
        ..state
    };

    if caught {
        apply_event(&next, GameEvent::PlayerCaught)
    } else {
        next
    }
}
