//! All game entity types — pure data, no logic.

use crate::config::GameConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in arena pixels.  `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True if `other` lies entirely within `self` (edges may coincide).
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

// ── Actors ────────────────────────────────────────────────────────────────────

/// Identity tag; the renderer picks colours from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorKind {
    Player,
    Ghost,
}

/// A movable box.  Size and speed are fixed for the actor's lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub kind: ActorKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Displacement magnitude per tick.
    pub speed: f64,
}

impl Actor {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ghost {
    pub body: Actor,
    /// Consecutive ticks in which a movement attempt left the ghost in place.
    pub stuck_counter: u32,
}

// ── Game flow ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Loading,
    Playing,
    Win,
    Lose,
}

/// Identifies one run of the second-tick timer.  A fresh handle is minted
/// every time the timer starts; ticks carrying any other handle are stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Countdown {
    pub seconds_left: u32,
    /// `Some` while the timer is running.
    pub active: Option<TimerHandle>,
    /// Number of handles minted so far.
    pub generation: u64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything one game session owns.  Cloneable so the pure update
/// functions can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Actor,
    pub ghost: Ghost,
    pub status: GameStatus,
    pub timer: Countdown,
    pub frame: u64,
    pub config: GameConfig,
}
