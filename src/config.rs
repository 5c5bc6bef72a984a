//! Fixed game constants, bundled into a validated `GameConfig`.

use crate::entities::{Actor, ActorKind, Rect};
use crate::error::ConfigError;

// ── Arena & round ─────────────────────────────────────────────────────────────

pub const ARENA_WIDTH: f64 = 800.0;
pub const ARENA_HEIGHT: f64 = 600.0;

/// Length of one round in seconds.
pub const ROUND_SECONDS: u32 = 30;

/// The ghost wanders randomly while its stuck counter is above this.
pub const WANDER_AFTER: u32 = 5;

/// A stuck counter above this is forced back to zero.
pub const STUCK_RESET_AFTER: u32 = 20;

// ── Actors ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ActorConfig {
    pub spawn_x: f64,
    pub spawn_y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

impl ActorConfig {
    /// A fresh actor standing on this config's spawn point.
    pub fn spawn(&self, kind: ActorKind) -> Actor {
        Actor {
            kind,
            x: self.spawn_x,
            y: self.spawn_y,
            width: self.width,
            height: self.height,
            speed: self.speed,
        }
    }

    fn spawn_box(&self) -> Rect {
        Rect::new(self.spawn_x, self.spawn_y, self.width, self.height)
    }
}

pub const PLAYER: ActorConfig = ActorConfig {
    spawn_x: 50.0,
    spawn_y: 50.0,
    width: 40.0,
    height: 40.0,
    speed: 5.0,
};

pub const GHOST: ActorConfig = ActorConfig {
    spawn_x: 700.0,
    spawn_y: 500.0,
    width: 50.0,
    height: 50.0,
    speed: 3.6,
};

pub const OBSTACLES: [Rect; 5] = [
    Rect::new(200.0, 150.0, 80.0, 80.0),
    Rect::new(500.0, 350.0, 80.0, 80.0),
    Rect::new(350.0, 250.0, 80.0, 80.0),
    Rect::new(150.0, 400.0, 80.0, 80.0),
    Rect::new(550.0, 100.0, 80.0, 80.0),
];

// ── Bundle ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub arena: Rect,
    pub player: ActorConfig,
    pub ghost: ActorConfig,
    pub obstacles: Vec<Rect>,
    pub round_seconds: u32,
    pub wander_after: u32,
    pub stuck_reset_after: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            arena: Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT),
            player: PLAYER,
            ghost: GHOST,
            obstacles: OBSTACLES.to_vec(),
            round_seconds: ROUND_SECONDS,
            wander_after: WANDER_AFTER,
            stuck_reset_after: STUCK_RESET_AFTER,
        }
    }
}

impl GameConfig {
    /// Check the starting conditions movement resolution relies on: no actor
    /// may begin inside an obstacle, the player must begin inside the arena,
    /// and every obstacle must leave a player-sized lane (plus one step) along
    /// each arena edge so clamping can never push the player into one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_seconds == 0 {
            return Err(ConfigError::EmptyRound);
        }
        for (kind, actor) in [(ActorKind::Player, &self.player), (ActorKind::Ghost, &self.ghost)] {
            if actor.width <= 0.0 || actor.height <= 0.0 {
                return Err(ConfigError::DegenerateActor(kind));
            }
            if actor.speed <= 0.0 {
                return Err(ConfigError::NonPositiveSpeed(kind));
            }
            let spawn = actor.spawn_box();
            if let Some(index) = self
                .obstacles
                .iter()
                .position(|o| crate::compute::intersects(&spawn, o))
            {
                return Err(ConfigError::SpawnBlocked { kind, obstacle: index });
            }
        }
        if !self.arena.contains(&self.player.spawn_box()) {
            return Err(ConfigError::SpawnOutsideArena(ActorKind::Player));
        }
        let lane_x = self.player.width + self.player.speed;
        let lane_y = self.player.height + self.player.speed;
        if let Some(index) = self.obstacles.iter().position(|o| {
            o.x - self.arena.x < lane_x
                || self.arena.right() - o.right() < lane_x
                || o.y - self.arena.y < lane_y
                || self.arena.bottom() - o.bottom() < lane_y
        }) {
            return Err(ConfigError::ObstacleNearEdge(index));
        }
        Ok(())
    }
}
