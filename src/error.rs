//! Error types for the game and its platform glue.
//!
//! The core simulation has no failure modes of its own; everything here
//! comes from startup checks, the terminal, or the obstacle image.

use std::io;

use crate::entities::ActorKind;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Terminal is {cols}x{rows}, need at least {need_cols}x{need_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        need_cols: u16,
        need_rows: u16,
    },
}

/// Failures while loading the obstacle image.  Never fatal: the renderer
/// falls back to flat rectangles.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("Failed to load image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels")]
    Empty,

    #[error("Loader thread exited without reporting")]
    LoaderGone,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Round length must be at least one second")]
    EmptyRound,

    #[error("{0:?} has a zero or negative size")]
    DegenerateActor(ActorKind),

    #[error("{0:?} speed must be positive")]
    NonPositiveSpeed(ActorKind),

    #[error("{kind:?} spawn overlaps obstacle #{obstacle}")]
    SpawnBlocked { kind: ActorKind, obstacle: usize },

    #[error("{0:?} spawn lies outside the arena")]
    SpawnOutsideArena(ActorKind),

    #[error("Obstacle #{0} is too close to the arena edge for the player to pass")]
    ObstacleNearEdge(usize),
}
