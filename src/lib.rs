//! A small terminal chase game: dodge the ghost until the clock runs out.
//!
//! Game logic is pure (`compute`, `state`) and talks to the outside world
//! only through `render::Surface`, `input::InputState` and the asset loader.

pub mod app;
pub mod asset;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod render;
pub mod state;
