//! Frame rendering against an abstract drawing surface.
//!
//! `render_frame` decides *what* to draw for a session snapshot; a `Surface`
//! implementation decides how that looks on a real device.  The core never
//! reads anything back from the surface.

use std::io;

use crate::asset::ObstacleTexture;
use crate::entities::{Actor, ActorKind, GameSession, GameStatus, Rect};

// ── Palette ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Blue,
    Red,
    Green,
    Grey,
    /// Default text colour.
    Ink,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

// ── Surface ───────────────────────────────────────────────────────────────────

/// Drawing operations, in arena pixel coordinates.
pub trait Surface {
    fn clear(&mut self) -> io::Result<()>;

    fn draw_rect(&mut self, rect: Rect, tint: Tint) -> io::Result<()>;

    fn draw_image(&mut self, image: &ObstacleTexture, rect: Rect) -> io::Result<()>;

    /// `at` is the anchor point: the left end for `Left`, the middle for
    /// `Center`.  `size` is a nominal font size in pixels.
    fn draw_text(
        &mut self,
        text: &str,
        at: (f64, f64),
        size: u16,
        align: TextAlign,
        tint: Tint,
    ) -> io::Result<()>;

    /// Make the frame visible.
    fn present(&mut self) -> io::Result<()>;

    /// Draw the image if there is one, a flat `fallback` rectangle otherwise.
    fn draw_image_or(
        &mut self,
        image: Option<&ObstacleTexture>,
        rect: Rect,
        fallback: Tint,
    ) -> io::Result<()> {
        match image {
            Some(image) => self.draw_image(image, rect),
            None => self.draw_rect(rect, fallback),
        }
    }
}

// ── Frame ─────────────────────────────────────────────────────────────────────

const HUD_AT: (f64, f64) = (20.0, 40.0);
const HUD_SIZE: u16 = 24;
const BANNER_SIZE: u16 = 60;
const HINT_SIZE: u16 = 20;
const HINT_OFFSET: f64 = 40.0;

fn actor_tint(actor: &Actor) -> Tint {
    match actor.kind {
        ActorKind::Player => Tint::Blue,
        ActorKind::Ghost => Tint::Red,
    }
}

/// Banner, subtitle and colour of the overlay shown outside of play.
pub fn overlay_text(status: GameStatus) -> Option<(&'static str, &'static str, Tint)> {
    match status {
        GameStatus::Playing => None,
        GameStatus::Loading => Some(("Loading...", "", Tint::Ink)),
        GameStatus::Win => Some(("You Win!", "Press 'R' to Restart", Tint::Green)),
        GameStatus::Lose => Some(("Game Over!", "Press 'R' to Restart", Tint::Red)),
    }
}

/// Render one complete frame.
pub fn render_frame<S: Surface>(
    surface: &mut S,
    state: &GameSession,
    texture: Option<&ObstacleTexture>,
) -> io::Result<()> {
    surface.clear()?;

    surface.draw_rect(state.player.bounds(), actor_tint(&state.player))?;
    surface.draw_rect(state.ghost.body.bounds(), actor_tint(&state.ghost.body))?;

    for obstacle in &state.config.obstacles {
        surface.draw_image_or(texture, *obstacle, Tint::Grey)?;
    }

    surface.draw_text(
        &format!("Time: {}", state.timer.seconds_left),
        HUD_AT,
        HUD_SIZE,
        TextAlign::Left,
        Tint::Ink,
    )?;

    if let Some((banner, hint, tint)) = overlay_text(state.status) {
        let arena = &state.config.arena;
        let centre = (arena.x + arena.width / 2.0, arena.y + arena.height / 2.0);
        surface.draw_text(banner, centre, BANNER_SIZE, TextAlign::Center, tint)?;
        if !hint.is_empty() {
            surface.draw_text(
                hint,
                (centre.0, centre.1 + HINT_OFFSET),
                HINT_SIZE,
                TextAlign::Center,
                tint,
            )?;
        }
    }

    surface.present()
}
