//! Frame orchestration.
//!
//! `App` owns one game session together with everything needed to drive it:
//! the render surface, the wander source, the obstacle texture (once loaded)
//! and the second-tick clock.  The platform loop calls `run_frame` once per
//! display tick, in every state, so the terminal overlay stays live.

use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use tracing::{info, warn};

use crate::asset::{LoadResult, ObstacleTexture};
use crate::compute::{self, WanderSource};
use crate::config::GameConfig;
use crate::entities::GameSession;
use crate::error::AssetError;
use crate::input::InputState;
use crate::render::{render_frame, Surface};
use crate::state::{apply_event, GameEvent, SecondClock};

pub struct App<S, R> {
    session: GameSession,
    surface: S,
    wander: R,
    texture: Option<ObstacleTexture>,
    /// Pending image load; taken once it reports.
    loader: Option<Receiver<LoadResult>>,
    clock: SecondClock,
}

impl<S: Surface, R: WanderSource> App<S, R> {
    pub fn new(config: GameConfig, surface: S, wander: R, loader: Receiver<LoadResult>) -> Self {
        info!("game loading");
        App {
            session: compute::init_state(config),
            surface,
            wander,
            texture: None,
            loader: Some(loader),
            clock: SecondClock::new(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn texture(&self) -> Option<&ObstacleTexture> {
        self.texture.as_ref()
    }

    /// Check on the image loader.  Success and failure both start the game;
    /// a failure only means obstacles are drawn as flat rectangles.
    pub fn poll_assets(&mut self) {
        let Some(loader) = &self.loader else {
            return;
        };
        let outcome = match loader.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(AssetError::LoaderGone),
        };
        self.loader = None;

        match outcome {
            Ok(texture) => {
                info!(width = texture.width(), height = texture.height(), "obstacle image loaded");
                self.texture = Some(texture);
            }
            Err(err) => warn!(%err, "obstacle image unavailable, using grey blocks"),
        }
        self.session = apply_event(&self.session, GameEvent::AssetsSettled);
    }

    /// Run one display tick at time `now`.
    pub fn run_frame(&mut self, input: &InputState, now: Instant) -> io::Result<()> {
        self.poll_assets();

        while let Some(handle) = self.clock.poll(self.session.timer.active, now) {
            self.session = apply_event(&self.session, GameEvent::SecondElapsed(handle));
        }

        self.session = compute::frame(&self.session, input, &mut self.wander);

        render_frame(&mut self.surface, &self.session, self.texture.as_ref())
    }
}
