//! Game state machine.
//!
//! Everything that changes `GameStatus` arrives as a `GameEvent` and goes
//! through `apply_event`, which keeps the transitions synchronous and free of
//! any scheduling concerns.  The only legal transitions are:
//!
//!   Loading  --AssetsSettled-->        Playing
//!   Playing  --SecondElapsed (to 0)--> Win
//!   Playing  --PlayerCaught-->         Lose
//!   Win|Lose --ResetRequested-->       Playing
//!
//! Anything else leaves the session untouched.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::entities::{ActorKind, Countdown, GameSession, GameStatus, Ghost, TimerHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// The obstacle image finished loading, successfully or not.
    AssetsSettled,
    /// One wall-clock second passed for the timer run identified by the handle.
    SecondElapsed(TimerHandle),
    /// Player and ghost boxes overlap.
    PlayerCaught,
    ResetRequested,
}

pub fn apply_event(state: &GameSession, event: GameEvent) -> GameSession {
    match (state.status, event) {
        (GameStatus::Loading, GameEvent::AssetsSettled) => {
            info!("assets settled, starting round");
            GameSession {
                status: GameStatus::Playing,
                timer: start_timer(&state.timer, state.config.round_seconds),
                ..state.clone()
            }
        }
        (GameStatus::Playing, GameEvent::SecondElapsed(handle))
            if state.timer.active == Some(handle) =>
        {
            let seconds_left = state.timer.seconds_left.saturating_sub(1);
            if seconds_left == 0 {
                info!(frame = state.frame, "timer ran out, player wins");
                GameSession {
                    status: GameStatus::Win,
                    timer: Countdown {
                        seconds_left,
                        ..stop_timer(&state.timer)
                    },
                    ..state.clone()
                }
            } else {
                GameSession {
                    timer: Countdown {
                        seconds_left,
                        ..state.timer.clone()
                    },
                    ..state.clone()
                }
            }
        }
        (GameStatus::Playing, GameEvent::PlayerCaught) => {
            info!(
                frame = state.frame,
                seconds_left = state.timer.seconds_left,
                "ghost caught the player"
            );
            GameSession {
                status: GameStatus::Lose,
                timer: stop_timer(&state.timer),
                ..state.clone()
            }
        }
        (GameStatus::Win | GameStatus::Lose, GameEvent::ResetRequested) => {
            info!(from = ?state.status, "round reset");
            let config = &state.config;
            GameSession {
                player: config.player.spawn(ActorKind::Player),
                ghost: Ghost {
                    body: config.ghost.spawn(ActorKind::Ghost),
                    stuck_counter: 0,
                },
                status: GameStatus::Playing,
                timer: start_timer(&state.timer, config.round_seconds),
                ..state.clone()
            }
        }
        (status, event) => {
            trace!(?status, ?event, "event ignored");
            state.clone()
        }
    }
}

/// Mint a fresh handle, which cancels whatever run was active before.
fn start_timer(timer: &Countdown, seconds: u32) -> Countdown {
    let generation = timer.generation + 1;
    debug!(generation, seconds, "timer started");
    Countdown {
        seconds_left: seconds,
        active: Some(TimerHandle(generation)),
        generation,
    }
}

fn stop_timer(timer: &Countdown) -> Countdown {
    if let Some(handle) = timer.active {
        debug!(generation = handle.0, "timer stopped");
    }
    Countdown {
        active: None,
        ..timer.clone()
    }
}

// ── Second tick scheduling ────────────────────────────────────────────────────

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Schedules the once-per-second timer tick for whichever handle is active.
///
/// There is at most one schedule at a time: when the active handle changes
/// (or goes away) the old schedule is dropped and a new one starts from the
/// moment the change is noticed.
#[derive(Debug, Default)]
pub struct SecondClock {
    armed: Option<(TimerHandle, Instant)>,
}

impl SecondClock {
    pub fn new() -> Self {
        SecondClock { armed: None }
    }

    /// Returns the handle to tick if a second has elapsed for it by `now`.
    /// Call repeatedly to catch up after a long stall.
    pub fn poll(&mut self, active: Option<TimerHandle>, now: Instant) -> Option<TimerHandle> {
        match (active, self.armed) {
            (None, _) => {
                self.armed = None;
                None
            }
            (Some(handle), Some((armed, due))) if armed == handle => {
                if now >= due {
                    self.armed = Some((handle, due + TICK_PERIOD));
                    Some(handle)
                } else {
                    None
                }
            }
            (Some(handle), _) => {
                trace!(generation = handle.0, "second clock armed");
                self.armed = Some((handle, now + TICK_PERIOD));
                None
            }
        }
    }
}
