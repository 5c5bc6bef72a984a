//! Level-state input: which directions are held right now, plus a one-shot
//! reset request.
//!
//! Terminals differ in what they report.  Keyboard-enhancement capable ones
//! (kitty protocol) send proper press / repeat / release events; classic ones
//! only send presses, with OS key-repeat showing up as repeated presses.  The
//! `KeyTracker` covers both: releases drop a key immediately, and otherwise a
//! key expires once it has been silent for longer than the hold window.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
}

/// One frame's worth of sampled input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub reset: bool,
}

impl InputState {
    /// Desired movement vector.  Opposite keys do not cancel: right wins
    /// over left and down wins over up.
    pub fn direction(&self) -> (f64, f64) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.left {
            dx = -1.0;
        }
        if self.right {
            dx = 1.0;
        }
        if self.up {
            dy = -1.0;
        }
        if self.down {
            dy = 1.0;
        }
        (dx, dy)
    }
}

/// Turns key notifications into held state, one sample per frame.
#[derive(Debug)]
pub struct KeyTracker {
    /// Maps each held control to the frame it was last seen (press or repeat).
    last_seen: HashMap<Control, u64>,
    hold_window: u64,
    reset_pending: bool,
}

impl KeyTracker {
    /// `hold_window` is how many frames a key stays held without a fresh
    /// press or repeat.  It must outlast the OS key-repeat interval.
    pub fn new(hold_window: u64) -> Self {
        KeyTracker {
            last_seen: HashMap::new(),
            hold_window,
            reset_pending: false,
        }
    }

    /// Record a press or repeat of `control` seen during `frame`.
    pub fn press(&mut self, control: Control, frame: u64) {
        self.last_seen.insert(control, frame);
    }

    pub fn release(&mut self, control: Control) {
        self.last_seen.remove(&control);
    }

    /// Latch a reset request until the next `sample`.
    pub fn request_reset(&mut self) {
        self.reset_pending = true;
    }

    fn is_held(&self, control: Control, frame: u64) -> bool {
        self.last_seen
            .get(&control)
            .map(|&last| frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }

    /// Snapshot for `frame`.  Consumes any pending reset request.
    pub fn sample(&mut self, frame: u64) -> InputState {
        let state = InputState {
            up: self.is_held(Control::Up, frame),
            down: self.is_held(Control::Down, frame),
            left: self.is_held(Control::Left, frame),
            right: self.is_held(Control::Right, frame),
            reset: self.reset_pending,
        };
        self.reset_pending = false;
        state
    }
}
