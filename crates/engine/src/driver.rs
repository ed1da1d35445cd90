//! Driver - advances a session frame by frame
//!
//! The driver is the only owner of the session. It applies input commands,
//! runs gravity on a speed-dependent cadence, clears complete lines every
//! frame and autosaves before each gravity step.

use crate::core::{Nudge, Session, ShapeSource, SimpleRng};
use crate::store::StateFile;
use crate::types::{Command, BASE_SPEED, MAX_SPEED, MIN_SPEED};

/// What happened during one [`Driver::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// True if this frame ran a gravity step.
    pub gravity: bool,
    /// Outcome of the gravity step, if any.
    pub nudge: Option<Nudge>,
    /// Rows cleared this frame.
    pub cleared: u32,
}

#[derive(Debug)]
pub struct Driver<S = SimpleRng> {
    session: Session<S>,
    store: Option<StateFile>,
    /// Grid size used by [`Command::NewSession`].
    size: (usize, usize),
    speed: i32,
    paused: bool,
    frame: u64,
    save_error: Option<String>,
}

impl<S: ShapeSource> Driver<S> {
    /// Drive `session` at `speed` (clamped to `MIN_SPEED..=MAX_SPEED`).
    ///
    /// New sessions use the current grid size until [`Driver::set_size`] says
    /// otherwise.
    pub fn new(session: Session<S>, speed: i32) -> Self {
        let size = (session.grid().width(), session.grid().height());
        Self {
            session,
            store: None,
            size,
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
            paused: false,
            frame: 0,
            save_error: None,
        }
    }

    /// Autosave into `store` before every gravity step.
    pub fn with_store(mut self, store: StateFile) -> Self {
        self.store = Some(store);
        self
    }

    /// Grid size for sessions started with [`Command::NewSession`].
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.size = (width, height);
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Last autosave failure, cleared by the next successful save.
    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    /// Frames between gravity steps at the current speed.
    pub fn gravity_interval(&self) -> u64 {
        (BASE_SPEED - self.speed) as u64
    }

    /// Apply one input command. Movement is ignored while paused.
    pub fn apply(&mut self, command: Command) {
        if self.paused && command.is_movement() {
            return;
        }

        match command {
            Command::NudgeLeft => {
                self.session.nudge(-1, false);
            }
            Command::NudgeRight => {
                self.session.nudge(1, false);
            }
            Command::NudgeDown => {
                self.session.nudge(1, true);
            }
            Command::Rotate => {
                self.session.rotate_block();
            }
            Command::NewSession => {
                let (width, height) = self.size;
                self.session.reset_with_size(width, height);
            }
            Command::TogglePause => self.paused = !self.paused,
            Command::SpeedUp => self.speed = (self.speed + 1).min(MAX_SPEED),
            Command::SpeedDown => self.speed = (self.speed - 1).max(MIN_SPEED),
        }
    }

    /// Advance one frame. Paused frames do nothing and are not counted.
    pub fn tick(&mut self) -> TickReport {
        if self.paused {
            return TickReport::default();
        }

        let mut report = TickReport::default();
        if self.frame % self.gravity_interval() == 0 {
            self.autosave();
            report.gravity = true;
            report.nudge = Some(self.session.nudge(1, true));
        }
        report.cleared = self.session.clear_complete_lines();
        self.frame += 1;
        report
    }

    /// Save now, recording any failure in [`Driver::save_error`].
    pub fn autosave(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        self.save_error = store
            .save(&self.session)
            .err()
            .map(|e| format!("{:#}", e));
    }
}
