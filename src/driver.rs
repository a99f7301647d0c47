//! The code-entry driver: a deadline-driven state machine polled from the
//! GUI frame loop.
//!
//! Every pending timer is a deadline stored in [`Step`]. [`CodeEntryDriver::tick`]
//! fires the deadline once it has passed and measures its successor from the
//! time it actually fired. Missed deadlines coalesce: a stalled frame loop (a
//! minimized window, say) resumes with the next keystroke instead of a burst.

use std::time::{Duration, Instant};

use rand::Rng;
use rdev::Key;

use crate::code::{digit_key, GuessCode};
use crate::history::AttemptHistory;
use crate::injector::{KeyInjector, CONFIRM_KEY, DELETE_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Grace period after start so the user can focus the target field.
    pub start_delay: Duration,
    /// Wait between clearing the field and typing the next code.
    pub type_delay: Duration,
    /// Wait between confirming a code and clearing the field.
    pub clear_delay: Duration,
    /// Gap between consecutive keystrokes of one code.
    pub keystroke_spacing: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(500),
            type_delay: Duration::from_millis(1000),
            clear_delay: Duration::from_millis(500),
            keystroke_spacing: Duration::from_millis(25),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Type,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    PendingStart,
    Cycling(Phase),
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Idle,
    PendingStart { due: Instant },
    AwaitType { due: Instant },
    /// `next` indexes the code's digits; `6` means the confirm key is due.
    Typing { code: GuessCode, next: usize, due: Instant },
    AwaitClear { due: Instant },
}

impl Step {
    fn due(&self) -> Option<Instant> {
        match *self {
            Step::Idle => None,
            Step::PendingStart { due }
            | Step::AwaitType { due }
            | Step::Typing { due, .. }
            | Step::AwaitClear { due } => Some(due),
        }
    }
}

pub struct CodeEntryDriver<I, R> {
    injector: I,
    rng: R,
    timings: Timings,
    step: Step,
    attempts: u64,
    history: AttemptHistory,
}

impl<I: KeyInjector, R: Rng> CodeEntryDriver<I, R> {
    pub fn new(injector: I, rng: R, timings: Timings) -> Self {
        Self {
            injector,
            rng,
            timings,
            step: Step::Idle,
            attempts: 0,
            history: AttemptHistory::new(),
        }
    }

    pub fn state(&self) -> DriverState {
        match self.step {
            Step::Idle => DriverState::Idle,
            Step::PendingStart { .. } => DriverState::PendingStart,
            Step::AwaitType { .. } | Step::Typing { .. } => DriverState::Cycling(Phase::Type),
            Step::AwaitClear { .. } => DriverState::Cycling(Phase::Clear),
        }
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.step, Step::Idle)
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn history(&self) -> &AttemptHistory {
        &self.history
    }

    /// Applies from the next scheduled deadline on; deadlines already set are kept.
    pub fn set_timings(&mut self, timings: Timings) {
        self.timings = timings;
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.step.due()
    }

    /// Returns false (and schedules nothing) unless the driver was idle.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        self.step = Step::PendingStart {
            due: now + self.timings.start_delay,
        };
        tracing::info!(delay = ?self.timings.start_delay, "guessing started");
        true
    }

    /// Drops every pending deadline. Keystrokes already sent stay sent.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        self.step = Step::Idle;
        if was_running {
            tracing::info!(attempts = self.attempts, "guessing stopped");
        }
        was_running
    }

    /// Fires the pending deadline if it is at or before `now`. At most one
    /// fires per call. Returns whether one did.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.step.due() {
            Some(due) if due <= now => {
                self.step = self.fire(now);
                true
            }
            _ => false,
        }
    }

    fn fire(&mut self, now: Instant) -> Step {
        match self.step {
            Step::Idle => Step::Idle,
            Step::PendingStart { .. } | Step::AwaitType { .. } => self.begin_code(now),
            Step::Typing { code, next, .. } => self.continue_code(code, next, now),
            Step::AwaitClear { .. } => {
                self.clear_field();
                Step::AwaitType {
                    due: now + self.timings.type_delay,
                }
            }
        }
    }

    fn begin_code(&mut self, now: Instant) -> Step {
        let code = GuessCode::generate(&mut self.rng);
        self.history.record(code);
        self.attempts += 1;
        tracing::debug!(%code, attempt = self.attempts, "typing code");
        self.continue_code(code, 0, now)
    }

    fn continue_code(&mut self, code: GuessCode, next: usize, now: Instant) -> Step {
        let digits = code.digits();
        if let Some(&digit) = digits.get(next) {
            if let Some(key) = digit_key(digit) {
                self.send(key);
            }
            Step::Typing {
                code,
                next: next + 1,
                due: now + self.timings.keystroke_spacing,
            }
        } else {
            self.send(CONFIRM_KEY);
            Step::AwaitClear {
                due: now + self.timings.clear_delay,
            }
        }
    }

    fn clear_field(&mut self) {
        if let Err(error) = self.injector.select_all() {
            tracing::warn!(%error, "select-all failed");
        }
        self.send(DELETE_KEY);
    }

    fn send(&mut self, key: Key) {
        if let Err(error) = self.injector.tap(key) {
            tracing::warn!(%error, ?key, "keystroke dropped");
        }
    }
}
