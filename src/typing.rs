//! Tick-driven typewriter reveal for one dialogue line.

/// Smallest accepted per-character interval, in seconds.
pub const MIN_TYPE_INTERVAL: f32 = 0.001;

/// Outcome of advancing the reveal by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingTick {
    /// No observable change this tick.
    Idle,
    /// More characters became visible; carries the new visible count.
    Revealed(usize),
    /// All characters are visible. Reported exactly once per process.
    Completed,
}

/// Reveals a line one character per interval of unscaled time.
///
/// At most one process is alive per session; the runner cancels and replaces
/// it when a new line starts. After `cancel` the process produces no further
/// outcome.
#[derive(Clone, Debug)]
pub struct TypingProcess {
    total: usize,
    revealed: usize,
    interval: f32,
    accumulator: f32,
    cancelled: bool,
    completion_reported: bool,
}

impl TypingProcess {
    /// Starts a reveal over `text`. Non-positive intervals are clamped to
    /// [`MIN_TYPE_INTERVAL`].
    pub fn new(text: &str, interval: f32) -> Self {
        Self {
            total: text.chars().count(),
            revealed: 0,
            interval: interval.max(MIN_TYPE_INTERVAL),
            accumulator: 0.0,
            cancelled: false,
            completion_reported: false,
        }
    }

    pub fn is_typing(&self) -> bool {
        !self.cancelled && self.revealed < self.total
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Advances by `dt` seconds. A slow frame may reveal several characters.
    pub fn tick(&mut self, dt: f32) -> TypingTick {
        if self.cancelled {
            return TypingTick::Idle;
        }
        if self.revealed >= self.total {
            return self.report_completion();
        }
        self.accumulator += dt;
        let before = self.revealed;
        while self.accumulator >= self.interval && self.revealed < self.total {
            self.accumulator -= self.interval;
            self.revealed += 1;
        }
        if self.revealed >= self.total {
            self.report_completion()
        } else if self.revealed > before {
            TypingTick::Revealed(self.revealed)
        } else {
            TypingTick::Idle
        }
    }

    /// Reveals every remaining character and reports the same completion
    /// outcome as a natural finish.
    pub fn complete_immediately(&mut self) -> TypingTick {
        if self.cancelled {
            return TypingTick::Idle;
        }
        self.revealed = self.total;
        self.report_completion()
    }

    /// Stops the reveal. Idempotent and safe on a finished process.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    fn report_completion(&mut self) -> TypingTick {
        if self.completion_reported {
            TypingTick::Idle
        } else {
            self.completion_reported = true;
            TypingTick::Completed
        }
    }
}
