//! Wall-clock timing fold.

use std::time::{Duration, Instant};

use crate::fragment::Fragment;

use super::Fold;

/// Elapsed-time tracker for one traversal.
///
/// Started when the fold starts and stopped at stream end; read-only to
/// sinks in between.
#[derive(Clone, Copy, Debug)]
pub struct SimpleTimer {
    /// When the traversal started.
    started: Instant,

    /// Total once stopped.
    stopped: Option<Duration>,
}

impl SimpleTimer {
    /// Starts a new [`SimpleTimer`].
    #[must_use]
    pub fn start() -> Self {
        Self { started: Instant::now(), stopped: None }
    }

    /// Stops this [`SimpleTimer`], fixing its elapsed time.
    ///
    /// Stopping an already stopped timer keeps the first reading.
    #[must_use]
    pub fn stop(mut self) -> Self {
        if self.stopped.is_none() {
            self.stopped = Some(self.started.elapsed());
        }
        self
    }

    /// Elapsed time so far, or the fixed total once stopped.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.stopped.unwrap_or_else(|| self.started.elapsed())
    }
}

/// [`Fold`] owning the traversal's [`SimpleTimer`].
///
/// The state passes through every item untouched; finalization stops the
/// timer so the final reading is the wall-clock time of the whole stream.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimerFold;

impl TimerFold {
    /// Creates a new [`TimerFold`].
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Fold<Fragment> for TimerFold {
    type State = SimpleTimer;

    fn initial(&self) -> SimpleTimer {
        SimpleTimer::start()
    }

    fn step(&self, state: SimpleTimer, _: &Fragment) -> SimpleTimer {
        state
    }

    fn finish(&self, state: SimpleTimer) -> SimpleTimer {
        state.stop()
    }
}
