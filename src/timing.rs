use std::time::{Duration, Instant};

/// Monotonic clock for the animation, sampled once per frame.
pub(crate) struct FrameClock {
    started: Instant,
}

impl FrameClock {
    pub(crate) fn start() -> Self {
        Self { started: Instant::now() }
    }

    /// Seconds elapsed since the clock started.
    pub(crate) fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DwellState {
    Pending,
    Fired,
    Cancelled,
}

/// A cancellable one-shot timer for a fixed dwell.
///
/// [`poll`](Self::poll) reports the firing at most once; once cancelled,
/// every later poll is a no-op. There is no path back to pending, so a
/// late poll after teardown can never mutate anything.
pub(crate) struct DwellTimer {
    dwell: Duration,
    state: DwellState,
}

impl DwellTimer {
    pub(crate) fn new(dwell: Duration) -> Self {
        Self { dwell, state: DwellState::Pending }
    }

    /// Returns true exactly once, when `elapsed` first reaches the dwell.
    pub(crate) fn poll(&mut self, elapsed: Duration) -> bool {
        if self.state == DwellState::Pending && elapsed >= self.dwell {
            self.state = DwellState::Fired;
            return true;
        }
        false
    }

    pub(crate) fn cancel(&mut self) {
        if self.state == DwellState::Pending {
            self.state = DwellState::Cancelled;
        }
    }
}
