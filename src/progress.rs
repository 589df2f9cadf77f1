//! Loading-progress indicator.
//!
//! Three phases: `Idle -> Active -> Complete -> Idle`. `finish()` schedules
//! the reset back to idle after a fixed delay; every `start()`/`finish()`
//! bumps a generation so that only the reset scheduled by the most recent
//! call can fire.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

/// Delay between `finish()` and the automatic reset to idle.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Active,
    Complete,
}

/// Visual element driven by the indicator.
pub trait ProgressBar: Send + Sync {
    fn set_phase(&self, phase: Phase);

    /// Collapse the bar back to zero width.
    fn clear_width(&self);
}

/// Progress bar with no display that records what it was asked to show.
#[derive(Default)]
pub struct HeadlessProgressBar {
    phases: Mutex<Vec<Phase>>,
    width_resets: Mutex<usize>,
}

impl HeadlessProgressBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every phase the bar has been set to, oldest first.
    pub fn phases(&self) -> Vec<Phase> {
        self.phases.lock().clone()
    }

    pub fn width_resets(&self) -> usize {
        *self.width_resets.lock()
    }
}

impl ProgressBar for HeadlessProgressBar {
    fn set_phase(&self, phase: Phase) {
        self.phases.lock().push(phase);
    }

    fn clear_width(&self) {
        *self.width_resets.lock() += 1;
    }
}

struct State {
    phase: Phase,
    generation: u64,
}

struct Inner {
    state: Mutex<State>,
    bar: Arc<dyn ProgressBar>,
    reset_delay: Duration,
}

/// Cloneable handle to the progress state machine.
#[derive(Clone)]
pub struct ProgressIndicator {
    inner: Arc<Inner>,
}

impl ProgressIndicator {
    pub fn new(bar: Arc<dyn ProgressBar>, reset_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    phase: Phase::Idle,
                    generation: 0,
                }),
                bar,
                reset_delay,
            }),
        }
    }

    pub fn phase(&self) -> Phase {
        self.inner.state.lock().phase
    }

    /// Enter `Active`. Safe to call while already active.
    pub fn start(&self) {
        let mut state = self.inner.state.lock();
        state.phase = Phase::Active;
        state.generation += 1;
        self.inner.bar.set_phase(Phase::Active);
    }

    /// Enter `Complete` and schedule the reset to `Idle`.
    ///
    /// Outside a tokio runtime no reset can be scheduled and the bar stays
    /// `Complete` until the next `start()`.
    pub fn finish(&self) {
        let generation = {
            let mut state = self.inner.state.lock();
            state.phase = Phase::Complete;
            state.generation += 1;
            self.inner.bar.set_phase(Phase::Complete);
            state.generation
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let inner = Arc::clone(&self.inner);
                handle.spawn(async move {
                    tokio::time::sleep(inner.reset_delay).await;
                    reset_if_current(&inner, generation);
                });
            }
            Err(_) => {
                tracing::debug!(generation, "no runtime, progress reset not scheduled");
            }
        }
    }
}

fn reset_if_current(inner: &Inner, generation: u64) {
    let mut state = inner.state.lock();
    if state.generation != generation {
        tracing::trace!(generation, current = state.generation, "progress reset superseded");
        return;
    }
    state.phase = Phase::Idle;
    inner.bar.clear_width();
    inner.bar.set_phase(Phase::Idle);
}
