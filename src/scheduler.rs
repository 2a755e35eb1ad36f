//! Fixed-interval tick source for animations.
//!
//! [`AnimationScheduler`] wraps a repeated `slint::Timer` with an explicit
//! start/stop lifecycle. Dropping the scheduler stops the timer, so no tick
//! can fire against a disposed editor.

use slint::{Timer, TimerMode};
use std::time::Duration;
use tracing::trace;

#[derive(Default)]
pub struct AnimationScheduler {
    timer: Timer,
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScheduler").field("running", &self.is_running()).finish()
    }
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `tick` every `interval` until [`stop`](Self::stop).
    ///
    /// Restarts the schedule if it is already running.
    pub fn start(&self, interval: Duration, tick: impl FnMut() + 'static) {
        trace!(?interval, "animation scheduler started");
        self.timer.start(TimerMode::Repeated, interval, tick);
    }

    pub fn stop(&self) {
        if self.timer.running() {
            trace!("animation scheduler stopped");
        }
        self.timer.stop();
    }

    pub fn is_running(&self) -> bool {
        self.timer.running()
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
