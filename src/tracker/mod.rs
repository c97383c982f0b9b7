use crate::clock::Clock;
use crate::host::ActivityLifecycleCallbacks;
use log::{debug, warn};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Raw lifecycle counters plus the pause anchor.
///
/// Hosts report one resume/pause (and start/stop) pair per activity, so for
/// a settled app the paired counters differ by at most one; the derived
/// queries compare them directly instead of flipping booleans.
#[derive(Debug, Default)]
struct TrackerState {
    resumed: u32,
    paused: u32,
    started: u32,
    stopped: u32,
    pause_started_at: Option<u64>,
    time_outside_app_ms: u64,
}

impl TrackerState {
    fn record_resumed(&mut self, now_ms: u64) {
        self.resumed += 1;
        // Only a resume with no pending pause (the first ever) leaves the
        // measured span untouched.
        if let Some(pause_started_at) = self.pause_started_at.take() {
            self.time_outside_app_ms = now_ms.saturating_sub(pause_started_at);
        }
    }

    fn record_paused(&mut self, now_ms: u64) {
        self.paused += 1;
        // Overwrites any earlier anchor: only the most recent pause start
        // is measured against.
        self.pause_started_at = Some(now_ms);
    }

    fn record_started(&mut self) {
        self.started += 1;
    }

    fn record_stopped(&mut self) {
        self.stopped += 1;
    }

    fn is_in_foreground(&self) -> bool {
        self.resumed > self.paused
    }

    fn is_visible(&self) -> bool {
        self.started > self.stopped
    }
}

/// Point-in-time view of the tracker, safe to hand across component
/// boundaries.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerSnapshot {
    pub in_foreground: bool,
    pub visible: bool,
    pub time_outside_app_ms: u64,
    pub resumed: u32,
    pub paused: u32,
    pub started: u32,
    pub stopped: u32,
}

/// Consumes activity lifecycle events and answers the derived queries.
///
/// Callbacks arrive on whatever thread the host adapter delivers from;
/// queries may come from any thread. Both paths go through one mutex.
pub struct LifecycleTracker {
    state: Mutex<TrackerState>,
    clock: Arc<dyn Clock>,
}

impl LifecycleTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(TrackerState::default()),
            clock,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, TrackerState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("LifecycleTracker: state mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// True while the app has at least one resumed activity.
    pub fn is_in_foreground(&self) -> bool {
        self.lock_state().is_in_foreground()
    }

    /// True while the app has at least one started activity (visible,
    /// though possibly partially obscured).
    pub fn is_visible(&self) -> bool {
        self.lock_state().is_visible()
    }

    /// Milliseconds of the most recently completed span outside the app.
    /// 0 until the user has left and come back once.
    ///
    /// Measured from the most recent pause without a resume. An intra-app
    /// screen transition also pauses one activity right before resuming the
    /// next, so this can hold a small value even when the user never left;
    /// accepted approximation.
    pub fn time_spent_outside_app(&self) -> u64 {
        self.lock_state().time_outside_app_ms
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        let state = self.lock_state();
        TrackerSnapshot {
            in_foreground: state.is_in_foreground(),
            visible: state.is_visible(),
            time_outside_app_ms: state.time_outside_app_ms,
            resumed: state.resumed,
            paused: state.paused,
            started: state.started,
            stopped: state.stopped,
        }
    }
}

impl ActivityLifecycleCallbacks for LifecycleTracker {
    // created, save-state and destroyed stay as the trait's no-ops: they
    // carry no foreground or visibility information.

    fn on_activity_started(&self) {
        let mut state = self.lock_state();
        state.record_started();
        debug!(
            "activity started (started={}, stopped={})",
            state.started, state.stopped
        );
    }

    fn on_activity_resumed(&self) {
        let now_ms = self.clock.now_millis();
        let mut state = self.lock_state();
        state.record_resumed(now_ms);
        debug!(
            "activity resumed (resumed={}, paused={}, last outside span {}ms)",
            state.resumed, state.paused, state.time_outside_app_ms
        );
    }

    fn on_activity_paused(&self) {
        let now_ms = self.clock.now_millis();
        let mut state = self.lock_state();
        state.record_paused(now_ms);
        debug!(
            "activity paused (resumed={}, paused={})",
            state.resumed, state.paused
        );
    }

    fn on_activity_stopped(&self) {
        let mut state = self.lock_state();
        state.record_stopped();
        debug!(
            "activity stopped (started={}, stopped={})",
            state.started, state.stopped
        );
    }
}
