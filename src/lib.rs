//! Keeps a pulse on a host application's lifecycle.
//!
//! [`Vigil`] subscribes a [`LifecycleTracker`] to the host runtime's
//! activity lifecycle notifications and answers three questions for any
//! other component of the app: is the app in the foreground, is any
//! activity visible, and how long did the most recent span outside the
//! app last.
//!
//! The crate never touches host types directly: the embedder implements
//! [`HostApplication`] as a thin adapter over its runtime and hands it to
//! [`Vigil::init`]. No logger is installed here; transitions are emitted
//! through the `log` facade for the embedder to route.

pub mod clock;
pub mod error;
pub mod host;
#[cfg(test)]
mod test_utils;
pub mod tracker;

pub use clock::{Clock, SystemClock};
pub use error::TrackerError;
pub use host::{ActivityLifecycleCallbacks, HostApplication};
pub use tracker::{LifecycleTracker, TrackerSnapshot};

use log::info;
use std::sync::Arc;

/// Owned handle to lifecycle tracking.
///
/// The composition root constructs one per process and passes it (or
/// clones of the inner tracker) to any consumer needing lifecycle queries.
pub struct Vigil {
    tracker: Option<Arc<LifecycleTracker>>,
}

impl Vigil {
    /// Create an uninitialized handle. Every query fails with
    /// [`TrackerError::Uninitialized`] until [`Vigil::init`] runs.
    pub fn new() -> Self {
        Self { tracker: None }
    }

    /// Hook the host application up, constructing the tracker and
    /// subscribing it to the runtime's lifecycle notifications.
    ///
    /// Calling this again replaces the tracker; counters restart from
    /// zero.
    pub fn init<H: HostApplication>(&mut self, host: &mut H) {
        self.init_with_clock(host, Arc::new(SystemClock));
    }

    /// Same as [`Vigil::init`], with an injected [`Clock`].
    pub fn init_with_clock<H: HostApplication>(&mut self, host: &mut H, clock: Arc<dyn Clock>) {
        let tracker = Arc::new(LifecycleTracker::new(clock));
        let callbacks: Arc<dyn ActivityLifecycleCallbacks> = tracker.clone();
        host.register_activity_lifecycle_callbacks(callbacks);
        self.tracker = Some(tracker);
        info!("lifecycle tracking initialized");
    }

    /// True if the app currently has a resumed activity.
    pub fn is_in_foreground(&self) -> Result<bool, TrackerError> {
        Ok(self.tracker()?.is_in_foreground())
    }

    /// True if the app currently has a started activity (visible, though
    /// possibly partially obscured).
    pub fn is_visible(&self) -> Result<bool, TrackerError> {
        Ok(self.tracker()?.is_visible())
    }

    /// Milliseconds the user spent outside the app during the most recent
    /// departure. 0 if the user has not left the app.
    pub fn time_spent_outside_app(&self) -> Result<u64, TrackerError> {
        Ok(self.tracker()?.time_spent_outside_app())
    }

    /// Point-in-time view of the full tracker state.
    pub fn snapshot(&self) -> Result<TrackerSnapshot, TrackerError> {
        Ok(self.tracker()?.snapshot())
    }

    pub fn is_initialized(&self) -> bool {
        self.tracker.is_some()
    }

    /// The inner tracker, for consumers that prefer to hold their own
    /// handle instead of going through this façade.
    pub fn tracker(&self) -> Result<&Arc<LifecycleTracker>, TrackerError> {
        self.tracker.as_ref().ok_or(TrackerError::Uninitialized)
    }
}

impl Default for Vigil {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakeHost, ManualClock};

    fn setup() -> (Vigil, FakeHost, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(10_000));
        let mut host = FakeHost::new();
        let mut vigil = Vigil::new();
        vigil.init_with_clock(&mut host, clock.clone());
        (vigil, host, clock)
    }

    #[test]
    fn test_queries_before_init_fail() {
        let vigil = Vigil::new();

        assert_eq!(vigil.is_in_foreground(), Err(TrackerError::Uninitialized));
        assert_eq!(vigil.is_visible(), Err(TrackerError::Uninitialized));
        assert_eq!(
            vigil.time_spent_outside_app(),
            Err(TrackerError::Uninitialized)
        );
        assert!(vigil.snapshot().is_err());
        assert!(!vigil.is_initialized());
    }

    #[test]
    fn test_default_is_uninitialized() {
        let vigil = Vigil::default();
        assert!(!vigil.is_initialized());
    }

    #[test]
    fn test_init_registers_with_the_host() {
        let (vigil, host, _clock) = setup();

        assert_eq!(host.registered(), 1);
        assert!(vigil.is_initialized());
    }

    #[test]
    fn test_freshly_initialized_reports_nothing() {
        let (vigil, _host, _clock) = setup();

        assert_eq!(vigil.is_in_foreground(), Ok(false));
        assert_eq!(vigil.is_visible(), Ok(false));
        assert_eq!(vigil.time_spent_outside_app(), Ok(0));
    }

    #[test]
    fn test_foreground_and_visible_after_start_and_resume() {
        let (vigil, host, _clock) = setup();

        host.deliver_created();
        host.deliver_started();
        host.deliver_resumed();

        assert_eq!(vigil.is_in_foreground(), Ok(true));
        assert_eq!(vigil.is_visible(), Ok(true));
    }

    #[test]
    fn test_time_outside_app_through_the_host() {
        let (vigil, host, clock) = setup();

        host.deliver_started();
        host.deliver_resumed();

        host.deliver_paused();
        host.deliver_stopped();
        assert_eq!(vigil.is_in_foreground(), Ok(false));
        assert_eq!(vigil.is_visible(), Ok(false));

        clock.advance(5_000);
        host.deliver_started();
        host.deliver_resumed();

        assert_eq!(vigil.time_spent_outside_app(), Ok(5_000));
        assert_eq!(vigil.is_in_foreground(), Ok(true));
    }

    #[test]
    fn test_save_state_and_destroy_do_not_disturb_queries() {
        let (vigil, host, _clock) = setup();

        host.deliver_started();
        host.deliver_resumed();
        host.deliver_save_state();
        host.deliver_destroyed();

        assert_eq!(vigil.is_in_foreground(), Ok(true));
        assert_eq!(vigil.is_visible(), Ok(true));
    }

    #[test]
    fn test_reinit_replaces_the_tracker() {
        let (mut vigil, host, clock) = setup();

        host.deliver_started();
        host.deliver_resumed();
        assert_eq!(vigil.is_in_foreground(), Ok(true));

        let mut second_host = FakeHost::new();
        vigil.init_with_clock(&mut second_host, clock.clone());

        // Fresh tracker: the first host's events no longer count
        assert_eq!(vigil.is_in_foreground(), Ok(false));
        assert_eq!(vigil.is_visible(), Ok(false));
        assert_eq!(vigil.time_spent_outside_app(), Ok(0));
        assert_eq!(second_host.registered(), 1);
    }

    #[test]
    fn test_init_with_system_clock() {
        let mut host = FakeHost::new();
        let mut vigil = Vigil::new();
        vigil.init(&mut host);

        host.deliver_started();
        host.deliver_resumed();

        assert_eq!(vigil.is_in_foreground(), Ok(true));
        assert_eq!(vigil.is_visible(), Ok(true));
        assert_eq!(vigil.time_spent_outside_app(), Ok(0));
    }

    #[test]
    fn test_shared_tracker_handle_sees_host_events() {
        let (vigil, host, _clock) = setup();

        let handle = Arc::clone(vigil.tracker().unwrap());
        host.deliver_started();
        host.deliver_resumed();

        assert!(handle.is_in_foreground());
        assert!(handle.is_visible());
    }
}
