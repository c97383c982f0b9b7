//! Capability seam between the tracker core and the host runtime.
//!
//! The core never depends on host types: the embedder implements
//! [`HostApplication`] as a thin adapter over its runtime and forwards the
//! runtime's activity lifecycle notifications to whatever callbacks were
//! registered.

use std::sync::Arc;

/// The seven activity lifecycle transitions a host runtime reports.
///
/// Every method defaults to a no-op so implementors only handle the
/// transitions they care about.
pub trait ActivityLifecycleCallbacks: Send + Sync {
    fn on_activity_created(&self) {}
    fn on_activity_started(&self) {}
    fn on_activity_resumed(&self) {}
    fn on_activity_paused(&self) {}
    fn on_activity_stopped(&self) {}
    fn on_activity_save_state(&self) {}
    fn on_activity_destroyed(&self) {}
}

/// Registration capability of the host application runtime.
pub trait HostApplication {
    /// Subscribe `callbacks` to every activity lifecycle notification the
    /// runtime delivers, for the lifetime of the process.
    fn register_activity_lifecycle_callbacks(
        &mut self,
        callbacks: Arc<dyn ActivityLifecycleCallbacks>,
    );
}
