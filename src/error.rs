use thiserror::Error;

/// Tracker error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("lifecycle tracking is not initialized: call `Vigil::init` first")]
    Uninitialized,
}
