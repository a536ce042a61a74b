use std::sync::PoisonError;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhaseTrackerError {
    #[error("Trying to report a new phase after phase tracker has been stopped.")]
    Stopped,

    #[error("Poisoned lock error: {0}")]
    PoisonedLock(String),
}

impl<T> From<PoisonError<T>> for PhaseTrackerError {
    fn from(err: PoisonError<T>) -> Self {
        PhaseTrackerError::PoisonedLock(err.to_string())
    }
}
