use std::time::Duration;

use thiserror::Error;

use crate::chan::ChanError;
use crate::lessons::errors::NegativeInputError;

#[derive(Debug, Error)]
pub enum TourError {
    #[error("lesson not found: {0}")]
    LessonNotFound(String),

    #[error("duplicate lesson: {0}")]
    DuplicateLesson(String),

    /// Method call through a capability slot that holds no value at all.
    #[error("method call on empty {0} slot")]
    NilCapability(&'static str),

    /// A task stayed blocked on `op` with nobody on the other side.
    #[error("deadlock: {op} blocked for {waited:?} with no counterpart")]
    Deadlock { op: &'static str, waited: Duration },

    #[error(transparent)]
    Channel(#[from] ChanError),

    #[error(transparent)]
    NegativeInput(#[from] NegativeInputError),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// Config parsed but its values contradict each other.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
