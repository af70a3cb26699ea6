//! Errors returned by this crate

use reqwest::StatusCode;

use crate::slot_index::Slot;
use crate::task::DailyTaskId;
use crate::week::WeekOffset;

/// Broad families of failures.
///
/// Callers usually only need to know whether the store could not be reached (and the operation may be retried later),
/// whether the request was rejected before anything was sent, or whether an answer came too late to be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The request to the task store could not complete
    Network,
    /// The operation was rejected locally, and nothing was sent to the store
    Validation,
    /// A response arrived for a week (or an entity) that is no longer current
    Stale,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("network failure: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("unexpected HTTP status code {0}")]
    UnexpectedStatus(StatusCode),
    #[error("invalid response from the task store: {0}")]
    InvalidResponse(String),

    #[error("task text must not be blank")]
    BlankText,
    #[error("hour {0} is not in 0..24")]
    InvalidHour(u8),
    #[error("there is no task at position {position} of {slot}")]
    InvalidPosition { slot: Slot, position: usize },
    #[error("unknown daily task {0}")]
    UnknownDailyTask(DailyTaskId),
    #[error("daily task {0} is not being edited")]
    NotEditing(DailyTaskId),
    #[error("daily task {0} is still being edited")]
    StillEditing(DailyTaskId),
    #[error("daily task {0} is already being edited")]
    EditInProgress(DailyTaskId),
    #[error("no calendar slot is being edited")]
    NoActiveSlot,
    #[error("week {0} is not loaded")]
    WeekNotLoaded(WeekOffset),
    #[error("week {0} is out of the supported date range")]
    WeekOutOfRange(WeekOffset),
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("stale response for week {requested} (week {current} is selected)")]
    StaleResponse { requested: WeekOffset, current: WeekOffset },
}

impl Error {
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Network(_) | Error::UnexpectedStatus(_) | Error::InvalidResponse(_) => FailureKind::Network,
            Error::StaleResponse { .. } => FailureKind::Stale,
            _ => FailureKind::Validation,
        }
    }

    pub fn is_network(&self) -> bool {
        self.kind() == FailureKind::Network
    }

    pub fn is_stale(&self) -> bool {
        self.kind() == FailureKind::Stale
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(Box::new(err))
    }
}
