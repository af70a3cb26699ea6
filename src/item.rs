//! Records exchanged with the task store

use std::fmt::{Display, Formatter};

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An identifier assigned by the task store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(i64);

impl StoreId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for StoreId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for StoreId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// A scheduled task, as returned by `GET tasks?date=...` or `POST tasks`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteTask {
    pub id: StoreId,
    pub description: String,
    /// Time of day, `HH:MM:SS`
    pub time: String,
    /// Some stores echo the date back, some don't
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl RemoteTask {
    /// The hour this task is scheduled at
    pub fn hour(&self) -> Result<u8, Error> {
        parse_hour(&self.time)
    }
}

/// Body of `POST tasks`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: NaiveDate,
    /// `HH:00:00`
    pub time: String,
}

impl NewTask {
    /// A task starting at the beginning of the given hour
    pub fn on_the_hour(description: String, date: NaiveDate, hour: u8) -> Self {
        Self { description, date, time: format_hour(hour) }
    }
}

/// A daily task, as returned by the `daily-tasks` endpoints
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteDailyTask {
    pub id: StoreId,
    pub text: String,
}

/// Body of `POST daily-tasks` and `PUT daily-tasks/{id}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyTaskText {
    pub text: String,
}


/// Tasks are always scheduled on the hour boundary
pub fn format_hour(hour: u8) -> String {
    format!("{:02}:00:00", hour)
}

/// Extract the hour from a `HH:MM:SS` (or `HH:MM`) time of day
pub fn parse_hour(time: &str) -> Result<u8, Error> {
    let parsed = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|err| Error::InvalidResponse(format!("invalid time of day {:?}: {}", time, err)))?;
    Ok(parsed.hour() as u8)
}
