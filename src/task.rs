//! Scheduled and unscheduled (daily) tasks

use std::fmt::{Display, Formatter};

use chrono::Weekday;
use uuid::Uuid;

use crate::item::StoreId;

/// A task bound to a day and an hour of a week
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledTask {
    /// The identifier assigned by the task store
    id: StoreId,
    description: String,
    day: Weekday,
    hour: u8,
}

impl ScheduledTask {
    pub fn new(id: StoreId, description: String, day: Weekday, hour: u8) -> Self {
        Self { id, description, day, hour }
    }

    pub fn id(&self) -> StoreId          { self.id }
    pub fn description(&self) -> &str    { &self.description }
    pub fn day(&self) -> Weekday         { self.day }
    pub fn hour(&self) -> u8             { self.hour }
}


/// Identifies a daily task, whether it has been saved to the store yet or not
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DailyTaskId {
    /// This task has been created locally, and has never been saved yet
    Provisional(Uuid),
    /// This task is known to the store under this identifier
    Persisted(StoreId),
}

impl DailyTaskId {
    /// Generate a new random provisional identifier
    pub fn provisional() -> Self {
        DailyTaskId::Provisional(Uuid::new_v4())
    }

    pub fn is_persisted(&self) -> bool {
        match self {
            DailyTaskId::Persisted(_) => true,
            DailyTaskId::Provisional(_) => false,
        }
    }

    /// The store identifier, if this task has been saved already
    pub fn store_id(&self) -> Option<StoreId> {
        match self {
            DailyTaskId::Persisted(id) => Some(*id),
            DailyTaskId::Provisional(_) => None,
        }
    }
}

impl Display for DailyTaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DailyTaskId::Provisional(uuid) => write!(f, "provisional:{}", uuid),
            DailyTaskId::Persisted(id) => write!(f, "{}", id),
        }
    }
}

impl From<StoreId> for DailyTaskId {
    fn from(id: StoreId) -> Self {
        DailyTaskId::Persisted(id)
    }
}


/// A task that is not bound to any slot (yet)
#[derive(Clone, Debug, PartialEq)]
pub struct UnscheduledTask {
    id: DailyTaskId,
    text: String,
    /// Whether the text of this task is currently being typed
    editing: bool,
}

impl UnscheduledTask {
    /// A brand new task, that is being named and has not been saved yet
    pub fn new_provisional() -> Self {
        Self { id: DailyTaskId::provisional(), text: String::new(), editing: true }
    }

    /// A task that is already known to the store
    pub fn persisted(id: StoreId, text: String) -> Self {
        Self { id: DailyTaskId::Persisted(id), text, editing: false }
    }

    pub fn id(&self) -> &DailyTaskId  { &self.id }
    pub fn text(&self) -> &str        { &self.text }
    pub fn is_editing(&self) -> bool  { self.editing }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    /// Called once the store has saved this task
    pub(crate) fn mark_persisted(&mut self, id: StoreId, text: String) {
        self.id = DailyTaskId::Persisted(id);
        self.text = text;
        self.editing = false;
    }
}
