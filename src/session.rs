//! Tracks which text input is currently active

use crate::error::Error;
use crate::slot_index::Slot;
use crate::task::DailyTaskId;

/// The state of a text input
#[derive(Clone, Debug, PartialEq)]
pub enum EditState<T> {
    Idle,
    Editing(T),
}

impl<T> Default for EditState<T> {
    fn default() -> Self {
        EditState::Idle
    }
}

impl<T> EditState<T> {
    pub fn target(&self) -> Option<&T> {
        match self {
            EditState::Idle => None,
            EditState::Editing(target) => Some(target),
        }
    }

    fn take(&mut self) -> Option<T> {
        match std::mem::take(self) {
            EditState::Idle => None,
            EditState::Editing(target) => Some(target),
        }
    }
}

/// The two kinds of edit sessions: a calendar slot awaiting the text of a new task, and a daily task being named.
///
/// They are independent from each other, but there can be at most one session of each kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditSessions {
    calendar: EditState<Slot>,
    daily: EditState<DailyTaskId>,
}

impl EditSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start typing in a slot. Any other slot being edited is abandoned, and returned
    pub fn open_slot(&mut self, slot: Slot) -> Option<Slot> {
        let previous = self.calendar.take();
        if let Some(previous) = previous {
            if previous != slot {
                log::debug!("Abandoning the edition of {}", previous);
            }
        }
        self.calendar = EditState::Editing(slot);
        previous
    }

    /// Stop typing in the current slot (whether it has been committed or cancelled)
    pub fn close_slot(&mut self) -> Option<Slot> {
        self.calendar.take()
    }

    pub fn slot(&self) -> Option<&Slot> {
        self.calendar.target()
    }

    pub fn is_editing_slot(&self, slot: Slot) -> bool {
        self.calendar.target() == Some(&slot)
    }

    /// Start naming a daily task. This fails in case another one is being named already
    pub fn begin_daily(&mut self, id: DailyTaskId) -> Result<(), Error> {
        if let EditState::Editing(current) = &self.daily {
            return Err(Error::EditInProgress(current.clone()));
        }
        self.daily = EditState::Editing(id);
        Ok(())
    }

    pub fn end_daily(&mut self) -> Option<DailyTaskId> {
        self.daily.take()
    }

    pub fn daily(&self) -> Option<&DailyTaskId> {
        self.daily.target()
    }

    pub fn calendar_state(&self) -> &EditState<Slot> {
        &self.calendar
    }

    pub fn daily_state(&self) -> &EditState<DailyTaskId> {
        &self.daily
    }
}
