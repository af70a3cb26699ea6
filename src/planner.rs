//! The scheduling engine
//!
//! A [`Planner`] owns every piece of mutable state of a week view: the selected week, the cached [`SlotIndex`] of that week,
//! the [`UnscheduledPool`] and the [`EditSessions`]. \
//! Every change goes through the [`TaskStore`] first: the local state is only modified once the store has confirmed it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::error::Error;
use crate::item::NewTask;
use crate::pool::{CommitOutcome, UnscheduledPool};
use crate::session::EditSessions;
use crate::slot_index::{Slot, SlotIndex, SlotKey, WeekLoad, WeekRequest};
use crate::task::{DailyTaskId, ScheduledTask, UnscheduledTask};
use crate::traits::TaskStore;
use crate::week::{day_index, week_dates_from, week_label, WeekOffset};

/// A daily task has been dropped onto a slot
#[derive(Clone, Debug, PartialEq)]
pub struct DropMessage {
    pub source: DailyTaskId,
    pub target: SlotKey,
}

pub struct Planner<S: TaskStore> {
    store: Arc<S>,
    /// The date week offsets are relative to
    today: NaiveDate,
    offset: WeekOffset,
    /// Dates of the selected week
    dates: [NaiveDate; 7],
    /// Bumped every time a week is selected
    generation: u64,
    /// Only the selected week is kept. It is fetched again every time it gets selected
    weeks: HashMap<WeekOffset, SlotIndex>,
    pool: UnscheduledPool,
    sessions: EditSessions,
}

impl<S: TaskStore> Planner<S> {
    /// Create a planner, showing the current week.
    ///
    /// Nothing is fetched yet, see [`Self::refresh`]
    pub fn new(store: S) -> Result<Self, Error> {
        Self::with_today(Arc::new(store), Local::now().date_naive())
    }

    /// Create a planner whose week 0 is the week that contains `today`
    pub fn with_today(store: Arc<S>, today: NaiveDate) -> Result<Self, Error> {
        Ok(Self {
            store,
            today,
            offset: 0,
            dates: week_dates_from(today, 0)?,
            generation: 0,
            weeks: HashMap::new(),
            pool: UnscheduledPool::new(),
            sessions: EditSessions::new(),
        })
    }

    pub fn store(&self) -> &Arc<S> { &self.store }
    pub fn today(&self) -> NaiveDate { self.today }
    pub fn week_offset(&self) -> WeekOffset { self.offset }
    pub fn pool(&self) -> &UnscheduledPool { &self.pool }
    pub fn sessions(&self) -> &EditSessions { &self.sessions }

    /// The dates of the selected week, Monday first
    pub fn week_dates(&self) -> [NaiveDate; 7] {
        self.dates
    }

    pub fn week_label(&self) -> String {
        week_label(&self.week_dates())
    }

    /// Whether the tasks of the selected week have been fetched
    pub fn is_week_ready(&self) -> bool {
        self.weeks.contains_key(&self.offset)
    }

    /// The tasks of the selected week, if they have been fetched
    pub fn slot_index(&self) -> Option<&SlotIndex> {
        self.weeks.get(&self.offset)
    }

    /// The tasks of a slot of the selected week
    pub fn tasks_at(&self, slot: Slot) -> &[ScheduledTask] {
        match self.slot_index() {
            Some(index) => index.get(slot),
            None => &[],
        }
    }


    //
    // Week navigation
    //

    /// Select the week at `offset`, fetch its tasks, and refresh the daily tasks
    pub async fn navigate(&mut self, offset: WeekOffset) -> Result<(), Error> {
        let request = self.select_week(offset)?;
        let load = request.fetch(self.store.as_ref()).await;
        self.apply_week(load)?;
        self.pool.load(self.store.as_ref()).await
    }

    pub async fn next_week(&mut self) -> Result<(), Error> {
        self.navigate(self.offset + 1).await
    }

    pub async fn previous_week(&mut self) -> Result<(), Error> {
        self.navigate(self.offset - 1).await
    }

    /// Fetch the selected week and the daily tasks again
    pub async fn refresh(&mut self) -> Result<(), Error> {
        self.navigate(self.offset).await
    }

    /// Select a week, and return the request that will fetch its tasks.
    ///
    /// Until the matching [`WeekLoad`] is given to [`Self::apply_week`], the week is not ready (even when `offset` was already selected).
    /// Any previously issued request becomes stale. \
    /// An offset whose dates cannot be represented is rejected, and the selection is left unchanged.
    pub fn select_week(&mut self, offset: WeekOffset) -> Result<WeekRequest, Error> {
        let dates = week_dates_from(self.today, offset)?;
        self.offset = offset;
        self.dates = dates;
        self.generation += 1;
        self.weeks.clear();
        self.sessions.close_slot();
        log::debug!("Selecting week {} ({})", offset, self.week_label());

        Ok(WeekRequest {
            offset,
            generation: self.generation,
            dates,
        })
    }

    /// Store the result of a week fetch.
    ///
    /// Results of a request that is not the latest one are discarded.
    /// A failed fetch leaves the selected week not ready.
    pub fn apply_week(&mut self, load: WeekLoad) -> Result<(), Error> {
        let WeekLoad { request, result } = load;
        if request.generation != self.generation {
            log::debug!("Discarding a stale load of week {} (week {} is selected)", request.offset, self.offset);
            return Err(Error::StaleResponse { requested: request.offset, current: self.offset });
        }

        match result {
            Err(err) => {
                log::warn!("Unable to load week {}: {}", request.offset, err);
                Err(err)
            },
            Ok(index) => {
                log::info!("Week {} loaded ({} tasks)", request.offset, index.len());
                self.weeks.clear();
                self.weeks.insert(request.offset, index);
                Ok(())
            },
        }
    }


    //
    // Scheduled tasks
    //

    /// Create a task in a slot of the selected week
    pub async fn add_task(&mut self, slot: Slot, text: &str) -> Result<ScheduledTask, Error> {
        if text.trim().is_empty() {
            return Err(Error::BlankText);
        }
        if self.is_week_ready() == false {
            return Err(Error::WeekNotLoaded(self.offset));
        }

        let date = self.week_dates()[day_index(slot.day())];
        let request = NewTask::on_the_hour(text.to_string(), date, slot.hour());
        let created = match self.store.create_task(&request).await {
            Ok(created) => created,
            Err(err) => {
                log::warn!("Unable to create a task in {}: {}", slot, err);
                return Err(err);
            },
        };

        let task = ScheduledTask::new(created.id, created.description, slot.day(), slot.hour());
        let index = self.weeks.get_mut(&self.offset).ok_or(Error::WeekNotLoaded(self.offset))?;
        index.insert(slot, task.clone());
        log::info!("Task {} added to {} ({})", task.id(), slot, date);
        Ok(task)
    }

    /// Delete the task at `position` in a slot of the selected week.
    ///
    /// It is removed locally only once the store has deleted it
    pub async fn delete_task(&mut self, slot: Slot, position: usize) -> Result<ScheduledTask, Error> {
        let id = self.slot_index()
            .ok_or(Error::WeekNotLoaded(self.offset))?
            .task_at(slot, position)
            .ok_or(Error::InvalidPosition { slot, position })?
            .id();

        if let Err(err) = self.store.delete_task(id).await {
            log::warn!("Unable to delete task {}: {}", id, err);
            return Err(err);
        }

        let index = self.weeks.get_mut(&self.offset).ok_or(Error::WeekNotLoaded(self.offset))?;
        let removed = index.remove_at(slot, position)?;
        log::info!("Task {} removed from {}", id, slot);
        Ok(removed)
    }

    /// Start typing a new task in a slot. Any other slot being edited is abandoned
    pub fn open_slot(&mut self, slot: Slot) {
        self.sessions.open_slot(slot);
    }

    /// Abandon the slot being edited (e.g. on Escape, or when the input loses focus)
    pub fn cancel_slot(&mut self) -> Option<Slot> {
        self.sessions.close_slot()
    }

    /// Create a task with the text typed in the slot being edited.
    ///
    /// The edit session ends, whether the task could be created or not
    pub async fn commit_slot(&mut self, text: &str) -> Result<ScheduledTask, Error> {
        let slot = self.sessions.close_slot().ok_or(Error::NoActiveSlot)?;
        self.add_task(slot, text).await
    }

    /// Schedule a copy of a daily task. The daily task itself is left untouched
    pub async fn drop_task(&mut self, message: DropMessage) -> Result<ScheduledTask, Error> {
        let DropMessage { source, target } = message;
        if target.offset != self.offset {
            return Err(Error::StaleResponse { requested: target.offset, current: self.offset });
        }

        let entry = self.pool.get(&source).ok_or_else(|| Error::UnknownDailyTask(source.clone()))?;
        if entry.is_editing() {
            return Err(Error::StillEditing(source));
        }
        let text = entry.text().to_string();
        log::debug!("Daily task {} dropped onto {}", source, target.slot);
        self.add_task(target.slot, &text).await
    }


    //
    // Daily tasks
    //

    /// Append a new daily task, and start naming it
    pub fn add_daily_task(&mut self) -> Result<DailyTaskId, Error> {
        if let Some(current) = self.sessions.daily() {
            return Err(Error::EditInProgress(current.clone()));
        }
        let id = self.pool.add();
        self.sessions.begin_daily(id.clone())?;
        Ok(id)
    }

    pub fn update_daily_task_text(&mut self, id: &DailyTaskId, text: String) -> Result<(), Error> {
        self.pool.update_text(id, text)
    }

    /// Finish naming a daily task (e.g. on Enter).
    ///
    /// The edit session ends once the task has been either saved or discarded. It goes on in case the store failed.
    pub async fn commit_daily_task(&mut self, id: &DailyTaskId) -> Result<CommitOutcome, Error> {
        let outcome = self.pool.commit(self.store.as_ref(), id).await?;
        self.end_daily_session(id);
        Ok(outcome)
    }

    /// Abandon the daily task being named
    pub fn cancel_daily_task(&mut self, id: &DailyTaskId) -> Result<UnscheduledTask, Error> {
        let cancelled = self.pool.cancel(id)?;
        self.end_daily_session(id);
        Ok(cancelled)
    }

    /// Delete a daily task
    pub async fn remove_daily_task(&mut self, id: &DailyTaskId) -> Result<UnscheduledTask, Error> {
        let removed = self.pool.remove(self.store.as_ref(), id).await?;
        self.end_daily_session(id);
        Ok(removed)
    }

    pub async fn rename_daily_task(&mut self, id: &DailyTaskId, text: String) -> Result<(), Error> {
        self.pool.rename(self.store.as_ref(), id, text).await
    }

    fn end_daily_session(&mut self, id: &DailyTaskId) {
        if self.sessions.daily() == Some(id) {
            self.sessions.end_daily();
        }
    }
}
