//! Daily tasks, that are not scheduled at any slot

use crate::error::Error;
use crate::item::StoreId;
use crate::task::{DailyTaskId, UnscheduledTask};
use crate::traits::TaskStore;

/// What happened to a daily task when its edition has been committed
#[derive(Clone, Debug, PartialEq)]
pub enum CommitOutcome {
    /// The task has been saved by the store, under this ID
    Created(StoreId),
    /// The task had no text, and has been discarded without ever reaching the store
    Discarded,
}

/// The ordered list of unscheduled tasks
#[derive(Clone, Debug, Default)]
pub struct UnscheduledPool {
    entries: Vec<UnscheduledTask>,
}

impl UnscheduledPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the saved entries with what the store contains.
    ///
    /// An entry that is currently being edited has never been saved, and is kept (at the end of the list)
    pub async fn load<S: TaskStore + ?Sized>(&mut self, store: &S) -> Result<(), Error> {
        let remote = store.get_daily_tasks().await?;

        let pending: Vec<UnscheduledTask> = self.entries.drain(..)
            .filter(|entry| entry.is_editing())
            .collect();
        self.entries = remote.into_iter()
            .map(|task| UnscheduledTask::persisted(task.id, task.text))
            .collect();
        self.entries.extend(pending);
        log::debug!("{} daily tasks loaded", self.entries.len());
        Ok(())
    }

    /// Append a new empty entry, in editing mode
    pub fn add(&mut self) -> DailyTaskId {
        let entry = UnscheduledTask::new_provisional();
        let id = entry.id().clone();
        self.entries.push(entry);
        id
    }

    /// Change the (uncommitted) text of an entry that is being edited
    pub fn update_text(&mut self, id: &DailyTaskId, text: String) -> Result<(), Error> {
        let entry = self.editing_entry_mut(id)?;
        entry.set_text(text);
        Ok(())
    }

    /// Finish editing an entry.
    ///
    /// A blank entry is removed, without contacting the store.
    /// Otherwise, it is saved to the store, and only then gets its permanent ID and leaves the editing mode.
    /// Nothing changes in case the store fails.
    pub async fn commit<S: TaskStore + ?Sized>(&mut self, store: &S, id: &DailyTaskId) -> Result<CommitOutcome, Error> {
        let text = self.editing_entry_mut(id)?.text().to_string();

        if text.trim().is_empty() {
            log::debug!("Discarding blank daily task {}", id);
            self.entries.retain(|entry| entry.id() != id);
            return Ok(CommitOutcome::Discarded);
        }

        let created = store.create_daily_task(&text).await?;
        let entry = self.editing_entry_mut(id)?;
        entry.mark_persisted(created.id, created.text);
        log::info!("Daily task {} saved as {}", id, created.id);
        Ok(CommitOutcome::Created(created.id))
    }

    /// Abandon the edition of an entry. Since it has never been saved, it is simply removed
    pub fn cancel(&mut self, id: &DailyTaskId) -> Result<UnscheduledTask, Error> {
        self.editing_entry_mut(id)?;
        let position = self.position(id)?;
        Ok(self.entries.remove(position))
    }

    /// Delete an entry.
    ///
    /// In case it has been saved already, it is removed locally only once the store has deleted it.
    pub async fn remove<S: TaskStore + ?Sized>(&mut self, store: &S, id: &DailyTaskId) -> Result<UnscheduledTask, Error> {
        self.position(id)?;
        if let Some(store_id) = id.store_id() {
            store.delete_daily_task(store_id).await?;
        }

        let position = self.position(id)?;
        Ok(self.entries.remove(position))
    }

    /// Change the text of a saved entry
    pub async fn rename<S: TaskStore + ?Sized>(&mut self, store: &S, id: &DailyTaskId, text: String) -> Result<(), Error> {
        if text.trim().is_empty() {
            return Err(Error::BlankText);
        }
        let position = self.position(id)?;
        let store_id = match id.store_id() {
            Some(store_id) => store_id,
            None => return Err(Error::StillEditing(id.clone())),
        };

        let updated = store.update_daily_task(store_id, &text).await?;
        self.entries[position].set_text(updated.text);
        Ok(())
    }

    pub fn get(&self, id: &DailyTaskId) -> Option<&UnscheduledTask> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// The entry that is currently being edited, if any
    pub fn editing_entry(&self) -> Option<&UnscheduledTask> {
        self.entries.iter().find(|entry| entry.is_editing())
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnscheduledTask> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: &DailyTaskId) -> Result<usize, Error> {
        self.entries.iter()
            .position(|entry| entry.id() == id)
            .ok_or_else(|| Error::UnknownDailyTask(id.clone()))
    }

    fn editing_entry_mut(&mut self, id: &DailyTaskId) -> Result<&mut UnscheduledTask, Error> {
        let position = self.position(id)?;
        let entry = &mut self.entries[position];
        if entry.is_editing() == false {
            return Err(Error::NotEditing(id.clone()));
        }
        Ok(entry)
    }
}
