//! An in-memory task store, that mocks a remote server in tests
#![cfg(any(test, feature = "mock_store"))]

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Error;
use crate::item::{NewTask, RemoteDailyTask, RemoteTask, StoreId};
use crate::mock_behaviour::MockBehaviour;
use crate::traits::TaskStore;

/// A request received by a [`MemoryStore`]
#[derive(Clone, Debug, PartialEq)]
pub enum StoreRequest {
    GetTasks(NaiveDate),
    CreateTask(NewTask),
    DeleteTask(StoreId),
    GetDailyTasks,
    CreateDailyTask(String),
    UpdateDailyTask(StoreId, String),
    DeleteDailyTask(StoreId),
}

#[derive(Default)]
struct StoreData {
    last_id: i64,
    tasks: Vec<(NaiveDate, RemoteTask)>,
    daily_tasks: Vec<RemoteDailyTask>,
    requests: Vec<StoreRequest>,
}

impl StoreData {
    fn next_id(&mut self) -> StoreId {
        self.last_id += 1;
        StoreId::from(self.last_id)
    }
}

/// A [`TaskStore`] that keeps everything in memory.
///
/// Every request it receives is recorded (even the ones that fail), and it can be told to fail some of them (see [`MockBehaviour`])
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<StoreData>,
    behaviour: Mutex<MockBehaviour>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behaviour(behaviour: MockBehaviour) -> Self {
        let store = Self::new();
        store.set_behaviour(behaviour);
        store
    }

    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        *lock(&self.behaviour) = behaviour;
    }

    /// Add a scheduled task, without recording it as a request
    pub fn seed_task(&self, date: NaiveDate, time: &str, description: &str) -> StoreId {
        let mut data = lock(&self.data);
        let id = data.next_id();
        data.tasks.push((date, RemoteTask {
            id,
            description: description.to_string(),
            time: time.to_string(),
            date: Some(date),
        }));
        id
    }

    /// Add a daily task, without recording it as a request
    pub fn seed_daily_task(&self, text: &str) -> StoreId {
        let mut data = lock(&self.data);
        let id = data.next_id();
        data.daily_tasks.push(RemoteDailyTask { id, text: text.to_string() });
        id
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<StoreRequest> {
        lock(&self.data).requests.clone()
    }

    pub fn clear_requests(&self) {
        lock(&self.data).requests.clear();
    }

    /// The scheduled tasks this store contains for a given date
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<RemoteTask> {
        lock(&self.data).tasks.iter()
            .filter(|(d, _)| *d == date)
            .map(|(_, task)| task.clone())
            .collect()
    }

    /// The daily tasks this store contains
    pub fn daily_tasks(&self) -> Vec<RemoteDailyTask> {
        lock(&self.data).daily_tasks.clone()
    }

    /// Record a request, then decide whether it should succeed
    fn receive(&self, request: StoreRequest) -> Result<MutexGuard<'_, StoreData>, Error> {
        let verdict = lock(&self.behaviour).check(&request);
        let mut data = lock(&self.data);
        data.requests.push(request);
        verdict?;
        Ok(data)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn get_tasks(&self, date: NaiveDate) -> Result<Vec<RemoteTask>, Error> {
        let data = self.receive(StoreRequest::GetTasks(date))?;
        Ok(data.tasks.iter()
            .filter(|(d, _)| *d == date)
            .map(|(_, task)| task.clone())
            .collect())
    }

    async fn create_task(&self, task: &NewTask) -> Result<RemoteTask, Error> {
        let mut data = self.receive(StoreRequest::CreateTask(task.clone()))?;
        let created = RemoteTask {
            id: data.next_id(),
            description: task.description.clone(),
            time: task.time.clone(),
            date: Some(task.date),
        };
        data.tasks.push((task.date, created.clone()));
        Ok(created)
    }

    async fn delete_task(&self, id: StoreId) -> Result<(), Error> {
        let mut data = self.receive(StoreRequest::DeleteTask(id))?;
        let count = data.tasks.len();
        data.tasks.retain(|(_, task)| task.id != id);
        if data.tasks.len() == count {
            return Err(Error::UnexpectedStatus(reqwest::StatusCode::NOT_FOUND));
        }
        Ok(())
    }

    async fn get_daily_tasks(&self) -> Result<Vec<RemoteDailyTask>, Error> {
        let data = self.receive(StoreRequest::GetDailyTasks)?;
        Ok(data.daily_tasks.clone())
    }

    async fn create_daily_task(&self, text: &str) -> Result<RemoteDailyTask, Error> {
        let mut data = self.receive(StoreRequest::CreateDailyTask(text.to_string()))?;
        let created = RemoteDailyTask { id: data.next_id(), text: text.to_string() };
        data.daily_tasks.push(created.clone());
        Ok(created)
    }

    async fn update_daily_task(&self, id: StoreId, text: &str) -> Result<RemoteDailyTask, Error> {
        let mut data = self.receive(StoreRequest::UpdateDailyTask(id, text.to_string()))?;
        match data.daily_tasks.iter_mut().find(|task| task.id == id) {
            None => Err(Error::UnexpectedStatus(reqwest::StatusCode::NOT_FOUND)),
            Some(task) => {
                task.text = text.to_string();
                Ok(task.clone())
            },
        }
    }

    async fn delete_daily_task(&self, id: StoreId) -> Result<(), Error> {
        let mut data = self.receive(StoreRequest::DeleteDailyTask(id))?;
        let count = data.daily_tasks.len();
        data.daily_tasks.retain(|task| task.id != id);
        if data.daily_tasks.len() == count {
            return Err(Error::UnexpectedStatus(reqwest::StatusCode::NOT_FOUND));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 13).unwrap()
    }

    #[tokio::test]
    async fn requests_are_recorded_even_when_they_fail() {
        let store = MemoryStore::with_behaviour(MockBehaviour {
            create_task_behaviour: (1, 1),
            ..MockBehaviour::default()
        });
        let dentist = NewTask::on_the_hour("Dentist".to_string(), date(), 9);

        let created = store.create_task(&dentist).await.unwrap();
        assert_eq!(created.id, StoreId::from(1));
        assert!(store.create_task(&dentist).await.unwrap_err().is_network());
        assert!(store.create_task(&dentist).await.is_ok());

        assert_eq!(store.requests(), vec![StoreRequest::CreateTask(dentist); 3]);
        assert_eq!(store.tasks_on(date()).len(), 2);
        store.clear_requests();
        assert!(store.requests().is_empty());
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = MemoryStore::new();
        let id = store.seed_daily_task("Water the plants");
        store.seed_task(date(), "10:00:00", "Call mum");

        assert!(matches!(store.delete_task(StoreId::from(42)).await, Err(Error::UnexpectedStatus(status)) if status.as_u16() == 404));
        assert!(store.update_daily_task(StoreId::from(42), "x").await.is_err());

        let renamed = store.update_daily_task(id, "Water the cactus").await.unwrap();
        assert_eq!(renamed.text, "Water the cactus");
        store.delete_daily_task(id).await.unwrap();
        assert!(store.daily_tasks().is_empty());
        assert!(store.delete_daily_task(id).await.is_err());
        assert_eq!(store.get_tasks(date()).await.unwrap()[0].description, "Call mum");
    }

    #[tokio::test]
    async fn behaviour_can_be_replaced() {
        let store = MemoryStore::with_behaviour(MockBehaviour::fail_now(5));
        assert!(store.get_daily_tasks().await.is_err());

        store.set_behaviour(MockBehaviour::new());
        assert!(store.get_daily_tasks().await.is_ok());
    }
}
