//! This module provides a client to connect to the task store over HTTP

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Response;
use url::Url;

use crate::config::StoreSettings;
use crate::error::Error;
use crate::item::{DailyTaskText, NewTask, RemoteDailyTask, RemoteTask, StoreId};
use crate::traits::TaskStore;


/// A [`TaskStore`] that fetches its data from an HTTP server
pub struct Client {
    settings: StoreSettings,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new(settings: StoreSettings) -> Self {
        Self {
            settings,
            http: reqwest::Client::new(),
        }
    }

    /// Create a client for the server described by the environment (see [`StoreSettings::from_env`])
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(StoreSettings::from_env()?))
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    fn tasks_url(&self) -> Result<Url, Error> {
        Ok(self.settings.task_api().join("tasks")?)
    }

    fn task_url(&self, id: StoreId) -> Result<Url, Error> {
        Ok(self.settings.task_api().join(&format!("tasks/{}", id))?)
    }

    fn daily_tasks_url(&self) -> Result<Url, Error> {
        Ok(self.settings.daily_task_api().join("daily-tasks")?)
    }

    fn daily_task_url(&self, id: StoreId) -> Result<Url, Error> {
        Ok(self.settings.daily_task_api().join(&format!("daily-tasks/{}", id))?)
    }
}

/// Turn non-2xx answers into errors
fn check_status(response: Response) -> Result<Response, Error> {
    if response.status().is_success() == false {
        log::warn!("{} answered with HTTP status {}", response.url(), response.status());
        return Err(Error::UnexpectedStatus(response.status()));
    }
    Ok(response)
}

#[async_trait]
impl TaskStore for Client {
    async fn get_tasks(&self, date: NaiveDate) -> Result<Vec<RemoteTask>, Error> {
        let date = date.format("%Y-%m-%d").to_string();
        log::debug!("Fetching tasks of {}", date);

        let response = self.http
            .get(self.tasks_url()?)
            .query(&[("date", &date)])
            .send()
            .await?;
        let tasks = check_status(response)?.json().await?;
        Ok(tasks)
    }

    async fn create_task(&self, task: &NewTask) -> Result<RemoteTask, Error> {
        let response = self.http
            .post(self.tasks_url()?)
            .json(task)
            .send()
            .await?;
        let created: RemoteTask = check_status(response)?.json().await?;
        log::debug!("Created task {} ({} {})", created.id, task.date, task.time);
        Ok(created)
    }

    async fn delete_task(&self, id: StoreId) -> Result<(), Error> {
        let response = self.http
            .delete(self.task_url(id)?)
            .send()
            .await?;
        check_status(response)?;
        log::debug!("Deleted task {}", id);
        Ok(())
    }

    async fn get_daily_tasks(&self) -> Result<Vec<RemoteDailyTask>, Error> {
        let response = self.http
            .get(self.daily_tasks_url()?)
            .send()
            .await?;
        let tasks = check_status(response)?.json().await?;
        Ok(tasks)
    }

    async fn create_daily_task(&self, text: &str) -> Result<RemoteDailyTask, Error> {
        let response = self.http
            .post(self.daily_tasks_url()?)
            .json(&DailyTaskText{ text: text.to_string() })
            .send()
            .await?;
        let created: RemoteDailyTask = check_status(response)?.json().await?;
        log::debug!("Created daily task {}", created.id);
        Ok(created)
    }

    async fn update_daily_task(&self, id: StoreId, text: &str) -> Result<RemoteDailyTask, Error> {
        let response = self.http
            .put(self.daily_task_url(id)?)
            .json(&DailyTaskText{ text: text.to_string() })
            .send()
            .await?;
        let updated = check_status(response)?.json().await?;
        Ok(updated)
    }

    async fn delete_daily_task(&self, id: StoreId) -> Result<(), Error> {
        let response = self.http
            .delete(self.daily_task_url(id)?)
            .send()
            .await?;
        check_status(response)?;
        log::debug!("Deleted daily task {}", id);
        Ok(())
    }
}
