use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Error;
use crate::item::{NewTask, RemoteDailyTask, RemoteTask, StoreId};

/// The remote store that owns every task.
///
/// Usually, this is a [`Client`](crate::client::Client) that talks to an HTTP server.
/// Every method may take a long time, or fail (e.g. in case the server is unreachable)
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns the scheduled tasks of a given date
    async fn get_tasks(&self, date: NaiveDate) -> Result<Vec<RemoteTask>, Error>;
    /// Creates a scheduled task, and returns it as the store saved it (including its newly assigned ID)
    async fn create_task(&self, task: &NewTask) -> Result<RemoteTask, Error>;
    /// Deletes a scheduled task
    async fn delete_task(&self, id: StoreId) -> Result<(), Error>;

    /// Returns every daily task
    async fn get_daily_tasks(&self) -> Result<Vec<RemoteDailyTask>, Error>;
    /// Creates a daily task, and returns it as the store saved it (including its newly assigned ID)
    async fn create_daily_task(&self, text: &str) -> Result<RemoteDailyTask, Error>;
    /// Changes the text of a daily task
    async fn update_daily_task(&self, id: StoreId, text: &str) -> Result<RemoteDailyTask, Error>;
    /// Deletes a daily task
    async fn delete_daily_task(&self, id: StoreId) -> Result<(), Error>;
}
