//! Support for library configuration options

use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use url::Url;

use crate::error::Error;

/// Base URL the `tasks` endpoints live under, unless overridden by [`TASK_API_URL_VAR`].
/// Feel free to override it when initing this library.
pub static TASK_API_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("http://localhost:8080/task-api/".to_string())));

/// Base URL the `daily-tasks` endpoints live under, unless overridden by [`DAILY_TASK_API_URL_VAR`].
/// Feel free to override it when initing this library.
pub static DAILY_TASK_API_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("http://localhost:8080/api/".to_string())));

pub const TASK_API_URL_VAR: &str = "WEEKPLAN_TASK_API_URL";
pub const DAILY_TASK_API_URL_VAR: &str = "WEEKPLAN_DAILY_TASK_API_URL";


/// Where the task store can be reached
#[derive(Clone, Debug, PartialEq)]
pub struct StoreSettings {
    task_api: Url,
    daily_task_api: Url,
}

impl StoreSettings {
    pub fn new<S: AsRef<str>, T: AsRef<str>>(task_api: S, daily_task_api: T) -> Result<Self, Error> {
        Ok(Self {
            task_api: as_base(Url::parse(task_api.as_ref())?),
            daily_task_api: as_base(Url::parse(daily_task_api.as_ref())?),
        })
    }

    /// Both endpoint families under the same server, with the paths the default settings use
    pub fn with_server<S: AsRef<str>>(server: S) -> Result<Self, Error> {
        let server = as_base(Url::parse(server.as_ref())?);
        Ok(Self {
            task_api: server.join("task-api/")?,
            daily_task_api: server.join("api/")?,
        })
    }

    /// Read the settings from the environment, falling back to [`TASK_API_URL`] and [`DAILY_TASK_API_URL`]
    pub fn from_env() -> Result<Self, Error> {
        let task_api = std::env::var(TASK_API_URL_VAR).unwrap_or_else(|_| current_value(&TASK_API_URL));
        let daily_task_api = std::env::var(DAILY_TASK_API_URL_VAR).unwrap_or_else(|_| current_value(&DAILY_TASK_API_URL));
        log::debug!("Task store: tasks at {}, daily tasks at {}", task_api, daily_task_api);
        Self::new(task_api, daily_task_api)
    }

    pub fn task_api(&self) -> &Url { &self.task_api }
    pub fn daily_task_api(&self) -> &Url { &self.daily_task_api }
}

fn current_value(setting: &Lazy<Arc<Mutex<String>>>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Make sure relative paths are joined under this URL rather than replacing its last segment
fn as_base(mut url: Url) -> Url {
    if url.path().ends_with('/') == false {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes() {
        let settings = StoreSettings::new("http://tasks.local/task-api", "http://tasks.local/api/").unwrap();
        assert_eq!(settings.task_api().as_str(), "http://tasks.local/task-api/");
        assert_eq!(settings.task_api().join("tasks").unwrap().as_str(), "http://tasks.local/task-api/tasks");
        assert_eq!(settings.daily_task_api().join("daily-tasks/3").unwrap().as_str(), "http://tasks.local/api/daily-tasks/3");
    }

    #[test]
    fn single_server() {
        let settings = StoreSettings::with_server("http://127.0.0.1:4321").unwrap();
        assert_eq!(settings.task_api().as_str(), "http://127.0.0.1:4321/task-api/");
        assert_eq!(settings.daily_task_api().as_str(), "http://127.0.0.1:4321/api/");
        assert_eq!(
            StoreSettings::new("http://localhost:8080/task-api/", "http://localhost:8080/api/").unwrap(),
            StoreSettings::with_server("http://localhost:8080").unwrap(),
        );
    }

    #[test]
    fn invalid_url() {
        assert!(StoreSettings::new("not a url", "http://tasks.local/api/").is_err());
    }
}
