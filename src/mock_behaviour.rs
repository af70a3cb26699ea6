//! This module provides ways to tweak mocked stores, so that they can return errors on some tests
#![cfg(any(test, feature = "mock_store"))]

use crate::error::Error;
use crate::memory_store::StoreRequest;

/// How a [`MemoryStore`](crate::memory_store::MemoryStore) answers during a given test
///
/// So that a kind of request fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    pub get_tasks_behaviour: (u32, u32),
    pub create_task_behaviour: (u32, u32),
    pub delete_task_behaviour: (u32, u32),

    pub get_daily_tasks_behaviour: (u32, u32),
    pub create_daily_task_behaviour: (u32, u32),
    pub update_daily_task_behaviour: (u32, u32),
    pub delete_daily_task_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every kind of request will fail at once, `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            get_tasks_behaviour: (0, n_fails),
            create_task_behaviour: (0, n_fails),
            delete_task_behaviour: (0, n_fails),
            get_daily_tasks_behaviour: (0, n_fails),
            create_daily_task_behaviour: (0, n_fails),
            update_daily_task_behaviour: (0, n_fails),
            delete_daily_task_behaviour: (0, n_fails),
        }
    }

    /// Decide whether `request` succeeds, and count it
    pub fn check(&mut self, request: &StoreRequest) -> Result<(), Error> {
        let counter = match request {
            StoreRequest::GetTasks(_) => &mut self.get_tasks_behaviour,
            StoreRequest::CreateTask(_) => &mut self.create_task_behaviour,
            StoreRequest::DeleteTask(_) => &mut self.delete_task_behaviour,
            StoreRequest::GetDailyTasks => &mut self.get_daily_tasks_behaviour,
            StoreRequest::CreateDailyTask(_) => &mut self.create_daily_task_behaviour,
            StoreRequest::UpdateDailyTask(_, _) => &mut self.update_daily_task_behaviour,
            StoreRequest::DeleteDailyTask(_) => &mut self.delete_daily_task_behaviour,
        };
        consume(counter, request)
    }
}


/// Successes are used up first, then failures. Once both are exhausted, everything succeeds
fn consume(counter: &mut (u32, u32), request: &StoreRequest) -> Result<(), Error> {
    let (successes, failures) = *counter;

    if successes > 0 {
        counter.0 -= 1;
    } else if failures > 0 {
        counter.1 -= 1;
        log::debug!("Mock behaviour: failing {:?} ({} more failures)", request, counter.1);
        return Err(Error::Network(format!("mocked failure of {:?}", request).into()));
    }
    Ok(())
}
