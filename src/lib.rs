//! This crate provides the data model and the scheduling engine of a weekly planner.
//!
//! A week is a grid of slots (a day and an hour), each of them holding an ordered list of tasks.
//! Next to it, a list of unscheduled "daily" tasks can be copied into any slot.
//!
//! Every task lives in a remote store, that is abstracted by the [`TaskStore`](traits::TaskStore) trait.
//! This crate provides an HTTP client for it in the [`client`] module.
//!
//! The whole state of a week view is held by a [`Planner`], that only changes its local state once the store has confirmed the change.

pub mod traits;
pub mod error;
pub use error::Error;

pub mod week;
mod item;
pub use item::{StoreId, RemoteTask, RemoteDailyTask, NewTask, DailyTaskText};
mod task;
pub use task::{ScheduledTask, UnscheduledTask, DailyTaskId};
pub mod slot_index;
pub use slot_index::{Slot, SlotKey, SlotIndex};
pub mod pool;
pub mod session;
pub mod planner;
pub use planner::Planner;

pub mod client;
pub mod config;

#[cfg(any(test, feature = "mock_store"))]
pub mod memory_store;
#[cfg(any(test, feature = "mock_store"))]
pub mod mock_behaviour;

pub mod utils;
