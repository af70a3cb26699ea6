//! Scheduled tasks of a week, bucketed by day and hour
//!
//! A [`SlotIndex`] is a cache of what the task store contains for a given week.
//! It is always built from a complete fetch of the seven days of that week (see [`WeekRequest::fetch`]),
//! and it is only mutated after the store has confirmed the matching change.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};

use chrono::{NaiveDate, Weekday};

use crate::error::Error;
use crate::task::ScheduledTask;
use crate::traits::TaskStore;
use crate::week::{day_name, WeekOffset, DAYS, HOURS_PER_DAY};


/// A (day, hour) coordinate within a week
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    day: Weekday,
    hour: u8,
}

impl Slot {
    pub fn new(day: Weekday, hour: u8) -> Result<Self, Error> {
        if hour >= HOURS_PER_DAY {
            return Err(Error::InvalidHour(hour));
        }
        Ok(Self { day, hour })
    }

    pub fn day(&self) -> Weekday { self.day }
    pub fn hour(&self) -> u8 { self.hour }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}:00", day_name(self.day), self.hour)
    }
}

/// A slot of a specific week
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub offset: WeekOffset,
    pub slot: Slot,
}


/// The scheduled tasks of a week
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlotIndex {
    days: HashMap<Weekday, BTreeMap<u8, Vec<ScheduledTask>>>,
}

impl SlotIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the tasks of the seven `dates` (Monday first) from the store.
    ///
    /// All days are fetched concurrently. This fails as soon as any of them fails: a week is never partially loaded.
    pub async fn load<S: TaskStore + ?Sized>(store: &S, dates: &[NaiveDate; 7]) -> Result<Self, Error> {
        let days = futures::future::try_join_all(
            dates.iter().map(|date| store.get_tasks(*date))
        ).await?;

        let mut index = Self::new();
        for (day, remote_tasks) in DAYS.iter().zip(days) {
            for remote in remote_tasks {
                let hour = match remote.hour() {
                    Ok(hour) => hour,
                    Err(err) => {
                        log::warn!("Ignoring task {} on {}: {}", remote.id, day_name(*day), err);
                        continue;
                    },
                };
                let slot = Slot { day: *day, hour };
                index.insert(slot, ScheduledTask::new(remote.id, remote.description, *day, hour));
            }
        }
        log::debug!("Loaded {} tasks for the week of {}", index.len(), dates[0]);
        Ok(index)
    }

    /// Append a task at the end of the given slot
    pub fn insert(&mut self, slot: Slot, task: ScheduledTask) {
        self.days
            .entry(slot.day)
            .or_default()
            .entry(slot.hour)
            .or_default()
            .push(task);
    }

    /// Remove the task at `position` in the given slot.
    /// Nothing is removed in case there is no such task.
    pub fn remove_at(&mut self, slot: Slot, position: usize) -> Result<ScheduledTask, Error> {
        let hours = self.days.get_mut(&slot.day);
        let tasks = match hours.and_then(|hours| hours.get_mut(&slot.hour)) {
            Some(tasks) if position < tasks.len() => tasks,
            _ => return Err(Error::InvalidPosition { slot, position }),
        };

        let removed = tasks.remove(position);
        if tasks.is_empty() {
            if let Some(hours) = self.days.get_mut(&slot.day) {
                hours.remove(&slot.hour);
                if hours.is_empty() {
                    self.days.remove(&slot.day);
                }
            }
        }
        Ok(removed)
    }

    /// The tasks of a slot, in the order they have been added
    pub fn get(&self, slot: Slot) -> &[ScheduledTask] {
        self.days
            .get(&slot.day)
            .and_then(|hours| hours.get(&slot.hour))
            .map(|tasks| tasks.as_slice())
            .unwrap_or(&[])
    }

    pub fn task_at(&self, slot: Slot, position: usize) -> Option<&ScheduledTask> {
        self.get(slot).get(position)
    }

    /// Every non-empty hour of a day, or `None` if the day has no task at all
    pub fn day(&self, day: Weekday) -> Option<&BTreeMap<u8, Vec<ScheduledTask>>> {
        self.days.get(&day)
    }

    pub fn len(&self) -> usize {
        self.days.values()
            .flat_map(|hours| hours.values())
            .map(|tasks| tasks.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every task of the week, Monday first, then by hour, then in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &ScheduledTask)> + '_ {
        DAYS.iter()
            .filter_map(move |day| self.days.get(day).map(|hours| (*day, hours)))
            .flat_map(|(day, hours)| {
                hours.iter().flat_map(move |(hour, tasks)| {
                    tasks.iter().map(move |task| (Slot { day, hour: *hour }, task))
                })
            })
    }
}


/// A request to load a week, issued by a [`Planner`](crate::planner::Planner) when a week gets selected
#[derive(Clone, Debug, PartialEq)]
pub struct WeekRequest {
    pub offset: WeekOffset,
    /// Increases every time a week is selected, so that late answers can be told apart
    pub generation: u64,
    pub dates: [NaiveDate; 7],
}

impl WeekRequest {
    /// Fetch the week from the store.
    ///
    /// This does not borrow the planner, so that it can keep being used while the fetch is in progress
    pub async fn fetch<S: TaskStore + ?Sized>(self, store: &S) -> WeekLoad {
        let result = SlotIndex::load(store, &self.dates).await;
        WeekLoad { request: self, result }
    }
}

/// The outcome of a [`WeekRequest`]
#[derive(Debug)]
pub struct WeekLoad {
    pub request: WeekRequest,
    pub result: Result<SlotIndex, Error>,
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::item::StoreId;
    use crate::memory_store::MemoryStore;
    use crate::mock_behaviour::MockBehaviour;
    use crate::week::week_dates_from;

    fn task(id: i64, description: &str, slot: Slot) -> ScheduledTask {
        ScheduledTask::new(StoreId::from(id), description.to_string(), slot.day(), slot.hour())
    }

    fn descriptions(tasks: &[ScheduledTask]) -> Vec<&str> {
        tasks.iter().map(|t| t.description()).collect()
    }

    #[test]
    fn slots_reject_invalid_hours() {
        assert!(Slot::new(Weekday::Mon, 0).is_ok());
        assert!(Slot::new(Weekday::Mon, 23).is_ok());
        assert!(matches!(Slot::new(Weekday::Mon, 24), Err(Error::InvalidHour(24))));
        assert_eq!(Slot::new(Weekday::Thu, 9).unwrap().to_string(), "Thursday 9:00");
    }

    #[test]
    fn insertion_keeps_arrival_order() {
        let slot = Slot::new(Weekday::Tue, 10).unwrap();
        let mut index = SlotIndex::new();
        assert!(index.get(slot).is_empty());

        index.insert(slot, task(1, "b", slot));
        index.insert(slot, task(2, "a", slot));
        index.insert(slot, task(3, "c", slot));
        assert_eq!(descriptions(index.get(slot)), vec!["b", "a", "c"]);
        assert_eq!(index.get(slot).last().unwrap().id(), StoreId::from(3));

        let other = Slot::new(Weekday::Tue, 11).unwrap();
        assert!(index.get(other).is_empty());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn removal_by_position() {
        let slot = Slot::new(Weekday::Fri, 8).unwrap();
        let mut index = SlotIndex::new();
        for (id, name) in ["a", "b", "c", "d"].iter().enumerate() {
            index.insert(slot, task(id as i64, name, slot));
        }

        let removed = index.remove_at(slot, 1).unwrap();
        assert_eq!(removed.description(), "b");
        assert_eq!(descriptions(index.get(slot)), vec!["a", "c", "d"]);

        // Out of range: nothing changes
        assert!(matches!(index.remove_at(slot, 3), Err(Error::InvalidPosition{ position: 3, .. })));
        assert!(index.remove_at(Slot::new(Weekday::Sat, 8).unwrap(), 0).is_err());
        assert_eq!(descriptions(index.get(slot)), vec!["a", "c", "d"]);

        let evening = Slot::new(Weekday::Fri, 19).unwrap();
        index.insert(evening, task(9, "e", evening));
        index.remove_at(slot, 0).unwrap();
        index.remove_at(slot, 0).unwrap();
        index.remove_at(slot, 0).unwrap();
        let hours: Vec<u8> = index.day(Weekday::Fri).unwrap().keys().cloned().collect();
        assert_eq!(hours, vec![19]);

        // The last task of the day is gone
        index.remove_at(evening, 0).unwrap();
        assert!(index.is_empty());
        assert!(index.day(Weekday::Fri).is_none());
    }

    #[test]
    fn full_day_and_week_iteration() {
        let mut index = SlotIndex::new();
        let sun = Slot::new(Weekday::Sun, 7).unwrap();
        let mon_late = Slot::new(Weekday::Mon, 20).unwrap();
        let mon_early = Slot::new(Weekday::Mon, 6).unwrap();
        index.insert(sun, task(1, "sun", sun));
        index.insert(mon_late, task(2, "mon late", mon_late));
        index.insert(mon_early, task(3, "mon early", mon_early));

        let monday: Vec<u8> = index.day(Weekday::Mon).unwrap().keys().cloned().collect();
        assert_eq!(monday, vec![6, 20]);
        assert!(index.day(Weekday::Wed).is_none());

        let order: Vec<&str> = index.iter().map(|(_, t)| t.description()).collect();
        assert_eq!(order, vec!["mon early", "mon late", "sun"]);
    }

    #[tokio::test]
    async fn load_buckets_by_hour() {
        let dates = week_dates_from(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(), 0).unwrap();
        let store = MemoryStore::new();
        store.seed_task(dates[0], "14:00:00", "Standup");
        store.seed_task(dates[0], "14:30:00", "Review");
        store.seed_task(dates[4], "09:00:00", "Gym");
        store.seed_task(dates[4], "not a time", "Broken");

        let index = SlotIndex::load(&store, &dates).await.unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(descriptions(index.get(Slot::new(Weekday::Mon, 14).unwrap())), vec!["Standup", "Review"]);
        assert_eq!(descriptions(index.get(Slot::new(Weekday::Fri, 9).unwrap())), vec!["Gym"]);
        assert_eq!(store.requests().len(), 7);
    }

    #[tokio::test]
    async fn load_is_all_or_nothing() {
        let dates = week_dates_from(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(), 0).unwrap();
        let store = MemoryStore::new();
        store.seed_task(dates[1], "10:00:00", "Dentist");
        store.set_behaviour(MockBehaviour {
            get_tasks_behaviour: (3, 1),
            ..MockBehaviour::default()
        });

        let err = SlotIndex::load(&store, &dates).await.unwrap_err();
        assert!(err.is_network());
    }
}
