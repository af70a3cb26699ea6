//! Some utility functions

use crate::planner::Planner;
use crate::pool::UnscheduledPool;
use crate::traits::TaskStore;
use crate::week::{day_name, format_short_date, DAYS};

/// A debug utility that pretty-prints the selected week of a planner
pub fn print_week<S: TaskStore>(planner: &Planner<S>) {
    println!("WEEK {} ({})", planner.week_offset(), planner.week_label());
    let index = match planner.slot_index() {
        None => {
            println!("    (not loaded)");
            return;
        },
        Some(index) => index,
    };

    let dates = planner.week_dates();
    for (i, day) in DAYS.iter().enumerate() {
        println!("  {} ({})", day_name(*day), format_short_date(dates[i]));
        let hours = match index.day(*day) {
            None => continue,
            Some(hours) => hours,
        };
        for (hour, tasks) in hours {
            for task in tasks {
                println!("    {:02}:00 {}\t{}", hour, task.description(), task.id());
            }
        }
    }
}

/// A debug utility that pretty-prints the daily tasks
pub fn print_pool(pool: &UnscheduledPool) {
    println!("DAILY TASKS");
    for entry in pool.iter() {
        let status = if entry.is_editing() { "~" } else { "=" };
        println!("    {} {}\t{}", status, entry.text(), entry.id());
    }
}
