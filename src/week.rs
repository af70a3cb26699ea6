//! Conversions between week offsets and calendar dates

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

use crate::error::Error;

/// Distance, in weeks, from the week that contains the current date
pub type WeekOffset = i64;

/// Days of a week, in the order they are displayed
pub const DAYS: [Weekday; 7] = [
    Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu,
    Weekday::Fri, Weekday::Sat, Weekday::Sun,
];

pub const HOURS_PER_DAY: u8 = 24;

/// The seven dates (Monday to Sunday) of the week at `offset` weeks from the current local date
pub fn week_dates(offset: WeekOffset) -> Result<[NaiveDate; 7], Error> {
    week_dates_from(Local::now().date_naive(), offset)
}

/// The seven dates (Monday to Sunday) of the week at `offset` weeks from the week that contains `today`.
///
/// Fails with [`Error::WeekOutOfRange`] when part of that week cannot be represented
pub fn week_dates_from(today: NaiveDate, offset: WeekOffset) -> Result<[NaiveDate; 7], Error> {
    let days_since_monday = i64::from(today.weekday().num_days_from_monday());
    let monday = Duration::try_weeks(offset)
        .and_then(|shift| {
            today.checked_sub_signed(Duration::days(days_since_monday))?
                .checked_add_signed(shift)
        })
        .ok_or(Error::WeekOutOfRange(offset))?;
    monday.checked_add_signed(Duration::days(6)).ok_or(Error::WeekOutOfRange(offset))?;

    let mut dates = [monday; 7];
    for (i, date) in dates.iter_mut().enumerate() {
        *date = monday + Duration::days(i as i64);
    }
    Ok(dates)
}

/// Position of a day in a Monday-first week
pub fn day_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// The label this day is stored and displayed with
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// `DD.MM`
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}

/// The header of a week, e.g. `05.10 - 11.10`
pub fn week_label(dates: &[NaiveDate; 7]) -> String {
    format!("{} - {}", format_short_date(dates[0]), format_short_date(dates[6]))
}
