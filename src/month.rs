use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Canonical "YYYY-MM" key for a date's month.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

/// Parse a "YYYY-MM" key into the first day of that month.
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    let (year, month) = value.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn days_in_month(first: NaiveDate) -> usize {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    match next.and_then(|date| date.pred_opt()) {
        Some(last) => last.day() as usize,
        None => crate::models::MONTH_SLOTS,
    }
}

pub fn is_current_month(first: NaiveDate, today: NaiveDate) -> bool {
    month_start(today) == first
}

/// Distinct month keys, newest first, always including the current month.
pub fn available_months<I>(keys: I, today: NaiveDate) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut months: BTreeSet<String> = keys.into_iter().collect();
    months.insert(month_key(today));
    months.into_iter().rev().collect()
}

/// The trailing `len`-day window ending at `today`, oldest first.
pub fn trailing_window(today: NaiveDate, len: usize) -> Vec<NaiveDate> {
    (0..len)
        .rev()
        .filter_map(|offset| today.checked_sub_days(chrono::Days::new(offset as u64)))
        .collect()
}
