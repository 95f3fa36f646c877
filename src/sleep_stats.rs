use crate::models::{SleepCategory, SleepRecord, SleepReport, TopSleeper, UserRecord};
use crate::month::{days_in_month, is_current_month, month_start};
use chrono::{Datelike, NaiveDate};

/// Duration buckets for the sleep category breakdown. An open upper bound
/// marks the last bucket.
const BUCKETS: [(&str, f64, Option<f64>); 5] = [
    ("0-3 hrs", 0.0, Some(3.0)),
    ("3-5 hrs", 3.0, Some(5.0)),
    ("5-7 hrs", 5.0, Some(7.0)),
    ("7-9 hrs", 7.0, Some(9.0)),
    ("9+ hrs", 9.0, None),
];

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Bucket entries into one slot per day of the month. Unset days stay None,
/// which is distinct from a logged zero. Duplicate dates resolve last-wins.
/// In the current month, days after `today` are dropped before bucketing and
/// forced back to None after it.
pub fn monthly_hours(
    entries: &[SleepRecord],
    month_first: NaiveDate,
    today: NaiveDate,
) -> Vec<Option<f64>> {
    let day_count = days_in_month(month_first);
    let current = is_current_month(month_first, today);
    let mut series = vec![None; day_count];
    for entry in entries {
        if month_start(entry.date) != month_first {
            continue;
        }
        let day = entry.date.day() as usize;
        if current && day > today.day() as usize {
            continue;
        }
        if (1..=day_count).contains(&day) {
            series[day - 1] = Some(entry.hours);
        }
    }
    if current {
        for slot in series.iter_mut().skip(today.day() as usize) {
            *slot = None;
        }
    }
    series
}

/// Trailing 7-slot average over the present values only. A window with no
/// present values yields None rather than zero.
pub fn rolling_average(series: &[Option<f64>]) -> Vec<Option<f64>> {
    series
        .iter()
        .enumerate()
        .map(|(index, _)| {
            let start = index.saturating_sub(6);
            let window: Vec<f64> = series[start..=index].iter().flatten().copied().collect();
            if window.is_empty() {
                None
            } else {
                Some(round2(window.iter().sum::<f64>() / window.len() as f64))
            }
        })
        .collect()
}

fn bucket_index(hours: f64) -> usize {
    for (index, (_, min_hours, max_hours)) in BUCKETS.iter().enumerate() {
        match max_hours {
            Some(max_hours) => {
                if hours >= *min_hours && hours < *max_hours {
                    return index;
                }
            }
            None => {
                if hours >= *min_hours {
                    return index;
                }
            }
        }
    }
    0
}

/// Per-bucket count and share of the logged nights.
pub fn categories(logged: &[f64]) -> Vec<SleepCategory> {
    let mut counts = [0usize; BUCKETS.len()];
    for hours in logged {
        counts[bucket_index(*hours)] += 1;
    }
    BUCKETS
        .iter()
        .zip(counts)
        .map(|((label, min_hours, max_hours), count)| {
            let percent = if logged.is_empty() {
                0
            } else {
                ((count as f64 / logged.len() as f64) * 100.0).round() as u32
            };
            SleepCategory {
                label: label.to_string(),
                min_hours: *min_hours,
                max_hours: *max_hours,
                count,
                percent,
            }
        })
        .collect()
}

pub fn average_hours(logged: &[f64]) -> f64 {
    if logged.is_empty() {
        return 0.0;
    }
    round2(logged.iter().sum::<f64>() / logged.len() as f64)
}

pub fn best_sleep(logged: &[f64]) -> f64 {
    logged
        .iter()
        .copied()
        .fold(None::<f64>, |best, hours| match best {
            Some(best) if best >= hours => Some(best),
            _ => Some(hours),
        })
        .map(round2)
        .unwrap_or(0.0)
}

/// Community sleep report over a date window: overall totals plus the top
/// sleepers ranked by average hours.
pub fn sleep_report(
    users: &[UserRecord],
    entries: &[SleepRecord],
    window: &[NaiveDate],
) -> SleepReport {
    let (Some(start), Some(end)) = (window.first(), window.last()) else {
        return SleepReport {
            average_hours: 0.0,
            total_entries: 0,
            total_hours: 0.0,
            top_sleepers: Vec::new(),
        };
    };

    let mut total_hours = 0.0;
    let mut total_entries = 0;
    let mut per_user: Vec<(i64, f64, usize)> = Vec::new();
    for entry in entries {
        if entry.date < *start || entry.date > *end {
            continue;
        }
        total_hours += entry.hours;
        total_entries += 1;
        match per_user.iter_mut().find(|(id, _, _)| *id == entry.user_id) {
            Some((_, hours, count)) => {
                *hours += entry.hours;
                *count += 1;
            }
            None => per_user.push((entry.user_id, entry.hours, 1)),
        }
    }

    let mut top_sleepers: Vec<TopSleeper> = per_user
        .into_iter()
        .filter_map(|(user_id, hours, count)| {
            let user = users.iter().find(|user| user.id == user_id)?;
            Some(TopSleeper {
                name: user.name.clone(),
                email: user.email.clone(),
                average_hours: round2(hours / count as f64),
                total_entries: count,
            })
        })
        .collect();
    top_sleepers.sort_by(|a, b| {
        b.average_hours
            .partial_cmp(&a.average_hours)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    top_sleepers.truncate(5);

    let average_hours = if total_entries == 0 {
        0.0
    } else {
        round2(total_hours / total_entries as f64)
    };
    SleepReport {
        average_hours,
        total_entries,
        total_hours: round2(total_hours),
        top_sleepers,
    }
}
