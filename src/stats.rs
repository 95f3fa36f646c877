use crate::models::{Band, HabitRecord, HabitRow, TopHabit, MONTH_SLOTS};
use crate::month::month_key;
use chrono::{Datelike, NaiveDate};

/// Fraction of habits that must be completed on a day for it to extend a streak.
pub const STREAK_TARGET: f64 = 0.8;

/// Split a success percentage into Good / On Track / Needs Focus.
/// Total for every integer rate in [0, 100]; the parts always sum to 100.
pub fn band(success_rate: u32) -> Band {
    let remainder = 100u32.saturating_sub(success_rate);
    let on_track = (remainder as f64 * 0.6).round() as u32;
    Band {
        good: success_rate,
        on_track,
        needs_focus: remainder - on_track,
    }
}

/// Completion totals per row, in input order.
pub fn habit_totals(rows: &[HabitRow]) -> Vec<TopHabit> {
    rows.iter()
        .map(|row| TopHabit {
            name: row.habit.clone(),
            total: row.days.iter().filter(|done| **done).count() as u32,
        })
        .collect()
}

/// Totals merged across rows sharing a name, keeping first-seen order.
pub fn merged_totals(rows: &[HabitRow]) -> Vec<TopHabit> {
    let mut totals: Vec<TopHabit> = Vec::new();
    for item in habit_totals(rows) {
        match totals.iter_mut().find(|entry| entry.name == item.name) {
            Some(entry) => entry.total += item.total,
            None => totals.push(item),
        }
    }
    totals
}

/// Sort descending by total and truncate. The sort is stable, so rows with
/// equal totals keep their input order.
pub fn rank(mut totals: Vec<TopHabit>, limit: usize) -> Vec<TopHabit> {
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals.truncate(limit);
    totals
}

pub fn top_habits(rows: &[HabitRow], limit: usize) -> Vec<TopHabit> {
    rank(habit_totals(rows), limit)
}

/// Rows for one month: stored bits padded to the full slot count, then cut
/// to the month's real day count.
pub fn month_matrix(habits: &[&HabitRecord], month: &str, day_count: usize) -> Vec<HabitRow> {
    habits
        .iter()
        .map(|habit| {
            let mut days = habit.months.get(month).cloned().unwrap_or_default();
            days.resize(MONTH_SLOTS, false);
            days.truncate(day_count);
            HabitRow {
                id: habit.id,
                habit: habit.name.clone(),
                days,
            }
        })
        .collect()
}

/// One habit's completions across an arbitrary run of dates.
pub fn window_row(habit: &HabitRecord, window: &[NaiveDate]) -> Vec<bool> {
    window
        .iter()
        .map(|date| {
            habit
                .months
                .get(&month_key(*date))
                .and_then(|bits| bits.get(date.day() as usize - 1))
                .copied()
                .unwrap_or(false)
        })
        .collect()
}

/// Per-day completion counts across all rows.
pub fn daily_counts(rows: &[HabitRow], day_count: usize) -> Vec<u32> {
    let mut counts = vec![0u32; day_count];
    for row in rows {
        for (index, done) in row.days.iter().enumerate() {
            if *done && index < day_count {
                counts[index] += 1;
            }
        }
    }
    counts
}

/// Completed slots over total slots as a rounded percentage.
pub fn success_rate(counts: &[u32], habit_count: usize) -> u32 {
    let total_slots = habit_count * counts.len();
    if total_slots == 0 {
        return 0;
    }
    let completed: u32 = counts.iter().sum();
    ((completed as f64 / total_slots as f64) * 100.0).round() as u32
}

/// Last-7-day success rate against the 7 days before, as a signed percent
/// delta string ("+4%", "-12%").
pub fn success_trend(counts: &[u32], habit_count: usize) -> String {
    if habit_count == 0 || counts.is_empty() {
        return "+0%".to_string();
    }
    let window = counts.len().min(7);
    let current = &counts[counts.len() - window..];
    let previous_start = counts.len().saturating_sub(2 * window);
    let previous = &counts[previous_start..counts.len() - window];
    let current_rate = success_rate(current, habit_count) as i64;
    let previous_rate = if previous.is_empty() {
        0
    } else {
        success_rate(previous, habit_count) as i64
    };
    let diff = current_rate - previous_rate;
    let sign = if diff >= 0 { "+" } else { "" };
    format!("{sign}{diff}%")
}

/// Consecutive trailing days whose completion rate meets the streak target.
pub fn streak_days(counts: &[u32], habit_count: usize) -> u32 {
    if habit_count == 0 {
        return 0;
    }
    let mut streak = 0;
    for count in counts.iter().rev() {
        if *count as f64 / habit_count as f64 >= STREAK_TARGET {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Counts considered "real" for rate/trend/streak: the current month only
/// counts days up to today, past months count in full.
pub fn effective_counts(counts: &[u32], is_current: bool, today_day: u32) -> &[u32] {
    if is_current {
        let cutoff = (today_day as usize).min(counts.len());
        &counts[..cutoff]
    } else {
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, days: &[bool]) -> HabitRow {
        HabitRow {
            id: 0,
            habit: name.to_string(),
            days: days.to_vec(),
        }
    }

    #[test]
    fn band_partitions_sum_to_100_for_all_rates() {
        for rate in 0..=100 {
            let band = band(rate);
            assert_eq!(band.good + band.on_track + band.needs_focus, 100);
            let remainder = 100 - rate;
            assert_eq!(band.on_track, (remainder as f64 * 0.6).round() as u32);
        }
    }

    #[test]
    fn band_endpoints() {
        assert_eq!(
            band(100),
            Band {
                good: 100,
                on_track: 0,
                needs_focus: 0
            }
        );
        assert_eq!(
            band(0),
            Band {
                good: 0,
                on_track: 60,
                needs_focus: 40
            }
        );
    }

    #[test]
    fn top_habits_sorts_desc_and_truncates() {
        let rows = vec![
            row("Read", &[true, false, true]),
            row("Run", &[true, true, true]),
            row("Write", &[false, false, false]),
            row("Stretch", &[true, true, false]),
        ];
        let top = top_habits(&rows, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].name, "Run");
        assert_eq!(top[0].total, 3);
        assert_eq!(top[1].name, "Read");
        assert_eq!(top[2].name, "Stretch");
    }

    #[test]
    fn top_habits_keeps_input_order_on_ties() {
        let rows = vec![
            row("B", &[true, true]),
            row("A", &[true, true]),
            row("C", &[true, true]),
        ];
        let top = top_habits(&rows, 3);
        let names: Vec<_> = top.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn top_habits_empty_input() {
        assert!(top_habits(&[], 3).is_empty());
    }

    #[test]
    fn merged_totals_sums_rows_with_same_name() {
        let rows = vec![
            row("Read", &[true, true]),
            row("Run", &[true, false]),
            row("Read", &[true, false]),
        ];
        let merged = merged_totals(&rows);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "Read");
        assert_eq!(merged[0].total, 3);
        assert_eq!(merged[1].name, "Run");
    }

    #[test]
    fn daily_counts_and_success_rate() {
        let rows = vec![
            row("Read", &[true, true, false]),
            row("Run", &[true, false, false]),
        ];
        let counts = daily_counts(&rows, 3);
        assert_eq!(counts, vec![2, 1, 0]);
        // 3 completions over 6 slots.
        assert_eq!(success_rate(&counts, 2), 50);
        assert_eq!(success_rate(&[], 2), 0);
        assert_eq!(success_rate(&counts, 0), 0);
    }

    #[test]
    fn success_trend_compares_windows() {
        // 14 days, one habit: nothing in the first week, everything in the second.
        let mut counts = vec![0u32; 7];
        counts.extend(vec![1u32; 7]);
        assert_eq!(success_trend(&counts, 1), "+100%");

        let mut counts = vec![1u32; 7];
        counts.extend(vec![0u32; 7]);
        assert_eq!(success_trend(&counts, 1), "-100%");

        assert_eq!(success_trend(&[], 1), "+0%");
    }

    #[test]
    fn streak_counts_trailing_days_only() {
        // Two habits; a day extends the streak at >= 80% completion.
        let counts = vec![2, 0, 2, 2];
        assert_eq!(streak_days(&counts, 2), 2);
        assert_eq!(streak_days(&[2, 2, 2], 2), 3);
        assert_eq!(streak_days(&[1, 1], 2), 0);
        assert_eq!(streak_days(&[], 2), 0);
    }

    #[test]
    fn effective_counts_truncates_current_month_at_today() {
        let counts = vec![1, 2, 3, 4, 5];
        assert_eq!(effective_counts(&counts, true, 3), &[1, 2, 3]);
        assert_eq!(effective_counts(&counts, false, 3), &counts[..]);
        assert_eq!(effective_counts(&counts, true, 9), &counts[..]);
    }

    #[test]
    fn window_row_reads_across_months() {
        use std::collections::BTreeMap;

        let mut months = BTreeMap::new();
        let mut may = vec![false; MONTH_SLOTS];
        may[30] = true; // May 31
        months.insert("2024-05".to_string(), may);
        let mut june = vec![false; MONTH_SLOTS];
        june[0] = true; // June 1
        months.insert("2024-06".to_string(), june);
        let habit = HabitRecord {
            id: 1,
            user_id: 1,
            name: "Read".to_string(),
            active: true,
            months,
        };

        let window = crate::month::trailing_window(
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            3,
        );
        assert_eq!(window_row(&habit, &window), vec![true, true, false]);
    }
}
