use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::task::Task;

/// Tasks whose deadline falls on the given calendar day. Time-of-day is
/// ignored; deadline-less tasks never match.
pub fn tasks_on_day(tasks: &[Task], day: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.deadline.map(|dt| dt.date_naive()) == Some(day))
        .cloned()
        .collect()
}

/// The set of calendar days carrying at least one deadline; drives the
/// day-cell markers in the month grid.
pub fn deadline_days(tasks: &[Task]) -> BTreeSet<NaiveDate> {
    tasks
        .iter()
        .filter_map(|task| task.deadline.map(|dt| dt.date_naive()))
        .collect()
}

pub fn first_day_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    first_day_of_month(next_year, next_month)
        .pred_opt()
        .unwrap_or_default()
}

/// Walks back from `date` to the nearest `week_start` weekday, aligning the
/// month grid's first cell.
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday()
        - week_start.num_days_from_monday())
        % 7;
    date.checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(date)
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let stepped = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    stepped.unwrap_or(date)
}

/// First day of the month before the one containing `focus`.
pub fn prev_month(focus: NaiveDate) -> NaiveDate {
    let (year, month) = if focus.month() == 1 {
        (focus.year() - 1, 12)
    } else {
        (focus.year(), focus.month() - 1)
    };
    first_day_of_month(year, month)
}

/// First day of the month after the one containing `focus`.
pub fn next_month(focus: NaiveDate) -> NaiveDate {
    let (year, month) = if focus.month() == 12 {
        (focus.year() + 1, 1)
    } else {
        (focus.year(), focus.month() + 1)
    };
    first_day_of_month(year, month)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::task::{Priority, Task};

    fn dated_task(id: &str, y: i32, m: u32, d: u32, hour: u32) -> Task {
        Task {
            id: id.to_string(),
            text: id.to_string(),
            priority: Priority::Normal,
            owner: "uid-1".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("valid date"),
            deadline: Some(Utc.with_ymd_and_hms(y, m, d, hour, 15, 0).single().expect("valid date")),
        }
    }

    fn undated_task(id: &str) -> Task {
        let mut task = dated_task(id, 2026, 1, 1, 0);
        task.deadline = None;
        task
    }

    #[test]
    fn day_grouping_ignores_time_of_day() {
        let tasks = vec![
            dated_task("morning", 2026, 4, 10, 8),
            dated_task("evening", 2026, 4, 10, 22),
            dated_task("next-day", 2026, 4, 11, 8),
            undated_task("undated"),
        ];

        let day = NaiveDate::from_ymd_opt(2026, 4, 10).expect("valid date");
        let matched = tasks_on_day(&tasks, day);
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|t| t.deadline.is_some()));
    }

    #[test]
    fn day_with_no_tasks_yields_empty_set() {
        let tasks = vec![dated_task("only", 2026, 4, 10, 8)];
        let empty = tasks_on_day(
            &tasks,
            NaiveDate::from_ymd_opt(2026, 4, 12).expect("valid date"),
        );
        assert!(empty.is_empty());
    }

    #[test]
    fn deadline_days_deduplicates_by_day() {
        let tasks = vec![
            dated_task("a", 2026, 4, 10, 8),
            dated_task("b", 2026, 4, 10, 20),
            dated_task("c", 2026, 4, 12, 9),
            undated_task("d"),
        ];

        let days = deadline_days(&tasks);
        assert_eq!(days.len(), 2);
        assert!(days.contains(&NaiveDate::from_ymd_opt(2026, 4, 10).expect("valid date")));
    }

    #[test]
    fn month_boundaries_and_week_alignment() {
        assert_eq!(
            last_day_of_month(2024, 2),
            NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date")
        );
        assert_eq!(
            last_day_of_month(2026, 12),
            NaiveDate::from_ymd_opt(2026, 12, 31).expect("valid date")
        );

        // 2026-04-01 is a Wednesday; a Monday-aligned grid starts 03-30.
        let first = first_day_of_month(2026, 4);
        assert_eq!(
            start_of_week(first, Weekday::Mon),
            NaiveDate::from_ymd_opt(2026, 3, 30).expect("valid date")
        );
        assert_eq!(start_of_week(first, Weekday::Wed), first);
    }

    #[test]
    fn month_paging_wraps_year_boundaries() {
        let january = NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date");
        assert_eq!(
            prev_month(january),
            NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid date")
        );

        let december = NaiveDate::from_ymd_opt(2025, 12, 3).expect("valid date");
        assert_eq!(
            next_month(december),
            NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date")
        );
    }
}
