use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::task::Task;

/// Which column the derived view is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Priority,
    Deadline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Ascending,
    Descending,
}

impl SortDir {
    pub fn toggle(self) -> Self {
        match self {
            SortDir::Ascending => SortDir::Descending,
            SortDir::Descending => SortDir::Ascending,
        }
    }
}

/// Orders tasks for presentation.
///
/// Priority-primary: rank per direction, ties broken by deadline ascending
/// with deadline-less tasks after deadline-bearing ones regardless of the
/// toggle. Deadline-primary: deadline per direction with deadline-less
/// tasks always last, ties broken by priority rank ascending.
#[tracing::instrument(skip(tasks))]
pub fn sort_tasks(tasks: &mut [Task], key: SortKey, dir: SortDir) {
    match key {
        SortKey::Priority => tasks.sort_by(|a, b| {
            let primary = a.priority.rank().cmp(&b.priority.rank());
            apply_dir(primary, dir)
                .then_with(|| cmp_deadline_none_last(a.deadline, b.deadline, SortDir::Ascending))
        }),
        SortKey::Deadline => tasks.sort_by(|a, b| {
            cmp_deadline_none_last(a.deadline, b.deadline, dir)
                .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
        }),
    }
}

/// Compares deadlines with absent values sorted last regardless of
/// direction; the direction only reorders present deadlines.
fn cmp_deadline_none_last(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    dir: SortDir,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => apply_dir(a.cmp(&b), dir),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn apply_dir(ordering: Ordering, dir: SortDir) -> Ordering {
    match dir {
        SortDir::Ascending => ordering,
        SortDir::Descending => ordering.reverse(),
    }
}

/// Client-side ownership filter applied to every subscription snapshot.
/// The subscription is already scoped by owner in the store's query layer;
/// this re-check keeps a foreign document out of the view even if the
/// store emits an unfiltered collection.
#[tracing::instrument(skip(tasks))]
pub fn owned_by(tasks: Vec<Task>, owner: &str) -> Vec<Task> {
    let total = tasks.len();
    let mine: Vec<Task> = tasks.into_iter().filter(|task| task.owner == owner).collect();
    if mine.len() != total {
        debug!(
            total,
            kept = mine.len(),
            "dropped foreign documents from snapshot"
        );
    }
    mine
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::task::Priority;

    fn task(id: &str, priority: Priority, deadline: Option<DateTime<Utc>>) -> Task {
        Task {
            id: id.to_string(),
            text: id.to_string(),
            priority,
            owner: "uid-1".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).single().expect("valid date"),
            deadline,
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).single().expect("valid date")
    }

    fn order(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn priority_ascending_reads_high_normal_low() {
        let mut tasks = vec![
            task("low", Priority::Low, None),
            task("high", Priority::High, None),
            task("normal", Priority::Normal, None),
        ];

        sort_tasks(&mut tasks, SortKey::Priority, SortDir::Ascending);
        assert_eq!(order(&tasks), ["high", "normal", "low"]);

        sort_tasks(&mut tasks, SortKey::Priority, SortDir::Descending);
        assert_eq!(order(&tasks), ["low", "normal", "high"]);
    }

    #[test]
    fn priority_ties_break_by_deadline_with_absent_last() {
        let mut tasks = vec![
            task("no-deadline", Priority::Normal, None),
            task("later", Priority::Normal, Some(day(9))),
            task("sooner", Priority::Normal, Some(day(2))),
        ];

        sort_tasks(&mut tasks, SortKey::Priority, SortDir::Ascending);
        assert_eq!(order(&tasks), ["sooner", "later", "no-deadline"]);

        // Reversing the priority toggle must not reverse the tie-break.
        sort_tasks(&mut tasks, SortKey::Priority, SortDir::Descending);
        assert_eq!(order(&tasks), ["sooner", "later", "no-deadline"]);
    }

    #[test]
    fn deadline_sort_keeps_absent_last_in_both_directions() {
        let mut tasks = vec![
            task("second", Priority::Normal, Some(day(2))),
            task("undated", Priority::Normal, None),
            task("first", Priority::Normal, Some(day(1))),
        ];

        sort_tasks(&mut tasks, SortKey::Deadline, SortDir::Ascending);
        assert_eq!(order(&tasks), ["first", "second", "undated"]);

        sort_tasks(&mut tasks, SortKey::Deadline, SortDir::Descending);
        assert_eq!(order(&tasks), ["second", "first", "undated"]);
    }

    #[test]
    fn deadline_ties_break_by_priority_rank() {
        let mut tasks = vec![
            task("low", Priority::Low, Some(day(5))),
            task("high", Priority::High, Some(day(5))),
            task("normal", Priority::Normal, Some(day(5))),
        ];

        sort_tasks(&mut tasks, SortKey::Deadline, SortDir::Ascending);
        assert_eq!(order(&tasks), ["high", "normal", "low"]);
    }

    #[test]
    fn owned_by_drops_foreign_documents() {
        let mut foreign = task("theirs", Priority::Normal, None);
        foreign.owner = "uid-2".to_string();
        let tasks = vec![task("mine", Priority::Normal, None), foreign];

        let mine = owned_by(tasks, "uid-1");
        assert_eq!(order(&mine), ["mine"]);
    }

    #[test]
    fn sort_dir_toggle_round_trips() {
        assert_eq!(SortDir::Ascending.toggle(), SortDir::Descending);
        assert_eq!(SortDir::Descending.toggle().toggle(), SortDir::Descending);
    }
}
