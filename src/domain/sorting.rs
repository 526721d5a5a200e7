use crate::domain::task::Task;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort policy applied to the task list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Insertion order, no sorting applied
    #[default]
    None,
    Priority,
    DueDate,
    Name,
}

impl SortOrder {
    pub fn is_active(self) -> bool {
        self != SortOrder::None
    }
}

impl FromStr for SortOrder {
    type Err = crate::error::TaskpadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(SortOrder::None),
            "priority" => Ok(SortOrder::Priority),
            "due-date" | "due_date" | "duedate" => Ok(SortOrder::DueDate),
            "name" => Ok(SortOrder::Name),
            _ => Err(crate::error::TaskpadError::InvalidSortOrder(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Priority => write!(f, "priority"),
            Self::DueDate => write!(f, "due-date"),
            Self::Name => write!(f, "name"),
        }
    }
}

/// Sorts tasks in-place by the given order
///
/// The sort is stable: tasks that compare equal keep their relative order,
/// so sorting an already sorted list leaves it untouched.
///
/// # Examples
/// ```
/// use taskpad_core::domain::sorting::{sort_tasks, SortOrder};
/// use taskpad_core::domain::task::Task;
///
/// let mut tasks = vec![
///     Task::with_priority("Low one".to_string(), "Low".to_string()),
///     Task::with_priority("High one".to_string(), "High".to_string()),
/// ];
///
/// sort_tasks(&mut tasks, SortOrder::Priority);
/// assert_eq!(tasks[0].priority, "High");
/// ```
pub fn sort_tasks(tasks: &mut [Task], order: SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::Priority => tasks.sort_by_key(Task::priority_rank),
        SortOrder::DueDate => tasks.sort_by(|a, b| compare_due_dates(a.due_date, b.due_date)),
        SortOrder::Name => tasks.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
}

/// Compare due dates with `0` (no due date) always sorting to the end
fn compare_due_dates(a: i64, b: i64) -> Ordering {
    match (a, b) {
        (0, 0) => Ordering::Equal,
        (0, _) => Ordering::Greater,
        (_, 0) => Ordering::Less,
        (a, b) => a.cmp(&b),
    }
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
