//! Minimal row-level edit scripts between two task sequences.
//!
//! Rows are matched by task id. Items present in both sequences are kept in
//! place when they belong to the longest run whose relative order did not
//! change; every other surviving item is moved, so a pure reorder never turns
//! into a remove followed by an insert.

use crate::domain::task::Task;
use std::collections::{HashMap, HashSet};

/// A single display update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Remove the row at `index`
    Remove { index: usize },
    /// Take the row at `from` and reinsert it so it ends up at `to`
    Move { from: usize, to: usize },
    /// Insert the new sequence's item at `index`
    Insert { index: usize },
    /// Rebind the row at `index` with the new sequence's item
    Change { index: usize },
}

/// Ordered list of edits turning a display of the old sequence into the new one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    edits: Vec<Edit>,
}

impl EditScript {
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edit> {
        self.edits.iter()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn removes(&self) -> usize {
        self.count(|e| matches!(e, Edit::Remove { .. }))
    }

    pub fn moves(&self) -> usize {
        self.count(|e| matches!(e, Edit::Move { .. }))
    }

    pub fn inserts(&self) -> usize {
        self.count(|e| matches!(e, Edit::Insert { .. }))
    }

    pub fn changes(&self) -> usize {
        self.count(|e| matches!(e, Edit::Change { .. }))
    }

    fn count(&self, pred: impl Fn(&Edit) -> bool) -> usize {
        self.edits.iter().filter(|e| pred(e)).count()
    }

    /// Replays the script over `old`, taking inserted and changed rows from `new`
    ///
    /// # Panics
    /// Panics if the script was not produced by `diff(old, new)` for these
    /// same sequences.
    pub fn apply(&self, old: &[Task], new: &[Task]) -> Vec<Task> {
        let mut rows = old.to_vec();
        for edit in &self.edits {
            match *edit {
                Edit::Remove { index } => {
                    rows.remove(index);
                }
                Edit::Move { from, to } => {
                    let row = rows.remove(from);
                    rows.insert(to, row);
                }
                Edit::Insert { index } => rows.insert(index, new[index].clone()),
                Edit::Change { index } => rows[index] = new[index].clone(),
            }
        }
        rows
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a Edit;
    type IntoIter = std::slice::Iter<'a, Edit>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.iter()
    }
}

/// Row key: task id plus its occurrence number within the sequence
type RowKey<'a> = (&'a str, usize);

fn row_keys(tasks: &[Task]) -> Vec<RowKey<'_>> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    tasks
        .iter()
        .map(|task| {
            let id = task.id().as_str();
            let occurrence = seen.entry(id).or_insert(0);
            let key = (id, *occurrence);
            *occurrence += 1;
            key
        })
        .collect()
}

/// Computes the edit script that turns `old` into `new`
///
/// Edits come in four phases: removals (highest index first), moves, inserts
/// (ascending final index) and content changes (final indices).
pub fn diff(old: &[Task], new: &[Task]) -> EditScript {
    let old_keys = row_keys(old);
    let new_keys = row_keys(new);

    let old_index: HashMap<RowKey<'_>, usize> =
        old_keys.iter().enumerate().map(|(i, k)| (*k, i)).collect();
    let new_index: HashMap<RowKey<'_>, usize> =
        new_keys.iter().enumerate().map(|(i, k)| (*k, i)).collect();

    let mut edits = Vec::new();
    let mut rows: Vec<RowKey<'_>> = old_keys.clone();

    for (index, key) in old_keys.iter().enumerate().rev() {
        if !new_index.contains_key(key) {
            rows.remove(index);
            edits.push(Edit::Remove { index });
        }
    }

    // `rows` now holds the surviving items in their old relative order
    let target: Vec<RowKey<'_>> = new_keys
        .iter()
        .copied()
        .filter(|key| old_index.contains_key(key))
        .collect();
    let stable = stable_rows(&rows, &target);

    for (k, key) in target.iter().enumerate() {
        if stable.contains(key) {
            continue;
        }
        let Some(from) = rows.iter().position(|row| row == key) else {
            continue;
        };
        let row = rows.remove(from);
        // Place directly after the item that precedes it in the new order
        let to = match k.checked_sub(1) {
            None => 0,
            Some(prev) => rows
                .iter()
                .position(|r| *r == target[prev])
                .map_or(0, |anchor| anchor + 1),
        };
        rows.insert(to, row);
        if from != to {
            edits.push(Edit::Move { from, to });
        }
    }

    for (index, key) in new_keys.iter().enumerate() {
        if !old_index.contains_key(key) {
            rows.insert(index, *key);
            edits.push(Edit::Insert { index });
        }
    }
    debug_assert_eq!(rows, new_keys);

    for (index, key) in new_keys.iter().enumerate() {
        if let Some(&old_pos) = old_index.get(key) {
            if old[old_pos] != new[index] {
                edits.push(Edit::Change { index });
            }
        }
    }

    EditScript { edits }
}

/// Surviving rows that keep their relative order: the longest increasing run
/// of current positions, read in the new order
fn stable_rows<'a>(current: &[RowKey<'a>], target: &[RowKey<'a>]) -> HashSet<RowKey<'a>> {
    let position: HashMap<RowKey<'a>, usize> =
        current.iter().enumerate().map(|(i, k)| (*k, i)).collect();
    let seq: Vec<usize> = target
        .iter()
        .filter_map(|key| position.get(key).copied())
        .collect();

    // Patience sorting, `tails[n]` is the index in `seq` ending the best run of length n + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut prev: Vec<Option<usize>> = vec![None; seq.len()];
    for (i, &value) in seq.iter().enumerate() {
        let slot = tails.partition_point(|&t| seq[t] < value);
        if slot > 0 {
            prev[i] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(i);
        } else {
            tails[slot] = i;
        }
    }

    let mut stable = HashSet::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        stable.insert(current[seq[i]]);
        cursor = prev[i];
    }
    stable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::TaskId;
    use std::str::FromStr;

    fn task(id: &str) -> Task {
        Task::with_id(
            TaskId::from_str(id).unwrap(),
            format!("Task {}", id),
            String::new(),
            "Medium".to_string(),
            0,
        )
    }

    fn tasks(ids: &[&str]) -> Vec<Task> {
        ids.iter().map(|id| task(id)).collect()
    }

    fn assert_replays(old: &[Task], new: &[Task]) -> EditScript {
        let script = diff(old, new);
        assert_eq!(script.apply(old, new), new, "script {:?}", script);
        script
    }

    #[test]
    fn test_identical_sequences_produce_empty_script() {
        let seq = tasks(&["a", "b", "c"]);
        assert!(diff(&seq, &seq).is_empty());
    }

    #[test]
    fn test_empty_sequences() {
        assert!(diff(&[], &[]).is_empty());
    }

    #[test]
    fn test_content_change_only() {
        let old = tasks(&["a"]);
        let mut new = old.clone();
        new[0].done = true;

        let script = diff(&old, &new);

        assert_eq!(script.edits(), &[Edit::Change { index: 0 }]);
        assert_eq!(script.inserts(), 0);
        assert_eq!(script.removes(), 0);
    }

    #[test]
    fn test_swap_is_a_move() {
        let old = tasks(&["a", "b"]);
        let new = tasks(&["b", "a"]);

        let script = assert_replays(&old, &new);

        assert_eq!(script.moves(), 1);
        assert_eq!(script.inserts(), 0);
        assert_eq!(script.removes(), 0);
        assert_eq!(script.changes(), 0);
    }

    #[test]
    fn test_single_removal() {
        let old = tasks(&["a", "b", "c"]);
        let new = tasks(&["a", "c"]);

        let script = diff(&old, &new);

        assert_eq!(script.edits(), &[Edit::Remove { index: 1 }]);
    }

    #[test]
    fn test_pure_insertions() {
        let old = tasks(&["b"]);
        let new = tasks(&["a", "b", "c"]);

        let script = assert_replays(&old, &new);

        assert_eq!(
            script.edits(),
            &[Edit::Insert { index: 0 }, Edit::Insert { index: 2 }]
        );
    }

    #[test]
    fn test_everything_removed() {
        let old = tasks(&["a", "b", "c"]);

        let script = assert_replays(&old, &[]);

        assert_eq!(
            script.edits(),
            &[
                Edit::Remove { index: 2 },
                Edit::Remove { index: 1 },
                Edit::Remove { index: 0 },
            ]
        );
    }

    #[test]
    fn test_rotation_moves_one_item() {
        let old = tasks(&["a", "b", "c", "d"]);
        let new = tasks(&["b", "c", "d", "a"]);

        let script = assert_replays(&old, &new);

        assert_eq!(script.edits(), &[Edit::Move { from: 0, to: 3 }]);
    }

    #[test]
    fn test_mixed_changes() {
        let old = tasks(&["a", "b", "c", "d"]);
        let mut new = tasks(&["d", "x", "b", "a"]);
        new[2].title = "renamed".to_string();

        let script = assert_replays(&old, &new);

        assert_eq!(script.removes(), 1);
        assert_eq!(script.inserts(), 1);
        assert_eq!(script.changes(), 1);
        assert!(script.moves() <= 2);
        assert!(script.iter().any(|e| *e == Edit::Change { index: 2 }));
    }

    #[test]
    fn test_duplicate_ids_are_matched_by_occurrence() {
        let old = tasks(&["a", "a", "b"]);
        let new = tasks(&["b", "a"]);

        assert_replays(&old, &new);
    }

    #[test]
    fn test_replay_over_reorders_and_subsets() {
        let pool = ["a", "b", "c", "d", "e"];
        let olds: Vec<Vec<&str>> = vec![
            vec![],
            vec!["a", "b", "c", "d", "e"],
            vec!["e", "d", "c", "b", "a"],
            vec!["c", "a", "e"],
            vec!["b", "d"],
        ];

        for old_ids in &olds {
            for shift in 0..pool.len() {
                for keep in 0..=pool.len() {
                    let new_ids: Vec<&str> = pool
                        .iter()
                        .cycle()
                        .skip(shift)
                        .take(keep)
                        .copied()
                        .collect();
                    let old = tasks(old_ids);
                    let new = tasks(&new_ids);
                    let script = assert_replays(&old, &new);
                    assert_eq!(script.changes(), 0);
                }
            }
        }
    }
}
