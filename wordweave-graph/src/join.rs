//! Barrier for the parallel fan-out.
//!
//! The reference implementation re-enters a `join_parallel_tasks` node after
//! every branch completes, recomputing the completed set and the
//! completeness check each time — two branches finishing at once can both
//! observe "not yet complete" and the join never fires. [`Join`] serializes
//! that update and check under one lock so exactly one caller observes the
//! transition to complete.

use std::collections::BTreeSet;

use tokio::sync::Mutex;

/// The completed/expected bookkeeping a [`Join`] guards.
#[derive(Debug, Clone)]
struct JoinState {
    completed: BTreeSet<String>,
    expected: BTreeSet<String>,
}

impl JoinState {
    fn new(expected: impl IntoIterator<Item = String>) -> Self {
        Self {
            completed: BTreeSet::new(),
            expected: expected.into_iter().collect(),
        }
    }

    fn is_complete(&self) -> bool {
        self.completed.is_superset(&self.expected)
    }
}

/// Tracks which of a fixed set of parallel branches have finished.
///
/// Every branch calls [`Join::complete`] exactly once, when its own
/// quality gate (or, for pronunciation, its unconditional run) finishes.
/// The bool it returns is `true` for exactly one caller: whichever call
/// observed the completed set become a superset of the expected set.
pub struct Join {
    state: Mutex<JoinState>,
}

impl Join {
    /// Start a join over the given set of expected branch names.
    pub fn new(expected: impl IntoIterator<Item = String>) -> Self {
        Self {
            state: Mutex::new(JoinState::new(expected)),
        }
    }

    /// Record that `task` has finished. Returns whether the full expected
    /// set is now complete, as observed by this call under the lock.
    pub async fn complete(&self, task: &str) -> bool {
        let mut guard = self.state.lock().await;
        guard.completed.insert(task.to_string());
        guard.is_complete()
    }

    /// Snapshot of the tasks completed so far.
    pub async fn completed(&self) -> BTreeSet<String> {
        self.state.lock().await.completed.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn tasks(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn completes_once_all_expected_report() {
        let join = Join::new(tasks(&["media", "examples"]));
        assert!(!join.complete("media").await);
        assert!(join.complete("examples").await);
    }

    #[tokio::test]
    async fn order_does_not_matter() {
        let join = Join::new(tasks(&["media", "examples", "synonyms"]));
        assert!(!join.complete("synonyms").await);
        assert!(!join.complete("media").await);
        assert!(join.complete("examples").await);
    }

    #[tokio::test]
    async fn repeated_completion_is_idempotent() {
        let join = Join::new(tasks(&["media"]));
        assert!(join.complete("media").await);
        assert!(join.complete("media").await);
    }

    #[tokio::test]
    async fn concurrent_completions_only_one_observes_the_transition() {
        let join = Arc::new(Join::new(tasks(&["media", "examples", "synonyms", "syllables"])));

        let mut handles = Vec::new();
        for name in ["media", "examples", "synonyms", "syllables"] {
            let join = Arc::clone(&join);
            handles.push(tokio::spawn(async move { join.complete(name).await }));
        }

        let mut transitions = 0;
        for handle in handles {
            if handle.await.unwrap() {
                transitions += 1;
            }
        }

        assert_eq!(transitions, 1);
        assert_eq!(join.completed().await.len(), 4);
    }
}
