//! Shared snapshot store.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use crate::domain::Program;

/// The current set of broadcasting programs, shared between the poll loop
/// and arbitrary reader threads.
///
/// Only the poll loop mutates the set; every other party reads a defensive
/// copy. Critical sections are short and never held across an await.
#[derive(Default)]
pub struct ProgramStore {
    programs: Mutex<HashSet<Program>>,
}

impl ProgramStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current snapshot. Never observes a half-applied swap.
    pub fn snapshot(&self) -> HashSet<Program> {
        self.programs
            .lock()
            .expect("program store lock poisoned")
            .clone()
    }

    pub fn clear(&self) {
        self.programs
            .lock()
            .expect("program store lock poisoned")
            .clear();
    }

    /// Exclusive access for the duration of one diff-and-swap.
    pub(crate) fn guard(&self) -> MutexGuard<'_, HashSet<Program>> {
        self.programs.lock().expect("program store lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    fn program(detail_url: &str) -> Program {
        Program {
            title: String::new(),
            dj: String::new(),
            genre: String::new(),
            description: String::new(),
            related_url: String::new(),
            mount: String::new(),
            start_time: NaiveDateTime::parse_from_str(
                "2024-01-01 10:00:00",
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
            listeners: 0,
            total_listeners: 0,
            max_listeners: 0,
            bit_rate: 0,
            sample_rate: 0,
            channels: 0,
            format: String::new(),
            song: String::new(),
            detail_url: detail_url.into(),
            server_host: String::new(),
            server_port: 0,
        }
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let store = ProgramStore::new();
        store.guard().insert(program("http://x/1"));

        let mut copy = store.snapshot();
        copy.clear();

        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_clear_empties_the_store() {
        let store = ProgramStore::new();
        store.guard().insert(program("http://x/1"));
        store.clear();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_swap_is_wholesale() {
        let store = ProgramStore::new();
        store.guard().insert(program("http://x/1"));

        let mut next = HashSet::new();
        next.insert(program("http://x/2"));
        next.insert(program("http://x/3"));
        *store.guard() = next;

        let current = store.snapshot();
        assert_eq!(current.len(), 2);
        assert!(!current.contains(&program("http://x/1")));
    }
}
