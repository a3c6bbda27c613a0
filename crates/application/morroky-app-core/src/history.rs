use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::ports::HistoryPort;

struct Stack {
    entries: Vec<String>,
    index: usize,
}

/// In-memory browser history with back/forward.
pub struct MemoryHistory {
    stack: Mutex<Stack>,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            stack: Mutex::new(Stack {
                entries: vec![initial.into()],
                index: 0,
            }),
        }
    }

    /// Steps back one entry. Returns false at the start of history.
    pub fn back(&self) -> bool {
        let mut stack = self.lock();
        if stack.index == 0 {
            return false;
        }
        stack.index -= 1;
        true
    }

    pub fn forward(&self) -> bool {
        let mut stack = self.lock();
        if stack.index + 1 >= stack.entries.len() {
            return false;
        }
        stack.index += 1;
        true
    }

    pub fn entries(&self) -> Vec<String> {
        self.lock().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Stack> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl HistoryPort for MemoryHistory {
    fn current_path(&self) -> String {
        let stack = self.lock();
        stack.entries[stack.index].clone()
    }

    /// Drops any forward entries, like a browser does.
    fn push(&self, path: &str) {
        let mut stack = self.lock();
        let keep = stack.index + 1;
        stack.entries.truncate(keep);
        stack.entries.push(path.to_string());
        stack.index = keep;
        tracing::debug!(path, "history push");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_truncates_forward_entries() {
        let h = MemoryHistory::new("/");
        h.push("/world");
        h.push("/merchant/m1");
        assert!(h.back());
        assert_eq!(h.current_path(), "/world");
        h.push("/auth");
        assert_eq!(h.entries(), vec!["/", "/world", "/auth"]);
        assert!(!h.forward());
    }

    #[test]
    fn back_stops_at_first_entry() {
        let h = MemoryHistory::default();
        assert!(!h.back());
        assert_eq!(h.current_path(), "/");
    }
}
