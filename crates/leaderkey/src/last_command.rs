use std::sync::{Mutex, MutexGuard};

/// Remembers the most recently executed command so it can be shown or run
/// again.
///
/// Created once at startup and shared as `Arc<CommandTracker>`.
#[derive(Debug, Default)]
pub struct CommandTracker {
    last_command: Mutex<Option<String>>,
}

impl CommandTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command, replacing any previous one. Empty commands are
    /// recorded too.
    pub fn record(&self, command: impl Into<String>) {
        *self.lock() = Some(command.into());
    }

    /// The last recorded command, or `None` if nothing was recorded yet.
    pub fn get(&self) -> Option<String> {
        self.lock().clone()
    }

    /// True only when a non-empty command has been recorded.
    ///
    /// A recorded `""` is returned by [`get`](Self::get) but does not count.
    pub fn has_value(&self) -> bool {
        self.lock().as_deref().is_some_and(|c| !c.is_empty())
    }

    // Every write replaces the whole value, so a poisoned lock still holds a
    // consistent one.
    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.last_command
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_initial_state() {
        let tracker = CommandTracker::new();
        assert_eq!(tracker.get(), None);
        assert!(!tracker.has_value());
    }

    #[test]
    fn test_record_and_get() {
        let tracker = CommandTracker::new();
        tracker.record("ls -la");
        assert_eq!(tracker.get().as_deref(), Some("ls -la"));
        assert!(tracker.has_value());
    }

    #[test]
    fn test_overwrite() {
        let tracker = CommandTracker::new();
        tracker.record("first command");
        assert_eq!(tracker.get().as_deref(), Some("first command"));

        tracker.record("second command");
        assert_eq!(tracker.get().as_deref(), Some("second command"));
        assert!(tracker.has_value());
    }

    #[test]
    fn test_empty_command_is_recorded_but_not_usable() {
        let tracker = CommandTracker::new();
        tracker.record("x");
        tracker.record("");
        assert_eq!(tracker.get().as_deref(), Some(""));
        assert!(!tracker.has_value());
    }

    #[test]
    fn test_shared_across_threads() {
        let tracker = Arc::new(CommandTracker::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || tracker.record(format!("command {}", i)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let last = tracker.get().unwrap();
        assert!(last.starts_with("command "), "unexpected value {:?}", last);
        assert!(tracker.has_value());
    }
}
