use std::time::{Duration, Instant};

/// Holds back search refiltering until typing pauses, so a fast burst
/// of keystrokes filters once instead of once per key.
#[derive(Debug, Clone)]
pub struct SearchDebounce {
    delay: Duration,
    last_edit: Option<Instant>,
}

impl SearchDebounce {
    pub fn new(delay_ms: u64) -> Self {
        SearchDebounce {
            delay: Duration::from_millis(delay_ms),
            last_edit: None,
        }
    }

    /// Call on every edit of the search box.
    pub fn mark(&mut self) {
        self.last_edit = Some(Instant::now());
    }

    /// True once per quiet period, on the first check after the delay
    /// has elapsed since the last edit.
    pub fn ready(&mut self) -> bool {
        match self.last_edit {
            Some(last) if last.elapsed() >= self.delay => {
                self.last_edit = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending trigger, for when the box is cleared wholesale.
    pub fn cancel(&mut self) {
        self.last_edit = None;
    }
}
