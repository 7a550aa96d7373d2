//! Waypoint history for mission resume
//!
//! Ring of the most recently started navigation indices. Slots
//! `0..=LAST_WP_PASSED` hold passed waypoints, oldest first; the final slot
//! holds the waypoint that was being flown to when the mission was
//! interrupted.

use super::content::CMD_INDEX_NONE;

/// Entries kept in the history
pub const MAX_WP_HISTORY: usize = 7;

/// Slot holding the most recently passed waypoint
pub const LAST_WP_PASSED: usize = MAX_WP_HISTORY - 2;

/// Slot holding the interrupted target
pub const INTERRUPTED_WP: usize = MAX_WP_HISTORY - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WpHistory {
    entries: [u16; MAX_WP_HISTORY],
}

impl Default for WpHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl WpHistory {
    pub const fn new() -> Self {
        Self {
            entries: [CMD_INDEX_NONE; MAX_WP_HISTORY],
        }
    }

    /// Append `index`, dropping the oldest entry
    pub fn push(&mut self, index: u16) {
        self.entries.copy_within(1.., 0);
        self.entries[MAX_WP_HISTORY - 1] = index;
    }

    pub fn reset(&mut self) {
        self.entries = [CMD_INDEX_NONE; MAX_WP_HISTORY];
    }

    /// Entry in `slot`, `None` if empty or out of range
    pub fn get(&self, slot: usize) -> Option<u16> {
        self.entries
            .get(slot)
            .copied()
            .filter(|&index| index != CMD_INDEX_NONE)
    }

    /// Navigation index that was active when the mission stopped
    pub fn interrupted(&self) -> Option<u16> {
        self.get(INTERRUPTED_WP)
    }

    /// Raw entries, oldest first
    pub fn entries(&self) -> &[u16; MAX_WP_HISTORY] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let history = WpHistory::new();
        assert_eq!(history.interrupted(), None);
        assert_eq!(history.get(0), None);
        assert_eq!(history.get(MAX_WP_HISTORY), None);
    }

    #[test]
    fn test_push_keeps_latest_seven_in_order() {
        let mut history = WpHistory::new();
        for i in 1..=10u16 {
            history.push(i);
        }
        assert_eq!(history.entries(), &[4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(history.interrupted(), Some(10));
        assert_eq!(history.get(LAST_WP_PASSED), Some(9));
    }

    #[test]
    fn test_partial_history() {
        let mut history = WpHistory::new();
        history.push(3);
        history.push(5);
        assert_eq!(history.interrupted(), Some(5));
        assert_eq!(history.get(LAST_WP_PASSED), Some(3));
        assert_eq!(history.get(LAST_WP_PASSED - 1), None);
    }

    #[test]
    fn test_reset() {
        let mut history = WpHistory::new();
        history.push(2);
        history.reset();
        assert_eq!(history, WpHistory::default());
    }
}
