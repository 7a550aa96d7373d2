//! Jump Tracker
//!
//! Bounded table of `(jump command index, times run)` pairs. Lookups are a
//! linear scan over at most [`MAX_JUMP_COMMANDS`] entries.
//!
//! A jump that does not fit in a full table is left untracked. It keeps
//! reporting zero runs, so it is followed every time it is reached; the
//! engine's search bound keeps such a loop from stalling a single update.

use crate::log_warn;

/// Number of jump commands whose run counters are tracked
pub const MAX_JUMP_COMMANDS: usize = 15;

/// Jumps followed in one search before the search gives up
pub const MAX_JUMP_SEARCH: usize = 4 * MAX_JUMP_COMMANDS;

/// Largest finite repeat count a jump can carry
pub const JUMP_TIMES_MAX: i16 = i16::MAX;

/// One tracked jump command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct JumpEntry {
    index: u16,
    times_run: i16,
}

/// Run counters for jump commands
#[derive(Debug, Clone, Default)]
pub struct JumpTracker {
    entries: heapless::Vec<JumpEntry, MAX_JUMP_COMMANDS>,
    /// The full-table warning has been logged
    overflow_logged: bool,
}

impl JumpTracker {
    pub const fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
            overflow_logged: false,
        }
    }

    /// Times the jump at `index` has been followed (0 if never)
    pub fn times_run(&self, index: u16) -> i16 {
        self.entries
            .iter()
            .find(|e| e.index == index)
            .map_or(0, |e| e.times_run)
    }

    /// Record one more run of the jump at `index`
    ///
    /// Returns the new count, or `None` if the table is full and the jump is
    /// not tracked.
    pub fn increment(&mut self, index: u16) -> Option<i16> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.index == index) {
            entry.times_run = entry.times_run.saturating_add(1);
            return Some(entry.times_run);
        }

        match self.entries.push(JumpEntry {
            index,
            times_run: 1,
        }) {
            Ok(()) => Some(1),
            Err(_) => {
                if !self.overflow_logged {
                    log_warn!("jump table full, jump {} not tracked", index);
                    self.overflow_logged = true;
                }
                None
            }
        }
    }

    /// Forget all counters
    pub fn reset_all(&mut self) {
        self.entries.clear();
        self.overflow_logged = false;
    }

    /// Number of tracked jumps
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Most recently reached JUMP_TAG
///
/// `age` is 0 until a tag is reached, 1 while the tag's command runs, and
/// grows by one on every navigation advance after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JumpTag {
    pub tag: u16,
    pub age: u16,
}

impl JumpTag {
    /// Record that `tag` was just reached
    pub fn reached(&mut self, tag: u16) {
        self.tag = tag;
        self.age = 1;
    }

    /// Count one navigation advance since the tag
    pub fn tick(&mut self) {
        if self.age != 0 {
            self.age = self.age.saturating_add(1);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Tag value and age, `None` if no tag was reached yet
    pub fn last(&self) -> Option<(u16, u16)> {
        if self.age == 0 {
            None
        } else {
            Some((self.tag, self.age))
        }
    }
}
