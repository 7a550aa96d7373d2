//! Time abstraction for platform-agnostic timing.
//!
//! The mission engine only needs a millisecond clock to stamp list changes,
//! so the trait is kept to that single capability plus a helper.

use core::sync::atomic::{AtomicU32, Ordering};

/// Platform-agnostic millisecond time source.
///
/// - Firmware provides an implementation backed by its HAL clock
/// - `MockTime` provides controllable time for host testing
///
/// # Example
///
/// ```
/// use trail_mission::core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// time.advance(250);
/// assert_eq!(time.now_ms(), 250);
/// assert_eq!(time.elapsed_ms_since(100), 150);
/// ```
pub trait TimeSource {
    /// Returns current time in milliseconds since system start.
    fn now_ms(&self) -> u64;

    /// Returns elapsed milliseconds since a reference point.
    ///
    /// Uses saturating subtraction so a reference in the future yields 0.
    fn elapsed_ms_since(&self, reference_ms: u64) -> u64 {
        self.now_ms().saturating_sub(reference_ms)
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock time source with controllable advancement.
///
/// Backed by an atomic so it can live inside a `Sync` engine wrapper.
#[derive(Debug, Default)]
pub struct MockTime {
    current_ms: AtomicU32,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub const fn new() -> Self {
        Self {
            current_ms: AtomicU32::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub const fn with_initial(ms: u32) -> Self {
        Self {
            current_ms: AtomicU32::new(ms),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, ms: u32) {
        self.current_ms.store(ms, Ordering::Relaxed);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, ms: u32) {
        self.current_ms.fetch_add(ms, Ordering::Relaxed);
    }
}

impl Clone for MockTime {
    fn clone(&self) -> Self {
        Self::with_initial(self.current_ms.load(Ordering::Relaxed))
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        u64::from(self.current_ms.load(Ordering::Relaxed))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_initial_value() {
        let time = MockTime::new();
        assert_eq!(time.now_ms(), 0);
    }

    #[test]
    fn mock_time_with_initial() {
        let time = MockTime::with_initial(5_000);
        assert_eq!(time.now_ms(), 5_000);
    }

    #[test]
    fn mock_time_set_and_advance() {
        let time = MockTime::new();
        time.set(1_000);
        time.advance(500);
        assert_eq!(time.now_ms(), 1_500);
    }

    #[test]
    fn mock_time_elapsed_since_saturates() {
        let time = MockTime::with_initial(1_000);
        assert_eq!(time.elapsed_ms_since(400), 600);
        assert_eq!(time.elapsed_ms_since(5_000), 0);
    }

    #[test]
    fn mock_time_clone_is_snapshot() {
        let time = MockTime::with_initial(10);
        let copy = time.clone();
        time.advance(5);
        assert_eq!(copy.now_ms(), 10);
        assert_eq!(time.now_ms(), 15);
    }
}
