//! Synchronized state access.
//!
//! `SharedState` abstracts over the lock that guards state shared between the
//! control loop and the ground-control handler. `EmbassyState` is the
//! critical-section implementation used on target and on the host (with the
//! `critical-section/std` implementation linked in).

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

/// Platform-agnostic synchronized state access.
///
/// Access is scoped: the lock is held for exactly the duration of the
/// closure, so a caller that needs several operations to observe one
/// consistent state performs all of them inside a single closure.
///
/// # Example
///
/// ```ignore
/// fn bump<S: SharedState<u32>>(state: &S) -> u32 {
///     state.with_mut(|v| {
///         *v += 1;
///         *v
///     })
/// }
/// ```
pub trait SharedState<T> {
    /// Access state immutably.
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access state mutably.
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

/// Critical-section protected state.
///
/// Uses Embassy's blocking mutex so access is safe from tasks and interrupt
/// handlers alike.
///
/// # Panics
///
/// Re-entering the same `EmbassyState` from inside its own closure panics
/// (the inner `RefCell` is already borrowed).
pub struct EmbassyState<T> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<T>>,
}

impl<T> EmbassyState<T> {
    /// Creates a new `EmbassyState` wrapping the given value.
    ///
    /// This is a const fn, allowing static initialization.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Consumes the lock and returns the inner value.
    pub fn into_inner(self) -> T {
        self.inner.into_inner().into_inner()
    }
}

impl<T> SharedState<T> for EmbassyState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock(|cell| f(&cell.borrow()))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embassy_state_with_read() {
        let state = EmbassyState::new(42u32);
        assert_eq!(state.with(|v| *v), 42);
    }

    #[test]
    fn embassy_state_with_mut_write() {
        let state = EmbassyState::new(0u32);
        state.with_mut(|v| *v = 100);
        assert_eq!(state.with(|v| *v), 100);
    }

    #[test]
    fn embassy_state_closure_return_value() {
        let state = EmbassyState::new([1u8, 2, 3]);
        let sum: u32 = state.with(|v| v.iter().map(|b| u32::from(*b)).sum());
        assert_eq!(sum, 6);
    }

    #[test]
    fn embassy_state_into_inner() {
        let state = EmbassyState::new(7u16);
        state.with_mut(|v| *v += 1);
        assert_eq!(state.into_inner(), 8);
    }

    #[test]
    fn embassy_state_shared_across_threads() {
        let state = EmbassyState::new(0u32);
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        state.with_mut(|v| *v += 1);
                    }
                });
            }
        });
        assert_eq!(state.with(|v| *v), 4000);
    }
}
