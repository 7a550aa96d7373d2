//! Core traits for platform-agnostic mission functionality.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  Mission engine / ground-control handler             │
//! │                     │                                │
//! │                     ▼                                │
//! │  ┌────────────────┐   ┌───────────────────────────┐  │
//! │  │ TimeSource     │   │ SharedState<T>            │  │
//! │  │ + now_ms()     │   │ + with(f: &T -> R)        │  │
//! │  └────────────────┘   │ + with_mut(f: &mut T -> R)│  │
//! │                       └───────────────────────────┘  │
//! │         │                          │                 │
//! │         ▼                          ▼                 │
//! │  MockTime / HAL clock       EmbassyState<T>          │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod sync;
pub mod time;

pub use sync::{EmbassyState, SharedState};
pub use time::{MockTime, TimeSource};
