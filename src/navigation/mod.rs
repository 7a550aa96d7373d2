//! Navigation types and utilities
//!
//! Geographic location with the distance/bearing helpers used by landing
//! sequence selection, closest-leg rejoin and resume rewind.

mod location;

pub use location::{Location, LocationFlags, LOCATION_SCALING_FACTOR};
