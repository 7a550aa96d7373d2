//! Parameter management types
//!
//! Name/value parameter store and the mission parameter group.

pub mod error;
pub mod mission;
pub mod storage;

pub use error::ParameterError;
pub use mission::{MissionOptions, MissionParams};
pub use storage::{
    ParamFlags, ParamMetadata, ParamValue, ParameterStore, MAX_PARAMS, PARAM_NAME_LEN,
};
