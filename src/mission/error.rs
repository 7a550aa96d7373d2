//! Mission error types

use crate::platform::StorageError;

/// Errors from mission storage and engine operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionError {
    /// Underlying storage read or write failed
    Storage(StorageError),
    /// Index is past the end of the stored list
    NotFound,
    /// Stored record could not be decoded
    Corrupt,
    /// Storage has no room for another command
    Full,
    /// Operation refused while the vehicle is armed and the mission running
    Armed,
    /// Command id is unsupported or its payload does not match the id
    InvalidCommand,
    /// Jump target, tag or landing sequence could not be resolved
    InvalidTarget,
    /// No mission is stored
    NoMission,
}

impl From<StorageError> for MissionError {
    fn from(err: StorageError) -> Self {
        MissionError::Storage(err)
    }
}

impl core::fmt::Display for MissionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MissionError::Storage(err) => write!(f, "mission storage error: {}", err),
            MissionError::NotFound => write!(f, "mission index out of range"),
            MissionError::Corrupt => write!(f, "mission record corrupt"),
            MissionError::Full => write!(f, "mission storage full"),
            MissionError::Armed => write!(f, "mission change refused while armed"),
            MissionError::InvalidCommand => write!(f, "invalid mission command"),
            MissionError::InvalidTarget => write!(f, "mission target not found"),
            MissionError::NoMission => write!(f, "no mission stored"),
        }
    }
}

/// Result type for mission operations
pub type Result<T> = core::result::Result<T, MissionError>;
