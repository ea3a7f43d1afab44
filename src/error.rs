use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for preset loading and rig/weight operations
#[derive(Error, Debug)]
pub enum RetargetError {
    /// I/O error during reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Preset file could not be found at the resolved path
    #[error("Preset file not found: {0}")]
    PresetNotFound(PathBuf),

    /// Preset document exists but is not a valid mapping document
    #[error("Failed to parse preset '{name}': {source}")]
    PresetParse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Caller precondition violated (wrong selection, bad arguments)
    #[error("Precondition error: {0}")]
    Precondition(String),

    /// A bone that must exist for this operation is missing from the rig
    #[error("Bone not found: {0}")]
    BoneNotFound(String),

    /// The host's additive weight-mix primitive failed for a mesh
    #[error("Weight mix failed on mesh '{mesh}': {reason}")]
    WeightMix { mesh: String, reason: String },
}

/// Result type using RetargetError
pub type Result<T> = std::result::Result<T, RetargetError>;
