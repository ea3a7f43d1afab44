//! Preset-driven bone renaming, weight merging, and skeleton retargeting
//! between game rig conventions.
//!
//! The crate maps heterogeneous source rigs onto a fixed canonical skeleton
//! vocabulary, folds duplicate vertex-group weights, snaps a target skeleton
//! onto a reference pose, and grafts rig-specific physics bones across rigs.
//! Scene ownership stays with the host: everything runs through the
//! [`host::RigAccess`] and [`host::MeshAccess`] traits, with [`rig::Rig`] and
//! [`mesh::WeightTable`] as the built-in in-memory implementations.

pub mod bone_utils;
pub mod canonical;
pub mod error;
pub mod graft;
pub mod host;
pub mod mesh;
pub mod ops;
pub mod preset;
pub mod resolver;
pub mod retarget;
pub mod rig;
pub mod update_status;
pub mod weights;

// Re-export common types
pub use canonical::CANONICAL_BONES;
pub use error::{RetargetError, Result};
pub use host::{MeshAccess, RigAccess};
pub use mesh::WeightTable;
pub use ops::{OpCounts, OpReport, OpStatus};
pub use preset::{MappingPreset, PresetSide, PresetStore};
pub use resolver::{resolve, Resolution};
pub use retarget::{retarget, RetargetMode, SourceJoint};
pub use rig::{Bone, BoneFlags, Rig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
