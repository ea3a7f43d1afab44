//! User-facing operations
//!
//! Each operation is one discrete action over host rigs and meshes: load and
//! check a preset pair, standardize a rig to canonical names, rename to a
//! target game's names, convert straight from one game to another, snap a
//! skeleton onto a reference, or graft physics bones across.
//!
//! Operations never half-fail: configuration and precondition problems cancel
//! the whole action before any mutation, partial coverage is a skip condition
//! reflected only in the counts, and the one continue-on-failure policy in the
//! crate (a mesh whose weight-mix primitive breaks) lives in the weight batch
//! layer. Every operation hands back an [`OpReport`] for the caller's UI.

use std::collections::{HashMap, HashSet};

use crate::canonical::CANONICAL_BONES;
use crate::error::Result;
use crate::graft;
use crate::host::{MeshAccess, RigAccess};
use crate::preset::{MappingPreset, PresetSide, PresetStore};
use crate::resolver::{resolve, resolve_all};
use crate::retarget::{retarget, RetargetMode, SourceJoint};
use crate::weights::consolidate_batch;

/// Terminal status of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpStatus {
    Completed,
    Cancelled(String),
}

/// What an operation actually did, for user feedback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounts {
    /// Bones renamed
    pub renamed: usize,
    /// Vertex groups folded away across all meshes
    pub folded_groups: usize,
    /// Duplicate bones removed
    pub removed_bones: usize,
    /// Bones moved by retargeting
    pub moved: usize,
    /// Bones created by grafting
    pub created: usize,
    /// Meshes skipped due to host weight-mix failures
    pub skipped_meshes: usize,
}

/// Outcome of one operation: status, counts, and a human-readable summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpReport {
    pub status: OpStatus,
    pub counts: OpCounts,
    pub message: String,
}

impl OpReport {
    fn completed(counts: OpCounts, message: String) -> Self {
        Self {
            status: OpStatus::Completed,
            counts,
            message,
        }
    }

    fn cancelled(reason: String) -> Self {
        Self {
            status: OpStatus::Cancelled(reason),
            counts: OpCounts::default(),
            message: String::new(),
        }
    }

    /// True when the operation ran to completion.
    pub fn is_completed(&self) -> bool {
        matches!(self.status, OpStatus::Completed)
    }
}

fn run(f: impl FnOnce() -> Result<OpReport>) -> OpReport {
    match f() {
        Ok(report) => report,
        Err(err) => {
            log::warn!("Operation cancelled: {err}");
            OpReport::cancelled(err.to_string())
        }
    }
}

fn present_names(rig: &dyn RigAccess) -> HashSet<String> {
    rig.bone_names().into_iter().collect()
}

/// Rename a bone and keep vertex-group names on the affected meshes in sync,
/// the way a scene host syncs deform groups with their bones.
fn rename_bone_and_groups(
    rig: &mut dyn RigAccess,
    meshes: &mut [&mut dyn MeshAccess],
    old: &str,
    new: &str,
) -> Result<bool> {
    if !rig.has_bone(old) || rig.has_bone(new) {
        return Ok(false);
    }
    rig.rename_bone(old, new)?;
    for mesh in meshes.iter_mut() {
        if mesh.has_group(old) {
            if mesh.has_group(new) {
                log::warn!(
                    "Mesh '{}' already has group '{new}', leaving '{old}' in place",
                    mesh.name()
                );
            } else {
                mesh.rename_group(old, new)?;
            }
        }
    }
    Ok(true)
}

/// Load both sides of a preset pair as a validation probe.
///
/// Nothing is mutated; the report just confirms both documents parse and says
/// how many canonical keys each one covers.
pub fn load_preset_pair(store: &PresetStore, import_name: &str, target_name: &str) -> OpReport {
    run(|| {
        let import = store.load(import_name, PresetSide::Import)?;
        let target = store.load(target_name, PresetSide::Target)?;
        Ok(OpReport::completed(
            OpCounts::default(),
            format!(
                "Loaded '{}' ({} keys) and '{}' ({} keys)",
                import.info.name,
                import.len(),
                target.info.name,
                target.len()
            ),
        ))
    })
}

/// Standardize a rig to canonical bone names.
///
/// Resolves every canonical key against the rig, folds each key's duplicate
/// weights into its primary group on every mesh, deletes the duplicate bones,
/// and renames each primary to its canonical key.
pub fn standardize_to_canonical(
    rig: &mut dyn RigAccess,
    meshes: &mut [&mut dyn MeshAccess],
    store: &PresetStore,
    import_preset_name: &str,
) -> OpReport {
    run(|| {
        let preset = store.load(import_preset_name, PresetSide::Import)?;
        let analysis = analyze(&preset, rig);
        let mut counts = apply_merges(rig, meshes, &analysis);
        counts.renamed = rename_pass(rig, meshes, &analysis)?;
        Ok(OpReport::completed(
            counts,
            format!(
                "Standardized {} bones, folded {} groups, removed {} duplicates",
                counts.renamed, counts.folded_groups, counts.removed_bones
            ),
        ))
    })
}

/// `(canonical key, primary bone, duplicates)` rows for keys with a primary.
fn analyze(preset: &MappingPreset, rig: &dyn RigAccess) -> Vec<(&'static str, String, Vec<String>)> {
    let present = present_names(rig);
    resolve_all(preset, &present)
        .into_iter()
        .filter_map(|(key, res)| res.primary.map(|primary| (key, primary, res.duplicates)))
        .collect()
}

/// Fold duplicate weights and delete duplicate bones. Renaming is left to the
/// caller because standardize and direct conversion rename differently.
fn apply_merges(
    rig: &mut dyn RigAccess,
    meshes: &mut [&mut dyn MeshAccess],
    analysis: &[(&'static str, String, Vec<String>)],
) -> OpCounts {
    let jobs: Vec<(String, Vec<String>)> = analysis
        .iter()
        .filter(|(_, _, dups)| !dups.is_empty())
        .map(|(_, primary, dups)| (primary.clone(), dups.clone()))
        .collect();
    let outcome = consolidate_batch(meshes, &jobs);

    let mut counts = OpCounts {
        folded_groups: outcome.folded_groups,
        skipped_meshes: outcome.skipped_meshes,
        ..OpCounts::default()
    };
    for (_, _, duplicates) in analysis {
        for dup in duplicates {
            if rig.has_bone(dup) && rig.remove_bone(dup).is_ok() {
                counts.removed_bones += 1;
            }
        }
    }
    counts
}

fn rename_pass(
    rig: &mut dyn RigAccess,
    meshes: &mut [&mut dyn MeshAccess],
    analysis: &[(&'static str, String, Vec<String>)],
) -> Result<usize> {
    let mut renamed = 0;
    for (key, primary, _) in analysis {
        if rename_bone_and_groups(rig, meshes, primary, key)? {
            renamed += 1;
        }
    }
    Ok(renamed)
}

/// Rename canonical bones to a target game's convention.
///
/// Each canonical key present in the rig is renamed to the target preset's
/// first main candidate for that key. Keys the preset does not cover, and keys
/// absent from the rig, are skipped.
pub fn rename_to_target(
    rig: &mut dyn RigAccess,
    meshes: &mut [&mut dyn MeshAccess],
    store: &PresetStore,
    target_preset_name: &str,
) -> OpReport {
    run(|| {
        let preset = store.load(target_preset_name, PresetSide::Target)?;
        let mut counts = OpCounts::default();
        for &key in CANONICAL_BONES {
            let Some(target_name) = preset.entry(key).and_then(|e| e.primary_candidate()) else {
                continue;
            };
            let target_name = target_name.to_string();
            if rename_bone_and_groups(rig, meshes, key, &target_name)? {
                counts.renamed += 1;
            }
        }
        Ok(OpReport::completed(
            counts,
            format!("Renamed {} bones to target convention", counts.renamed),
        ))
    })
}

/// One key's worth of a direct source-to-target conversion: which present
/// source bones collapse into which target name. Produced transiently by
/// joining an import-side and a target-side preset entry on the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRule {
    pub canonical_key: &'static str,
    /// The present source bone that survives
    pub source_primary: String,
    /// Present source bones folded into the primary first
    pub source_duplicates: Vec<String>,
    /// The name the primary ends up with
    pub target_name: String,
}

/// Join both presets over the rig's bone names into conversion rules.
///
/// A rule exists only for keys where the import side resolves a primary AND
/// the target side names a primary candidate; anything else is a skip.
pub fn conversion_rules(
    import_preset: &MappingPreset,
    target_preset: &MappingPreset,
    present: &HashSet<String>,
) -> Vec<ConversionRule> {
    CANONICAL_BONES
        .iter()
        .filter_map(|&key| {
            let res = resolve(import_preset, present, key);
            let source_primary = res.primary?;
            let target_name = target_preset
                .entry(key)
                .and_then(|e| e.primary_candidate())?
                .to_string();
            Some(ConversionRule {
                canonical_key: key,
                source_primary,
                source_duplicates: res.duplicates,
                target_name,
            })
        })
        .collect()
}

/// Full source-to-target conversion in one pass: fold duplicates into each
/// key's primary, delete the duplicates, rename the primary straight to the
/// target game's name.
pub fn convert_direct(
    rig: &mut dyn RigAccess,
    meshes: &mut [&mut dyn MeshAccess],
    store: &PresetStore,
    import_preset_name: &str,
    target_preset_name: &str,
) -> OpReport {
    run(|| {
        let import = store.load(import_preset_name, PresetSide::Import)?;
        let target = store.load(target_preset_name, PresetSide::Target)?;
        let rules = conversion_rules(&import, &target, &present_names(rig));

        let analysis: Vec<(&'static str, String, Vec<String>)> = rules
            .iter()
            .map(|r| (r.canonical_key, r.source_primary.clone(), r.source_duplicates.clone()))
            .collect();
        let mut counts = apply_merges(rig, meshes, &analysis);

        for rule in &rules {
            if rename_bone_and_groups(rig, meshes, &rule.source_primary, &rule.target_name)? {
                counts.renamed += 1;
            }
        }
        Ok(OpReport::completed(
            counts,
            format!(
                "Converted {} bones, folded {} groups, removed {} duplicates",
                counts.renamed, counts.folded_groups, counts.removed_bones
            ),
        ))
    })
}

/// Snap a target rig's mapped joints onto a source rig's pose.
///
/// The source rig is read through the import preset, the target rig through
/// the target preset; every canonical key both sides resolve gets its target
/// bone moved onto the source joint, with rigid propagation to unmapped
/// descendants. `mode` picks position-only snapping or full alignment.
pub fn snap_skeleton(
    source_rig: &dyn RigAccess,
    target_rig: &mut dyn RigAccess,
    store: &PresetStore,
    import_preset_name: &str,
    target_preset_name: &str,
    mode: RetargetMode,
) -> OpReport {
    run(|| {
        if source_rig.bone_names().is_empty() || target_rig.bone_names().is_empty() {
            return Ok(OpReport::cancelled(
                "Select two armatures (source -> target)".to_string(),
            ));
        }
        let import = store.load(import_preset_name, PresetSide::Import)?;
        let target = store.load(target_preset_name, PresetSide::Target)?;

        let source_present = present_names(source_rig);
        let mut source_joints: HashMap<String, SourceJoint> = HashMap::new();
        for (key, res) in resolve_all(&import, &source_present) {
            let Some(primary) = res.primary else { continue };
            let (Some(head), Some(tail)) = (
                source_rig.world_head(&primary),
                source_rig.world_tail(&primary),
            ) else {
                continue;
            };
            source_joints.insert(key.to_string(), SourceJoint { head, tail });
        }

        let target_present = present_names(target_rig);
        let mut assignments: HashMap<String, String> = HashMap::new();
        for (key, res) in resolve_all(&target, &target_present) {
            if let Some(primary) = res.primary {
                assignments.insert(key.to_string(), primary);
            }
        }

        let moved = retarget(target_rig, &assignments, &source_joints, mode)?;
        Ok(OpReport::completed(
            OpCounts {
                moved,
                ..OpCounts::default()
            },
            format!("Aligned {moved} bones"),
        ))
    })
}

/// Migrate the source rig's physics bones into the target rig.
pub fn graft_physics_bones(
    source_rig: &dyn RigAccess,
    target_rig: &mut dyn RigAccess,
    store: &PresetStore,
    import_preset_name: &str,
    target_preset_name: &str,
) -> OpReport {
    run(|| {
        let import = store.load(import_preset_name, PresetSide::Import)?;
        let target = store.load(target_preset_name, PresetSide::Target)?;
        let created = graft::graft(source_rig, target_rig, &import, &target)?;
        Ok(OpReport::completed(
            OpCounts {
                created: created.len(),
                ..OpCounts::default()
            },
            format!(
                "Grafted {} physics bones (check and prune manually)",
                created.len()
            ),
        ))
    })
}
