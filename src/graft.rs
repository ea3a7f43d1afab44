//! Physics-bone grafting
//!
//! Bones that a source rig carries outside the preset vocabulary are treated as
//! rig-specific secondary ("physics") bones: skirt chains, hair, dangly gear.
//! Grafting recreates them in a target rig at the same world position and
//! reattaches them by canonical-key-resolved parentage.
//!
//! This is deliberately greedy: anything the preset does not name gets
//! migrated, and false positives are expected to be pruned by hand afterward.
//! Source orientation is discarded on purpose: grafted bones get a vertical
//! default tail and zero roll, to be corrected manually.

use std::collections::HashSet;

use glam::Vec3;

use crate::canonical::{is_canonical, CANONICAL_BONES};
use crate::error::{RetargetError, Result};
use crate::host::RigAccess;
use crate::preset::MappingPreset;
use crate::resolver::resolve;

/// Shortest tail a grafted bone may get, to avoid degenerate zero-length bones.
const MIN_TAIL_LENGTH: f32 = 0.1;

/// Which canonical role a source bone name fills, if any.
///
/// Candidate lists are checked in vocabulary order; a name that IS a canonical
/// key (a rig standardized earlier in the pipeline) resolves to itself.
fn canonical_key_for(preset: &MappingPreset, name: &str) -> Option<&'static str> {
    for &key in CANONICAL_BONES {
        if let Some(entry) = preset.entry(key) {
            if entry.contains(name) {
                return Some(key);
            }
        }
    }
    if is_canonical(name) {
        return CANONICAL_BONES.iter().copied().find(|&k| k == name);
    }
    None
}

/// Migrate every preset-unknown bone from `source_rig` into `target_rig`.
///
/// Each physics bone is created (or reused, when a bone of the same name
/// already exists) at the source bone's world head converted into the target
/// rig's local space, with a vertical tail of the source bone's own length
/// (floored at [`MIN_TAIL_LENGTH`]) and zero roll, not connected to its parent.
///
/// Reparenting precedence: a physics parent's graft counterpart, then the
/// target-side primary bone of the parent's canonical role, then unparented.
///
/// Returns the names of all grafted bones.
pub fn graft(
    source_rig: &dyn RigAccess,
    target_rig: &mut dyn RigAccess,
    import_preset: &MappingPreset,
    target_preset: &MappingPreset,
) -> Result<Vec<String>> {
    let physics: Vec<String> = source_rig
        .bone_names()
        .into_iter()
        .filter(|name| !import_preset.knows_name(name))
        .collect();
    let physics_set: HashSet<&str> = physics.iter().map(String::as_str).collect();

    let target_world_inv = target_rig.world_transform().inverse();
    let target_names: HashSet<String> = target_rig.bone_names().into_iter().collect();

    // Placement pass: every physics bone exists in the target before any
    // reparenting happens, so physics-parent links always have a counterpart.
    let mut grafted = Vec::with_capacity(physics.len());
    for name in &physics {
        let world_head = source_rig
            .world_head(name)
            .ok_or_else(|| RetargetError::BoneNotFound(name.clone()))?;
        let length = source_rig
            .bone_length(name)
            .unwrap_or(0.0)
            .max(MIN_TAIL_LENGTH);

        let head = target_world_inv.transform_point3(world_head);
        let tail = head + Vec3::Z * length;

        if target_rig.has_bone(name) {
            target_rig.set_head(name, head)?;
            target_rig.set_tail(name, tail)?;
        } else {
            target_rig.create_bone(name, head, tail)?;
        }
        target_rig.set_roll(name, 0.0)?;
        grafted.push(name.clone());
    }

    // Reparenting pass.
    for name in &physics {
        let parent = match source_rig.parent_of(name) {
            Some(p) if physics_set.contains(p.as_str()) => Some(p),
            Some(p) => canonical_key_for(import_preset, &p)
                .map(|key| resolve(target_preset, &target_names, key))
                .and_then(|res| res.primary)
                .filter(|primary| target_rig.has_bone(primary)),
            None => None,
        };
        target_rig.set_parent(name, parent.as_deref(), false)?;
    }

    log::debug!(
        "Grafted {} physics bones from source rig",
        grafted.len()
    );
    Ok(grafted)
}
