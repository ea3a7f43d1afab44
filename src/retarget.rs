//! Skeleton retargeting
//!
//! Moves a target rig's mapped joints onto a source rig's world-space joint
//! positions, rigidly carrying along every descendant that has no mapping of
//! its own.
//!
//! Canonical keys are processed in vocabulary order (root to extremity), so a
//! parent's displacement reaches its children before any child's own explicit
//! reassignment overrides it. A child with an explicit target therefore always
//! lands on its target; a child without one ends up exactly where rigid
//! propagation puts it.

use std::collections::HashMap;

use glam::Vec3;

use crate::canonical::CANONICAL_BONES;
use crate::error::{RetargetError, Result};
use crate::host::RigAccess;

/// A source joint sampled in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceJoint {
    pub head: Vec3,
    pub tail: Vec3,
}

/// How much of the source bone a retargeted bone reproduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetargetMode {
    /// Snap the head only; the bone keeps its original direction and length.
    PositionOnly,
    /// Snap the head and recompute the tail to reproduce the source bone's
    /// direction and length as well.
    FullAlign,
}

/// Translate a bone's whole subtree by `delta`, preserving local shape.
///
/// Connected children only get their tail translated, since their head rides
/// the parent's tail. Unconnected children get head and tail translated together.
pub fn propagate_subtree(rig: &mut dyn RigAccess, bone: &str, delta: Vec3) -> Result<()> {
    for child in rig.children_of(bone) {
        if rig.is_connected(&child) {
            let tail = rig
                .tail(&child)
                .ok_or_else(|| RetargetError::BoneNotFound(child.clone()))?;
            rig.set_tail(&child, tail + delta)?;
        } else {
            let head = rig
                .head(&child)
                .ok_or_else(|| RetargetError::BoneNotFound(child.clone()))?;
            let tail = rig
                .tail(&child)
                .ok_or_else(|| RetargetError::BoneNotFound(child.clone()))?;
            rig.set_head(&child, head + delta)?;
            rig.set_tail(&child, tail + delta)?;
        }
        propagate_subtree(rig, &child, delta)?;
    }
    Ok(())
}

/// Snap every assigned target bone onto its source joint.
///
/// `assignments` maps canonical keys to bone names in `target_rig`;
/// `source_joints` maps canonical keys to world-space source joints. Keys
/// missing from either map, and assigned bones that do not exist in the rig,
/// are silently skipped; presets routinely cover only part of a rig.
///
/// Returns the number of bones actually moved.
pub fn retarget(
    target_rig: &mut dyn RigAccess,
    assignments: &HashMap<String, String>,
    source_joints: &HashMap<String, SourceJoint>,
    mode: RetargetMode,
) -> Result<usize> {
    let world_inv = target_rig.world_transform().inverse();
    let mut moved = 0;

    for &key in CANONICAL_BONES {
        let Some(joint) = source_joints.get(key) else {
            continue;
        };
        let Some(bone) = assignments.get(key) else {
            continue;
        };
        let Some(old_head) = target_rig.head(bone) else {
            continue;
        };
        let Some(old_tail) = target_rig.tail(bone) else {
            continue;
        };

        let new_head = world_inv.transform_point3(joint.head);
        let delta = new_head - old_head;

        target_rig.set_head(bone, new_head)?;
        let new_tail = match mode {
            RetargetMode::PositionOnly => old_tail + delta,
            RetargetMode::FullAlign => world_inv.transform_point3(joint.tail),
        };
        target_rig.set_tail(bone, new_tail)?;

        propagate_subtree(target_rig, bone, delta)?;
        moved += 1;
    }

    log::debug!("Retarget moved {moved} bones ({mode:?})");
    Ok(moved)
}
