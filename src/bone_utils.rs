//! Small bone editing helpers shared by the per-game operations
//!
//! Cleanup utilities that keep showing up around a retarget: flattening roll
//! on a subtree, giving end bones a vertical tail child for exporters that
//! need one, and mirroring a bone across the X axis.

use glam::Vec3;

use crate::error::{RetargetError, Result};
use crate::host::RigAccess;

/// Minimum length for generated tail bones.
const MIN_TAIL_LENGTH: f32 = 0.1;

/// Set roll to zero on each root and every bone beneath it.
///
/// Returns the number of bones touched. A root listed twice, or a root inside
/// another root's subtree, is only counted once.
pub fn zero_roll_recursive(rig: &mut dyn RigAccess, roots: &[String]) -> Result<usize> {
    let mut pending: Vec<String> = roots.to_vec();
    let mut seen: Vec<String> = Vec::new();
    while let Some(name) = pending.pop() {
        if seen.contains(&name) {
            continue;
        }
        if !rig.has_bone(&name) {
            return Err(RetargetError::BoneNotFound(name));
        }
        pending.extend(rig.children_of(&name));
        seen.push(name);
    }
    for name in &seen {
        rig.set_roll(name, 0.0)?;
    }
    Ok(seen.len())
}

/// Add a vertical `<name>_tail` child at each named bone's tail.
///
/// The new bone points up (Z+) with the parent bone's own length, floored at
/// [`MIN_TAIL_LENGTH`], and is parented unconnected. Bones whose tail child
/// already exists are skipped. Returns the number of bones created.
pub fn add_tail_bones(rig: &mut dyn RigAccess, names: &[String]) -> Result<usize> {
    let mut created = 0;
    for name in names {
        let Some(tail) = rig.tail(name) else {
            continue;
        };
        let new_name = format!("{name}_tail");
        if rig.has_bone(&new_name) {
            continue;
        }
        let length = rig.bone_length(name).unwrap_or(0.0).max(MIN_TAIL_LENGTH);
        rig.create_bone(&new_name, tail, tail + Vec3::Z * length)?;
        rig.set_parent(&new_name, Some(name), false)?;
        created += 1;
    }
    Ok(created)
}

/// Mirror one of two bones across the X axis, using the X+ side as reference.
///
/// The bone whose head sits at positive X is the reference; the other bone's
/// head and tail get the reference's coordinates with X negated. Returns the
/// name of the bone that was moved.
pub fn mirror_align(rig: &mut dyn RigAccess, a: &str, b: &str) -> Result<String> {
    let head_a = rig
        .head(a)
        .ok_or_else(|| RetargetError::BoneNotFound(a.to_string()))?;
    if !rig.has_bone(b) {
        return Err(RetargetError::BoneNotFound(b.to_string()));
    }

    let (reference, mirror) = if head_a.x > 0.0 { (a, b) } else { (b, a) };

    let ref_head = rig
        .head(reference)
        .ok_or_else(|| RetargetError::BoneNotFound(reference.to_string()))?;
    let ref_tail = rig
        .tail(reference)
        .ok_or_else(|| RetargetError::BoneNotFound(reference.to_string()))?;

    rig.set_head(mirror, Vec3::new(-ref_head.x, ref_head.y, ref_head.z))?;
    rig.set_tail(mirror, Vec3::new(-ref_tail.x, ref_tail.y, ref_tail.z))?;

    Ok(mirror.to_string())
}
