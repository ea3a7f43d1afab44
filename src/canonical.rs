//! Canonical humanoid skeleton vocabulary
//!
//! Every retargeting operation speaks in terms of a fixed set of canonical joint
//! names. The list is ordered root-to-extremity: the retargeter walks it in order
//! so that a parent joint is always repositioned (and its motion propagated) before
//! any of its descendants get their own explicit reassignment.

/// The canonical joint vocabulary, in root-to-extremity traversal order.
pub const CANONICAL_BONES: &[&str] = &[
    // Torso
    "pelvis", "spine_01", "spine_02", "neck", "head",
    // Arms
    "clavicle_L", "upperarm_L", "forearm_L", "hand_L",
    "clavicle_R", "upperarm_R", "forearm_R", "hand_R",
    // Legs
    "thigh_L", "shin_L", "foot_L", "toe_L",
    "thigh_R", "shin_R", "foot_R", "toe_R",
    // Fingers, left
    "thumb_01_L", "thumb_02_L", "thumb_03_L",
    "index_01_L", "index_02_L", "index_03_L",
    "middle_01_L", "middle_02_L", "middle_03_L",
    "ring_01_L", "ring_02_L", "ring_03_L",
    "pinky_01_L", "pinky_02_L", "pinky_03_L",
    // Fingers, right
    "thumb_01_R", "thumb_02_R", "thumb_03_R",
    "index_01_R", "index_02_R", "index_03_R",
    "middle_01_R", "middle_02_R", "middle_03_R",
    "ring_01_R", "ring_02_R", "ring_03_R",
    "pinky_01_R", "pinky_02_R", "pinky_03_R",
];

/// Returns true if `name` is a canonical joint name.
pub fn is_canonical(name: &str) -> bool {
    CANONICAL_BONES.contains(&name)
}

/// Position of a canonical key in the traversal order, if it is one.
pub fn canonical_index(name: &str) -> Option<usize> {
    CANONICAL_BONES.iter().position(|&k| k == name)
}
