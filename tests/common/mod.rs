//! Shared fixtures: an Endfield-style source rig with weights and an
//! MHWI-style target rig, both matching the bundled preset documents.

use glam::Vec3;
use rig_retarget::{PresetStore, Rig, WeightTable};

/// Store rooted at the crate's bundled assets.
pub fn bundled_store() -> PresetStore {
    PresetStore::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
}

fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Torso of a Biped-style rig as the Endfield import preset expects it, with a
/// duplicate pelvis bone, a twist helper, and a two-bone skirt physics chain.
pub fn endfield_rig() -> Rig {
    let mut rig = Rig::new();
    rig.add_bone("Bip001 Pelvis", v(0.0, 0.0, 0.9), v(0.0, 0.0, 1.0))
        .unwrap();
    rig.add_child(
        "Pelvis_Bone",
        "Bip001 Pelvis",
        v(0.0, 0.05, 0.9),
        v(0.0, 0.05, 1.0),
        false,
    )
    .unwrap();
    rig.add_child(
        "HipTwist",
        "Bip001 Pelvis",
        v(0.0, -0.05, 0.9),
        v(0.0, -0.05, 1.0),
        false,
    )
    .unwrap();
    rig.add_child(
        "Bip001 Spine",
        "Bip001 Pelvis",
        v(0.0, 0.0, 1.0),
        v(0.0, 0.0, 1.15),
        false,
    )
    .unwrap();
    rig.add_child(
        "Bip001 Spine1",
        "Bip001 Spine",
        v(0.0, 0.0, 1.15),
        v(0.0, 0.0, 1.3),
        true,
    )
    .unwrap();
    rig.add_child(
        "Skirt_01",
        "Bip001 Pelvis",
        v(0.15, 0.0, 0.85),
        v(0.15, 0.0, 0.65),
        false,
    )
    .unwrap();
    rig.add_child(
        "Skirt_02",
        "Skirt_01",
        v(0.15, 0.0, 0.65),
        v(0.15, 0.0, 0.45),
        false,
    )
    .unwrap();
    rig
}

/// Weight table matching [`endfield_rig`], with the pelvis mass split three ways.
pub fn endfield_mesh() -> WeightTable {
    let mut mesh = WeightTable::new("body");
    mesh.assign("Bip001 Pelvis", 0, 0.6);
    mesh.assign("Pelvis_Bone", 0, 0.2);
    mesh.assign("HipTwist", 0, 0.2);
    mesh.assign("Bip001 Spine", 1, 1.0);
    mesh.assign("Bip001 Spine1", 2, 0.35);
    mesh
}

/// Matching torso of an MHWI-style rig, plus one physics bone the preset
/// does not know.
pub fn mhwi_rig() -> Rig {
    let mut rig = Rig::new();
    rig.add_bone("MhBone_013", v(0.0, 0.0, 1.1), v(0.0, 0.0, 1.25))
        .unwrap();
    rig.add_child(
        "MhBone_014",
        "MhBone_013",
        v(0.0, 0.0, 1.25),
        v(0.0, 0.0, 1.45),
        false,
    )
    .unwrap();
    rig.add_child(
        "MhBone_015",
        "MhBone_014",
        v(0.0, 0.0, 1.45),
        v(0.0, 0.0, 1.6),
        true,
    )
    .unwrap();
    rig.add_child(
        "MhBone_100",
        "MhBone_013",
        v(0.2, 0.0, 1.0),
        v(0.2, 0.0, 0.8),
        false,
    )
    .unwrap();
    rig
}
