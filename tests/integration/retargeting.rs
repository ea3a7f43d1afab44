//! Two-rig operations: skeleton snapping and physics-bone grafting.

use glam::{Mat4, Vec3};
use rig_retarget::host::RigAccess;
use rig_retarget::{ops, RetargetMode};

use crate::common::{bundled_store, endfield_rig, mhwi_rig};

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn snap_moves_mapped_bones_onto_source_joints() {
    let store = bundled_store();
    let source = endfield_rig();
    let mut target = mhwi_rig();

    let report = ops::snap_skeleton(
        &source,
        &mut target,
        &store,
        "endfield.json",
        "mhwi.json",
        RetargetMode::PositionOnly,
    );
    assert!(report.is_completed(), "{:?}", report.status);
    assert_eq!(report.counts.moved, 3);

    // Every mapped target bone sits exactly on its source joint
    assert!(close(target.head("MhBone_013").unwrap(), Vec3::new(0.0, 0.0, 0.9)));
    assert!(close(target.head("MhBone_014").unwrap(), Vec3::new(0.0, 0.0, 1.0)));
    assert!(close(target.head("MhBone_015").unwrap(), Vec3::new(0.0, 0.0, 1.15)));
}

#[test]
fn snap_carries_unmapped_bones_rigidly() {
    let store = bundled_store();
    let source = endfield_rig();
    let mut target = mhwi_rig();
    let old_head = target.head("MhBone_100").unwrap();
    let old_tail = target.tail("MhBone_100").unwrap();

    ops::snap_skeleton(
        &source,
        &mut target,
        &store,
        "endfield.json",
        "mhwi.json",
        RetargetMode::PositionOnly,
    );

    // MhBone_100 has no mapping: it inherits exactly the pelvis delta
    let pelvis_delta = Vec3::new(0.0, 0.0, 0.9 - 1.1);
    assert!(close(target.head("MhBone_100").unwrap(), old_head + pelvis_delta));
    assert!(close(target.tail("MhBone_100").unwrap(), old_tail + pelvis_delta));
    // Local shape is preserved
    assert!(close(
        target.tail("MhBone_100").unwrap() - target.head("MhBone_100").unwrap(),
        old_tail - old_head
    ));
}

#[test]
fn snap_respects_both_world_transforms() {
    let store = bundled_store();
    let mut source = endfield_rig();
    source.set_world_transform(Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)));
    let mut target = mhwi_rig();
    target.set_world_transform(Mat4::from_translation(Vec3::new(0.0, 0.0, 0.5)));

    ops::snap_skeleton(
        &source,
        &mut target,
        &store,
        "endfield.json",
        "mhwi.json",
        RetargetMode::PositionOnly,
    );

    // Source pelvis world (2, 0, 0.9) -> target local (2, 0, 0.4)
    assert!(close(target.head("MhBone_013").unwrap(), Vec3::new(2.0, 0.0, 0.4)));
}

#[test]
fn full_align_reproduces_source_bone_vectors() {
    let store = bundled_store();
    let source = endfield_rig();
    let mut target = mhwi_rig();

    ops::snap_skeleton(
        &source,
        &mut target,
        &store,
        "endfield.json",
        "mhwi.json",
        RetargetMode::FullAlign,
    );

    // Head AND tail land on the source joint
    assert!(close(target.head("MhBone_013").unwrap(), Vec3::new(0.0, 0.0, 0.9)));
    assert!(close(target.tail("MhBone_013").unwrap(), Vec3::new(0.0, 0.0, 1.0)));
    assert!(close(target.tail("MhBone_015").unwrap(), Vec3::new(0.0, 0.0, 1.3)));
}

#[test]
fn graft_migrates_the_skirt_chain() {
    let store = bundled_store();
    let source = endfield_rig();
    let mut target = mhwi_rig();

    let report = ops::graft_physics_bones(
        &source,
        &mut target,
        &store,
        "endfield.json",
        "mhwi.json",
    );
    assert!(report.is_completed(), "{:?}", report.status);
    assert_eq!(report.counts.created, 2);

    // Canonical parent for the chain root, physics parent below it
    assert_eq!(target.parent_of("Skirt_01").as_deref(), Some("MhBone_013"));
    assert_eq!(target.parent_of("Skirt_02").as_deref(), Some("Skirt_01"));
    assert!(!target.is_connected("Skirt_01"));

    // Placed at the source world head, with a vertical tail of source length
    assert!(close(target.head("Skirt_01").unwrap(), Vec3::new(0.15, 0.0, 0.85)));
    assert!(close(
        target.tail("Skirt_01").unwrap(),
        Vec3::new(0.15, 0.0, 1.05)
    ));
    assert_eq!(target.roll("Skirt_01"), Some(0.0));
}

#[test]
fn graft_then_snap_keeps_grafted_bones_attached() {
    let store = bundled_store();
    let source = endfield_rig();
    let mut target = mhwi_rig();

    ops::graft_physics_bones(&source, &mut target, &store, "endfield.json", "mhwi.json");
    ops::snap_skeleton(
        &source,
        &mut target,
        &store,
        "endfield.json",
        "mhwi.json",
        RetargetMode::PositionOnly,
    );

    // Grafted bones ride the pelvis like any other unmapped descendant
    let pelvis_delta = Vec3::new(0.0, 0.0, 0.9 - 1.1);
    assert!(close(
        target.head("Skirt_01").unwrap(),
        Vec3::new(0.15, 0.0, 0.85) + pelvis_delta
    ));
}
