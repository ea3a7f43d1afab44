//! Standardize / rename / convert over a rig and its meshes.

use pretty_assertions::assert_eq;
use rig_retarget::host::{MeshAccess, RigAccess};
use rig_retarget::ops;

use crate::common::{bundled_store, endfield_mesh, endfield_rig};

#[test]
fn standardize_then_rename_to_target() {
    let store = bundled_store();
    let mut rig = endfield_rig();
    let mut mesh = endfield_mesh();

    {
        let mut meshes: Vec<&mut dyn MeshAccess> = vec![&mut mesh];
        let report = ops::standardize_to_canonical(&mut rig, &mut meshes, &store, "endfield.json");
        assert!(report.is_completed(), "{:?}", report.status);
        assert_eq!(report.counts.renamed, 3);
        assert_eq!(report.counts.removed_bones, 2);
        assert_eq!(report.counts.folded_groups, 2);
    }

    // Canonical names in place, duplicates gone, physics chain untouched
    assert!(rig.has_bone("pelvis"));
    assert!(rig.has_bone("spine_01"));
    assert!(rig.has_bone("spine_02"));
    assert!(!rig.has_bone("Pelvis_Bone"));
    assert!(!rig.has_bone("HipTwist"));
    assert!(rig.has_bone("Skirt_01"));

    // Pelvis weight mass fully consolidated under the canonical group
    assert!((mesh.weight("pelvis", 0).unwrap() - 1.0).abs() < 1e-6);
    assert!(!mesh.has_group("Pelvis_Bone"));
    assert!(!mesh.has_group("HipTwist"));
    assert_eq!(mesh.weight("spine_01", 1), Some(1.0));

    {
        let mut meshes: Vec<&mut dyn MeshAccess> = vec![&mut mesh];
        let report = ops::rename_to_target(&mut rig, &mut meshes, &store, "mhwi.json");
        assert!(report.is_completed());
        assert_eq!(report.counts.renamed, 3);
    }
    assert!(rig.has_bone("MhBone_013"));
    assert!(rig.has_bone("MhBone_014"));
    assert!(rig.has_bone("MhBone_015"));
    assert!((mesh.weight("MhBone_013", 0).unwrap() - 1.0).abs() < 1e-6);
}

#[test]
fn second_pipeline_run_changes_nothing() {
    let store = bundled_store();
    let mut rig = endfield_rig();
    let mut mesh = endfield_mesh();

    {
        let mut meshes: Vec<&mut dyn MeshAccess> = vec![&mut mesh];
        ops::standardize_to_canonical(&mut rig, &mut meshes, &store, "endfield.json");
        ops::rename_to_target(&mut rig, &mut meshes, &store, "mhwi.json");
    }
    let names_after_first: Vec<String> = rig.bone_names();
    let pelvis_weight = mesh.weight("MhBone_013", 0).unwrap();

    let mut meshes: Vec<&mut dyn MeshAccess> = vec![&mut mesh];
    let second_std = ops::standardize_to_canonical(&mut rig, &mut meshes, &store, "endfield.json");
    let second_ren = ops::rename_to_target(&mut rig, &mut meshes, &store, "mhwi.json");

    assert!(second_std.is_completed());
    assert_eq!(second_std.counts.renamed, 0);
    assert_eq!(second_std.counts.folded_groups, 0);
    assert_eq!(second_std.counts.removed_bones, 0);
    assert_eq!(second_ren.counts.renamed, 0);

    assert_eq!(rig.bone_names(), names_after_first);
    assert_eq!(mesh.weight("MhBone_013", 0).unwrap(), pelvis_weight);
}

#[test]
fn convert_direct_is_one_pass_and_stable() {
    let store = bundled_store();
    let mut rig = endfield_rig();
    let mut mesh = endfield_mesh();

    {
        let mut meshes: Vec<&mut dyn MeshAccess> = vec![&mut mesh];
        let report = ops::convert_direct(&mut rig, &mut meshes, &store, "endfield.json", "re4.json");
        assert!(report.is_completed());
        assert_eq!(report.counts.renamed, 3);
        assert_eq!(report.counts.removed_bones, 2);
    }

    assert!(rig.has_bone("Hips"));
    assert!(rig.has_bone("Spine_0"));
    assert!(rig.has_bone("Spine_1"));
    assert!((mesh.weight("Hips", 0).unwrap() - 1.0).abs() < 1e-6);

    // Re-running the conversion finds nothing left to do
    let mut meshes: Vec<&mut dyn MeshAccess> = vec![&mut mesh];
    let report = ops::convert_direct(&mut rig, &mut meshes, &store, "endfield.json", "re4.json");
    assert!(report.is_completed());
    assert_eq!(report.counts.renamed, 0);
    assert_eq!(report.counts.folded_groups, 0);
    assert_eq!(report.counts.removed_bones, 0);
}
