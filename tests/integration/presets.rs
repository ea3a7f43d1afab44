//! Bundled preset documents load and index correctly.

use pretty_assertions::assert_eq;
use rig_retarget::{ops, PresetSide, CANONICAL_BONES};

use crate::common::bundled_store;

#[test]
fn bundled_presets_cover_the_full_vocabulary() {
    let store = bundled_store();
    for (name, side) in [
        ("mhwi.json", PresetSide::Target),
        ("re4.json", PresetSide::Target),
        ("endfield.json", PresetSide::Import),
    ] {
        let preset = store.load(name, side).unwrap();
        assert_eq!(preset.len(), CANONICAL_BONES.len(), "{name}");
        for &key in CANONICAL_BONES {
            let entry = preset.entry(key).unwrap();
            assert!(entry.primary_candidate().is_some(), "{name}: {key}");
        }
    }
}

#[test]
fn reverse_lookup_resolves_game_names() {
    let store = bundled_store();
    let mhwi = store.load("mhwi.json", PresetSide::Target).unwrap();
    assert_eq!(mhwi.canonical_for_name("MhBone_013"), Some("pelvis"));

    let endfield = store.load("endfield.json", PresetSide::Import).unwrap();
    assert_eq!(endfield.canonical_for_name("Bip001 Pelvis"), Some("pelvis"));
    // Secondary candidates are not part of the reverse index
    assert_eq!(endfield.canonical_for_name("Pelvis_Bone"), None);
}

#[test]
fn load_preset_pair_probe() {
    let store = bundled_store();
    let report = ops::load_preset_pair(&store, "endfield.json", "mhwi.json");
    assert!(report.is_completed(), "{:?}", report.status);

    let report = ops::load_preset_pair(&store, "endfield.json", "missing.json");
    assert!(!report.is_completed());
}
