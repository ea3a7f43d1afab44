//! Mapping preset documents and the on-disk preset store
//!
//! A preset is a JSON document with two top-level fields: `preset_info` (free-form
//! metadata) and `mappings` (canonical key -> candidate name lists). Presets come in
//! two flavours stored in separate directories: import-side presets describe the
//! naming convention of a rig being brought in, target-side presets describe the
//! convention being converted to. Both share the same schema.
//!
//! Presets are loaded fresh for every operation. There is no cache and no fallback
//! preset: a missing or malformed file is an error the caller must handle.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{RetargetError, Result};

/// Which preset directory a filename is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetSide {
    /// Instance-specific source presets (`import_presets/`)
    Import,
    /// Canonical target presets (`bone_presets/`)
    Target,
}

impl PresetSide {
    fn sub_folder(self) -> &'static str {
        match self {
            Self::Import => "import_presets",
            Self::Target => "bone_presets",
        }
    }
}

/// Free-form preset metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PresetInfo {
    /// Human-readable preset name
    #[serde(default)]
    pub name: String,
    /// Game or platform the preset targets
    #[serde(default)]
    pub game: String,
    /// Preset author
    #[serde(default)]
    pub author: String,
}

/// Candidate name lists for one canonical key.
///
/// `main` is priority-ordered: the first candidate present in a rig becomes the
/// primary bone. `aux` candidates are only ever merge targets, never primaries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingEntry {
    #[serde(default)]
    pub main: Vec<String>,
    #[serde(default)]
    pub aux: Vec<String>,
}

impl MappingEntry {
    /// The preferred game-side name for this key (first main candidate).
    pub fn primary_candidate(&self) -> Option<&str> {
        self.main.first().map(String::as_str)
    }

    /// Returns true if `name` appears in either candidate list.
    pub fn contains(&self, name: &str) -> bool {
        self.main.iter().any(|n| n == name) || self.aux.iter().any(|n| n == name)
    }
}

#[derive(Debug, Deserialize)]
struct PresetDocument {
    #[serde(default)]
    preset_info: PresetInfo,
    #[serde(default)]
    mappings: HashMap<String, MappingEntry>,
}

/// A loaded mapping preset, read-only once constructed.
#[derive(Debug, Clone)]
pub struct MappingPreset {
    /// Metadata from the document's `preset_info` field
    pub info: PresetInfo,
    mappings: HashMap<String, MappingEntry>,
    /// First main candidate -> canonical key, for reverse lookup
    reverse: HashMap<String, String>,
}

impl MappingPreset {
    fn from_document(doc: PresetDocument) -> Self {
        let mut reverse = HashMap::new();
        for (key, entry) in &doc.mappings {
            if let Some(primary) = entry.primary_candidate() {
                reverse.insert(primary.to_string(), key.clone());
            }
        }
        Self {
            info: doc.preset_info,
            mappings: doc.mappings,
            reverse,
        }
    }

    /// Parse a preset from raw JSON text.
    pub fn from_json(name: &str, text: &str) -> Result<Self> {
        let doc: PresetDocument =
            serde_json::from_str(text).map_err(|source| RetargetError::PresetParse {
                name: name.to_string(),
                source,
            })?;
        Ok(Self::from_document(doc))
    }

    /// The mapping entry for a canonical key, if the preset covers it.
    pub fn entry(&self, canonical_key: &str) -> Option<&MappingEntry> {
        self.mappings.get(canonical_key)
    }

    /// Number of canonical keys this preset maps.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns true if the preset maps no keys at all.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Reverse lookup: which canonical role does this game bone name fill?
    ///
    /// Only each entry's first main candidate participates, mirroring the
    /// export-side use of the index ("what is `MhBone_013`?" -> `pelvis`).
    pub fn canonical_for_name(&self, game_bone_name: &str) -> Option<&str> {
        self.reverse.get(game_bone_name).map(String::as_str)
    }

    /// Returns true if `name` appears anywhere in the preset's candidate lists
    /// or as a canonical key itself. Names outside this vocabulary are treated
    /// as rig-specific physics bones by the grafter.
    pub fn knows_name(&self, name: &str) -> bool {
        self.mappings.contains_key(name) || self.mappings.values().any(|e| e.contains(name))
    }
}

/// Resolves preset filenames against a root assets directory and loads them.
#[derive(Debug, Clone)]
pub struct PresetStore {
    assets_root: PathBuf,
}

impl PresetStore {
    /// Create a store rooted at `assets_root` (the directory containing
    /// `bone_presets/` and `import_presets/`).
    pub fn new<P: Into<PathBuf>>(assets_root: P) -> Self {
        Self {
            assets_root: assets_root.into(),
        }
    }

    /// The path a given preset filename resolves to.
    pub fn preset_path(&self, filename: &str, side: PresetSide) -> PathBuf {
        self.assets_root.join(side.sub_folder()).join(filename)
    }

    /// Load and parse one preset document.
    pub fn load(&self, filename: &str, side: PresetSide) -> Result<MappingPreset> {
        let path = self.preset_path(filename, side);
        if !path.exists() {
            return Err(RetargetError::PresetNotFound(path));
        }
        let text = fs::read_to_string(&path)?;
        let preset = MappingPreset::from_json(filename, &text)?;
        log::debug!(
            "Loaded preset '{}' ({} keys) from {}",
            preset.info.name,
            preset.len(),
            path.display()
        );
        Ok(preset)
    }
}
