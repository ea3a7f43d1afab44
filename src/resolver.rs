//! Canonical name resolution
//!
//! Given a loaded preset and the set of bone names actually present in a rig,
//! decide which single bone stands for each canonical key and which other
//! present candidates must be merged away as duplicates.
//!
//! The policy is pre-emptive: the FIRST main candidate present in the rig wins,
//! and every later main candidate that is also present is demoted to a
//! duplicate rather than reported as ambiguous. The scan is written as two
//! explicit passes (find the primary, then collect everything else) so the
//! invariant stays auditable.
//!
//! Resolution is pure over the name set: bone transforms are never consulted.

use std::collections::HashSet;

use crate::canonical::CANONICAL_BONES;
use crate::preset::MappingPreset;

/// The outcome of resolving one canonical key against one rig.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// The bone selected to represent the key; `None` when no main candidate
    /// is present in the rig.
    pub primary: Option<String>,
    /// Present candidates that must be merged into the primary, in scan order.
    /// May be non-empty even when `primary` is `None` (orphan aux duplicates
    /// still need weight cleanup).
    pub duplicates: Vec<String>,
}

impl Resolution {
    /// True when the key matched nothing at all in the rig.
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.duplicates.is_empty()
    }
}

/// Resolve one canonical key against the set of bone names present in a rig.
pub fn resolve(
    preset: &MappingPreset,
    present_names: &HashSet<String>,
    canonical_key: &str,
) -> Resolution {
    let Some(entry) = preset.entry(canonical_key) else {
        return Resolution::default();
    };

    // Pass 1: first present main candidate wins, later present ones are
    // demoted to duplicates.
    let mut primary: Option<String> = None;
    let mut duplicates: Vec<String> = Vec::new();
    for candidate in &entry.main {
        if present_names.contains(candidate) {
            if primary.is_none() {
                primary = Some(candidate.clone());
            } else {
                duplicates.push(candidate.clone());
            }
        }
    }

    // Pass 2: every present aux candidate is a duplicate, even with no primary.
    for aux in &entry.aux {
        if present_names.contains(aux)
            && primary.as_deref() != Some(aux.as_str())
            && !duplicates.iter().any(|d| d == aux)
        {
            duplicates.push(aux.clone());
        }
    }

    Resolution {
        primary,
        duplicates,
    }
}

/// Resolve every canonical key, keeping only the non-empty results in
/// vocabulary order.
pub fn resolve_all(
    preset: &MappingPreset,
    present_names: &HashSet<String>,
) -> Vec<(&'static str, Resolution)> {
    CANONICAL_BONES
        .iter()
        .map(|&key| (key, resolve(preset, present_names, key)))
        .filter(|(_, res)| !res.is_empty())
        .collect()
}
