//! Weight consolidation
//!
//! Folds duplicate vertex groups into a surviving target group using the host's
//! additive weight-mix primitive, then deletes the sources. Once merged, the
//! original per-bone split is gone for good.
//!
//! Per-vertex totals are NOT renormalized or clamped after folding; downstream
//! renderers normalize at deform time.

use crate::error::Result;
use crate::host::MeshAccess;

/// Fold each group in `sources` into `target` on one mesh, deleting the source
/// groups as they are consumed. Returns the number of groups actually folded.
///
/// Sources absent from the mesh are silently skipped, so re-applying the same
/// instruction list is idempotent. The target group is created on first use if
/// the mesh does not have it yet.
///
/// On a weight-mix failure the error is returned immediately; groups folded
/// before the failure stay folded, the failing group is left untouched.
pub fn consolidate(
    mesh: &mut dyn MeshAccess,
    target: &str,
    sources: &[String],
) -> Result<usize> {
    let mut folded = 0;
    for source in sources {
        if !mesh.has_group(source) {
            continue;
        }
        if source == target {
            continue;
        }
        mesh.create_group(target)?;
        mesh.mix_add(target, source)?;
        mesh.remove_group(source)?;
        folded += 1;
    }
    Ok(folded)
}

/// Outcome of a consolidation batch over several meshes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Groups folded across all meshes
    pub folded_groups: usize,
    /// Meshes skipped because the host primitive failed on them
    pub skipped_meshes: usize,
}

/// Apply the same `(target, sources)` instructions to every mesh.
///
/// Failure policy: a mesh whose weight-mix primitive fails is skipped with a
/// warning and the batch moves on. Continue-on-failure applies at mesh granularity,
/// never at vertex or group granularity.
pub fn consolidate_batch(
    meshes: &mut [&mut dyn MeshAccess],
    jobs: &[(String, Vec<String>)],
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for mesh in meshes {
        let mut mesh_folded = 0;
        let mut failed = false;
        for (target, sources) in jobs {
            match consolidate(&mut **mesh, target, sources) {
                Ok(folded) => mesh_folded += folded,
                Err(err) => {
                    log::warn!("Skipping mesh '{}': {err}", mesh.name());
                    outcome.skipped_meshes += 1;
                    failed = true;
                    break;
                }
            }
        }
        if !failed {
            outcome.folded_groups += mesh_folded;
        }
    }
    outcome
}
