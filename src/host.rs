//! Host scene interfaces
//!
//! Rigs and meshes are owned by the host 3D scene, not by this crate. The core
//! algorithms only ever touch them through these two traits, so any host
//! representation (an in-memory arena, a scene-graph binding, a file importer)
//! can be driven by the same retargeting code.
//!
//! All positions exchanged through [`RigAccess`] are in the rig's local space;
//! [`RigAccess::world_transform`] converts to world space. Weights exchanged
//! through [`MeshAccess`] are plain `f32` values in `[0, 1]` per vertex-group
//! assignment, sparse over the vertex range.

use glam::{Mat4, Vec3};

use crate::error::Result;

/// Read/write access to one skeleton instance.
///
/// Bone identity is by name. Getters return `None` for absent bones (absence is
/// usually a skip condition, not an error); mutators return an error instead,
/// because a caller mutating a bone it never looked up is a logic bug.
pub trait RigAccess {
    /// All bone names, in the rig's own traversal order.
    fn bone_names(&self) -> Vec<String>;

    /// Returns true if a bone of this name exists.
    fn has_bone(&self, name: &str) -> bool;

    /// Name of the bone's parent, if it has one.
    fn parent_of(&self, name: &str) -> Option<String>;

    /// Names of the bone's direct children, derived from parent links.
    fn children_of(&self, name: &str) -> Vec<String>;

    /// Head position in rig-local space.
    fn head(&self, name: &str) -> Option<Vec3>;

    /// Tail position in rig-local space.
    fn tail(&self, name: &str) -> Option<Vec3>;

    /// Roll (twist) angle in radians.
    fn roll(&self, name: &str) -> Option<f32>;

    /// Whether the bone's head is rigidly attached to its parent's tail.
    fn is_connected(&self, name: &str) -> bool;

    /// The rig-to-world transform.
    fn world_transform(&self) -> Mat4;

    fn set_head(&mut self, name: &str, head: Vec3) -> Result<()>;

    fn set_tail(&mut self, name: &str, tail: Vec3) -> Result<()>;

    fn set_roll(&mut self, name: &str, roll: f32) -> Result<()>;

    /// Rename a bone. The new name must not already be taken.
    fn rename_bone(&mut self, old: &str, new: &str) -> Result<()>;

    /// Delete a bone. Its children are reattached to the bone's own parent.
    fn remove_bone(&mut self, name: &str) -> Result<()>;

    /// Create a new unparented, unconnected bone.
    fn create_bone(&mut self, name: &str, head: Vec3, tail: Vec3) -> Result<()>;

    /// Reparent a bone (or detach it with `None`).
    fn set_parent(&mut self, child: &str, parent: Option<&str>, connected: bool) -> Result<()>;

    /// Head position in world space.
    fn world_head(&self, name: &str) -> Option<Vec3> {
        Some(self.world_transform().transform_point3(self.head(name)?))
    }

    /// Tail position in world space.
    fn world_tail(&self, name: &str) -> Option<Vec3> {
        Some(self.world_transform().transform_point3(self.tail(name)?))
    }

    /// Distance from head to tail.
    fn bone_length(&self, name: &str) -> Option<f32> {
        Some((self.tail(name)? - self.head(name)?).length())
    }
}

/// Read/write access to one mesh's vertex-group weight table.
pub trait MeshAccess {
    /// Mesh name, used in warnings when a mesh has to be skipped.
    fn name(&self) -> &str;

    /// All vertex-group names, in the mesh's own order.
    fn group_names(&self) -> Vec<String>;

    /// Returns true if a group of this name exists.
    fn has_group(&self, group: &str) -> bool;

    /// Create an empty group. Creating an existing group is a no-op.
    fn create_group(&mut self, group: &str) -> Result<()>;

    /// Delete a group and all of its weight assignments.
    fn remove_group(&mut self, group: &str) -> Result<()>;

    /// Rename a group. The new name must not already be taken.
    fn rename_group(&mut self, old: &str, new: &str) -> Result<()>;

    /// The weight of `vertex` in `group`, if assigned.
    fn weight(&self, group: &str, vertex: u32) -> Option<f32>;

    /// All `(vertex, weight)` assignments of a group, sorted by vertex index.
    fn group_weights(&self, group: &str) -> Option<Vec<(u32, f32)>>;

    /// Additively blend `source` into `target` over the full vertex range.
    ///
    /// For every vertex with a weight in `source`, that weight is added to the
    /// vertex's weight in `target` (treating a missing assignment as 0). The
    /// sum is NOT clamped to 1.0. `source` itself is left untouched. Both
    /// groups must exist.
    fn mix_add(&mut self, target: &str, source: &str) -> Result<()>;
}
