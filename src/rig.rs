//! In-memory skeleton arena
//!
//! [`Rig`] is the crate's own [`RigAccess`] implementation: an arena of bone
//! records with a name index and a rig-to-world transform. It exists for hosts
//! that keep skeletons in plain memory (importers, converters, tests); scene
//! hosts can bind their own representation to the trait instead.
//!
//! Parent links are the only stored hierarchy; children lists are derived by
//! scanning, never cached across operations. Removing a bone leaves a tombstone
//! slot so indices held by parent links stay valid.

use std::collections::HashMap;

use glam::{Mat4, Vec3};

use crate::error::{RetargetError, Result};
use crate::host::RigAccess;

bitflags::bitflags! {
    /// Per-bone state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BoneFlags: u32 {
        /// Head is rigidly attached to the parent's tail
        const CONNECTED = 0x1;
    }
}

/// One bone record: a head/tail segment with a twist angle.
#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,
    /// Joint position, rig-local space
    pub head: Vec3,
    /// Tip position, rig-local space
    pub tail: Vec3,
    /// Twist around the head-tail axis, radians
    pub roll: f32,
    pub flags: BoneFlags,
    /// Arena index of the parent bone
    pub parent: Option<usize>,
}

/// A skeleton instance: bone arena + name index + rig-to-world transform.
#[derive(Debug, Clone, Default)]
pub struct Rig {
    slots: Vec<Option<Bone>>,
    by_name: HashMap<String, usize>,
    world: Mat4,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            by_name: HashMap::new(),
            world: Mat4::IDENTITY,
        }
    }

    /// Create a rig with a non-identity rig-to-world transform.
    pub fn with_world_transform(world: Mat4) -> Self {
        Self {
            world,
            ..Self::new()
        }
    }

    pub fn set_world_transform(&mut self, world: Mat4) {
        self.world = world;
    }

    /// Add a root bone. Returns its arena index.
    pub fn add_bone(&mut self, name: &str, head: Vec3, tail: Vec3) -> Result<usize> {
        self.insert(name, head, tail, None, false)
    }

    /// Add a bone parented under `parent_name`. Returns its arena index.
    pub fn add_child(
        &mut self,
        name: &str,
        parent_name: &str,
        head: Vec3,
        tail: Vec3,
        connected: bool,
    ) -> Result<usize> {
        let parent = *self
            .by_name
            .get(parent_name)
            .ok_or_else(|| RetargetError::BoneNotFound(parent_name.to_string()))?;
        self.insert(name, head, tail, Some(parent), connected)
    }

    fn insert(
        &mut self,
        name: &str,
        head: Vec3,
        tail: Vec3,
        parent: Option<usize>,
        connected: bool,
    ) -> Result<usize> {
        if self.by_name.contains_key(name) {
            return Err(RetargetError::Precondition(format!(
                "bone '{name}' already exists"
            )));
        }
        let mut flags = BoneFlags::empty();
        if connected {
            flags |= BoneFlags::CONNECTED;
        }
        let index = self.slots.len();
        self.slots.push(Some(Bone {
            name: name.to_string(),
            head,
            tail,
            roll: 0.0,
            flags,
            parent,
        }));
        self.by_name.insert(name.to_string(), index);
        Ok(index)
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RetargetError::BoneNotFound(name.to_string()))
    }

    fn bone(&self, name: &str) -> Option<&Bone> {
        self.by_name
            .get(name)
            .and_then(|&i| self.slots[i].as_ref())
    }

    /// Number of live bones.
    pub fn bone_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Drag the heads of connected children along with a moved tail.
    fn sync_connected_children(&mut self, parent_index: usize, new_tail: Vec3) {
        for slot in &mut self.slots {
            if let Some(bone) = slot {
                if bone.parent == Some(parent_index) && bone.flags.contains(BoneFlags::CONNECTED) {
                    bone.head = new_tail;
                }
            }
        }
    }
}

impl RigAccess for Rig {
    fn bone_names(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter_map(|s| s.as_ref().map(|b| b.name.clone()))
            .collect()
    }

    fn has_bone(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    fn parent_of(&self, name: &str) -> Option<String> {
        let bone = self.bone(name)?;
        let parent = self.slots[bone.parent?].as_ref()?;
        Some(parent.name.clone())
    }

    fn children_of(&self, name: &str) -> Vec<String> {
        let Some(&index) = self.by_name.get(name) else {
            return Vec::new();
        };
        self.slots
            .iter()
            .filter_map(|s| s.as_ref())
            .filter(|b| b.parent == Some(index))
            .map(|b| b.name.clone())
            .collect()
    }

    fn head(&self, name: &str) -> Option<Vec3> {
        self.bone(name).map(|b| b.head)
    }

    fn tail(&self, name: &str) -> Option<Vec3> {
        self.bone(name).map(|b| b.tail)
    }

    fn roll(&self, name: &str) -> Option<f32> {
        self.bone(name).map(|b| b.roll)
    }

    fn is_connected(&self, name: &str) -> bool {
        self.bone(name)
            .is_some_and(|b| b.flags.contains(BoneFlags::CONNECTED))
    }

    fn world_transform(&self) -> Mat4 {
        self.world
    }

    fn set_head(&mut self, name: &str, head: Vec3) -> Result<()> {
        let index = self.index_of(name)?;
        if let Some(bone) = self.slots[index].as_mut() {
            bone.head = head;
        }
        Ok(())
    }

    fn set_tail(&mut self, name: &str, tail: Vec3) -> Result<()> {
        let index = self.index_of(name)?;
        if let Some(bone) = self.slots[index].as_mut() {
            bone.tail = tail;
        }
        self.sync_connected_children(index, tail);
        Ok(())
    }

    fn set_roll(&mut self, name: &str, roll: f32) -> Result<()> {
        let index = self.index_of(name)?;
        if let Some(bone) = self.slots[index].as_mut() {
            bone.roll = roll;
        }
        Ok(())
    }

    fn rename_bone(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        if self.by_name.contains_key(new) {
            return Err(RetargetError::Precondition(format!(
                "bone name '{new}' already taken"
            )));
        }
        let index = self.index_of(old)?;
        if let Some(bone) = self.slots[index].as_mut() {
            bone.name = new.to_string();
        }
        self.by_name.remove(old);
        self.by_name.insert(new.to_string(), index);
        Ok(())
    }

    fn remove_bone(&mut self, name: &str) -> Result<()> {
        let index = self.index_of(name)?;
        let grandparent = self.slots[index].as_ref().and_then(|b| b.parent);
        for slot in &mut self.slots {
            if let Some(bone) = slot {
                if bone.parent == Some(index) {
                    bone.parent = grandparent;
                    // Position is kept as-is, so the rigid attachment is gone
                    bone.flags.remove(BoneFlags::CONNECTED);
                }
            }
        }
        self.slots[index] = None;
        self.by_name.remove(name);
        Ok(())
    }

    fn create_bone(&mut self, name: &str, head: Vec3, tail: Vec3) -> Result<()> {
        self.insert(name, head, tail, None, false)?;
        Ok(())
    }

    fn set_parent(&mut self, child: &str, parent: Option<&str>, connected: bool) -> Result<()> {
        let child_index = self.index_of(child)?;
        let parent_index = match parent {
            Some(p) => {
                let i = self.index_of(p)?;
                if i == child_index {
                    return Err(RetargetError::Precondition(format!(
                        "cannot parent '{child}' to itself"
                    )));
                }
                Some(i)
            }
            None => None,
        };
        if let Some(bone) = self.slots[child_index].as_mut() {
            bone.parent = parent_index;
            bone.flags.set(BoneFlags::CONNECTED, connected);
        }
        Ok(())
    }
}
