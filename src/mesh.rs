//! In-memory vertex-group weight table
//!
//! [`WeightTable`] is the crate's own [`MeshAccess`] implementation. Groups keep
//! their creation order (matching how scene hosts list vertex groups) and store
//! weights sparsely per vertex index.

use std::collections::BTreeMap;

use crate::error::{RetargetError, Result};
use crate::host::MeshAccess;

#[derive(Debug, Clone)]
struct VertexGroup {
    name: String,
    weights: BTreeMap<u32, f32>,
}

/// One mesh's named vertex groups and their sparse weight assignments.
#[derive(Debug, Clone)]
pub struct WeightTable {
    name: String,
    groups: Vec<VertexGroup>,
}

impl WeightTable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            groups: Vec::new(),
        }
    }

    fn group(&self, name: &str) -> Option<&VertexGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    fn group_mut(&mut self, name: &str) -> Option<&mut VertexGroup> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// Assign one weight, creating the group if needed. Builder-style helper
    /// for hosts filling a table from imported data.
    pub fn assign(&mut self, group: &str, vertex: u32, weight: f32) {
        if self.group(group).is_none() {
            self.groups.push(VertexGroup {
                name: group.to_string(),
                weights: BTreeMap::new(),
            });
        }
        if let Some(g) = self.group_mut(group) {
            g.weights.insert(vertex, weight);
        }
    }

    /// Total assigned weight for one vertex across all groups.
    pub fn vertex_total(&self, vertex: u32) -> f32 {
        self.groups
            .iter()
            .filter_map(|g| g.weights.get(&vertex))
            .sum()
    }
}

impl MeshAccess for WeightTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name.clone()).collect()
    }

    fn has_group(&self, group: &str) -> bool {
        self.group(group).is_some()
    }

    fn create_group(&mut self, group: &str) -> Result<()> {
        if self.group(group).is_none() {
            self.groups.push(VertexGroup {
                name: group.to_string(),
                weights: BTreeMap::new(),
            });
        }
        Ok(())
    }

    fn remove_group(&mut self, group: &str) -> Result<()> {
        let before = self.groups.len();
        self.groups.retain(|g| g.name != group);
        if self.groups.len() == before {
            return Err(RetargetError::Precondition(format!(
                "vertex group '{group}' does not exist on mesh '{}'",
                self.name
            )));
        }
        Ok(())
    }

    fn rename_group(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        if self.group(new).is_some() {
            return Err(RetargetError::Precondition(format!(
                "vertex group name '{new}' already taken on mesh '{}'",
                self.name
            )));
        }
        match self.group_mut(old) {
            Some(g) => {
                g.name = new.to_string();
                Ok(())
            }
            None => Err(RetargetError::Precondition(format!(
                "vertex group '{old}' does not exist on mesh '{}'",
                self.name
            ))),
        }
    }

    fn weight(&self, group: &str, vertex: u32) -> Option<f32> {
        self.group(group)?.weights.get(&vertex).copied()
    }

    fn group_weights(&self, group: &str) -> Option<Vec<(u32, f32)>> {
        Some(
            self.group(group)?
                .weights
                .iter()
                .map(|(&v, &w)| (v, w))
                .collect(),
        )
    }

    fn mix_add(&mut self, target: &str, source: &str) -> Result<()> {
        let source_weights = match self.group(source) {
            Some(g) => g.weights.clone(),
            None => {
                return Err(RetargetError::WeightMix {
                    mesh: self.name.clone(),
                    reason: format!("source group '{source}' missing"),
                });
            }
        };
        let Some(target_group) = self.group_mut(target) else {
            return Err(RetargetError::WeightMix {
                mesh: self.name.clone(),
                reason: format!("target group '{target}' missing"),
            });
        };
        for (vertex, weight) in source_weights {
            *target_group.weights.entry(vertex).or_insert(0.0) += weight;
        }
        Ok(())
    }
}
