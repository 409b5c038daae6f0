use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::kerning::KerningPair;

/// Kerning as stored: left raw key, then right raw key, then value
pub type KerningMap = IndexMap<SmolStr, IndexMap<SmolStr, i32>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A design master
pub struct Master {
    /// The master's display name
    pub name: String,
    /// The master's identifier
    pub id: String,
    /// The master's kerning
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub kerning: KerningMap,
}

impl Master {
    /// A new master with no kerning
    pub fn new<T, U>(name: T, id: U) -> Self
    where
        T: Into<String>,
        U: Into<String>,
    {
        Master {
            name: name.into(),
            id: id.into(),
            kerning: IndexMap::new(),
        }
    }

    /// Set one kerning value
    pub fn insert_kerning(&mut self, left: impl Into<SmolStr>, right: impl Into<SmolStr>, value: i32) {
        self.kerning
            .entry(left.into())
            .or_default()
            .insert(right.into(), value);
    }

    /// Look up one kerning value
    pub fn kerning_value(&self, left: &str, right: &str) -> Option<i32> {
        self.kerning.get(left)?.get(right).copied()
    }

    /// Remove one kerning value, dropping the left key once it has no pairs
    pub fn remove_kerning(&mut self, left: &str, right: &str) -> Option<i32> {
        let rights = self.kerning.get_mut(left)?;
        let value = rights.shift_remove(right);
        if rights.is_empty() {
            self.kerning.shift_remove(left);
        }
        value
    }

    /// Every kerning entry, in storage order
    pub fn kerning_pairs(&self) -> Vec<KerningPair> {
        self.kerning
            .iter()
            .flat_map(|(left, rights)| {
                rights
                    .iter()
                    .map(move |(right, value)| KerningPair::new(left.clone(), right.clone(), *value))
            })
            .collect()
    }

    /// Number of kerning entries
    pub fn kerning_count(&self) -> usize {
        self.kerning.values().map(|rights| rights.len()).sum()
    }
}
