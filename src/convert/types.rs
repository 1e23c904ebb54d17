// src/convert/types.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key under which entries that precede any subcategory are collected.
pub const ENTRIES_KEY: &str = "entries";

/// A single scripture reference with its cleaned description.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct Entry {
    pub reference: String,
    pub description: String,
}

/// Subcategory name (or [`ENTRIES_KEY`]) → entries, in first-seen order.
pub type Category = IndexMap<String, Vec<Entry>>;

/// The whole converted document: category name → category, in first-seen order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(transparent)]
pub struct ScriptureSets(IndexMap<String, Category>);

impl ScriptureSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of top-level categories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<&Category> {
        self.0.get(category)
    }

    /// Category names in the order they first appeared in the input.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Total entries across every category and subcategory.
    pub fn entry_count(&self) -> usize {
        self.0
            .values()
            .flat_map(|cat| cat.values())
            .map(Vec::len)
            .sum()
    }

    /// Returns the category, inserting an empty one on first sighting.
    pub(crate) fn category_mut(&mut self, name: &str) -> &mut Category {
        self.0.entry(name.to_string()).or_default()
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.0.get_mut(name)
    }
}
