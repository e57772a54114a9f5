//! Document access for plot elements.
//!
//! A document owns named datasets and a change counter that is bumped on
//! every modification. Plot elements only read from it.

use crate::error::PlotResult;
use crate::grid::{Dataset, DatasetToken};
use serde::Deserialize;
use std::collections::HashMap;

/// Read-only view of a document's datasets.
pub trait Document {
    /// Look up a dataset by name, returning its identity token with it.
    fn dataset(&self, name: &str) -> Option<(DatasetToken, &Dataset)>;

    /// Monotonically increasing counter bumped on every document change.
    fn change_counter(&self) -> u64;
}

/// A simple in-memory document.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    datasets: HashMap<String, (DatasetToken, Dataset)>,
    next_token: u64,
    changeset: u64,
}

#[derive(Debug, Deserialize)]
struct DocumentFile {
    datasets: HashMap<String, Dataset>,
}

impl MemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document from JSON of the form `{"datasets": {name: dataset}}`.
    pub fn from_json(json_str: &str) -> PlotResult<Self> {
        let file: DocumentFile = serde_json::from_str(json_str)?;
        let mut doc = Self::new();
        // Sorted so token assignment does not depend on hash order.
        let mut entries: Vec<_> = file.datasets.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, dataset) in entries {
            doc.insert(name, dataset);
        }
        Ok(doc)
    }

    /// Load a document from a JSON file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> PlotResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Insert or replace a dataset, returning its new identity token.
    pub fn insert(&mut self, name: impl Into<String>, dataset: impl Into<Dataset>) -> DatasetToken {
        let token = DatasetToken(self.next_token);
        self.next_token += 1;
        self.datasets.insert(name.into(), (token, dataset.into()));
        self.changeset += 1;
        token
    }

    /// Remove a dataset by name.
    pub fn remove(&mut self, name: &str) -> Option<Dataset> {
        let removed = self.datasets.remove(name).map(|(_, d)| d);
        if removed.is_some() {
            self.changeset += 1;
        }
        removed
    }

    /// Record a change that does not replace any dataset (e.g. a setting edit).
    pub fn touch(&mut self) {
        self.changeset += 1;
    }

    /// Names of all datasets.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }
}

impl Document for MemoryDocument {
    fn dataset(&self, name: &str) -> Option<(DatasetToken, &Dataset)> {
        self.datasets.get(name).map(|(token, d)| (*token, d))
    }

    fn change_counter(&self) -> u64 {
        self.changeset
    }
}
