// src/inspector.rs

//! Tools for inspecting the entry structure of archives.
//! Useful for checking how nested composites and sequences were laid out.

use crate::archive::{Archive, JsonArchive};
use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// What an entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A scalar value.
    Leaf,
    /// A nested archive with named entries (a composite).
    Nested,
    /// An ordered list of entries (a sequence).
    Sequence,
}

/// A structural report of one archive entry and everything below it.
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    /// Entry name. `"$"` for the root, the index for sequence items.
    pub name: String,
    /// Shape of the entry.
    pub kind: EntryKind,
    /// Child entries. Empty for leaves.
    pub children: Vec<EntryReport>,
}

impl EntryReport {
    /// Finds a descendant by dotted path (`"a.x"`, `"points.0"`).
    pub fn find(&self, path: &str) -> Option<&EntryReport> {
        path.split('.').try_fold(self, |node, segment| {
            node.children.iter().find(|child| child.name == segment)
        })
    }

    /// Number of entries in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(EntryReport::count).sum::<usize>()
    }

    /// Length of the longest root-to-leaf path, counting this entry.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(EntryReport::depth).max().unwrap_or(0)
    }
}

/// The archive inspector tool.
#[derive(Debug)]
pub struct ArchiveInspector;

impl ArchiveInspector {
    /// Builds a report for an in-memory archive.
    pub fn inspect(archive: &JsonArchive) -> EntryReport {
        Self::inspect_value("$".to_owned(), archive.storage())
    }

    /// Loads the archive at `path` and reports on it.
    pub fn inspect_file<P: AsRef<Path>>(path: P) -> Result<EntryReport> {
        let mut archive = JsonArchive::new();
        archive.load_from_file(path)?;
        Ok(Self::inspect(&archive))
    }

    fn inspect_value(name: String, value: &Value) -> EntryReport {
        let (kind, children) = match value {
            Value::Object(map) => (
                EntryKind::Nested,
                map.iter()
                    .map(|(key, child)| Self::inspect_value(key.clone(), child))
                    .collect(),
            ),
            Value::Array(items) => (
                EntryKind::Sequence,
                items
                    .iter()
                    .enumerate()
                    .map(|(index, child)| Self::inspect_value(index.to_string(), child))
                    .collect(),
            ),
            _ => (EntryKind::Leaf, Vec::new()),
        };
        EntryReport {
            name,
            kind,
            children,
        }
    }
}
