//! # Document Handle
//!
//! Core document abstraction for page editing.
//!
//! A Document owns the current tree snapshot for one page. Documents can
//! be:
//! - **Memory-backed**: temporary, for testing or in-memory operations
//! - **File-backed**: single-user editing with JSON persistence
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Mutate → Mutate → Save
//!   ↓      ↓        ↓        ↓
//! JSON  snapshot  snapshot  JSON
//! ```
//!
//! Every applied mutation produces a whole new snapshot; the document swaps
//! it in atomically, so a partially-updated tree is never observable.

use crate::{Applied, EditorError, Mutation};
use pagecraft_common::{page_seed, IdGenerator};
use pagecraft_dom::{Element, ElementTree};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Editable page document
#[derive(Debug)]
pub struct Document {
    /// Page this document edits
    pub page_id: String,

    /// Current version number (increments on each applied mutation)
    pub version: u64,

    /// Id generator for elements created through this document
    ids: IdGenerator,

    /// Backing storage strategy
    storage: DocumentStorage,
}

/// Storage backend for document
#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only (for testing, temp docs)
    Memory { tree: ElementTree },

    /// File-backed (single-user editing)
    File {
        path: PathBuf,
        tree: ElementTree,
        dirty: bool,
    },
}

impl Document {
    /// Create an empty memory-backed document.
    pub fn new(page_id: impl Into<String>) -> Self {
        let page_id = page_id.into();
        Self {
            ids: IdGenerator::new(&page_id),
            page_id,
            version: 0,
            storage: DocumentStorage::Memory { tree: Vec::new() },
        }
    }

    /// Wrap an existing tree (memory-backed).
    pub fn from_tree(page_id: impl Into<String>, tree: ElementTree) -> Self {
        let page_id = page_id.into();
        let mut ids = IdGenerator::new(&page_id);
        ids.resume_after(max_counter(&tree, ids.seed()));
        Self {
            page_id,
            version: 0,
            ids,
            storage: DocumentStorage::Memory { tree },
        }
    }

    /// Load a document from a JSON file (file-backed).
    ///
    /// The page id is read off the tree's first root element.
    pub fn load(path: PathBuf) -> Result<Self, EditorError> {
        let source = std::fs::read_to_string(&path)?;
        let tree: ElementTree = serde_json::from_str(&source)?;
        let page_id = match tree.first() {
            Some(root) => root.page_id.clone(),
            None => return Err(EditorError::EmptyDocument),
        };

        let mut ids = IdGenerator::from_seed(page_seed(&page_id));
        ids.resume_after(max_counter(&tree, ids.seed()));

        debug!(%page_id, roots = tree.len(), "loaded document");
        Ok(Self {
            page_id,
            version: 0,
            ids,
            storage: DocumentStorage::File {
                path,
                tree,
                dirty: false,
            },
        })
    }

    /// Current tree snapshot.
    pub fn tree(&self) -> &[Arc<Element>] {
        match &self.storage {
            DocumentStorage::Memory { tree } => tree,
            DocumentStorage::File { tree, .. } => tree,
        }
    }

    /// Apply a mutation and swap in the resulting snapshot.
    ///
    /// A failed mutation leaves both the tree and the version untouched.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationOutcome, EditorError> {
        // Field-level borrows: the tree is read while the id generator is
        // handed out mutably
        let tree = match &self.storage {
            DocumentStorage::Memory { tree } => tree,
            DocumentStorage::File { tree, .. } => tree,
        };
        let applied: Applied = mutation.apply(tree, &self.page_id, &mut self.ids)?;

        match &mut self.storage {
            DocumentStorage::Memory { tree } => *tree = applied.tree,
            DocumentStorage::File { tree, dirty, .. } => {
                *tree = applied.tree;
                *dirty = true;
            }
        }
        self.version += 1;

        Ok(MutationOutcome {
            version: self.version,
            created_id: applied.created_id,
        })
    }

    /// Check if document has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            DocumentStorage::Memory { .. } => false,
        }
    }

    /// Save the tree as JSON (if file-backed).
    pub fn save(&mut self) -> Result<(), EditorError> {
        match &mut self.storage {
            DocumentStorage::File { path, tree, dirty } => {
                let json = serde_json::to_string_pretty(tree)?;
                std::fs::write(path, json)?;
                *dirty = false;
                Ok(())
            }
            DocumentStorage::Memory { .. } => Err(EditorError::NotFileBacked),
        }
    }
}

/// Result of applying a mutation through a document.
///
/// `created_id` makes the freshly created element explicit so a selection
/// service at the caller boundary can pick it up; the core keeps no
/// selection state.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub version: u64,
    pub created_id: Option<String>,
}

/// Highest sequential counter used by ids minted from `seed`.
fn max_counter(tree: &[Arc<Element>], seed: &str) -> u32 {
    let mut highest = 0;
    for node in tree {
        if let Some(counter) = node
            .id
            .strip_prefix(seed)
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|rest| rest.parse::<u32>().ok())
        {
            highest = highest.max(counter);
        }
        highest = highest.max(max_counter(&node.elements, seed));
    }
    highest
}
