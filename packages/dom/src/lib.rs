//! # Pagecraft DOM
//!
//! The page-builder document model: a forest of typed, id-addressed
//! elements carrying per-breakpoint style overrides.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ element: Element / ElementType / templates  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ tree: pure id-addressed operations          │
//! │  - find / update / delete / insert          │
//! │  - snapshots with structural sharing        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ factory: kind-keyed builders + templates    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots, not edits in place**: every tree operation returns a new
//!    `Vec<Arc<Element>>`; untouched subtrees are shared with the input.
//! 2. **Ids are forever**: ids come from a page-seeded sequential generator
//!    and are never reused, even across deletions.
//! 3. **The tree stays consistent**: `parent_id` always names the actual
//!    container, and only container kinds carry children.

mod element;
mod factory;
mod styles;
pub mod tree;

pub use element::{Element, ElementTemplate, ElementTree, ElementType};
pub use factory::{create, create_from_template, create_named, CreateError};
pub use styles::{
    resolve_breakpoint, resolve_flattened, Breakpoint, ResponsiveStyles, StyleMap, StyleValue,
};
pub use tree::{
    append_child, contains, delete_by_id, find, insert_after, insert_before, is_ancestor,
    parent_of, update_by_id, TreeError,
};
