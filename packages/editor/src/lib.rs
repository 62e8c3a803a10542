//! # Pagecraft Editor
//!
//! Document editing engine for the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ dom: element model + tree operations        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Apply mutations with validation          │
//! │  - Breakpoint style writes + recompiles     │
//! │  - Drag-and-drop relocation                 │
//! │  - Load/save documents as JSON              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-tailwind: styles → class strings   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The tree is source of truth**: class strings are derived views
//! 2. **Validate, then commit**: structural violations are rejected before
//!    any snapshot exists, so the editor never holds a half-applied tree
//! 3. **Absorb what can't block an edit**: creation and compile failures
//!    are logged and reported, never thrown mid-edit
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_dom::ElementType;
//! use pagecraft_editor::{Document, Mutation};
//!
//! let mut doc = Document::new("page-1");
//!
//! let outcome = doc.apply(Mutation::CreateElement {
//!     kind: ElementType::Frame,
//!     parent_id: None,
//! })?;
//!
//! // Selection is the caller's concern, via the explicit id
//! select(outcome.created_id);
//!
//! doc.save()?;
//! ```

mod document;
mod errors;
mod mutations;
mod style_writer;
mod swap;

pub use document::{Document, DocumentStorage, MutationOutcome};
pub use errors::EditorError;
pub use mutations::{Applied, Mutation, MutationError};
pub use style_writer::{update_element_style, write_element_style, StyleCommit};
pub use swap::{relocate, validate_relocate, DropPosition};

// Re-export common types for convenience
pub use pagecraft_compiler_tailwind::CompileError;
pub use pagecraft_dom::{Element, ElementTree, ElementType};
