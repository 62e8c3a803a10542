//! # Tree Mutations
//!
//! High-level semantic operations on page documents.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation represents one user-visible edit
//! 2. **Validated**: structural constraints are checked before any snapshot
//!    is built, so a rejected mutation is a true no-op
//! 3. **Snapshot-producing**: applying a mutation returns a new tree; the
//!    document swaps it in atomically
//!
//! ## Mutation Semantics
//!
//! ### CreateElement / CreateFromTemplate
//! - Fresh ids from the document's generator, never reused
//! - Attach to a container parent or at the root level
//!
//! ### SetBreakpointStyles
//! - Full replace of one breakpoint layer, then recompile + merge
//! - A compile failure is absorbed: styles commit, classes stay put
//!
//! ### Relocate
//! - Fails if it would make a container its own descendant
//! - The dragged node is always referenced by exactly one parent

use crate::style_writer::write_element_style;
use crate::swap::{self, DropPosition};
use pagecraft_common::IdGenerator;
use pagecraft_compiler_tailwind::compile_utility_classes;
use pagecraft_dom::{
    append_child, contains, create, create_from_template, delete_by_id, find, insert_after,
    update_by_id, Breakpoint, CreateError, Element, ElementTemplate, ElementTree, ElementType,
    StyleMap, TreeError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Create a fresh element of `kind` and attach it
    CreateElement {
        kind: ElementType,
        parent_id: Option<String>,
    },

    /// Clone a template tree with fresh ids and attach it
    CreateFromTemplate {
        template: ElementTemplate,
        parent_id: Option<String>,
    },

    /// Insert a prepared element right after a sibling
    InsertAfter {
        target_id: String,
        element: Element,
    },

    /// Replace the text content of an element
    SetContent {
        element_id: String,
        content: String,
    },

    /// Set one entry of an element's settings payload
    SetSetting {
        element_id: String,
        key: String,
        value: serde_json::Value,
    },

    /// Point a media element at a new source
    SetElementSource {
        element_id: String,
        src: String,
    },

    /// Replace one breakpoint's declarations and recompile classes
    SetBreakpointStyles {
        element_id: String,
        breakpoint: Breakpoint,
        declarations: StyleMap,
    },

    /// Remove an element and its subtree
    RemoveElement {
        element_id: String,
    },

    /// Move an element next to another one
    Relocate {
        dragged_id: String,
        hovered_id: String,
        position: DropPosition,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("parent not found: {0}")]
    ParentNotFound(String),

    #[error("insert target not found: {0}")]
    TargetNotFound(String),

    #[error("id already present in tree: {0}")]
    DuplicateId(String),

    #[error("element kind '{0}' cannot contain children")]
    NotAContainer(String),

    #[error("relocation would make a container its own descendant")]
    CycleDetected,

    #[error("element cannot be relocated onto itself")]
    SelfTarget,

    #[error(transparent)]
    Create(#[from] CreateError),
}

impl From<TreeError> for MutationError {
    fn from(error: TreeError) -> Self {
        match error {
            TreeError::TargetNotFound(id) => MutationError::TargetNotFound(id),
        }
    }
}

/// Result of applying a mutation to a snapshot.
#[derive(Debug, Clone)]
pub struct Applied {
    /// The next tree snapshot
    pub tree: ElementTree,

    /// Id of a freshly created element, for the caller's selection service
    pub created_id: Option<String>,
}

impl Mutation {
    /// Apply the mutation to a snapshot with validation.
    pub fn apply(
        &self,
        tree: &[Arc<Element>],
        page_id: &str,
        ids: &mut IdGenerator,
    ) -> Result<Applied, MutationError> {
        self.validate(tree)?;

        match self {
            Mutation::CreateElement { kind, parent_id } => {
                let mut element = create(*kind, page_id, parent_id.as_deref(), ids)?;
                element.tailwind_styles = compile_defaults(&element);
                let created_id = element.id.clone();
                let next = attach(tree, parent_id.as_deref(), element)?;
                Ok(Applied {
                    tree: next,
                    created_id: Some(created_id),
                })
            }

            Mutation::CreateFromTemplate {
                template,
                parent_id,
            } => {
                let element = create_from_template(template, page_id, ids)?;
                let created_id = element.id.clone();
                let next = attach(tree, parent_id.as_deref(), element)?;
                Ok(Applied {
                    tree: next,
                    created_id: Some(created_id),
                })
            }

            Mutation::InsertAfter { target_id, element } => {
                let next = insert_after(tree, target_id, element.clone())?;
                Ok(Applied {
                    tree: next,
                    created_id: None,
                })
            }

            Mutation::SetContent {
                element_id,
                content,
            } => Ok(Applied {
                tree: update_by_id(tree, element_id, |element| {
                    let mut next = element.clone();
                    next.content = Some(content.clone());
                    next
                }),
                created_id: None,
            }),

            Mutation::SetSetting {
                element_id,
                key,
                value,
            } => Ok(Applied {
                tree: update_by_id(tree, element_id, |element| {
                    let mut next = element.clone();
                    next.settings.insert(key.clone(), value.clone());
                    next
                }),
                created_id: None,
            }),

            Mutation::SetElementSource { element_id, src } => Ok(Applied {
                tree: update_by_id(tree, element_id, |element| {
                    let mut next = element.clone();
                    next.src = Some(src.clone());
                    next
                }),
                created_id: None,
            }),

            Mutation::SetBreakpointStyles {
                element_id,
                breakpoint,
                declarations,
            } => {
                let element = find(tree, element_id)
                    .ok_or_else(|| MutationError::NodeNotFound(element_id.clone()))?;
                // A failed compile is absorbed: the writer already logged it
                // and held the previous classes back
                let (written, _compile_error) =
                    write_element_style(element, declarations.clone(), *breakpoint);
                Ok(Applied {
                    tree: update_by_id(tree, element_id, |_| written.clone()),
                    created_id: None,
                })
            }

            Mutation::RemoveElement { element_id } => Ok(Applied {
                tree: delete_by_id(tree, element_id),
                created_id: None,
            }),

            Mutation::Relocate {
                dragged_id,
                hovered_id,
                position,
            } => Ok(Applied {
                tree: swap::relocate(tree, dragged_id, hovered_id, *position)?,
                created_id: None,
            }),
        }
    }

    /// Validate without applying.
    pub fn validate(&self, tree: &[Arc<Element>]) -> Result<(), MutationError> {
        match self {
            Mutation::CreateElement { parent_id, .. }
            | Mutation::CreateFromTemplate { parent_id, .. } => match parent_id {
                Some(parent_id) => validate_container(tree, parent_id),
                None => Ok(()),
            },

            Mutation::InsertAfter { target_id, element } => {
                if !contains(tree, target_id) {
                    return Err(MutationError::TargetNotFound(target_id.clone()));
                }
                if contains(tree, &element.id) {
                    return Err(MutationError::DuplicateId(element.id.clone()));
                }
                Ok(())
            }

            Mutation::SetContent { element_id, .. }
            | Mutation::SetSetting { element_id, .. }
            | Mutation::SetElementSource { element_id, .. }
            | Mutation::SetBreakpointStyles { element_id, .. }
            | Mutation::RemoveElement { element_id } => {
                if contains(tree, element_id) {
                    Ok(())
                } else {
                    Err(MutationError::NodeNotFound(element_id.clone()))
                }
            }

            Mutation::Relocate {
                dragged_id,
                hovered_id,
                ..
            } => swap::validate_relocate(tree, dragged_id, hovered_id),
        }
    }
}

fn validate_container(tree: &[Arc<Element>], parent_id: &str) -> Result<(), MutationError> {
    let parent =
        find(tree, parent_id).ok_or_else(|| MutationError::ParentNotFound(parent_id.to_string()))?;
    if parent.kind.is_container() {
        Ok(())
    } else {
        Err(MutationError::NotAContainer(parent.kind.name().to_string()))
    }
}

fn attach(
    tree: &[Arc<Element>],
    parent_id: Option<&str>,
    element: Element,
) -> Result<ElementTree, MutationError> {
    match parent_id {
        Some(parent_id) => Ok(append_child(tree, parent_id, element)?),
        None => {
            let mut next = tree.to_vec();
            next.push(Arc::new(element));
            Ok(next)
        }
    }
}

fn compile_defaults(element: &Element) -> String {
    match compile_utility_classes(&element.styles) {
        Ok(compiled) => compiled,
        Err(error) => {
            warn!(element_id = %element.id, %error, "default styles failed to compile");
            String::new()
        }
    }
}
