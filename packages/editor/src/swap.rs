//! Drag-and-drop relocation.
//!
//! Moving a node between containers has to hold two invariants at once: a
//! container may never become its own descendant, and a node is referenced
//! by exactly one parent at all times. Validation runs before any snapshot
//! is built, so a rejected relocation leaves the caller's tree untouched.

use crate::mutations::MutationError;
use pagecraft_dom::{contains, delete_by_id, find, insert_after, insert_before, is_ancestor};
use pagecraft_dom::{Element, ElementTree};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Which side of the hovered node the dragged node lands on. Picking the
/// side is the drop heuristic's job, not ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    After,
}

/// Check a relocation without building a snapshot.
pub fn validate_relocate(
    tree: &[Arc<Element>],
    dragged_id: &str,
    hovered_id: &str,
) -> Result<(), MutationError> {
    if dragged_id == hovered_id {
        return Err(MutationError::SelfTarget);
    }
    if !contains(tree, dragged_id) {
        return Err(MutationError::NodeNotFound(dragged_id.to_string()));
    }
    if !contains(tree, hovered_id) {
        return Err(MutationError::NodeNotFound(hovered_id.to_string()));
    }
    if is_ancestor(tree, dragged_id, hovered_id) {
        return Err(MutationError::CycleDetected);
    }
    Ok(())
}

/// Move `dragged_id` next to `hovered_id`, returning a new snapshot.
pub fn relocate(
    tree: &[Arc<Element>],
    dragged_id: &str,
    hovered_id: &str,
    position: DropPosition,
) -> Result<ElementTree, MutationError> {
    validate_relocate(tree, dragged_id, hovered_id)?;

    let dragged = match find(tree, dragged_id) {
        Some(node) => Element::clone(node),
        None => return Err(MutationError::NodeNotFound(dragged_id.to_string())),
    };
    // The ancestor check in validation guarantees the hovered node survives
    let without_dragged = delete_by_id(tree, dragged_id);

    let next = match position {
        DropPosition::Before => insert_before(&without_dragged, hovered_id, dragged),
        DropPosition::After => insert_after(&without_dragged, hovered_id, dragged),
    }?;

    debug!(dragged_id, hovered_id, ?position, "relocated element");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_dom::{create, parent_of, ElementType};
    use pagecraft_common::IdGenerator;

    fn sample() -> (ElementTree, String, String, String) {
        let mut ids = IdGenerator::new("page-1");
        let mut frame_a = create(ElementType::Frame, "page-1", None, &mut ids).unwrap();
        let mut frame_b = create(ElementType::Frame, "page-1", None, &mut ids).unwrap();
        let text =
            create(ElementType::Text, "page-1", Some(frame_a.id.as_str()), &mut ids).unwrap();
        let button =
            create(ElementType::Button, "page-1", Some(frame_b.id.as_str()), &mut ids).unwrap();

        let text_id = text.id.clone();
        let button_id = button.id.clone();
        frame_a.elements = vec![Arc::new(text)];
        frame_b.elements = vec![Arc::new(button)];
        let frame_a_id = frame_a.id.clone();

        (
            vec![Arc::new(frame_a), Arc::new(frame_b)],
            frame_a_id,
            text_id,
            button_id,
        )
    }

    #[test]
    fn test_relocate_across_containers() {
        let (tree, _, text_id, button_id) = sample();
        let next = relocate(&tree, &text_id, &button_id, DropPosition::After).unwrap();

        // The dragged node now lives next to the hovered node
        let new_parent = parent_of(&next, &text_id).unwrap();
        assert_eq!(new_parent.elements.len(), 2);
        assert_eq!(new_parent.elements[0].id, button_id);
        assert_eq!(new_parent.elements[1].id, text_id);
        assert_eq!(
            find(&next, &text_id).unwrap().parent_id.as_deref(),
            Some(new_parent.id.as_str())
        );

        // And is gone from its old parent
        assert_eq!(next[0].elements.len(), 0);
    }

    #[test]
    fn test_relocate_before() {
        let (tree, _, text_id, button_id) = sample();
        let next = relocate(&tree, &text_id, &button_id, DropPosition::Before).unwrap();
        let new_parent = parent_of(&next, &text_id).unwrap();
        assert_eq!(new_parent.elements[0].id, text_id);
        assert_eq!(new_parent.elements[1].id, button_id);
    }

    #[test]
    fn test_relocate_rejects_cycle() {
        let (tree, frame_a_id, text_id, _) = sample();
        let result = relocate(&tree, &frame_a_id, &text_id, DropPosition::After);
        assert_eq!(result.unwrap_err(), MutationError::CycleDetected);
    }

    #[test]
    fn test_relocate_rejects_self_and_missing() {
        let (tree, frame_a_id, _, _) = sample();
        assert_eq!(
            relocate(&tree, &frame_a_id, &frame_a_id, DropPosition::After).unwrap_err(),
            MutationError::SelfTarget
        );
        assert!(matches!(
            relocate(&tree, "missing", &frame_a_id, DropPosition::After).unwrap_err(),
            MutationError::NodeNotFound(_)
        ));
    }
}
