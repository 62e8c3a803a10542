//! Id-addressed operations over page forests.
//!
//! Every operation is pure: it takes a snapshot slice and returns a new
//! `Vec<Arc<Element>>`. Nodes on the edited path are shallow-cloned; all
//! other subtrees are shared with the input snapshot, so the caller can
//! swap the whole snapshot atomically.

use crate::element::{Element, ElementTree};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("target not found: {0}")]
    TargetNotFound(String),
}

/// Depth-first search for a node by id. Returns the first match.
pub fn find<'a>(tree: &'a [Arc<Element>], id: &str) -> Option<&'a Arc<Element>> {
    for node in tree {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(&node.elements, id) {
            return Some(found);
        }
    }
    None
}

/// Whether any node in the forest carries `id`.
pub fn contains(tree: &[Arc<Element>], id: &str) -> bool {
    find(tree, id).is_some()
}

/// The containing node of `id`, or `None` for root-level and absent ids.
pub fn parent_of<'a>(tree: &'a [Arc<Element>], id: &str) -> Option<&'a Arc<Element>> {
    for node in tree {
        if node.elements.iter().any(|child| child.id == id) {
            return Some(node);
        }
        if let Some(found) = parent_of(&node.elements, id) {
            return Some(found);
        }
    }
    None
}

/// Whether `ancestor_id` names a strict ancestor of `id`.
pub fn is_ancestor(tree: &[Arc<Element>], ancestor_id: &str, id: &str) -> bool {
    match find(tree, ancestor_id) {
        Some(node) => contains(&node.elements, id),
        None => false,
    }
}

/// Replace the node matching `id` with `update(node)`.
///
/// Returns the input snapshot unchanged when the id is absent.
pub fn update_by_id<F>(tree: &[Arc<Element>], id: &str, update: F) -> ElementTree
where
    F: Fn(&Element) -> Element,
{
    update_in(tree, id, &update).unwrap_or_else(|| tree.to_vec())
}

fn update_in<F>(tree: &[Arc<Element>], id: &str, update: &F) -> Option<ElementTree>
where
    F: Fn(&Element) -> Element,
{
    for (index, node) in tree.iter().enumerate() {
        if node.id == id {
            let mut next = tree.to_vec();
            next[index] = Arc::new(update(node));
            return Some(next);
        }
        if let Some(children) = update_in(&node.elements, id, update) {
            let mut next = tree.to_vec();
            let mut parent = Element::clone(node);
            parent.elements = children;
            next[index] = Arc::new(parent);
            return Some(next);
        }
    }
    None
}

/// Remove the node matching `id` from its parent's children, at whatever
/// depth it occurs. Returns the input snapshot unchanged when absent.
pub fn delete_by_id(tree: &[Arc<Element>], id: &str) -> ElementTree {
    delete_in(tree, id).unwrap_or_else(|| tree.to_vec())
}

fn delete_in(tree: &[Arc<Element>], id: &str) -> Option<ElementTree> {
    if let Some(index) = tree.iter().position(|node| node.id == id) {
        let mut next = tree.to_vec();
        next.remove(index);
        return Some(next);
    }
    for (index, node) in tree.iter().enumerate() {
        if let Some(children) = delete_in(&node.elements, id) {
            let mut next = tree.to_vec();
            let mut parent = Element::clone(node);
            parent.elements = children;
            next[index] = Arc::new(parent);
            return Some(next);
        }
    }
    None
}

/// Insert `node` as the sibling immediately following `target_id`.
///
/// The inserted node's `parent_id` is rewired to the container it lands in
/// (`None` at the root level). An absent target is an explicit error, never
/// a silent drop.
pub fn insert_after(
    tree: &[Arc<Element>],
    target_id: &str,
    node: Element,
) -> Result<ElementTree, TreeError> {
    insert_adjacent(tree, target_id, node, 1)
}

/// Insert `node` as the sibling immediately preceding `target_id`.
pub fn insert_before(
    tree: &[Arc<Element>],
    target_id: &str,
    node: Element,
) -> Result<ElementTree, TreeError> {
    insert_adjacent(tree, target_id, node, 0)
}

fn insert_adjacent(
    tree: &[Arc<Element>],
    target_id: &str,
    node: Element,
    offset: usize,
) -> Result<ElementTree, TreeError> {
    insert_in(tree, None, target_id, &node, offset)
        .ok_or_else(|| TreeError::TargetNotFound(target_id.to_string()))
}

fn insert_in(
    tree: &[Arc<Element>],
    parent_id: Option<&str>,
    target_id: &str,
    node: &Element,
    offset: usize,
) -> Option<ElementTree> {
    if let Some(index) = tree.iter().position(|sibling| sibling.id == target_id) {
        let mut inserted = node.clone();
        inserted.parent_id = parent_id.map(str::to_string);
        let mut next = tree.to_vec();
        next.insert(index + offset, Arc::new(inserted));
        return Some(next);
    }
    for (index, current) in tree.iter().enumerate() {
        if let Some(children) =
            insert_in(&current.elements, Some(current.id.as_str()), target_id, node, offset)
        {
            let mut next = tree.to_vec();
            let mut parent = Element::clone(current);
            parent.elements = children;
            next[index] = Arc::new(parent);
            return Some(next);
        }
    }
    None
}

/// Append `node` as the last child of `parent_id`.
///
/// The node's `parent_id` is rewired to the container. Whether the parent
/// kind may carry children is the caller's concern; this layer only cares
/// about tree shape.
pub fn append_child(
    tree: &[Arc<Element>],
    parent_id: &str,
    node: Element,
) -> Result<ElementTree, TreeError> {
    if !contains(tree, parent_id) {
        return Err(TreeError::TargetNotFound(parent_id.to_string()));
    }
    Ok(update_by_id(tree, parent_id, |parent| {
        let mut next = parent.clone();
        let mut child = node.clone();
        child.parent_id = Some(parent.id.clone());
        next.elements.push(Arc::new(child));
        next
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;
    use crate::styles::ResponsiveStyles;
    use std::collections::HashMap;

    fn node(kind: ElementType, id: &str) -> Element {
        Element {
            id: id.to_string(),
            kind,
            parent_id: None,
            page_id: "page-1".to_string(),
            content: None,
            src: None,
            href: None,
            styles: ResponsiveStyles::new(),
            tailwind_styles: String::new(),
            settings: HashMap::new(),
            elements: Vec::new(),
        }
    }

    fn with_children(mut parent: Element, children: Vec<Element>) -> Element {
        parent.elements = children
            .into_iter()
            .map(|mut child| {
                child.parent_id = Some(parent.id.clone());
                Arc::new(child)
            })
            .collect();
        parent
    }

    fn sample_tree() -> ElementTree {
        let frame = with_children(
            node(ElementType::Frame, "frame-1"),
            vec![
                node(ElementType::Text, "text-1"),
                with_children(
                    node(ElementType::Frame, "frame-2"),
                    vec![node(ElementType::Button, "button-1")],
                ),
            ],
        );
        vec![Arc::new(frame), Arc::new(node(ElementType::Section, "section-1"))]
    }

    #[test]
    fn test_find_at_depth() {
        let tree = sample_tree();
        assert_eq!(find(&tree, "button-1").unwrap().kind, ElementType::Button);
        assert_eq!(find(&tree, "section-1").unwrap().kind, ElementType::Section);
        assert!(find(&tree, "missing").is_none());
    }

    #[test]
    fn test_update_shares_untouched_subtrees() {
        let tree = sample_tree();
        let next = update_by_id(&tree, "button-1", |button| {
            let mut updated = button.clone();
            updated.content = Some("Buy now".to_string());
            updated
        });

        assert_eq!(
            find(&next, "button-1").unwrap().content.as_deref(),
            Some("Buy now")
        );
        // The sibling root and the untouched text child are shared, not copied
        assert!(Arc::ptr_eq(&tree[1], &next[1]));
        assert!(Arc::ptr_eq(
            &tree[0].elements[0],
            &next[0].elements[0]
        ));
        // The path to the edit is fresh
        assert!(!Arc::ptr_eq(&tree[0], &next[0]));
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let tree = sample_tree();
        let next = update_by_id(&tree, "missing", |element| element.clone());
        assert_eq!(tree.len(), next.len());
        for (before, after) in tree.iter().zip(&next) {
            assert!(Arc::ptr_eq(before, after));
        }
    }

    #[test]
    fn test_delete_at_depth() {
        let tree = sample_tree();
        let next = delete_by_id(&tree, "button-1");
        assert!(!contains(&next, "button-1"));
        assert!(find(&next, "frame-2").unwrap().elements.is_empty());

        // Deleting a missing id changes nothing
        let unchanged = delete_by_id(&next, "missing");
        assert_eq!(next, unchanged);
    }

    #[test]
    fn test_insert_after_nested_rewires_parent() {
        let tree = sample_tree();
        let next = insert_after(&tree, "text-1", node(ElementType::Image, "image-1")).unwrap();

        let frame = find(&next, "frame-1").unwrap();
        assert_eq!(frame.elements[1].id, "image-1");
        assert_eq!(frame.elements[1].parent_id.as_deref(), Some("frame-1"));
    }

    #[test]
    fn test_insert_after_root_level() {
        let tree = sample_tree();
        let next = insert_after(&tree, "frame-1", node(ElementType::Section, "section-2")).unwrap();
        assert_eq!(next[1].id, "section-2");
        assert_eq!(next[1].parent_id, None);
    }

    #[test]
    fn test_insert_after_missing_target_errors() {
        let tree = sample_tree();
        let result = insert_after(&tree, "missing", node(ElementType::Text, "text-9"));
        assert_eq!(result, Err(TreeError::TargetNotFound("missing".to_string())));
    }

    #[test]
    fn test_insert_delete_round_trip() {
        let tree = sample_tree();
        let inserted = insert_after(&tree, "text-1", node(ElementType::Image, "image-1")).unwrap();
        assert_eq!(find(&inserted, "image-1").unwrap().id, "image-1");

        let restored = delete_by_id(&inserted, "image-1");
        assert_eq!(tree, restored);
    }

    #[test]
    fn test_insert_before() {
        let tree = sample_tree();
        let next = insert_before(&tree, "text-1", node(ElementType::Image, "image-1")).unwrap();
        let frame = find(&next, "frame-1").unwrap();
        assert_eq!(frame.elements[0].id, "image-1");
        assert_eq!(frame.elements[1].id, "text-1");
    }

    #[test]
    fn test_append_child() {
        let tree = sample_tree();
        let next = append_child(&tree, "frame-2", node(ElementType::Text, "text-2")).unwrap();

        let frame = find(&next, "frame-2").unwrap();
        assert_eq!(frame.elements.last().unwrap().id, "text-2");
        assert_eq!(
            frame.elements.last().unwrap().parent_id.as_deref(),
            Some("frame-2")
        );

        let missing = append_child(&tree, "missing", node(ElementType::Text, "text-3"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_ancestry() {
        let tree = sample_tree();
        assert!(is_ancestor(&tree, "frame-1", "button-1"));
        assert!(is_ancestor(&tree, "frame-2", "button-1"));
        assert!(!is_ancestor(&tree, "button-1", "frame-1"));
        assert!(!is_ancestor(&tree, "section-1", "button-1"));

        assert_eq!(parent_of(&tree, "button-1").unwrap().id, "frame-2");
        assert_eq!(parent_of(&tree, "frame-1"), None);
    }
}
