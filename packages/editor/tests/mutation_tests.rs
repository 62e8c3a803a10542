//! Comprehensive mutation tests

use pagecraft_dom::{find, resolve_breakpoint, Breakpoint, Element, ElementTemplate, ElementType, StyleMap, StyleValue};
use pagecraft_editor::{Document, DropPosition, Mutation, MutationError};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

fn declarations(entries: &[(&str, StyleValue)]) -> StyleMap {
    entries
        .iter()
        .map(|(property, value)| (property.to_string(), value.clone()))
        .collect()
}

fn collect_ids(tree: &[Arc<Element>], ids: &mut Vec<String>) {
    for node in tree {
        ids.push(node.id.clone());
        collect_ids(&node.elements, ids);
    }
}

/// Every id unique, every child's parent_id naming its actual container.
fn assert_tree_invariants(tree: &[Arc<Element>]) {
    let mut ids = Vec::new();
    collect_ids(tree, &mut ids);
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len(), "duplicate id in tree");

    fn check_links(tree: &[Arc<Element>]) {
        for node in tree {
            for child in &node.elements {
                assert_eq!(
                    child.parent_id.as_deref(),
                    Some(node.id.as_str()),
                    "parent link mismatch for {}",
                    child.id
                );
                assert!(node.kind.is_container(), "non-container has children");
            }
            check_links(&node.elements);
        }
    }
    check_links(tree);
}

#[test]
fn test_create_element_into_frame() {
    let mut doc = Document::new("page-1");
    let frame_id = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Frame,
            parent_id: None,
        })
        .unwrap()
        .created_id
        .unwrap();

    let text_id = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Text,
            parent_id: Some(frame_id.clone()),
        })
        .unwrap()
        .created_id
        .unwrap();

    let frame = find(doc.tree(), &frame_id).unwrap();
    assert_eq!(frame.elements.len(), 1);
    assert_eq!(frame.elements[0].id, text_id);
    assert_tree_invariants(doc.tree());
}

#[test]
fn test_created_elements_carry_compiled_defaults() {
    let mut doc = Document::new("page-1");
    let button_id = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Button,
            parent_id: None,
        })
        .unwrap()
        .created_id
        .unwrap();

    let button = find(doc.tree(), &button_id).unwrap();
    assert!(button.tailwind_styles.contains("bg-[#3366ff]"));
    assert!(button.tailwind_styles.contains("inline-flex"));
}

#[test]
fn test_end_to_end_style_write() {
    // Frame → Text, then a default-breakpoint style write on the text
    let mut doc = Document::new("page-1");
    let frame_id = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Frame,
            parent_id: None,
        })
        .unwrap()
        .created_id
        .unwrap();
    let text_id = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Text,
            parent_id: Some(frame_id),
        })
        .unwrap()
        .created_id
        .unwrap();

    doc.apply(Mutation::SetBreakpointStyles {
        element_id: text_id.clone(),
        breakpoint: Breakpoint::Default,
        declarations: declarations(&[("color", "#111111".into()), ("fontSize", 24.into())]),
    })
    .unwrap();

    let text = find(doc.tree(), &text_id).unwrap();
    let layer = resolve_breakpoint(&text.styles, Breakpoint::Default);
    assert_eq!(layer.get("color"), Some(&StyleValue::from("#111111")));
    assert_eq!(layer.get("fontSize"), Some(&StyleValue::from(24)));
    assert!(text.tailwind_styles.contains("text-[#111111]"));
    assert!(text.tailwind_styles.contains("text-[24px]"));
}

#[test]
fn test_style_write_absorbs_compile_failure() {
    let mut doc = Document::new("page-1");
    let text_id = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Text,
            parent_id: None,
        })
        .unwrap()
        .created_id
        .unwrap();
    let before = find(doc.tree(), &text_id).unwrap().tailwind_styles.clone();

    // A malformed value: the edit still lands, classes stay put
    doc.apply(Mutation::SetBreakpointStyles {
        element_id: text_id.clone(),
        breakpoint: Breakpoint::Default,
        declarations: declarations(&[("fontSize", StyleValue::Other(json!(null)))]),
    })
    .unwrap();

    let text = find(doc.tree(), &text_id).unwrap();
    assert!(resolve_breakpoint(&text.styles, Breakpoint::Default).contains_key("fontSize"));
    assert_eq!(text.tailwind_styles, before);
}

#[test]
fn test_template_clone_via_mutation() {
    let leaf = |content: &str| ElementTemplate {
        kind: ElementType::Text,
        content: Some(content.to_string()),
        src: None,
        href: None,
        styles: Default::default(),
        tailwind_styles: String::new(),
        settings: Default::default(),
        elements: None,
    };
    // Root + 3 nested children
    let template = ElementTemplate {
        kind: ElementType::Frame,
        content: None,
        src: None,
        href: None,
        styles: Default::default(),
        tailwind_styles: String::new(),
        settings: Default::default(),
        elements: Some(vec![
            leaf("One"),
            ElementTemplate {
                kind: ElementType::Frame,
                content: None,
                src: None,
                href: None,
                styles: Default::default(),
                tailwind_styles: String::new(),
                settings: Default::default(),
                elements: Some(vec![leaf("Two")]),
            },
        ]),
    };

    let mut doc = Document::new("page-1");
    let root_id = doc
        .apply(Mutation::CreateFromTemplate {
            template,
            parent_id: None,
        })
        .unwrap()
        .created_id
        .unwrap();

    let mut ids = Vec::new();
    collect_ids(doc.tree(), &mut ids);
    assert_eq!(ids.len(), 4);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 4);
    assert_eq!(doc.tree()[0].id, root_id);
    assert_tree_invariants(doc.tree());
}

#[test]
fn test_set_content_and_settings() {
    let mut doc = Document::new("page-1");
    let button_id = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Button,
            parent_id: None,
        })
        .unwrap()
        .created_id
        .unwrap();

    doc.apply(Mutation::SetContent {
        element_id: button_id.clone(),
        content: "Buy now".to_string(),
    })
    .unwrap();
    doc.apply(Mutation::SetSetting {
        element_id: button_id.clone(),
        key: "action".to_string(),
        value: json!("submit"),
    })
    .unwrap();

    let button = find(doc.tree(), &button_id).unwrap();
    assert_eq!(button.content.as_deref(), Some("Buy now"));
    assert_eq!(button.settings.get("action"), Some(&json!("submit")));
}

#[test]
fn test_remove_element_prunes_subtree() {
    let mut doc = Document::new("page-1");
    let frame_id = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Frame,
            parent_id: None,
        })
        .unwrap()
        .created_id
        .unwrap();
    let text_id = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Text,
            parent_id: Some(frame_id.clone()),
        })
        .unwrap()
        .created_id
        .unwrap();

    doc.apply(Mutation::RemoveElement {
        element_id: frame_id.clone(),
    })
    .unwrap();

    assert!(find(doc.tree(), &frame_id).is_none());
    assert!(find(doc.tree(), &text_id).is_none());
}

#[test]
fn test_insert_after_rejects_duplicate_ids() {
    let mut doc = Document::new("page-1");
    let frame_id = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Frame,
            parent_id: None,
        })
        .unwrap()
        .created_id
        .unwrap();

    let existing = Element::clone(&doc.tree()[0]);
    let result = doc.apply(Mutation::InsertAfter {
        target_id: frame_id,
        element: existing,
    });
    assert!(matches!(
        result.unwrap_err(),
        pagecraft_editor::EditorError::Mutation(MutationError::DuplicateId(_))
    ));
}

#[test]
fn test_relocate_preserves_invariants() {
    let mut doc = Document::new("page-1");
    let frame_a = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Frame,
            parent_id: None,
        })
        .unwrap()
        .created_id
        .unwrap();
    let frame_b = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Frame,
            parent_id: None,
        })
        .unwrap()
        .created_id
        .unwrap();
    let text_id = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Text,
            parent_id: Some(frame_a.clone()),
        })
        .unwrap()
        .created_id
        .unwrap();
    let button_id = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Button,
            parent_id: Some(frame_b.clone()),
        })
        .unwrap()
        .created_id
        .unwrap();

    doc.apply(Mutation::Relocate {
        dragged_id: text_id.clone(),
        hovered_id: button_id,
        position: DropPosition::After,
    })
    .unwrap();

    assert_tree_invariants(doc.tree());
    let new_parent = pagecraft_dom::parent_of(doc.tree(), &text_id).unwrap();
    assert_eq!(new_parent.id, frame_b);
    assert!(find(doc.tree(), &frame_a).unwrap().elements.is_empty());
}

#[test]
fn test_relocate_cycle_is_rejected_before_commit() {
    let mut doc = Document::new("page-1");
    let outer = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Frame,
            parent_id: None,
        })
        .unwrap()
        .created_id
        .unwrap();
    let inner = doc
        .apply(Mutation::CreateElement {
            kind: ElementType::Frame,
            parent_id: Some(outer.clone()),
        })
        .unwrap()
        .created_id
        .unwrap();
    let version_before = doc.version;

    let result = doc.apply(Mutation::Relocate {
        dragged_id: outer,
        hovered_id: inner,
        position: DropPosition::Before,
    });

    assert!(matches!(
        result.unwrap_err(),
        pagecraft_editor::EditorError::Mutation(MutationError::CycleDetected)
    ));
    assert_eq!(doc.version, version_before);
    assert_tree_invariants(doc.tree());
}
