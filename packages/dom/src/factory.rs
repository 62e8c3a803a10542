//! Element construction.
//!
//! Every element kind has a builder function in a fixed dispatch table
//! keyed by [`ElementType`]. Builders supply the default-breakpoint
//! declarations, the settings payload, and starter content for the kind.
//! Creation failures are absorbed here: callers get an error value and a
//! logged diagnostic, never a panic.

use crate::element::{Element, ElementTemplate, ElementType};
use crate::styles::{Breakpoint, ResponsiveStyles, StyleMap, StyleValue};
use pagecraft_common::IdGenerator;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CreateError {
    #[error("page id is empty")]
    MissingPageId,

    #[error("unknown element kind: {0}")]
    UnknownKind(String),
}

struct BuildContext<'a> {
    id: String,
    page_id: &'a str,
    parent_id: Option<&'a str>,
}

type Builder = fn(&BuildContext) -> Element;

fn builder_for(kind: ElementType) -> Builder {
    match kind {
        ElementType::Text => build_text,
        ElementType::Frame => build_frame,
        ElementType::Button => build_button,
        ElementType::Input => build_input,
        ElementType::Image => build_image,
        ElementType::List => build_list,
        ElementType::Select => build_select,
        ElementType::Form => build_form,
        ElementType::Section => build_section,
        ElementType::Carousel => build_carousel,
        ElementType::CmsList => build_cms_list,
        ElementType::CmsItem => build_cms_item,
        ElementType::CmsGrid => build_cms_grid,
    }
}

/// Build a fresh element of `kind` with the kind's defaults.
pub fn create(
    kind: ElementType,
    page_id: &str,
    parent_id: Option<&str>,
    ids: &mut IdGenerator,
) -> Result<Element, CreateError> {
    if page_id.is_empty() {
        warn!(kind = kind.name(), "element creation rejected: empty page id");
        return Err(CreateError::MissingPageId);
    }
    let context = BuildContext {
        id: ids.next_id(),
        page_id,
        parent_id,
    };
    Ok(builder_for(kind)(&context))
}

/// String-boundary variant for callers that carry the kind as text.
pub fn create_named(
    kind: &str,
    page_id: &str,
    parent_id: Option<&str>,
    ids: &mut IdGenerator,
) -> Result<Element, CreateError> {
    match ElementType::from_name(kind) {
        Some(resolved) => create(resolved, page_id, parent_id, ids),
        None => {
            warn!(kind, "element creation rejected: no builder registered");
            Err(CreateError::UnknownKind(kind.to_string()))
        }
    }
}

/// Clone a template tree with fresh ids.
///
/// Each node gets a fresh id and a `parent_id` pointing at its new parent;
/// styles, classes, content, sources and settings are copied verbatim.
pub fn create_from_template(
    template: &ElementTemplate,
    page_id: &str,
    ids: &mut IdGenerator,
) -> Result<Element, CreateError> {
    if page_id.is_empty() {
        warn!(
            kind = template.kind.name(),
            "template instantiation rejected: empty page id"
        );
        return Err(CreateError::MissingPageId);
    }
    Ok(clone_template(template, page_id, None, ids))
}

fn clone_template(
    template: &ElementTemplate,
    page_id: &str,
    parent_id: Option<&str>,
    ids: &mut IdGenerator,
) -> Element {
    let id = ids.next_id();
    let mut element = Element {
        id: id.clone(),
        kind: template.kind,
        parent_id: parent_id.map(str::to_string),
        page_id: page_id.to_string(),
        content: template.content.clone(),
        src: template.src.clone(),
        href: template.href.clone(),
        styles: template.styles.clone(),
        tailwind_styles: template.tailwind_styles.clone(),
        settings: template.settings.clone(),
        elements: Vec::new(),
    };
    if let Some(children) = &template.elements {
        element.elements = children
            .iter()
            .map(|child| Arc::new(clone_template(child, page_id, Some(id.as_str()), ids)))
            .collect();
    }
    element
}

fn base(context: &BuildContext, kind: ElementType) -> Element {
    Element {
        id: context.id.clone(),
        kind,
        parent_id: context.parent_id.map(str::to_string),
        page_id: context.page_id.to_string(),
        content: None,
        src: None,
        href: None,
        styles: ResponsiveStyles::new(),
        tailwind_styles: String::new(),
        settings: HashMap::new(),
        elements: Vec::new(),
    }
}

fn default_layer(entries: &[(&str, StyleValue)]) -> ResponsiveStyles {
    let layer: StyleMap = entries
        .iter()
        .map(|(property, value)| (property.to_string(), value.clone()))
        .collect();
    let mut styles = ResponsiveStyles::new();
    styles.set_layer(Breakpoint::Default, layer);
    styles
}

fn settings_object(value: Value) -> HashMap<String, Value> {
    match value {
        Value::Object(entries) => entries.into_iter().collect(),
        _ => HashMap::new(),
    }
}

fn build_text(context: &BuildContext) -> Element {
    let mut element = base(context, ElementType::Text);
    element.content = Some("New text".to_string());
    element.styles = default_layer(&[("fontSize", 16.into()), ("color", "#111827".into())]);
    element
}

fn build_frame(context: &BuildContext) -> Element {
    let mut element = base(context, ElementType::Frame);
    element.styles = default_layer(&[
        ("display", "flex".into()),
        ("flexDirection", "column".into()),
        ("width", "100%".into()),
        ("padding", 16.into()),
        ("gap", 8.into()),
    ]);
    element
}

fn build_button(context: &BuildContext) -> Element {
    let mut element = base(context, ElementType::Button);
    element.content = Some("Click me".to_string());
    element.settings = settings_object(json!({ "action": "none" }));
    element.styles = default_layer(&[
        ("display", "inline-flex".into()),
        ("justifyContent", "center".into()),
        ("alignItems", "center".into()),
        ("paddingTop", 8.into()),
        ("paddingBottom", 8.into()),
        ("paddingLeft", 16.into()),
        ("paddingRight", 16.into()),
        ("backgroundColor", "#3366ff".into()),
        ("color", "#ffffff".into()),
        ("borderRadius", 6.into()),
    ]);
    element
}

fn build_input(context: &BuildContext) -> Element {
    let mut element = base(context, ElementType::Input);
    element.settings = settings_object(json!({
        "placeholder": "Enter text",
        "inputType": "text",
    }));
    element.styles = default_layer(&[
        ("width", "100%".into()),
        ("paddingTop", 8.into()),
        ("paddingBottom", 8.into()),
        ("paddingLeft", 12.into()),
        ("paddingRight", 12.into()),
        ("borderWidth", 1.into()),
        ("borderColor", "#d1d5db".into()),
        ("borderRadius", 4.into()),
    ]);
    element
}

fn build_image(context: &BuildContext) -> Element {
    let mut element = base(context, ElementType::Image);
    element.src = Some("https://placehold.co/600x400".to_string());
    element.settings = settings_object(json!({ "alt": "" }));
    element.styles = default_layer(&[("width", "100%".into()), ("height", "auto".into())]);
    element
}

fn build_list(context: &BuildContext) -> Element {
    let mut element = base(context, ElementType::List);
    element.settings = settings_object(json!({ "ordered": false }));
    element.styles = default_layer(&[
        ("display", "flex".into()),
        ("flexDirection", "column".into()),
        ("gap", 4.into()),
    ]);
    element
}

fn build_select(context: &BuildContext) -> Element {
    let mut element = base(context, ElementType::Select);
    element.settings = settings_object(json!({
        "placeholder": "Select",
        "options": ["Option 1", "Option 2"],
    }));
    element.styles = default_layer(&[
        ("width", "100%".into()),
        ("paddingTop", 8.into()),
        ("paddingBottom", 8.into()),
        ("paddingLeft", 12.into()),
        ("paddingRight", 12.into()),
        ("borderWidth", 1.into()),
        ("borderColor", "#d1d5db".into()),
        ("borderRadius", 4.into()),
    ]);
    element
}

fn build_form(context: &BuildContext) -> Element {
    let mut element = base(context, ElementType::Form);
    element.settings = settings_object(json!({ "method": "post", "action": "" }));
    element.styles = default_layer(&[
        ("display", "flex".into()),
        ("flexDirection", "column".into()),
        ("gap", 12.into()),
    ]);
    element
}

fn build_section(context: &BuildContext) -> Element {
    let mut element = base(context, ElementType::Section);
    element.styles = default_layer(&[
        ("display", "flex".into()),
        ("flexDirection", "column".into()),
        ("alignItems", "center".into()),
        ("width", "100%".into()),
        ("paddingTop", 48.into()),
        ("paddingBottom", 48.into()),
    ]);
    element
}

fn build_carousel(context: &BuildContext) -> Element {
    let mut element = base(context, ElementType::Carousel);
    element.settings = settings_object(json!({ "autoplay": false, "interval": 5000 }));
    element.styles = default_layer(&[
        ("display", "flex".into()),
        ("width", "100%".into()),
        ("gap", 16.into()),
    ]);
    element
}

fn build_cms_list(context: &BuildContext) -> Element {
    let mut element = base(context, ElementType::CmsList);
    element.settings = settings_object(json!({ "collection": "", "limit": 10 }));
    element.styles = default_layer(&[
        ("display", "flex".into()),
        ("flexDirection", "column".into()),
        ("gap", 16.into()),
    ]);
    element
}

fn build_cms_item(context: &BuildContext) -> Element {
    let mut element = base(context, ElementType::CmsItem);
    element.settings = settings_object(json!({ "collection": "", "bindings": {} }));
    element.styles = default_layer(&[
        ("display", "flex".into()),
        ("flexDirection", "column".into()),
        ("gap", 8.into()),
    ]);
    element
}

fn build_cms_grid(context: &BuildContext) -> Element {
    let mut element = base(context, ElementType::CmsGrid);
    element.settings = settings_object(json!({ "collection": "", "columns": 3 }));
    element.styles = default_layer(&[("display", "grid".into()), ("gap", 16.into())]);
    element
}
