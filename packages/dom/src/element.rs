use crate::styles::ResponsiveStyles;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A page tree is a forest of root elements.
pub type ElementTree = Vec<Arc<Element>>;

/// Closed set of element kinds the builder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    Text,
    Frame,
    Button,
    Input,
    Image,
    List,
    Select,
    Form,
    Section,
    Carousel,
    CmsList,
    CmsItem,
    CmsGrid,
}

impl ElementType {
    /// Kinds that may carry children.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::Frame
                | Self::List
                | Self::Form
                | Self::Section
                | Self::Carousel
                | Self::CmsList
                | Self::CmsItem
                | Self::CmsGrid
        )
    }

    /// Resolve a kind from its serialized name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Self::Text),
            "frame" => Some(Self::Frame),
            "button" => Some(Self::Button),
            "input" => Some(Self::Input),
            "image" => Some(Self::Image),
            "list" => Some(Self::List),
            "select" => Some(Self::Select),
            "form" => Some(Self::Form),
            "section" => Some(Self::Section),
            "carousel" => Some(Self::Carousel),
            "cmsList" => Some(Self::CmsList),
            "cmsItem" => Some(Self::CmsItem),
            "cmsGrid" => Some(Self::CmsGrid),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Frame => "frame",
            Self::Button => "button",
            Self::Input => "input",
            Self::Image => "image",
            Self::List => "list",
            Self::Select => "select",
            Self::Form => "form",
            Self::Section => "section",
            Self::Carousel => "carousel",
            Self::CmsList => "cmsList",
            Self::CmsItem => "cmsItem",
            Self::CmsGrid => "cmsGrid",
        }
    }
}

/// One node in a page tree.
///
/// `tailwind_styles` holds the compiled utility classes for `styles` merged
/// with any hand-authored tokens. The two only diverge transiently when a
/// compile fails; the next successful style write re-syncs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub page_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub styles: ResponsiveStyles,
    #[serde(default)]
    pub tailwind_styles: String,
    #[serde(default)]
    pub settings: HashMap<String, Value>,
    #[serde(default)]
    pub elements: Vec<Arc<Element>>,
}

/// An element subtree stripped of identity, used for cloning.
///
/// A template is a container template iff `elements` is present, even when
/// the list is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementTemplate {
    #[serde(rename = "type")]
    pub kind: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub styles: ResponsiveStyles,
    #[serde(default)]
    pub tailwind_styles: String,
    #[serde(default)]
    pub settings: HashMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<ElementTemplate>>,
}

impl ElementTemplate {
    pub fn is_container(&self) -> bool {
        self.elements.is_some()
    }
}
