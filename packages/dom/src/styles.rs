use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Viewport tiers, declared in canonical cascade order.
///
/// The derived `Ord` follows declaration order, so iterating a
/// `BTreeMap<Breakpoint, _>` visits tiers in canonical order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Default,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 5] = [Self::Default, Self::Sm, Self::Md, Self::Lg, Self::Xl];

    /// Class prefix for this tier (`"md:"`); empty for the default tier.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Sm => "sm:",
            Self::Md => "md:",
            Self::Lg => "lg:",
            Self::Xl => "xl:",
        }
    }
}

/// A single declaration value as authored in a panel or loaded from JSON.
///
/// `Other` captures any non string/number payload that arrived through
/// persisted JSON; it is representable here and rejected at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

/// Property name → declaration value for one breakpoint.
pub type StyleMap = HashMap<String, StyleValue>;

/// Per-breakpoint style override layers for one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponsiveStyles {
    layers: BTreeMap<Breakpoint, StyleMap>,
}

impl ResponsiveStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// The declarations stored at one tier, if any.
    pub fn layer(&self, breakpoint: Breakpoint) -> Option<&StyleMap> {
        self.layers.get(&breakpoint)
    }

    /// Replace an entire tier. Callers that want to keep prior values must
    /// pre-merge them into `declarations`.
    pub fn set_layer(&mut self, breakpoint: Breakpoint, declarations: StyleMap) {
        self.layers.insert(breakpoint, declarations);
    }

    pub fn is_empty(&self) -> bool {
        self.layers.values().all(StyleMap::is_empty)
    }

    /// Declared tiers in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &StyleMap)> {
        self.layers.iter().map(|(breakpoint, layer)| (*breakpoint, layer))
    }
}

/// Exactly the declarations stored at `breakpoint`.
///
/// No cross-breakpoint cascading happens at this layer; cascade order is a
/// rendering concern.
pub fn resolve_breakpoint(styles: &ResponsiveStyles, breakpoint: Breakpoint) -> StyleMap {
    styles.layer(breakpoint).cloned().unwrap_or_default()
}

/// Overlay of every tier in canonical order, later tiers overwriting
/// same-named properties. For display and inspection only.
pub fn resolve_flattened(styles: &ResponsiveStyles) -> StyleMap {
    let mut flattened = StyleMap::new();
    for (_, layer) in styles.iter() {
        for (property, value) in layer {
            flattened.insert(property.clone(), value.clone());
        }
    }
    flattened
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(entries: &[(&str, StyleValue)]) -> StyleMap {
        entries
            .iter()
            .map(|(property, value)| (property.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_breakpoint_canonical_order() {
        let mut styles = ResponsiveStyles::new();
        styles.set_layer(Breakpoint::Xl, layer(&[("width", "25%".into())]));
        styles.set_layer(Breakpoint::Default, layer(&[("width", "100%".into())]));
        styles.set_layer(Breakpoint::Md, layer(&[("width", "50%".into())]));

        let tiers: Vec<Breakpoint> = styles.iter().map(|(breakpoint, _)| breakpoint).collect();
        assert_eq!(tiers, vec![Breakpoint::Default, Breakpoint::Md, Breakpoint::Xl]);
    }

    #[test]
    fn test_resolve_breakpoint_is_exact() {
        let mut styles = ResponsiveStyles::new();
        styles.set_layer(Breakpoint::Default, layer(&[("color", "#111111".into())]));
        styles.set_layer(Breakpoint::Md, layer(&[("fontSize", 24.into())]));

        let md = resolve_breakpoint(&styles, Breakpoint::Md);
        assert_eq!(md.len(), 1);
        assert!(md.contains_key("fontSize"));

        // No cascading from the default tier
        assert!(!md.contains_key("color"));
        assert!(resolve_breakpoint(&styles, Breakpoint::Xl).is_empty());
    }

    #[test]
    fn test_resolve_flattened_later_tiers_win() {
        let mut styles = ResponsiveStyles::new();
        styles.set_layer(
            Breakpoint::Default,
            layer(&[("width", "100%".into()), ("color", "#111111".into())]),
        );
        styles.set_layer(Breakpoint::Lg, layer(&[("width", "50%".into())]));

        let flattened = resolve_flattened(&styles);
        assert_eq!(flattened.get("width"), Some(&StyleValue::from("50%")));
        assert_eq!(flattened.get("color"), Some(&StyleValue::from("#111111")));
    }

    #[test]
    fn test_style_value_json_shapes() {
        let number: StyleValue = serde_json::from_str("16").unwrap();
        assert_eq!(number, StyleValue::Number(16.0));

        let text: StyleValue = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(text, StyleValue::Text("auto".to_string()));

        // Malformed payloads stay representable instead of failing the load
        let other: StyleValue = serde_json::from_str("true").unwrap();
        assert!(matches!(other, StyleValue::Other(_)));
    }
}
