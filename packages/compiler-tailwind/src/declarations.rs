//! Single-breakpoint declaration compilation.
//!
//! Properties are evaluated in the fixed order of [`PROPERTY_TABLE`], never
//! in map iteration order, so identical declaration maps always compile to
//! byte-identical class strings.

use crate::escape::escape_arbitrary_value;
use pagecraft_dom::{StyleMap, StyleValue};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("unsupported value for '{property}': {value}")]
    UnsupportedValue { property: String, value: String },
}

enum Handler {
    /// Fixed value → canonical token table with an arbitrary fallback.
    Categorical {
        table: &'static [(&'static str, &'static str)],
        fallback_prefix: &'static str,
    },
    /// Always-arbitrary length; bare numbers are assumed pixels.
    Length { prefix: &'static str },
    /// Length with a canonical `auto` short-circuit (`w-auto`, `h-auto`).
    Dimension { prefix: &'static str },
    /// Always-arbitrary color; exact values preserved, no palette snapping.
    Color { prefix: &'static str },
    /// Always-arbitrary passthrough, numbers rendered bare.
    Arbitrary { prefix: &'static str },
    Opacity,
    FontFamily,
    FontWeight,
    FontStyle,
}

const DISPLAY: &[(&str, &str)] = &[
    ("block", "block"),
    ("inline-block", "inline-block"),
    ("inline", "inline"),
    ("flex", "flex"),
    ("inline-flex", "inline-flex"),
    ("grid", "grid"),
    ("inline-grid", "inline-grid"),
    ("table", "table"),
    ("contents", "contents"),
    ("none", "hidden"),
];

const FLEX_DIRECTION: &[(&str, &str)] = &[
    ("row", "flex-row"),
    ("row-reverse", "flex-row-reverse"),
    ("column", "flex-col"),
    ("column-reverse", "flex-col-reverse"),
];

const JUSTIFY_CONTENT: &[(&str, &str)] = &[
    ("flex-start", "justify-start"),
    ("start", "justify-start"),
    ("center", "justify-center"),
    ("flex-end", "justify-end"),
    ("end", "justify-end"),
    ("space-between", "justify-between"),
    ("space-around", "justify-around"),
    ("space-evenly", "justify-evenly"),
];

const ALIGN_ITEMS: &[(&str, &str)] = &[
    ("flex-start", "items-start"),
    ("start", "items-start"),
    ("center", "items-center"),
    ("flex-end", "items-end"),
    ("end", "items-end"),
    ("baseline", "items-baseline"),
    ("stretch", "items-stretch"),
];

const TEXT_ALIGN: &[(&str, &str)] = &[
    ("left", "text-left"),
    ("center", "text-center"),
    ("right", "text-right"),
    ("justify", "text-justify"),
];

const TEXT_TRANSFORM: &[(&str, &str)] = &[
    ("uppercase", "uppercase"),
    ("lowercase", "lowercase"),
    ("capitalize", "capitalize"),
    ("none", "normal-case"),
];

const TEXT_DECORATION: &[(&str, &str)] = &[
    ("underline", "underline"),
    ("overline", "overline"),
    ("line-through", "line-through"),
    ("none", "no-underline"),
];

const FONT_WEIGHTS: &[(i64, &str)] = &[
    (100, "font-thin"),
    (200, "font-extralight"),
    (300, "font-light"),
    (400, "font-normal"),
    (500, "font-medium"),
    (600, "font-semibold"),
    (700, "font-bold"),
    (800, "font-extrabold"),
    (900, "font-black"),
];

/// Property families in emission order.
const PROPERTY_TABLE: &[(&str, Handler)] = &[
    (
        "display",
        Handler::Categorical { table: DISPLAY, fallback_prefix: "display" },
    ),
    (
        "flexDirection",
        Handler::Categorical { table: FLEX_DIRECTION, fallback_prefix: "flex" },
    ),
    (
        "justifyContent",
        Handler::Categorical { table: JUSTIFY_CONTENT, fallback_prefix: "justify" },
    ),
    (
        "alignItems",
        Handler::Categorical { table: ALIGN_ITEMS, fallback_prefix: "items" },
    ),
    (
        "textAlign",
        Handler::Categorical { table: TEXT_ALIGN, fallback_prefix: "text" },
    ),
    (
        "textTransform",
        Handler::Categorical { table: TEXT_TRANSFORM, fallback_prefix: "text" },
    ),
    (
        "textDecoration",
        Handler::Categorical { table: TEXT_DECORATION, fallback_prefix: "decoration" },
    ),
    ("width", Handler::Dimension { prefix: "w" }),
    ("height", Handler::Dimension { prefix: "h" }),
    ("minWidth", Handler::Length { prefix: "min-w" }),
    ("maxWidth", Handler::Length { prefix: "max-w" }),
    ("minHeight", Handler::Length { prefix: "min-h" }),
    ("maxHeight", Handler::Length { prefix: "max-h" }),
    ("borderRadius", Handler::Length { prefix: "rounded" }),
    ("borderWidth", Handler::Length { prefix: "border" }),
    ("padding", Handler::Length { prefix: "p" }),
    ("paddingTop", Handler::Length { prefix: "pt" }),
    ("paddingRight", Handler::Length { prefix: "pr" }),
    ("paddingBottom", Handler::Length { prefix: "pb" }),
    ("paddingLeft", Handler::Length { prefix: "pl" }),
    ("margin", Handler::Length { prefix: "m" }),
    ("marginTop", Handler::Length { prefix: "mt" }),
    ("marginRight", Handler::Length { prefix: "mr" }),
    ("marginBottom", Handler::Length { prefix: "mb" }),
    ("marginLeft", Handler::Length { prefix: "ml" }),
    ("gap", Handler::Length { prefix: "gap" }),
    ("rowGap", Handler::Length { prefix: "gap-y" }),
    ("columnGap", Handler::Length { prefix: "gap-x" }),
    ("fontSize", Handler::Length { prefix: "text" }),
    ("lineHeight", Handler::Length { prefix: "leading" }),
    ("letterSpacing", Handler::Length { prefix: "tracking" }),
    ("top", Handler::Length { prefix: "top" }),
    ("right", Handler::Length { prefix: "right" }),
    ("bottom", Handler::Length { prefix: "bottom" }),
    ("left", Handler::Length { prefix: "left" }),
    ("zIndex", Handler::Length { prefix: "z" }),
    ("backgroundColor", Handler::Color { prefix: "bg" }),
    ("color", Handler::Color { prefix: "text" }),
    ("borderColor", Handler::Color { prefix: "border" }),
    ("backgroundPosition", Handler::Arbitrary { prefix: "bg-position" }),
    ("backgroundSize", Handler::Arbitrary { prefix: "bg-size" }),
    ("boxShadow", Handler::Arbitrary { prefix: "shadow" }),
    ("opacity", Handler::Opacity),
    ("fontFamily", Handler::FontFamily),
    ("fontWeight", Handler::FontWeight),
    ("fontStyle", Handler::FontStyle),
];

/// Compile one breakpoint's declarations into utility-class tokens.
pub fn compile_tokens(declarations: &StyleMap) -> Result<Vec<String>, CompileError> {
    let mut tokens = Vec::new();
    for (property, handler) in PROPERTY_TABLE {
        let value = match declarations.get(*property) {
            Some(value) => value,
            None => continue,
        };
        if let Some(token) = emit(property, handler, value)? {
            tokens.push(token);
        }
    }
    Ok(tokens)
}

/// Compile one breakpoint's declarations into a space-joined class string.
pub fn compile_declarations(declarations: &StyleMap) -> Result<String, CompileError> {
    Ok(compile_tokens(declarations)?.join(" "))
}

fn emit(
    property: &str,
    handler: &Handler,
    value: &StyleValue,
) -> Result<Option<String>, CompileError> {
    match handler {
        Handler::Categorical { table, fallback_prefix } => {
            let rendered = render(value, property)?;
            let token = match table.iter().find(|(from, _)| *from == rendered) {
                Some((_, canonical)) => (*canonical).to_string(),
                None => arbitrary(fallback_prefix, &rendered),
            };
            Ok(Some(token))
        }
        Handler::Dimension { prefix } => {
            if matches!(value, StyleValue::Text(text) if text == "auto") {
                return Ok(Some(format!("{prefix}-auto")));
            }
            Ok(Some(arbitrary(prefix, &render_length(value, property)?)))
        }
        Handler::Length { prefix } => {
            Ok(Some(arbitrary(prefix, &render_length(value, property)?)))
        }
        Handler::Color { prefix } | Handler::Arbitrary { prefix } => {
            Ok(Some(arbitrary(prefix, &render(value, property)?)))
        }
        Handler::Opacity => {
            let token = match value {
                StyleValue::Number(number) => {
                    // Values in (1, 100] are authored as percentages
                    let scaled = if *number > 1.0 && *number <= 100.0 {
                        number / 100.0
                    } else {
                        *number
                    };
                    format!("opacity-[{}]", format_number(scaled))
                }
                _ => arbitrary("opacity", &render(value, property)?),
            };
            Ok(Some(token))
        }
        Handler::FontFamily => {
            let rendered = render(value, property)?;
            if rendered.trim_start().starts_with("var(") {
                return Ok(Some(arbitrary("font", &rendered)));
            }
            let lowered = rendered.to_lowercase();
            let token = if lowered.contains("sans") {
                "font-sans".to_string()
            } else if lowered.contains("serif") {
                "font-serif".to_string()
            } else if lowered.contains("monospace") {
                "font-mono".to_string()
            } else {
                arbitrary("font", &rendered)
            };
            Ok(Some(token))
        }
        Handler::FontWeight => {
            let token = match value {
                StyleValue::Number(number) if number.fract() == 0.0 => {
                    let weight = *number as i64;
                    match FONT_WEIGHTS.iter().find(|(from, _)| *from == weight) {
                        Some((_, canonical)) => (*canonical).to_string(),
                        None => arbitrary("font", &format_number(*number)),
                    }
                }
                StyleValue::Text(text) if text == "normal" || text == "400" => {
                    "font-normal".to_string()
                }
                StyleValue::Text(text) if text == "bold" || text == "700" => {
                    "font-bold".to_string()
                }
                _ => arbitrary("font", &render(value, property)?),
            };
            Ok(Some(token))
        }
        Handler::FontStyle => {
            let rendered = render(value, property)?;
            if rendered == "italic" || rendered == "oblique" {
                Ok(Some("italic".to_string()))
            } else {
                Ok(None)
            }
        }
    }
}

fn arbitrary(prefix: &str, rendered: &str) -> String {
    format!("{}-[{}]", prefix, escape_arbitrary_value(rendered))
}

fn render(value: &StyleValue, property: &str) -> Result<String, CompileError> {
    match value {
        StyleValue::Number(number) => Ok(format_number(*number)),
        StyleValue::Text(text) => Ok(text.clone()),
        StyleValue::Other(other) => Err(CompileError::UnsupportedValue {
            property: property.to_string(),
            value: other.to_string(),
        }),
    }
}

fn render_length(value: &StyleValue, property: &str) -> Result<String, CompileError> {
    match value {
        // Bare numbers are pixels
        StyleValue::Number(number) => Ok(format!("{}px", format_number(*number))),
        StyleValue::Text(text) => Ok(text.clone()),
        StyleValue::Other(other) => Err(CompileError::UnsupportedValue {
            property: property.to_string(),
            value: other.to_string(),
        }),
    }
}

pub(crate) fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}
