//! Class-string merging.
//!
//! A recompile lands next to whatever tokens the element already carried,
//! hand-authored ones included. The merged string keeps one token per
//! underlying property: when two tokens target the same property at the
//! same breakpoint, the later one wins and the earlier duplicate is
//! dropped.

use std::collections::HashSet;

/// The underlying property a token targets, used for conflict resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ClassGroup {
    Display,
    FlexDirection,
    JustifyContent,
    AlignItems,
    TextAlign,
    TextTransform,
    TextDecoration,
    FontStyle,
    FontWeight,
    FontFamily,
    FontSize,
    TextColor,
    BackgroundColor,
    BackgroundPosition,
    BackgroundSize,
    BoxShadow,
    BorderColor,
    BorderWidth,
    BorderRadius,
    Width,
    Height,
    MinWidth,
    MaxWidth,
    MinHeight,
    MaxHeight,
    Padding,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    Margin,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    Gap,
    GapX,
    GapY,
    LineHeight,
    LetterSpacing,
    Top,
    Right,
    Bottom,
    Left,
    ZIndex,
    Opacity,
}

/// Merge two class strings, later tokens winning per property group.
pub fn merge_class_strings(earlier: &str, later: &str) -> String {
    let mut tokens = split_class_tokens(earlier);
    tokens.extend(split_class_tokens(later));

    let mut seen_groups: HashSet<(&str, ClassGroup)> = HashSet::new();
    let mut seen_exact: HashSet<&str> = HashSet::new();
    let mut kept: Vec<&str> = Vec::with_capacity(tokens.len());

    for token in tokens.iter().rev() {
        let (breakpoint, base) = split_breakpoint(token);
        match classify(base) {
            Some(group) => {
                if seen_groups.insert((breakpoint, group)) {
                    kept.push(token);
                }
            }
            // Unclassifiable tokens pass through, exact duplicates collapsed
            None => {
                if seen_exact.insert(token) {
                    kept.push(token);
                }
            }
        }
    }

    kept.reverse();
    kept.join(" ")
}

/// Split a class string on whitespace, honoring single-quoted spans so
/// tokens like `bg-position-['center center']` survive intact.
pub fn split_class_tokens(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for character in input.chars() {
        if escaped {
            current.push(character);
            escaped = false;
            continue;
        }
        match character {
            '\\' => {
                current.push(character);
                escaped = true;
            }
            '\'' => {
                current.push(character);
                in_quotes = !in_quotes;
            }
            character if character.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            character => current.push(character),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn split_breakpoint(token: &str) -> (&str, &str) {
    for prefix in ["sm:", "md:", "lg:", "xl:"] {
        if let Some(base) = token.strip_prefix(prefix) {
            return (prefix, base);
        }
    }
    ("", token)
}

fn classify(token: &str) -> Option<ClassGroup> {
    use ClassGroup::*;

    match token {
        "block" | "inline-block" | "inline" | "flex" | "inline-flex" | "grid"
        | "inline-grid" | "table" | "contents" | "hidden" => return Some(Display),
        "italic" | "not-italic" => return Some(FontStyle),
        "uppercase" | "lowercase" | "capitalize" | "normal-case" => return Some(TextTransform),
        "underline" | "overline" | "line-through" | "no-underline" => {
            return Some(TextDecoration)
        }
        "font-sans" | "font-serif" | "font-mono" => return Some(FontFamily),
        "text-left" | "text-center" | "text-right" | "text-justify" => return Some(TextAlign),
        "w-auto" => return Some(Width),
        "h-auto" => return Some(Height),
        _ => {}
    }

    if token.starts_with("flex-row") || token.starts_with("flex-col") {
        return Some(FlexDirection);
    }
    if let Some(rest) = token.strip_prefix("font-") {
        return Some(classify_font(rest));
    }
    if let Some(rest) = token.strip_prefix("text-") {
        return Some(classify_text(rest));
    }
    if let Some(rest) = token.strip_prefix("border-") {
        return Some(classify_border(rest));
    }

    // Longest prefixes first so `gap-x-` never reads as `gap-`
    const PREFIXES: &[(&str, ClassGroup)] = &[
        ("bg-position-", BackgroundPosition),
        ("bg-size-", BackgroundSize),
        ("bg-", BackgroundColor),
        ("justify-", JustifyContent),
        ("items-", AlignItems),
        ("decoration-", TextDecoration),
        ("display-", Display),
        ("rounded-", BorderRadius),
        ("min-w-", MinWidth),
        ("max-w-", MaxWidth),
        ("min-h-", MinHeight),
        ("max-h-", MaxHeight),
        ("w-", Width),
        ("h-", Height),
        ("pt-", PaddingTop),
        ("pr-", PaddingRight),
        ("pb-", PaddingBottom),
        ("pl-", PaddingLeft),
        ("p-", Padding),
        ("mt-", MarginTop),
        ("mr-", MarginRight),
        ("mb-", MarginBottom),
        ("ml-", MarginLeft),
        ("m-", Margin),
        ("gap-x-", GapX),
        ("gap-y-", GapY),
        ("gap-", Gap),
        ("leading-", LineHeight),
        ("tracking-", LetterSpacing),
        ("top-", Top),
        ("right-", Right),
        ("bottom-", Bottom),
        ("left-", Left),
        ("z-", ZIndex),
        ("opacity-", Opacity),
        ("shadow-", BoxShadow),
    ];
    for (prefix, group) in PREFIXES {
        if token.starts_with(prefix) {
            return Some(*group);
        }
    }
    None
}

fn classify_font(rest: &str) -> ClassGroup {
    const WEIGHT_NAMES: &[&str] = &[
        "thin",
        "extralight",
        "light",
        "normal",
        "medium",
        "semibold",
        "bold",
        "extrabold",
        "black",
    ];
    if WEIGHT_NAMES.contains(&rest) {
        return ClassGroup::FontWeight;
    }
    match arbitrary_value(rest) {
        Some(value) if value.chars().all(|character| character.is_ascii_digit()) => {
            ClassGroup::FontWeight
        }
        _ => ClassGroup::FontFamily,
    }
}

fn classify_text(rest: &str) -> ClassGroup {
    const SIZE_SCALE: &[&str] = &[
        "xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl", "8xl", "9xl",
    ];
    if SIZE_SCALE.contains(&rest) {
        return ClassGroup::FontSize;
    }
    match arbitrary_value(rest) {
        Some(value) if is_color_value(value) => ClassGroup::TextColor,
        Some(_) => ClassGroup::FontSize,
        // Palette classes like `text-red-500`
        None => ClassGroup::TextColor,
    }
}

fn classify_border(rest: &str) -> ClassGroup {
    match arbitrary_value(rest) {
        Some(value) if is_color_value(value) => ClassGroup::BorderColor,
        Some(_) => ClassGroup::BorderWidth,
        None => {
            if rest.chars().all(|character| character.is_ascii_digit()) {
                ClassGroup::BorderWidth
            } else {
                ClassGroup::BorderColor
            }
        }
    }
}

fn arbitrary_value(rest: &str) -> Option<&str> {
    rest.strip_prefix('[').and_then(|inner| inner.strip_suffix(']'))
}

fn is_color_value(value: &str) -> bool {
    value.starts_with('#')
        || value.starts_with("rgb")
        || value.starts_with("hsl")
        || value.starts_with("var(")
}
