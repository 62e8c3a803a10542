//! # Pagecraft Tailwind Compiler
//!
//! Pure compilation from structured style declarations to atomic
//! utility-class strings.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ declarations: one breakpoint → tokens       │
//! │  (fixed property order, arbitrary values)   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ lib: all breakpoints → prefixed class string│
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ merge: derived + hand-authored, last wins   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The compiler is deterministic: identical input styles always produce a
//! byte-identical class string.

mod declarations;
mod escape;
mod merge;

pub use declarations::{compile_declarations, compile_tokens, CompileError};
pub use escape::escape_arbitrary_value;
pub use merge::{merge_class_strings, split_class_tokens};

use pagecraft_dom::ResponsiveStyles;
use tracing::debug;

/// Compile every declared breakpoint into one class string.
///
/// Breakpoints compile independently in canonical order; every token is
/// prefixed with its tier (`md:`) except for the default tier. An element
/// with no declarations compiles to the empty string.
pub fn compile_utility_classes(styles: &ResponsiveStyles) -> Result<String, CompileError> {
    let mut chunks: Vec<String> = Vec::new();
    for (breakpoint, layer) in styles.iter() {
        if layer.is_empty() {
            continue;
        }
        let tokens = compile_tokens(layer)?;
        if tokens.is_empty() {
            continue;
        }
        let prefix = breakpoint.prefix();
        if prefix.is_empty() {
            chunks.push(tokens.join(" "));
        } else {
            let prefixed: Vec<String> = tokens
                .iter()
                .map(|token| format!("{prefix}{token}"))
                .collect();
            chunks.push(prefixed.join(" "));
        }
    }
    let compiled = chunks.join(" ");
    debug!(classes = %compiled, "compiled utility classes");
    Ok(compiled)
}
