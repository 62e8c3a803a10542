//! Breakpoint style writes.
//!
//! A style edit replaces one breakpoint's declaration layer wholesale (the
//! panel resubmits the complete layer), recompiles the element's class
//! string across every breakpoint, and merges the result with whatever
//! tokens the element already carried so hand-authored classes survive.

use pagecraft_compiler_tailwind::{compile_utility_classes, merge_class_strings, CompileError};
use pagecraft_dom::{Breakpoint, Element, ResponsiveStyles, StyleMap};
use tracing::warn;

/// The two fields a style edit commits together.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleCommit {
    pub styles: ResponsiveStyles,
    pub tailwind_styles: String,
}

/// Replace the `breakpoint` layer with `declarations` and recompile.
///
/// The commit always happens: on a compile failure the new `styles` still
/// go through while `tailwind_styles` keeps its previous value, and the
/// error is returned for reporting. The two fields re-sync on the next
/// successful write.
pub fn update_element_style(
    element: &Element,
    declarations: StyleMap,
    breakpoint: Breakpoint,
    apply: impl FnOnce(StyleCommit),
) -> Option<CompileError> {
    let mut styles = element.styles.clone();
    styles.set_layer(breakpoint, declarations);

    match compile_utility_classes(&styles) {
        Ok(compiled) => {
            let tailwind_styles = merge_class_strings(&element.tailwind_styles, &compiled);
            apply(StyleCommit {
                styles,
                tailwind_styles,
            });
            None
        }
        Err(error) => {
            warn!(
                element_id = %element.id,
                %error,
                "class compilation failed, keeping previous classes"
            );
            apply(StyleCommit {
                styles,
                tailwind_styles: element.tailwind_styles.clone(),
            });
            Some(error)
        }
    }
}

/// Apply a style write to a copy of the element.
pub fn write_element_style(
    element: &Element,
    declarations: StyleMap,
    breakpoint: Breakpoint,
) -> (Element, Option<CompileError>) {
    let mut next = element.clone();
    let error = update_element_style(element, declarations, breakpoint, |commit| {
        next.styles = commit.styles;
        next.tailwind_styles = commit.tailwind_styles;
    });
    (next, error)
}
