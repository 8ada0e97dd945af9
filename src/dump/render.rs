//! The core value renderer.
//!
//! Converts any [`Inspect`] value into an ordered sequence of indented text
//! lines: absent values render as `null`, values reappearing as their own
//! descendant as `*Circular Reference*`, scalars as one line, sequences and
//! composites recursively with two spaces of indentation per nesting level.

use crate::core::{Identity, Inspect, Shape};
use crate::dump::Registry;

/// Render a value to indented lines with an empty ancestor chain.
///
/// Returns `None` when a registry handler suppresses the whole value. Cycle
/// detection guarantees termination on self-referential graphs; acyclic
/// graphs with heavy sharing re-render each shared subtree once per path, an
/// accepted tradeoff for the stateless recursion.
pub fn render(value: &dyn Inspect, registry: &Registry) -> Option<Vec<String>> {
    render_at(value, &mut Vec::new(), registry)
}

pub(crate) fn render_at(
    value: &dyn Inspect,
    ancestors: &mut Vec<Identity>,
    registry: &Registry,
) -> Option<Vec<String>> {
    let pad = "  ".repeat(ancestors.len());
    match value.shape() {
        Shape::Wrapped(inner) => render_at(inner, ancestors, registry),
        Shape::Null => Some(vec![format!("{pad}null")]),
        shape => {
            let id = Identity::of(value);
            if ancestors.contains(&id) {
                return Some(vec![format!("{pad}*Circular Reference*")]);
            }
            if let Some(handler) = registry.find(value) {
                return handler.render(value).map(|lines| {
                    lines
                        .into_iter()
                        .map(|line| format!("{pad}{line}"))
                        .collect()
                });
            }
            match shape {
                Shape::Scalar(scalar) => Some(vec![format!("{pad}{}", scalar.display())]),
                Shape::Sequence(elements) => {
                    let mut lines = Vec::new();
                    let mut emitted = false;
                    ancestors.push(id);
                    for element in elements {
                        if let Some(child) = render_at(element, ancestors, registry) {
                            if child.len() == 1 {
                                lines.push(format!("{pad}{}", child[0].trim()));
                            } else {
                                if emitted {
                                    lines.push(String::new());
                                }
                                lines.extend(child);
                            }
                            emitted = true;
                        }
                    }
                    ancestors.pop();
                    if lines.is_empty() {
                        lines.push(format!("{pad}[]"));
                    }
                    Some(lines)
                }
                Shape::Composite(fields) => {
                    if fields.is_empty() {
                        return Some(vec![format!("{pad}{{}}")]);
                    }
                    let mut lines = Vec::new();
                    ancestors.push(id);
                    for (name, attr) in fields {
                        if let Some(child) = render_at(attr, ancestors, registry) {
                            if child.len() == 1 {
                                lines.push(format!("{pad}{name}: {}", child[0].trim()));
                            } else {
                                lines.push(format!("{pad}{name}:"));
                                lines.extend(child);
                            }
                        }
                    }
                    ancestors.pop();
                    Some(lines)
                }
                // Wrapped and Null are handled by the outer match.
                Shape::Null | Shape::Wrapped(_) => Some(vec![format!("{pad}null")]),
            }
        }
    }
}
