//! HTML emitters: an escaped document mode and a tabular mode for
//! homogeneous record sequences.

use crate::core::{Inspect, Record, Shape};
use crate::dump::{render, Registry};

/// Escape text for safe embedding in HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape one logical line, normalizing embedded CR/LF sequences so they stay
/// visible inside a preformatted block.
fn escape_line(line: &str) -> String {
    escape(line).replace("\r\n", "\n").replace('\r', "\n")
}

/// Write a titled HTML document dump: escaped heading, then the rendered
/// lines inside one `<pre>` block, each escaped individually.
pub fn dump_html<F: FnMut(&str)>(
    value: &dyn Inspect,
    title: &str,
    registry: &Registry,
    mut sink: F,
) {
    sink(&format!("<h2>{}</h2>", escape(title)));
    sink("");
    sink("<pre>");
    if let Some(lines) = render(value, registry) {
        for line in &lines {
            sink(&escape_line(line));
        }
    }
    sink("</pre>");
}

/// Write a homogeneous record sequence as an HTML table: one header cell per
/// column, one row per record, one cell per attribute.
///
/// An empty row set produces a single full-width "No items to display" row; a
/// record shape with no columns skips the table entirely.
pub fn dump_html_table<T: Record, F: FnMut(&str)>(
    rows: &[T],
    title: &str,
    registry: &Registry,
    mut sink: F,
) {
    let columns = T::columns();

    sink(&format!("<h2>{}</h2>", escape(title)));
    sink("");
    if columns.is_empty() {
        sink(&format!(
            "No fields to query on type {}",
            std::any::type_name::<T>()
        ));
        return;
    }

    sink("<table>");
    sink("<thead>");
    sink("<tr>");
    for name in columns {
        sink(&format!("<td>{}</td>", escape(name)));
    }
    sink("</tr>");
    sink("</thead>");
    sink("<tbody>");
    let mut any_rows = false;
    for row in rows {
        sink("<tr>");
        for (_, cell) in row.fields() {
            sink(&format!("<td>{}</td>", render_cell(cell, registry)));
        }
        sink("</tr>");
        any_rows = true;
    }
    if !any_rows {
        sink(&format!(
            "<tr><td colspan=\"{}\">No items to display</td></tr>",
            columns.len()
        ));
    }
    sink("</tbody>");
    sink("</table>");
}

/// Render one table cell. A truly scalar single-line value whose escaped form
/// matches its raw form (and contains no line breaks) is emitted raw;
/// everything else is escaped, `<br>`-joined, and wrapped in `<pre>`.
fn render_cell(value: &dyn Inspect, registry: &Registry) -> String {
    let lines = render(value, registry).unwrap_or_default();

    if is_scalar(value) && lines.len() == 1 {
        let line = &lines[0];
        let escaped = escape(line);
        if escaped == *line && !line.contains('\r') && !line.contains('\n') {
            return line.clone();
        }
    }

    let joined = lines
        .iter()
        .map(|line| {
            escape(line)
                .replace("\r\n", "\n")
                .replace('\r', "\n")
                .replace('\n', "<br>")
        })
        .collect::<Vec<_>>()
        .join("<br>");
    format!("<pre>{joined}</pre>")
}

fn is_scalar(value: &dyn Inspect) -> bool {
    match value.shape() {
        Shape::Scalar(_) => true,
        Shape::Wrapped(inner) => is_scalar(inner),
        _ => false,
    }
}
