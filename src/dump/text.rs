//! Plain-text emitter: a titled section around the rendered line sequence.

use crate::core::Inspect;
use crate::dump::{render, Registry};

/// Write a titled plain-text dump of `value` to the line sink.
///
/// The sink receives one call per line, unescaped. A root value suppressed by
/// the registry produces a header with zero body lines.
pub fn dump<F: FnMut(&str)>(value: &dyn Inspect, title: &str, registry: &Registry, mut sink: F) {
    sink(&format!("= {title} ========----------------------"));
    sink("");
    if let Some(lines) = render(value, registry) {
        for line in &lines {
            sink(line);
        }
    }
}
