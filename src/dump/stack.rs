//! Specialized renderer for call-stack traces.
//!
//! Frames with neither a symbolic signature nor a fallback name are unknown;
//! consecutive unknown frames coalesce into a single summary line.

use serde::{Deserialize, Serialize};

use crate::core::{Inspect, Scalar, Shape};
use crate::impl_composite;

/// Kind of a resolved stack frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    ManagedMethod,
    Runtime,
    #[default]
    Unknown,
}

impl FrameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameKind::ManagedMethod => "ManagedMethod",
            FrameKind::Runtime => "Runtime",
            FrameKind::Unknown => "Unknown",
        }
    }
}

impl Inspect for FrameKind {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Enum(self.as_str()))
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// One frame of a thread's stack.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackFrame {
    /// Fully resolved method signature, if symbols were available.
    #[serde(default)]
    pub signature: Option<String>,
    /// Fallback frame label (e.g. a runtime helper name).
    #[serde(default)]
    pub frame_name: Option<String>,
    #[serde(default)]
    pub kind: FrameKind,
}

impl_composite!(StackFrame {
    signature,
    frame_name,
    kind
});

impl StackFrame {
    fn is_unknown(&self) -> bool {
        self.signature.is_none() && self.frame_name.is_none()
    }
}

/// Render a stack trace, coalescing runs of unknown frames.
///
/// Known frames render as `{signature-or-name} [{kind}]`; a run of unknown
/// frames flushes as `Unknown` or `{n}x Unknown` before the next known frame
/// or at the end. An empty stack renders as `None available`.
pub fn render_stack_trace(frames: &[StackFrame]) -> Vec<String> {
    if frames.is_empty() {
        return vec!["None available".to_string()];
    }

    let mut lines = Vec::new();
    let mut queued_unknown = 0usize;
    for frame in frames {
        if frame.is_unknown() {
            queued_unknown += 1;
            continue;
        }
        flush_unknown(&mut lines, &mut queued_unknown);
        let label = frame
            .signature
            .as_deref()
            .or(frame.frame_name.as_deref())
            .unwrap_or("Unknown");
        lines.push(format!("{label} [{}]", frame.kind.as_str()));
    }
    flush_unknown(&mut lines, &mut queued_unknown);
    lines
}

fn flush_unknown(lines: &mut Vec<String>, queued: &mut usize) {
    match *queued {
        0 => {}
        1 => lines.push("Unknown".to_string()),
        n => lines.push(format!("{n}x Unknown")),
    }
    *queued = 0;
}
