//! The structured value dumper: handler registry, recursive renderer, and
//! text/HTML emitters.

mod html;
mod registry;
mod render;
mod stack;
mod text;

pub use html::{dump_html, dump_html_table, escape};
pub use registry::{Handler, Registry};
pub use render::render;
pub use stack::{render_stack_trace, FrameKind, StackFrame};
pub use text::dump;
