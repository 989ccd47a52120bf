//! Output renderings of a procedure flow

mod layout;
mod mermaid;

pub use layout::{layout_graph, LayoutConfig};
pub use mermaid::render_mermaid;
