//! Flow data model: steps, graph, labels and graph construction

mod builder;
mod graph;
mod labels;
mod step;

pub use builder::{build_flow_graph, END_NODE_ID, START_NODE_ID};
pub use graph::{FlowEdge, FlowGraph, FlowNode, NodeData, NodeKind, Position};
pub use labels::{business_label, category_label, MAX_LABEL_CHARS};
pub(crate) use labels::{delete_target, insert_target, update_target};
pub use step::{FlowStep, StepType};
