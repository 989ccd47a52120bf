//! Layered top-to-bottom layout for flow graphs
//!
//! Replaces the builder's placeholder positions. Each node's rank is the
//! length of the longest edge path reaching it, so the step chain runs down
//! one column and every table sits on the row below its step. Within a rank,
//! chain nodes come first and table nodes follow to the right, in insertion
//! order. Positions are the top-left corner of each node box.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::model::{FlowGraph, NodeKind, Position};

/// Node box size and spacing for [`layout_graph`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    /// Vertical gap between ranks
    pub rank_sep: f64,
    /// Horizontal gap between nodes of one rank
    pub node_sep: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 250.0,
            node_height: 80.0,
            rank_sep: 100.0,
            node_sep: 150.0,
        }
    }
}

/// Assign final positions to every node of the graph.
///
/// Deterministic for a given graph. Edges naming unknown nodes are ignored;
/// a cycle cannot push any rank past the node count.
pub fn layout_graph(graph: &mut FlowGraph, config: &LayoutConfig) {
    let node_count = graph.nodes.len();
    if node_count == 0 {
        return;
    }

    let ranks = assign_ranks(graph);

    let mut rows: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, rank) in ranks.iter().enumerate() {
        rows.entry(*rank).or_default().push(idx);
    }

    let column_step = config.node_width + config.node_sep;
    let row_step = config.node_height + config.rank_sep;

    for (rank, mut members) in rows {
        members.sort_by_key(|&idx| (graph.nodes[idx].kind == NodeKind::Table, idx));
        for (order, idx) in members.into_iter().enumerate() {
            let center_x = order as f64 * column_step;
            let center_y = rank as f64 * row_step;
            graph.nodes[idx].position = Position::new(
                center_x - config.node_width / 2.0,
                center_y - config.node_height / 2.0,
            );
        }
    }

    trace!(nodes = node_count, "laid out flow graph");
}

/// Longest-path rank of each node, indexed like `graph.nodes`
fn assign_ranks(graph: &FlowGraph) -> Vec<usize> {
    let node_count = graph.nodes.len();
    let index: HashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id.as_str(), idx))
        .collect();

    let edges: Vec<(usize, usize)> = graph
        .edges
        .iter()
        .filter_map(|edge| {
            let source = *index.get(edge.source.as_str())?;
            let target = *index.get(edge.target.as_str())?;
            (source != target).then_some((source, target))
        })
        .collect();

    let max_rank = node_count - 1;
    let mut ranks = vec![0usize; node_count];
    for _ in 0..node_count {
        let mut changed = false;
        for &(source, target) in &edges {
            let candidate = (ranks[source] + 1).min(max_rank);
            if candidate > ranks[target] {
                ranks[target] = candidate;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    ranks
}
