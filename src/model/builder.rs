//! Flow graph construction from parsed steps
//!
//! The graph is a straight chain `Start → step_0 → … → step_n → End`, with a
//! table node hanging off each step for every table it references. IF/ELSE
//! are chained like any other step; no branch or merge is reconstructed.
//!
//! Positions are placeholders (steps stacked vertically, tables to the
//! right). A layout pass is expected to replace them.

use super::graph::{FlowEdge, FlowGraph, FlowNode, NodeData, NodeKind, Position};
use super::labels::{business_label, category_label};
use super::step::FlowStep;

pub const START_NODE_ID: &str = "start";
pub const END_NODE_ID: &str = "end";

/// Vertical distance between stacked step nodes
const STEP_SPACING: f64 = 150.0;
/// Horizontal offset of table nodes from their step
const TABLE_OFFSET_X: f64 = 250.0;
/// Vertical distance between tables of one step
const TABLE_SPACING: f64 = 60.0;

/// Build the node/edge graph for a procedure's steps
pub fn build_flow_graph(steps: &[FlowStep], procedure_name: &str) -> FlowGraph {
    let table_count: usize = steps.iter().map(|s| s.tables.len()).sum();
    let mut nodes = Vec::with_capacity(2 + steps.len() + table_count);
    let mut edges = Vec::with_capacity(1 + steps.len() + table_count);

    nodes.push(FlowNode {
        id: START_NODE_ID.to_string(),
        kind: NodeKind::Special,
        data: NodeData {
            label: "Inicio".to_string(),
            sub_label: Some(procedure_name.to_string()),
            node_type: "start".to_string(),
            tables: None,
        },
        position: Position::new(0.0, 0.0),
    });

    if let Some(first) = steps.first() {
        edges.push(FlowEdge::new("e-start", START_NODE_ID, &first.id, true));
    }

    for (index, step) in steps.iter().enumerate() {
        let row_y = (index + 1) as f64 * STEP_SPACING;

        nodes.push(FlowNode {
            id: step.id.clone(),
            kind: NodeKind::Custom,
            data: NodeData {
                label: category_label(step.step_type).to_string(),
                sub_label: Some(business_label(step, procedure_name)),
                node_type: step.step_type.to_string(),
                tables: Some(step.tables.clone()),
            },
            position: Position::new(0.0, row_y),
        });

        for (table_index, table) in step.tables.iter().enumerate() {
            let table_id = format!("table-{}-{}", step.id, table_index);
            nodes.push(FlowNode {
                id: table_id.clone(),
                kind: NodeKind::Table,
                data: NodeData {
                    label: table.clone(),
                    sub_label: None,
                    node_type: "table".to_string(),
                    tables: None,
                },
                position: Position::new(TABLE_OFFSET_X, row_y + table_index as f64 * TABLE_SPACING),
            });
            edges.push(FlowEdge::new(
                format!("e-{}-{}", step.id, table_id),
                &step.id,
                table_id,
                false,
            ));
        }

        for next_id in step.next.iter().flatten() {
            edges.push(FlowEdge::new(
                format!("e-{}-{}", step.id, next_id),
                &step.id,
                next_id,
                true,
            ));
        }
    }

    let (last_id, end_edge_id) = match steps.last() {
        Some(last) => (last.id.as_str(), format!("e-{}-end", last.id)),
        None => (START_NODE_ID, "e-start-end".to_string()),
    };
    nodes.push(FlowNode {
        id: END_NODE_ID.to_string(),
        kind: NodeKind::Special,
        data: NodeData {
            label: "Fin".to_string(),
            sub_label: None,
            node_type: "end".to_string(),
            tables: None,
        },
        position: Position::new(0.0, (steps.len() + 1) as f64 * STEP_SPACING),
    });
    edges.push(FlowEdge::new(end_edge_id, last_id, END_NODE_ID, true));

    FlowGraph { nodes, edges }
}
