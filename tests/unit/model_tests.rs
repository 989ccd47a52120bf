//! Unit tests for flow graph construction and labels

use pretty_assertions::assert_eq;
use rust_spflow::model::{business_label, NodeKind};
use rust_spflow::{build_flow_graph, parse_sql_flow, FlowStep, StepType};
use serde_json::json;

use crate::common::procedure_sql;

fn expected_counts(steps: &[FlowStep]) -> (usize, usize) {
    let tables: usize = steps.iter().map(|s| s.tables.len()).sum();
    let nodes = 2 + steps.len() + tables;
    let edges = if steps.is_empty() {
        1
    } else {
        1 + (steps.len() - 1) + tables + 1
    };
    (nodes, edges)
}

// ============================================================================
// Graph Shape
// ============================================================================

#[test]
fn test_graph_counts_match_steps_and_tables() {
    let sources = [
        String::new(),
        "CREATE PROCEDURE dbo.Foo @id INT AS SELECT * FROM Bar".to_string(),
        procedure_sql("WEB_Seek_Cliente.sql"),
        procedure_sql("usp_ProcessOrder.sql"),
        procedure_sql("nested/usp_ReportTotals.sql"),
    ];

    for sql in &sources {
        let steps = parse_sql_flow(sql);
        let graph = build_flow_graph(&steps, "p");
        let (nodes, edges) = expected_counts(&steps);
        assert_eq!(graph.nodes.len(), nodes, "nodes for {sql:?}");
        assert_eq!(graph.edges.len(), edges, "edges for {sql:?}");
    }
}

#[test]
fn test_start_first_end_last() {
    let steps = parse_sql_flow(&procedure_sql("usp_ProcessOrder.sql"));
    let graph = build_flow_graph(&steps, "usp_ProcessOrder");

    let first = graph.nodes.first().unwrap();
    let last = graph.nodes.last().unwrap();
    assert_eq!(first.id, "start");
    assert_eq!(first.data.label, "Inicio");
    assert_eq!(first.data.sub_label.as_deref(), Some("usp_ProcessOrder"));
    assert_eq!(last.id, "end");
    assert_eq!(last.data.label, "Fin");
}

#[test]
fn test_chain_edges_are_animated_table_edges_are_not() {
    let steps = parse_sql_flow(&procedure_sql("usp_ProcessOrder.sql"));
    let graph = build_flow_graph(&steps, "p");

    for edge in &graph.edges {
        let target_kind = graph.node(&edge.target).map(|n| n.kind);
        if target_kind == Some(NodeKind::Table) {
            assert_eq!(edge.animated, Some(false), "{}", edge.id);
        } else {
            assert_eq!(edge.animated, Some(true), "{}", edge.id);
        }
    }
}

#[test]
fn test_every_edge_connects_existing_nodes() {
    let steps = parse_sql_flow(&procedure_sql("usp_ProcessOrder.sql"));
    let graph = build_flow_graph(&steps, "p");

    for edge in &graph.edges {
        assert!(graph.node(&edge.source).is_some(), "missing {}", edge.source);
        assert!(graph.node(&edge.target).is_some(), "missing {}", edge.target);
    }
}

#[test]
fn test_if_else_stays_linear() {
    let steps = parse_sql_flow(
        "CREATE PROCEDURE p AS IF @x = 1 SELECT a FROM A ELSE SELECT b FROM B",
    );
    let graph = build_flow_graph(&steps, "p");

    let if_targets: Vec<&str> = graph.outgoing("step_0").map(|e| e.target.as_str()).collect();
    assert_eq!(if_targets, vec!["step_1"]);
    let else_node = graph.node("step_2").unwrap();
    assert_eq!(else_node.data.label, "Ruta Alternativa");
    assert_eq!(else_node.data.sub_label.as_deref(), Some("ELSE"));
}

// ============================================================================
// Labels
// ============================================================================

#[test]
fn test_seek_procedure_select_label() {
    let steps = parse_sql_flow("CREATE PROCEDURE dbo.WEB_Seek_Cliente AS SELECT * FROM Cliente");
    assert_eq!(
        business_label(&steps[0], "WEB_Seek_Cliente"),
        "Consultar datos de Cliente"
    );
}

#[test]
fn test_process_order_labels() {
    let steps = parse_sql_flow(&procedure_sql("usp_ProcessOrder.sql"));
    let labels: Vec<String> = steps
        .iter()
        .map(|s| business_label(s, "usp_ProcessOrder"))
        .collect();

    assert_eq!(labels[0], "@OrderId, @Amount, @Result");
    assert_eq!(labels[2], "Obtener de Sales.Orders");
    assert_eq!(labels[5], "Actualizar Sales.Orders");
    assert_eq!(labels[6], "Registrar en Sales.OrderHistory");
    assert_eq!(labels[7], "Borrar de Sales.Drafts");
    assert_eq!(labels[8], "RETURN @Result;");
}

#[test]
fn test_params_node_category() {
    let steps = parse_sql_flow("CREATE PROCEDURE p @a INT, @b INT AS RETURN 0");
    let graph = build_flow_graph(&steps, "p");
    let params = graph.node("step_0").unwrap();
    assert_eq!(params.data.label, "Parámetros de Entrada");
    assert_eq!(params.data.node_type, StepType::Params.as_str());
    assert_eq!(params.data.tables, Some(Vec::new()));
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_step_json_shape() {
    let steps = parse_sql_flow("CREATE PROCEDURE dbo.Foo @id INT AS SELECT * FROM Bar");
    let value = serde_json::to_value(&steps).unwrap();

    assert_eq!(
        value,
        json!([
            { "id": "step_0", "type": "params", "content": "@id", "tables": [], "next": ["step_1"] },
            { "id": "step_1", "type": "select", "content": "SELECT * FROM Bar", "tables": ["Bar"] }
        ])
    );
}

#[test]
fn test_node_and_edge_json_shape() {
    let steps = parse_sql_flow("CREATE PROCEDURE dbo.Foo @id INT AS SELECT * FROM Bar");
    let graph = build_flow_graph(&steps, "Foo");
    let value = serde_json::to_value(&graph).unwrap();

    assert_eq!(
        value["nodes"][0],
        json!({
            "id": "start",
            "type": "special",
            "data": { "label": "Inicio", "subLabel": "Foo", "type": "start" },
            "position": { "x": 0.0, "y": 0.0 }
        })
    );
    assert_eq!(
        value["nodes"][3],
        json!({
            "id": "table-step_1-0",
            "type": "table",
            "data": { "label": "Bar", "type": "table" },
            "position": { "x": 250.0, "y": 300.0 }
        })
    );
    assert_eq!(
        value["edges"][2],
        json!({ "id": "e-step_1-table-step_1-0", "source": "step_1", "target": "table-step_1-0", "animated": false })
    );
}

#[test]
fn test_steps_round_trip_through_json() {
    let steps = parse_sql_flow(&procedure_sql("usp_ProcessOrder.sql"));
    let json = serde_json::to_string(&steps).unwrap();
    let back: Vec<FlowStep> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, steps);
}
