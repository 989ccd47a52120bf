//! End-to-end tests for the JSON request API

use pretty_assertions::assert_eq;
use rust_spflow::{generate_flow, generate_flow_json, FlowRequest, FlowResponse, LayoutConfig};
use serde_json::{json, Value};

use crate::common::procedure_sql;

#[test]
fn test_request_json_round_trip() {
    let request = json!({
        "sql": procedure_sql("WEB_Seek_Cliente.sql"),
        "spName": "WEB_Seek_Cliente"
    })
    .to_string();

    let response = generate_flow_json(&request, &LayoutConfig::default()).unwrap();
    let value: Value = serde_json::from_str(&response).unwrap();

    assert_eq!(value["steps"].as_array().unwrap().len(), 2);
    assert_eq!(value["nodes"][0]["data"]["subLabel"], "WEB_Seek_Cliente");
    assert_eq!(value["nodes"][2]["data"]["subLabel"], "Consultar datos de dbo.Cliente");
    assert_eq!(value["nodes"].as_array().unwrap().len(), 2 + 2 + 2);
    assert_eq!(value["edges"].as_array().unwrap().len(), 1 + 1 + 2 + 1);
}

#[test]
fn test_request_without_name_uses_header() {
    let request = FlowRequest {
        sql: procedure_sql("usp_ProcessOrder.sql"),
        sp_name: String::new(),
    };
    let response = generate_flow(&request, &LayoutConfig::default());
    assert_eq!(
        response.nodes[0].data.sub_label.as_deref(),
        Some("usp_ProcessOrder")
    );
}

#[test]
fn test_request_missing_name_field_is_accepted() {
    let response = generate_flow_json(r#"{"sql": ""}"#, &LayoutConfig::default()).unwrap();
    let parsed: FlowResponse = serde_json::from_str(&response).unwrap();
    assert!(parsed.steps.is_empty());
    assert_eq!(parsed.nodes.len(), 2);
    assert_eq!(parsed.edges[0].source, "start");
    assert_eq!(parsed.edges[0].target, "end");
}

#[test]
fn test_request_with_garbage_sql_still_answers() {
    let request = json!({ "sql": "AS AS AS )))((( BEGIN", "spName": "x" }).to_string();
    let response = generate_flow_json(&request, &LayoutConfig::default()).unwrap();
    let parsed: FlowResponse = serde_json::from_str(&response).unwrap();
    assert!(parsed.steps.is_empty());
}

#[test]
fn test_invalid_request_reports_error() {
    let err = generate_flow_json(r#"{"spName": "x"}"#, &LayoutConfig::default()).unwrap_err();
    assert!(err.to_string().starts_with("Invalid flow request"));
}

#[test]
fn test_response_positions_are_laid_out() {
    let request = FlowRequest {
        sql: procedure_sql("nested/usp_ReportTotals.sql"),
        sp_name: "usp_ReportTotals".to_string(),
    };
    let response = generate_flow(&request, &LayoutConfig::default());

    // the builder's placeholder for Start is (0, 0); layout moves it to a top-left corner
    let start = &response.nodes[0];
    assert_eq!((start.position.x, start.position.y), (-125.0, -40.0));
}
