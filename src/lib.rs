//! rust-spflow: control-flow graphs for SQL Server stored procedures
//!
//! This library reads the T-SQL text of a stored procedure and extracts a
//! best-effort chain of steps (parameters, SELECT/INSERT/UPDATE/DELETE,
//! IF/ELSE, RETURN) with the tables each one touches, then turns that chain
//! into a node/edge graph or a Mermaid flowchart for visualization.
//!
//! Parsing is heuristic and never fails: malformed SQL yields fewer steps.

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod scan;
pub mod source;
mod util;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::SpFlowError;
pub use model::{build_flow_graph, FlowEdge, FlowGraph, FlowNode, FlowStep, StepType};
pub use parser::parse_sql_flow;
pub use render::{layout_graph, render_mermaid, LayoutConfig};

/// Name used when neither the caller nor the SQL header provides one
pub const DEFAULT_PROCEDURE_NAME: &str = "procedure";

/// Request envelope: procedure SQL plus its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowRequest {
    pub sql: String,
    #[serde(rename = "spName", default)]
    pub sp_name: String,
}

/// Steps and laid-out graph for one procedure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowResponse {
    pub steps: Vec<FlowStep>,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

/// Name to label a procedure with: the given name, else the unqualified
/// header name, else [`DEFAULT_PROCEDURE_NAME`].
pub fn resolve_procedure_name(sql: &str, given: Option<&str>) -> String {
    if let Some(name) = given.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    parser::procedure_name(&parser::strip_comments(sql))
        .map(|name| parser::unqualified_name(&name))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_PROCEDURE_NAME.to_string())
}

/// Parse, build and lay out the flow for a request.
///
/// Never fails; SQL that cannot be read as a procedure produces just the
/// Start and End nodes.
pub fn generate_flow(request: &FlowRequest, layout: &LayoutConfig) -> FlowResponse {
    let name = resolve_procedure_name(&request.sql, Some(&request.sp_name));
    let steps = parse_sql_flow(&request.sql);
    if steps.is_empty() {
        debug!(procedure = %name, "no steps found, flow is Start -> End only");
    }

    let mut graph = build_flow_graph(&steps, &name);
    layout_graph(&mut graph, layout);

    FlowResponse {
        steps,
        nodes: graph.nodes,
        edges: graph.edges,
    }
}

/// JSON `{ "sql", "spName" }` in, JSON `{ "steps", "nodes", "edges" }` out.
pub fn generate_flow_json(request_json: &str, layout: &LayoutConfig) -> Result<String, SpFlowError> {
    let request: FlowRequest =
        serde_json::from_str(request_json).map_err(|source| SpFlowError::InvalidRequest {
            message: source.to_string(),
            source,
        })?;
    let response = generate_flow(&request, layout);
    Ok(serde_json::to_string(&response)?)
}
