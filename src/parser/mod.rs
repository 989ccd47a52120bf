//! Heuristic T-SQL procedure parsing
//!
//! Turns the text of a stored procedure into an ordered chain of flow steps.
//! Every stage is regex driven and best effort: any input, including empty or
//! malformed SQL, produces a (possibly empty) step list and never an error.

mod comments;
mod identifier_utils;
mod parameter_parser;
mod statement_parser;
mod table_extract;

use tracing::debug;

use crate::model::{FlowStep, StepType};

pub use comments::{clean_sql, strip_comments};
pub use identifier_utils::{strip_brackets, unqualified_name};
pub use parameter_parser::{
    extract_parameter_names, parse_procedure_header, procedure_name, ProcedureHeader,
};
pub use statement_parser::{segment_statements, RawSegment};
pub use table_extract::extract_tables;

/// Parse a procedure definition into flow steps.
///
/// The first step is a `params` step when the header declares `@` parameters.
/// Each following step is one statement segment of the body; data
/// manipulation steps carry the tables they reference. Every step but the
/// last links to its successor.
pub fn parse_sql_flow(sql: &str) -> Vec<FlowStep> {
    let clean = strip_comments(sql);
    let mut steps: Vec<FlowStep> = Vec::new();
    let mut counter = 0usize;
    let mut next_id = || {
        let id = format!("step_{counter}");
        counter += 1;
        id
    };

    let parameters = extract_parameter_names(&clean);
    if !parameters.is_empty() {
        steps.push(FlowStep::new(next_id(), StepType::Params, parameters.join(", ")));
    }

    for segment in segment_statements(&clean) {
        let mut step = FlowStep::new(next_id(), segment.step_type, segment.content);
        if step.step_type.references_tables() {
            step.tables = extract_tables(&step.content);
        }
        if let Some(previous) = steps.last_mut() {
            previous.next = Some(vec![step.id.clone()]);
        }
        steps.push(step);
    }

    debug!(
        steps = steps.len(),
        parameters = parameters.len(),
        "parsed procedure flow"
    );

    steps
}
