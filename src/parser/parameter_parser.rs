//! Procedure header parsing
//!
//! Locates the `CREATE PROCEDURE` header and pulls out the procedure name and
//! the declared parameter names. Data types, defaults and OUTPUT markers are
//! not interpreted: only the leading `@name` of each comma-separated fragment
//! matters for the flow.
//!
//! ## Supported Syntax
//!
//! ```sql
//! CREATE PROCEDURE [schema].[name] AS ...
//! CREATE PROC [schema].[name] @p1 INT, @p2 VARCHAR(10) = NULL OUTPUT AS ...
//! CREATE OR ALTER PROCEDURE name (@p1 INT, @p2 INT) AS ...
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::identifier_utils::strip_brackets;

/// `CREATE [OR ALTER] PROC[EDURE] <name> <param-block> AS`, first occurrence.
///
/// The parameter block is the shortest run of text before a whitespace-led
/// `AS`, so it may be empty and never swallows an `AS` alias from the body.
static PROCEDURE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)\bCREATE\s+(?:OR\s+ALTER\s+)?PROC(?:EDURE)?\s+([\w.\[\]]+)(.*?)\s+AS\b",
    )
    .unwrap()
});

/// Header fields of a procedure definition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcedureHeader {
    /// Qualified name with brackets stripped, e.g. `dbo.GetUsers`
    pub name: String,
    /// Parameter names including the `@` prefix, in declaration order
    pub parameters: Vec<String>,
}

/// Parse the procedure header, if the text contains one.
pub fn parse_procedure_header(sql: &str) -> Option<ProcedureHeader> {
    let caps = PROCEDURE_HEADER_RE.captures(sql)?;
    let name = caps.get(1).map(|m| strip_brackets(m.as_str()))?;
    let block = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");

    Some(ProcedureHeader {
        name,
        parameters: split_parameter_names(block),
    })
}

/// Parameter names declared in the procedure header.
///
/// Empty when there is no header or the procedure takes no parameters.
pub fn extract_parameter_names(sql: &str) -> Vec<String> {
    parse_procedure_header(sql)
        .map(|header| header.parameters)
        .unwrap_or_default()
}

/// Qualified procedure name from the header, brackets stripped.
pub fn procedure_name(sql: &str) -> Option<String> {
    parse_procedure_header(sql).map(|header| header.name)
}

/// Split a raw parameter block into `@name` tokens.
///
/// The first whitespace-delimited token of each comma fragment is kept when
/// it starts with `@`. An opening parenthesis (parenthesized parameter list)
/// is ignored.
fn split_parameter_names(block: &str) -> Vec<String> {
    if block.is_empty() {
        return Vec::new();
    }

    block
        .split(',')
        .filter_map(|fragment| {
            let token = fragment
                .trim()
                .trim_start_matches('(')
                .split_whitespace()
                .next()?;
            // `@p INT)` in a parenthesized list can end up as `@p)` when no type follows
            let token = token.trim_end_matches(')');
            token.starts_with('@').then(|| token.to_string())
        })
        .collect()
}
