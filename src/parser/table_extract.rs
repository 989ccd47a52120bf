//! Table reference extraction from statement segments
//!
//! Scans a segment for `FROM`, `JOIN`, `UPDATE`, `INSERT INTO` and
//! `DELETE FROM` followed by an identifier. Derived tables, table variables
//! (`@t`) and function calls do not match because the identifier must start
//! right after the keyword and may only contain word characters, dots and
//! brackets.

use std::sync::LazyLock;

use regex::Regex;

use super::identifier_utils::strip_brackets;

static TABLE_REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:FROM|JOIN|UPDATE|INSERT\s+INTO|DELETE\s+FROM)\s+([\w.\[\]]+)").unwrap()
});

/// Collect referenced table names in first-seen order, without duplicates.
///
/// Brackets are stripped (`[dbo].[Orders]` becomes `dbo.Orders`); the schema
/// part is kept as written, so `Orders` and `dbo.Orders` are different entries.
pub fn extract_tables(content: &str) -> Vec<String> {
    let mut tables: Vec<String> = Vec::new();

    for caps in TABLE_REFERENCE_RE.captures_iter(content) {
        let Some(raw) = caps.get(1) else { continue };
        let table = strip_brackets(raw.as_str());
        if table.is_empty() || tables.contains(&table) {
            continue;
        }
        tables.push(table);
    }

    tables
}
