//! Identifier handling for table and procedure names.
//!
//! Names are captured raw from the SQL text (`[dbo].[Orders]`, `dbo.Orders`,
//! `Orders`) and reported without bracket quoting. Schema qualification is
//! kept as written.

/// Removes every `[` and `]` from a captured identifier.
///
/// Unlike a trim, this also removes the brackets around each part of a
/// qualified name.
///
/// # Examples
///
/// ```
/// use rust_spflow::parser::strip_brackets;
///
/// assert_eq!(strip_brackets("[dbo].[Orders]"), "dbo.Orders");
/// assert_eq!(strip_brackets("Orders"), "Orders");
/// ```
pub fn strip_brackets(ident: &str) -> String {
    ident.chars().filter(|c| *c != '[' && *c != ']').collect()
}

/// Returns the last part of a possibly qualified name.
///
/// `[dbo].[WEB_Seek_Cliente]` becomes `WEB_Seek_Cliente`.
pub fn unqualified_name(ident: &str) -> String {
    let stripped = strip_brackets(ident);
    match stripped.rsplit('.').find(|part| !part.is_empty()) {
        Some(last) => last.to_string(),
        None => stripped,
    }
}
