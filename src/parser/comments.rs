//! Comment stripping for T-SQL procedure text
//!
//! Removes `-- ...` line comments and `/* ... */` block comments while leaving
//! the line structure intact, so statements on separate lines never merge.
//! Comment markers inside string literals (`'--'`), bracketed identifiers
//! (`[a--b]`) and quoted identifiers (`"a/*b"`) are left alone.
//!
//! Block comments nest the way SQL Server nests them:
//! `/* outer /* inner */ still comment */`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    /// Inside `'...'`; `''` is an escaped quote
    StringLiteral,
    /// Inside a delimited identifier; the char is the closing delimiter
    DelimitedIdent(char),
    LineComment,
    BlockComment { depth: usize, saw_newline: bool },
}

/// Remove all comments from SQL text.
///
/// - A line comment is dropped up to (not including) its line break.
/// - Every line break inside a block comment is kept; a single-line block
///   comment becomes one space so `FROM/**/Bar` still reads as two tokens.
/// - An unterminated block comment runs to the end of the input.
pub fn strip_comments(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();
    let mut state = ScanState::Code;

    while let Some(c) = chars.next() {
        match state {
            ScanState::Code => match c {
                '-' if chars.peek() == Some(&'-') => {
                    chars.next();
                    state = ScanState::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = ScanState::BlockComment {
                        depth: 1,
                        saw_newline: false,
                    };
                }
                '\'' => {
                    out.push(c);
                    state = ScanState::StringLiteral;
                }
                '[' => {
                    out.push(c);
                    state = ScanState::DelimitedIdent(']');
                }
                '"' => {
                    out.push(c);
                    state = ScanState::DelimitedIdent('"');
                }
                _ => out.push(c),
            },
            ScanState::StringLiteral => {
                out.push(c);
                if c == '\'' {
                    if chars.peek() == Some(&'\'') {
                        chars.next();
                        out.push('\'');
                    } else {
                        state = ScanState::Code;
                    }
                }
            }
            ScanState::DelimitedIdent(close) => {
                out.push(c);
                if c == close {
                    // `]]` and `""` escape the delimiter
                    if chars.peek() == Some(&close) {
                        chars.next();
                        out.push(close);
                    } else {
                        state = ScanState::Code;
                    }
                }
            }
            ScanState::LineComment => {
                if c == '\n' || c == '\r' {
                    out.push(c);
                    state = ScanState::Code;
                }
            }
            ScanState::BlockComment { depth, saw_newline } => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    if depth == 1 {
                        if !saw_newline {
                            out.push(' ');
                        }
                        state = ScanState::Code;
                    } else {
                        state = ScanState::BlockComment {
                            depth: depth - 1,
                            saw_newline,
                        };
                    }
                } else if c == '/' && chars.peek() == Some(&'*') {
                    chars.next();
                    state = ScanState::BlockComment {
                        depth: depth + 1,
                        saw_newline,
                    };
                } else if c == '\n' || c == '\r' {
                    out.push(c);
                    state = ScanState::BlockComment {
                        depth,
                        saw_newline: true,
                    };
                }
            }
        }
    }

    out
}

/// Strip comments and surrounding whitespace.
pub fn clean_sql(sql: &str) -> String {
    if sql.is_empty() {
        return String::new();
    }
    strip_comments(sql).trim().to_string()
}
