//! Reading procedure source text from files and standard input

use std::io::Read;
use std::path::Path;

use encoding_rs::WINDOWS_1252;

use crate::error::SpFlowError;

/// Decode bytes as UTF-8, falling back to Windows-1252.
///
/// Scripts exported from SQL Server tooling on Windows are often ANSI
/// encoded. A UTF-8 byte order mark is dropped.
pub fn decode_sql_bytes(bytes: Vec<u8>) -> std::io::Result<String> {
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s
            .strip_prefix('\u{feff}')
            .map(str::to_string)
            .unwrap_or(s)),
        Err(err) => {
            let bytes = err.into_bytes();
            let (decoded, _, had_errors) = WINDOWS_1252.decode(&bytes);
            if had_errors {
                Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "File contains invalid characters",
                ))
            } else {
                Ok(decoded.into_owned())
            }
        }
    }
}

/// Read a SQL file, trying UTF-8 first, then Windows-1252
pub fn read_sql_file(path: &Path) -> Result<String, SpFlowError> {
    std::fs::read(path)
        .and_then(decode_sql_bytes)
        .map_err(|source| SpFlowError::SqlFileReadError {
            path: path.to_path_buf(),
            source,
        })
}

/// Read all of standard input as SQL text
pub fn read_sql_stdin() -> Result<String, SpFlowError> {
    let mut bytes = Vec::new();
    std::io::stdin()
        .read_to_end(&mut bytes)
        .and_then(|_| decode_sql_bytes(bytes))
        .map_err(|source| SpFlowError::StdinReadError { source })
}
