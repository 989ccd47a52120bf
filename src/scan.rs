//! Batch scanning of procedure scripts
//!
//! Walks a directory of `.sql` files, parses each one and reports the
//! procedure's parameters and every table its body touches. This is the
//! "detected tables" record a metadata store keeps per procedure.

use std::path::{Path, PathBuf};

use anyhow::Result;
use glob::Pattern;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::SpFlowError;
use crate::parser::{parse_procedure_header, parse_sql_flow, strip_comments};
use crate::source::read_sql_file;

/// Minimum number of files to benefit from parallel processing.
/// Below this threshold, sequential processing is faster due to rayon overhead.
const PARALLEL_THRESHOLD: usize = 8;

/// Options for scanning a directory of procedure scripts
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Directory to walk recursively
    pub root: PathBuf,
    /// File name pattern, e.g. `*.sql`
    pub pattern: String,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            pattern: "*.sql".to_string(),
        }
    }
}

/// What one script's procedure reads and writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcedureSummary {
    pub file: PathBuf,
    /// Header name, or the file stem when the header could not be found
    pub procedure: String,
    pub steps: usize,
    pub parameters: Vec<String>,
    /// Tables across all steps, first-seen order
    pub tables: Vec<String>,
}

/// Summarize one procedure's SQL text
pub fn summarize_procedure(sql: &str, file: &Path) -> ProcedureSummary {
    let header = parse_procedure_header(&strip_comments(sql));
    let steps = parse_sql_flow(sql);

    let mut tables: Vec<String> = Vec::new();
    for table in steps.iter().flat_map(|s| s.tables.iter()) {
        if !tables.contains(table) {
            tables.push(table.clone());
        }
    }

    let (procedure, parameters) = match header {
        Some(header) => (header.name, header.parameters),
        None => {
            debug!(file = %file.display(), "no procedure header, using file name");
            let stem = file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("procedure")
                .to_string();
            (stem, Vec::new())
        }
    };

    ProcedureSummary {
        file: file.to_path_buf(),
        procedure,
        steps: steps.len(),
        parameters,
        tables,
    }
}

/// Find script files under `options.root` matching `options.pattern`, sorted by path
pub fn find_sql_files(options: &ScanOptions) -> Result<Vec<PathBuf>> {
    let matcher = Pattern::new(&options.pattern).map_err(|source| SpFlowError::InvalidPattern {
        pattern: options.pattern.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(&options.root) {
        let entry = entry.map_err(|source| SpFlowError::DirectoryWalkError {
            path: options.root.clone(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| matcher.matches(name));
        if matches {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

fn scan_file(path: &Path) -> Result<ProcedureSummary> {
    let sql = read_sql_file(path)?;
    Ok(summarize_procedure(&sql, path))
}

/// Parse every matching script under a directory
pub fn scan_directory(options: &ScanOptions) -> Result<Vec<ProcedureSummary>> {
    let files = find_sql_files(options)?;
    if files.is_empty() {
        warn!(
            root = %options.root.display(),
            pattern = %options.pattern,
            "no SQL files found"
        );
        return Ok(Vec::new());
    }

    let summaries: Vec<ProcedureSummary> = if files.len() >= PARALLEL_THRESHOLD {
        files
            .par_iter()
            .map(|file| scan_file(file))
            .collect::<Result<_>>()?
    } else {
        files
            .iter()
            .map(|file| scan_file(file))
            .collect::<Result<_>>()?
    };

    let table_count: usize = summaries.iter().map(|s| s.tables.len()).sum();
    info!(
        files = summaries.len(),
        tables = table_count,
        "scanned procedure scripts"
    );

    Ok(summaries)
}
