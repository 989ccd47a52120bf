//! Directory scan tests

use pretty_assertions::assert_eq;
use rust_spflow::scan::{find_sql_files, scan_directory, ScanOptions};

use crate::common::TestContext;

#[test]
fn test_scan_fixture_directory() {
    let ctx = TestContext::with_fixture("procedures");
    let summaries = scan_directory(&ScanOptions::new(&ctx.root)).unwrap();

    let procedures: Vec<&str> = summaries.iter().map(|s| s.procedure.as_str()).collect();
    assert_eq!(
        procedures,
        vec![
            "dbo.WEB_Seek_Cliente",
            "dbo.usp_ReportTotals",
            "Sales.usp_ProcessOrder"
        ]
    );

    let process = &summaries[2];
    assert_eq!(process.steps, 9);
    assert_eq!(process.parameters, vec!["@OrderId", "@Amount", "@Result"]);
    assert_eq!(
        process.tables,
        vec!["Sales.Orders", "Sales.OrderHistory", "Sales.Drafts"]
    );
}

#[test]
fn test_scan_skips_non_matching_files() {
    let ctx = TestContext::with_fixture("procedures");
    let files = find_sql_files(&ScanOptions::new(&ctx.root)).unwrap();
    assert_eq!(files.len(), 3);
    assert!(files.iter().all(|f| f.extension().is_some_and(|e| e == "sql")));
}

#[test]
fn test_scan_custom_pattern() {
    let ctx = TestContext::with_fixture("procedures");
    let options = ScanOptions {
        root: ctx.root.clone(),
        pattern: "usp_*.sql".to_string(),
    };
    let summaries = scan_directory(&options).unwrap();
    assert_eq!(summaries.len(), 2);
}

#[test]
fn test_scan_empty_directory() {
    let ctx = TestContext::empty();
    let summaries = scan_directory(&ScanOptions::new(&ctx.root)).unwrap();
    assert!(summaries.is_empty());
}

#[test]
fn test_scan_reads_windows_1252_scripts() {
    let ctx = TestContext::empty();
    // "Año" with ñ as a single 0xF1 byte
    let mut bytes = b"CREATE PROCEDURE dbo.usp_Ventas @A\xF1o INT AS SELECT * FROM Ventas".to_vec();
    bytes.push(b'\n');
    ctx.write_file("ansi/usp_Ventas.sql", &bytes);

    let summaries = scan_directory(&ScanOptions::new(&ctx.root)).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].parameters, vec!["@Año"]);
    assert_eq!(summaries[0].tables, vec!["Ventas"]);
}

#[test]
fn test_scan_many_files_in_parallel() {
    let ctx = TestContext::empty();
    for i in 0..20 {
        let sql = format!("CREATE PROCEDURE dbo.usp_P{i:02} AS SELECT * FROM T{i:02}");
        ctx.write_file(&format!("p{i:02}.sql"), sql.as_bytes());
    }

    let summaries = scan_directory(&ScanOptions::new(&ctx.root)).unwrap();
    assert_eq!(summaries.len(), 20);
    for (i, summary) in summaries.iter().enumerate() {
        assert_eq!(summary.procedure, format!("dbo.usp_P{i:02}"));
        assert_eq!(summary.tables, vec![format!("T{i:02}")]);
    }
}

#[test]
fn test_scan_missing_directory_fails() {
    let ctx = TestContext::empty();
    let result = scan_directory(&ScanOptions::new(ctx.root.join("missing")));
    assert!(result.is_err());
}
