use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rust_spflow::parser::clean_sql;
use rust_spflow::scan::{scan_directory, ScanOptions};
use rust_spflow::source::{read_sql_file, read_sql_stdin};
use rust_spflow::{
    build_flow_graph, generate_flow_json, layout_graph, parse_sql_flow, render_mermaid,
    resolve_procedure_name, LayoutConfig,
};

#[derive(Parser)]
#[command(name = "rust-spflow")]
#[command(author, version, about = "Control-flow graphs for SQL Server stored procedures")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parsed flow steps as JSON
    Steps {
        /// Procedure SQL file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the flow graph (nodes and edges) as JSON
    Graph {
        /// Procedure SQL file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Procedure name used for labels (defaults to the CREATE PROCEDURE name)
        #[arg(short, long)]
        name: Option<String>,

        /// Keep the placeholder positions instead of running the layout pass
        #[arg(long)]
        no_layout: bool,
    },

    /// Print the flow as a Mermaid flowchart
    Mermaid {
        /// Procedure SQL file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Procedure name (defaults to the CREATE PROCEDURE name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Print the SQL with comments removed
    Clean {
        /// Procedure SQL file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Answer a JSON request {"sql": ..., "spName": ...} with steps, nodes and edges
    Request {
        /// Request JSON file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Summarize parameters and tables of every procedure script in a directory
    Scan {
        /// Directory to scan recursively
        #[arg(short, long)]
        dir: PathBuf,

        /// File name pattern
        #[arg(short, long, default_value = "*.sql")]
        pattern: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "rust_spflow=debug" } else { "rust_spflow=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(input: Option<&Path>) -> Result<String> {
    let text = match input {
        Some(path) => read_sql_file(path)?,
        None => read_sql_stdin()?,
    };
    Ok(text)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Steps { input } => {
            let sql = read_input(input.as_deref())?;
            let steps = parse_sql_flow(&sql);
            println!("{}", serde_json::to_string_pretty(&steps)?);
        }
        Commands::Graph {
            input,
            name,
            no_layout,
        } => {
            let sql = read_input(input.as_deref())?;
            let name = resolve_procedure_name(&sql, name.as_deref());
            let steps = parse_sql_flow(&sql);
            let mut graph = build_flow_graph(&steps, &name);
            if !no_layout {
                layout_graph(&mut graph, &LayoutConfig::default());
            }
            println!("{}", serde_json::to_string_pretty(&graph)?);
        }
        Commands::Mermaid { input, name } => {
            let sql = read_input(input.as_deref())?;
            let name = resolve_procedure_name(&sql, name.as_deref());
            let steps = parse_sql_flow(&sql);
            print!("{}", render_mermaid(&steps, &name));
        }
        Commands::Clean { input } => {
            let sql = read_input(input.as_deref())?;
            println!("{}", clean_sql(&sql));
        }
        Commands::Request { input } => {
            let request = read_input(input.as_deref())?;
            println!("{}", generate_flow_json(&request, &LayoutConfig::default())?);
        }
        Commands::Scan { dir, pattern } => {
            let options = ScanOptions { root: dir, pattern };
            let summaries = scan_directory(&options)?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }

    Ok(())
}
