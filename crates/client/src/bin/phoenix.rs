//! Command line access to a Phoenix server.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use arrow_cast::pretty::pretty_format_batches;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use phoenix_client::decode::decode_tables;
use phoenix_client::{Client, Evaluations, QueryOptions, SpanQuery, TimeRange, TraceDataset};

#[derive(Parser)]
#[command(name = "phoenix")]
#[command(about = "Query and upload Phoenix spans, evaluations and traces", long_about = None)]
struct Cli {
    /// Phoenix server URL. Defaults to PHOENIX_COLLECTOR_ENDPOINT, then PHOENIX_HOST/PHOENIX_PORT
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Query spans and print the resulting tables
    QuerySpans {
        /// Span query as a JSON object. May be repeated
        #[arg(long = "query")]
        queries: Vec<SpanQuery>,

        /// Earliest span start time (RFC 3339)
        #[arg(long)]
        start: Option<DateTime<Utc>>,

        /// Latest span start time (RFC 3339)
        #[arg(long)]
        stop: Option<DateTime<Utc>>,

        #[arg(long)]
        root_spans_only: bool,

        #[arg(long)]
        project: Option<String>,
    },

    /// Print every evaluation logged for a project
    GetEvaluations {
        #[arg(long)]
        project: Option<String>,
    },

    /// Upload evaluation tables stored as Arrow IPC streams
    LogEvaluations {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long)]
        project: Option<String>,
    },

    /// Export spans read from a JSON lines file
    LogTraces {
        file: PathBuf,

        #[arg(long)]
        project: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut builder = Client::builder();
    if let Some(endpoint) = cli.endpoint {
        builder = builder.endpoint(endpoint);
    }
    let client = builder.build()?;

    match cli.command {
        Command::QuerySpans {
            queries,
            start,
            stop,
            root_spans_only,
            project,
        } => {
            let options = QueryOptions {
                time_range: TimeRange::new(start, stop),
                root_spans_only: root_spans_only.then_some(true),
                project_name: project,
            };
            match client.query_spans(queries, &options)? {
                Some(result) => {
                    for table in result.into_tables() {
                        println!("{}", pretty_format_batches(&[table])?);
                    }
                }
                None => println!("No spans found."),
            }
        }
        Command::GetEvaluations { project } => {
            for evals in client.get_evaluations(project.as_deref())? {
                println!("{} ({:?}, {})", evals.eval_name, evals.kind, evals.eval_id);
                println!("{}", pretty_format_batches(&[evals.table])?);
            }
        }
        Command::LogEvaluations { files, project } => {
            let mut evals = Vec::new();
            for path in &files {
                let data = std::fs::read(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                for table in decode_tables(&data)
                    .with_context(|| format!("invalid Arrow stream in {}", path.display()))?
                {
                    evals.push(Evaluations::from_table(table)?);
                }
            }
            client.log_evaluations(&evals, project.as_deref())?;
            println!("Logged {} evaluation table(s).", evals.len());
        }
        Command::LogTraces { file, project } => {
            let name = file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let reader = BufReader::new(
                File::open(&file).with_context(|| format!("failed to open {}", file.display()))?,
            );
            let dataset = TraceDataset::from_json_lines(name, reader)?;
            client.log_traces(&dataset, project.as_deref())?;
            println!("Exported {} span(s).", dataset.len());
        }
    }

    client.close();
    Ok(())
}
