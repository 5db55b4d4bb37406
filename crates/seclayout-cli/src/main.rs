use clap::{Args, Parser, Subcommand};
use seclayout_core::{Graph, LayoutOptions, decode, process, sanitize};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug)]
enum CliError {
    Io(std::io::Error),
    Graph(seclayout_core::Error),
    Json(serde_json::Error),
    Config { path: PathBuf, source: serde_json::Error },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Graph(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Config { path, source } => {
                write!(f, "invalid config file {}: {source}", path.display())
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<seclayout_core::Error> for CliError {
    fn from(value: seclayout_core::Error) -> Self {
        Self::Graph(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "seclayout",
    version,
    about = "Sanitize a security-annotated graph and compute a layered layout",
    after_help = "NOTES:\n  - If <path> is omitted or '-', input is read from stdin.\n  - Output is JSON on stdout unless --out is given; logs go to stderr (SECLAYOUT_LOG)."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode, sanitize and lay out a graph; prints the annotated graph.
    Layout {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Decode and sanitize a graph without computing positions.
    Sanitize {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run the full pipeline and print a summary instead of the graph.
    Stats {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Graph JSON file, or '-' for stdin.
    #[arg(value_name = "PATH")]
    input: Option<String>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    #[arg(long)]
    pretty: bool,
    /// Write to this file instead of stdout.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct OptionArgs {
    /// JSON file with layout options (width, height, topMargin, levelHeight).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<i64>,
    #[arg(long)]
    height: Option<i64>,
    #[arg(long)]
    top_margin: Option<i64>,
    #[arg(long)]
    level_height: Option<i64>,
}

impl OptionArgs {
    fn resolve(&self) -> Result<LayoutOptions, CliError> {
        let mut opts = match &self.config {
            Some(path) => load_config(path)?,
            None => LayoutOptions::default(),
        };
        if let Some(v) = self.width {
            opts.width = v;
        }
        if let Some(v) = self.height {
            opts.height = v;
        }
        if let Some(v) = self.top_margin {
            opts.top_margin = v;
        }
        if let Some(v) = self.level_height {
            opts.level_height = v;
        }
        opts.validate()?;
        Ok(opts)
    }
}

fn load_config(path: &Path) -> Result<LayoutOptions, CliError> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SECLAYOUT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if std::env::var("DEBUG").is_ok() {
            "seclayout=debug,seclayout_core=debug,info"
        } else {
            "seclayout=info,seclayout_core=info,warn"
        })
    });

    let format = std::env::var("SECLAYOUT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn read_input(input: &InputArgs) -> Result<Graph, CliError> {
    let graph = match input.input.as_deref() {
        None | Some("-") => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            decode::from_slice(&buf)?
        }
        Some(path) => decode::from_slice(&std::fs::read(path)?)?,
    };
    Ok(graph)
}

fn write_json(value: &impl Serialize, output: &OutputArgs) -> Result<(), CliError> {
    let mut writer: Box<dyn Write> = match &output.out {
        Some(path) => Box::new(std::io::BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };
    if output.pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Layout {
            input,
            output,
            options,
        } => {
            let opts = options.resolve()?;
            let mut graph = read_input(&input)?;
            let report = process(&mut graph, &opts);
            tracing::info!(
                nodes = report.nodes,
                edges = report.edges,
                max_level = report.layout.max_level,
                "layout complete"
            );
            write_json(&graph, &output)
        }
        Command::Sanitize { input, output } => {
            let mut graph = read_input(&input)?;
            let report = sanitize(&mut graph);
            tracing::info!(
                dropped_edges = report.dropped_edges,
                dropped_nodes = report.dropped_nodes,
                "sanitize complete"
            );
            write_json(&graph, &output)
        }
        Command::Stats {
            input,
            output,
            options,
        } => {
            let opts = options.resolve()?;
            let mut graph = read_input(&input)?;
            let report = process(&mut graph, &opts);
            write_json(&report, &output)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(cli) {
        tracing::debug!(?err, "command failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
