//! relmap CLI - infer relations from a schema metadata dump
//!
//! Usage:
//!   relmap analyse <dump.json> [--schema <name>] [--format <json|summary>]
//!   relmap query
//!
//! Examples:
//!   relmap analyse catalog.json --schema public --format summary
//!   relmap query > introspect.sql

use clap::{Parser, Subcommand, ValueEnum};
use relmap::analysis::SchemaAnalyser;
use relmap::config::{OutputFormat, Settings};
use relmap::metadata::{
    postgres::INTROSPECTION_QUERY, JsonFileProvider, MetadataProvider, TimeoutProvider,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "relmap")]
#[command(about = "relmap - materialize schema relations as virtual columns")]
#[command(version)]
struct Cli {
    /// Path to a relmap.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a JSON dump of the catalog query output
    Analyse {
        /// Path to the JSON dump
        file: PathBuf,

        /// Schema to analyse (overrides the config file)
        #[arg(short, long)]
        schema: Option<String>,

        /// Output format (overrides the config file)
        #[arg(short, long)]
        format: Option<FormatArg>,
    },

    /// Print the PostgreSQL introspection query
    Query,
}

#[derive(Clone, ValueEnum)]
enum FormatArg {
    Json,
    Summary,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Summary => OutputFormat::Summary,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings);

    match cli.command {
        Commands::Analyse {
            file,
            schema,
            format,
        } => cmd_analyse(settings, file, schema, format).await,
        Commands::Query => {
            println!("{}", INTROSPECTION_QUERY.trim());
            ExitCode::SUCCESS
        }
    }
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_env("RELMAP_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(&settings.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn cmd_analyse(
    settings: Settings,
    file: PathBuf,
    schema: Option<String>,
    format: Option<FormatArg>,
) -> ExitCode {
    let schema = match schema {
        Some(s) => s,
        None => match settings.analysis.resolved_schema() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };
    let format = format.map(OutputFormat::from).unwrap_or(settings.output.format);

    let json = JsonFileProvider::new(&file);
    let provider: Box<dyn MetadataProvider> = match settings.analysis.fetch_timeout() {
        Some(timeout) => Box::new(TimeoutProvider::new(json, timeout)),
        None => Box::new(json),
    };

    let mut analyser = SchemaAnalyser::new(schema, provider);
    let result = match analyser.run().await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Analysis of {} failed: {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match format {
        OutputFormat::Summary => print!("{}", result),
        OutputFormat::Json => {
            let json = if settings.output.pretty {
                serde_json::to_string_pretty(result.tables())
            } else {
                serde_json::to_string(result.tables())
            };
            match json {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing result: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}
