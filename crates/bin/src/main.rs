//! SEF CLI binary.
//!
//! Provides a command-line interface for ranking firms and computing their
//! N/M cost-efficiency series from a CSV dataset.

mod integration;

use clap::{Parser, Subcommand, ValueEnum};
use integration::data_pipeline::{RangeArgs, load_session};
use sef::metrics::{AnalysisConfig, AnalysisView, DEFAULT_SEARCH_LIMIT, DEFAULT_TOP_FIRMS};
use sef::output::{
    ExportError, ExportFormat, Exporter, MetricTable, RankingTable, Report, export_file_stem,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sef")]
#[command(about = "SEF: firm cost-change and efficiency calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Dataset CSV file
    #[arg(long, global = true, default_value = "export_dataset.csv")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank analyzable firms by market value in their latest year
    Top {
        #[command(flatten)]
        range: RangeArgs,

        /// Number of firms to list
        #[arg(long, default_value_t = DEFAULT_TOP_FIRMS)]
        limit: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compute N and M over consecutive years for one firm
    Analyze {
        /// Firm name (exact match)
        firm: String,

        #[command(flatten)]
        range: RangeArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write to this file, or into this directory as `<firm>_analysis.<ext>`
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Find firm names containing a query (case-insensitive)
    Search {
        /// Text to look for
        query: String,

        #[command(flatten)]
        range: RangeArgs,

        /// Maximum number of matches
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },

    /// Show the dataset's year span and firm counts
    Years,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain-text table
    Text,
    /// Markdown table
    Markdown,
    /// CSV rows
    Csv,
    /// Pretty-printed JSON
    Json,
    /// Timestamped JSON report (analyze only)
    Report,
}

impl OutputFormat {
    const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
            Self::Csv => "csv",
            Self::Json | Self::Report => "json",
        }
    }

    /// The file exporter behind this format, if it has one.
    const fn export_format(self) -> Option<ExportFormat> {
        match self {
            Self::Csv => Some(ExportFormat::Csv),
            Self::Json => Some(ExportFormat::Json),
            Self::Text | Self::Markdown | Self::Report => None,
        }
    }
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Top {
            range,
            limit,
            format,
            output,
        } => {
            let config = AnalysisConfig {
                top_firms: limit,
                ..AnalysisConfig::default()
            };
            top_firms(&cli.data, config, &range, format, output.as_deref())?;
        }
        Commands::Analyze {
            firm,
            range,
            format,
            output,
        } => {
            analyze_firm(&cli.data, &firm, &range, format, output.as_deref())?;
        }
        Commands::Search {
            query,
            range,
            limit,
        } => {
            let config = AnalysisConfig {
                search_limit: limit,
                ..AnalysisConfig::default()
            };
            search(&cli.data, config, &range, &query)?;
        }
        Commands::Years => {
            show_years(&cli.data)?;
        }
    }

    Ok(())
}

fn top_firms(
    data: &Path,
    config: AnalysisConfig,
    range: &RangeArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = load_session(data, config, range)?;
    let table = RankingTable::new(session.range(), session.top_firms());

    if export_table(&table, format, output)? {
        return Ok(());
    }

    let content = match format {
        OutputFormat::Text => table.to_ascii_table(),
        OutputFormat::Markdown => table.to_markdown(),
        OutputFormat::Csv => table.export_to_string(ExportFormat::Csv)?,
        OutputFormat::Json => table.export_to_string(ExportFormat::Json)?,
        OutputFormat::Report => {
            return Err("the report format is only available for `analyze`".into());
        }
    };

    emit(&content, output)
}

fn analyze_firm(
    data: &Path,
    firm: &str,
    range: &RangeArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = load_session(data, AnalysisConfig::default(), range)?;
    session.select_firm(firm);

    let analysis = match session.analyze_selected() {
        AnalysisView::Ready(analysis) => analysis,
        AnalysisView::InsufficientData { firm } => {
            if session.groups().get(&firm).is_some() {
                println!("Insufficient data for {firm} (requires consecutive years).");
            } else {
                println!("No firm named {firm:?} in the selected years.");
                let suggestions = session.search(&firm);
                if !suggestions.is_empty() {
                    println!("Did you mean: {}", suggestions.join(", "));
                }
            }
            return Ok(());
        }
        AnalysisView::NoData | AnalysisView::NoSelection => {
            return Err("dataset is empty".into());
        }
    };

    let elapsed = analysis.elapsed;
    let table = MetricTable::from(analysis).with_range(session.range());

    let target = output.map(|path| {
        if path.is_dir() {
            path.join(format!("{}.{}", export_file_stem(firm), format.extension()))
        } else {
            path.to_path_buf()
        }
    });

    if export_table(&table, format, target.as_deref())? {
        return Ok(());
    }

    let content = match format {
        OutputFormat::Text => {
            let mut text = table.to_ascii_table();
            text.push_str(&format!(
                "Computed in {:.2}ms\n",
                elapsed.as_secs_f64() * 1000.0
            ));
            text
        }
        OutputFormat::Markdown => table.to_markdown(),
        OutputFormat::Csv => table.export_to_string(ExportFormat::Csv)?,
        OutputFormat::Json => table.export_to_string(ExportFormat::Json)?,
        OutputFormat::Report => Report::from_table(&table)?.to_json()?,
    };

    emit(&content, target.as_deref())
}

fn search(
    data: &Path,
    config: AnalysisConfig,
    range: &RangeArgs,
    query: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = load_session(data, config, range)?;
    let matches = session.search(query);

    if matches.is_empty() {
        println!("No firms match {query:?}.");
    } else {
        for name in matches {
            println!("{name}");
        }
    }

    Ok(())
}

fn show_years(data: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let session = load_session(data, AnalysisConfig::default(), &RangeArgs::default())?;
    let groups = session.groups();

    match session.bounds() {
        Some(bounds) => println!(
            "Years: {} to {} ({} years)",
            bounds.from,
            bounds.to,
            bounds.span()
        ),
        None => println!("Years: none"),
    }
    println!("Records: {}", session.records().len());
    println!("Firms loaded: {}", groups.len());
    println!("Analyzable firms: {}", groups.eligible().count());
    if groups.duplicates() > 0 {
        println!(
            "Duplicate firm-years ignored: {} (first occurrence kept)",
            groups.duplicates()
        );
    }

    Ok(())
}

/// Write `table` through its file exporter when both a path and an
/// exportable format are given. Returns whether anything was written.
fn export_table<T: Exporter>(
    table: &T,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<bool, ExportError> {
    let (Some(path), Some(export)) = (output, format.export_format()) else {
        return Ok(false);
    };
    table.export_to_file(path, export)?;
    println!("Wrote {}", path.display());
    Ok(true)
}

fn emit(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
