// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use entity_extract::exporter::to_json;
use entity_extract::input::read_stdin;
use entity_extract::utils::logging::{format_error, format_info, format_success, format_warning};
use entity_extract::{
    BatchReport, BatchRunner, Config, EntityExtractor, EntityKind, FileReport, JsonExporter,
    OutputFormat, OverlapPolicy, SAMPLE_TEXT, TextPrinter, Validator,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "entity_extract")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Extract emails, phone numbers, dates and other entities from text", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Default)]
struct OutputArgs {
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    #[arg(short, long)]
    pretty: bool,

    /// Show byte offsets next to each match in text output
    #[arg(long)]
    offsets: bool,
}

#[derive(clap::Args, Default)]
struct ExtractionArgs {
    /// Entity kinds to extract (repeatable); defaults to every kind
    #[arg(short = 'k', long = "kind", value_name = "KIND")]
    kinds: Vec<EntityKind>,

    #[arg(long, value_enum)]
    overlap: Option<OverlapPolicy>,

    /// Drop repeated matches of the same kind
    #[arg(long)]
    unique: bool,

    /// Attach this many bytes of surrounding text to each match
    #[arg(long, value_name = "BYTES")]
    context: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract entities from a file, a directory, stdin or inline text
    Extract {
        /// File or directory to scan; stdin is read when omitted
        path: Option<PathBuf>,

        #[arg(long, conflicts_with = "path")]
        text: Option<String>,

        #[command(flatten)]
        extraction: ExtractionArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Write one JSON file per input plus a manifest into this directory
        #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
        output_dir: Option<PathBuf>,

        #[arg(long)]
        no_progress: bool,
    },

    /// List every entity kind
    Kinds,

    /// Run the extractor on a built-in sample passage
    Sample {
        #[command(flatten)]
        extraction: ExtractionArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    entity_extract::utils::logging::init_logger(cli.color, cli.verbose);

    let config = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Extract {
            path,
            text,
            extraction,
            output,
            output_dir,
            no_progress,
        } => {
            let mut config = apply_overrides(config, &extraction, &output)?;
            if no_progress {
                config.output.progress = false;
            }
            cmd_extract(&config, path, text, output_dir, cli.color)?;
        }
        Commands::Kinds => {
            cmd_kinds();
        }
        Commands::Sample { extraction, output } => {
            let config = apply_overrides(config, &extraction, &output)?;
            cmd_sample(&config, cli.color)?;
        }
    }

    Ok(())
}

fn apply_overrides(
    mut config: Config,
    extraction: &ExtractionArgs,
    output: &OutputArgs,
) -> Result<Config> {
    if !extraction.kinds.is_empty() {
        config.extraction.kinds = extraction.kinds.clone();
    }
    if let Some(policy) = extraction.overlap {
        config.extraction.overlap_policy = policy;
    }
    if extraction.unique {
        config.extraction.unique = true;
    }
    if let Some(window) = extraction.context {
        config.extraction.context_window = window;
    }
    Validator::validate_context_window(config.extraction.context_window)?;

    if let Some(format) = output.format {
        config.output.format = format;
    }
    if output.pretty {
        config.output.pretty = true;
    }
    if output.offsets {
        config.output.show_offsets = true;
    }

    Ok(config)
}

fn cmd_extract(
    config: &Config,
    path: Option<PathBuf>,
    text: Option<String>,
    output_dir: Option<PathBuf>,
    color: bool,
) -> Result<()> {
    let extractor = EntityExtractor::new(config.extraction.clone());
    let runner = BatchRunner::new(&extractor, config.input.clone(), config.output.progress);

    let report = match (path, text) {
        (_, Some(text)) => single_report(runner.run_text("<inline>", &text)),
        (Some(path), None) => {
            Validator::validate_input_path(&path)?;
            let report = runner
                .run(&path)
                .with_context(|| format!("Failed to extract from {}", path.display()))?;
            report.stats.log_summary();
            report
        }
        (None, None) => {
            info!("Reading text from stdin");
            let text = read_stdin().context("Failed to read stdin")?;
            single_report(runner.run_text("<stdin>", &text))
        }
    };

    for failure in &report.failures {
        eprintln!("{}", format_error(&format!("{}: {}", failure.source, failure.error)));
    }

    if let Some(dir) = output_dir {
        let exporter = JsonExporter::new(dir).context("Failed to prepare output directory")?;
        let manifest = exporter.export_all(&report, config.output.pretty)?;
        eprintln!(
            "{}",
            format_success(&format!(
                "Exported {} file(s) with {} entities to {}",
                manifest.total_files,
                manifest.total_entities,
                exporter.output_dir().display()
            ))
        );
        return Ok(());
    }

    print_report(config, &report, color)
}

fn cmd_sample(config: &Config, color: bool) -> Result<()> {
    let extractor = EntityExtractor::new(config.extraction.clone());
    let report = single_report(FileReport {
        source: "<sample>".to_string(),
        bytes: SAMPLE_TEXT.len() as u64,
        result: extractor.extract(SAMPLE_TEXT),
    });
    print_report(config, &report, color)
}

fn cmd_kinds() {
    println!("{}", format_info("Entity kinds (in priority order)"));
    for kind in EntityKind::ALL {
        println!("  {:<24} {}", kind.as_str(), kind.category().as_str());
    }
}

fn single_report(file: FileReport) -> BatchReport {
    BatchReport {
        stats: entity_extract::BatchStats {
            files_processed: 1,
            entities_found: file.result.total(),
            total_bytes_processed: file.bytes,
            ..Default::default()
        },
        files: vec![file],
        failures: Vec::new(),
    }
}

fn print_report(config: &Config, report: &BatchReport, color: bool) -> Result<()> {
    match config.output.format {
        OutputFormat::Json => {
            let json = match report.files.as_slice() {
                [only] if report.failures.is_empty() => {
                    to_json(&only.result, config.output.pretty)?
                }
                _ => to_json(report, config.output.pretty)?,
            };
            println!("{}", json);
        }
        OutputFormat::Text => {
            let printer = TextPrinter::new(color, config.output.show_offsets);
            let multiple = report.files.len() > 1;

            for file in &report.files {
                if multiple {
                    println!("== {}", file.source);
                }
                print!("{}", printer.render(&file.result));
                info!("{}", printer.summary(&file.source, &file.result));
            }

            if report.total_entities() == 0 {
                eprintln!("{}", format_warning("No entities found"));
            }
        }
    }

    Ok(())
}
