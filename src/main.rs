use anyhow::Context;
use clap::{Parser, Subcommand};
use logsift::{
    config::Config, generate, ingest_file, report, summarize, ExportResult, LevelFilter, Pipeline,
    PipelineOptions, RunStatus,
};
use rand::{rngs::StdRng, SeedableRng};
use std::{io::IsTerminal, path::PathBuf, process::ExitCode};

#[derive(Parser)]
#[command(name = "logsift", about = "logsift: detect, normalise and export log files")]
struct Cli {
    /// Log debug events to stderr (RUST_LOG takes precedence).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest every log file in a directory and export one combined CSV.
    Scan {
        dir: PathBuf,
        /// all, suspicious, errors, warnings, or a comma separated level list.
        #[arg(long)]
        levels: Option<LevelFilter>,
        /// Output directory (default from config: `output`).
        #[arg(long)]
        out: Option<PathBuf>,
        /// Export file name without `.csv` (default from config: `selected_logs`).
        #[arg(long)]
        prefix: Option<String>,
        /// Parse files in parallel.
        #[arg(long)]
        concurrent: bool,
        /// Print the result as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Detect and parse a single file of any extension.
    Inspect {
        file: PathBuf,
        /// Number of records to preview.
        #[arg(long, default_value_t = 5)]
        preview: usize,
        #[arg(long)]
        json: bool,
    },
    /// Write a random fixture set in every supported format.
    Generate {
        dir: PathBuf,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "config unreadable, using defaults");
        Config::defaults()
    });

    match cli.command {
        Command::Scan {
            dir,
            levels,
            out,
            prefix,
            concurrent,
            json,
        } => {
            let mut options = PipelineOptions::from_config(&config);
            if let Some(levels) = levels {
                options.filter = levels;
            }
            if let Some(out) = out {
                options.output_dir = out;
            }
            if let Some(prefix) = prefix {
                options.prefix = prefix;
            }
            let pipeline = Pipeline::new(options);

            let result = if concurrent || config.pipeline.concurrent {
                tokio::runtime::Runtime::new()
                    .context("starting worker runtime")?
                    .block_on(pipeline.run_concurrent(&dir))
            } else {
                pipeline.run(&dir)
            }
            .with_context(|| format!("scanning {}", dir.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_scan(&result, config.summary.unusual_threshold);
            }
            Ok(exit_code(result.status()))
        }

        Command::Inspect { file, preview, json } => {
            let ingested =
                ingest_file(&file).with_context(|| format!("reading {}", file.display()))?;
            let summary = summarize(&ingested.records);

            if json {
                let value = serde_json::json!({
                    "path": file,
                    "format": ingested.format,
                    "summary": summary,
                    "records": ingested.records,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("Detected log type: {}", ingested.format);
                print!("{}", report::render_preview(&ingested.records, preview));
                println!();
                print!(
                    "{}",
                    report::render_summary(
                        &summary,
                        config.summary.unusual_threshold,
                        std::io::stdout().is_terminal()
                    )
                );
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Generate { dir, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let files = generate::generate_logs(&dir, &mut rng)
                .with_context(|| format!("generating fixtures in {}", dir.display()))?;
            println!("All random log files generated in {}:", dir.display());
            for path in files.all() {
                println!("- {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_scan(result: &ExportResult, unusual_threshold: f64) {
    print!("{}", report::render_files(result.files(), result.failures()));
    match result {
        ExportResult::NoLogs { .. } => println!("No logs found in folder."),
        ExportResult::Exported(export) => {
            println!();
            print!(
                "{}",
                report::render_summary(
                    &export.summary,
                    unusual_threshold,
                    std::io::stdout().is_terminal()
                )
            );
            println!("\nExported {} rows to {}", export.exported, export.path.display());
        }
    }
}

fn exit_code(status: RunStatus) -> ExitCode {
    match status {
        RunStatus::Success => ExitCode::SUCCESS,
        RunStatus::NoInput => ExitCode::from(1),
        RunStatus::PartialFailure => ExitCode::from(2),
    }
}
