//! pdf-outline CLI - title and heading extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::batch::{run_batch, BatchEvent, BatchOptions, FileOutcome};
use pdf_outline::outline::analyze;
use pdf_outline::render::to_json;
use pdf_outline::{ExtractOptions, JsonFormat, OutlineOptions, PdfParser};

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract document titles and H1-H3 outlines from PDFs", long_about = None)]
struct Cli {
    /// Directory containing PDF files
    #[arg(value_name = "INPUT_DIR", env = "PDF_OUTLINE_INPUT")]
    input: Option<PathBuf>,

    /// Directory receiving JSON outlines
    #[arg(value_name = "OUTPUT_DIR", env = "PDF_OUTLINE_OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    tuning: Tuning,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Heuristic thresholds shared by every command.
#[derive(Args, Clone, Copy)]
struct Tuning {
    /// Only sizes above this enter the font profile
    #[arg(long, global = true, value_name = "PT")]
    profile_threshold: Option<f32>,

    /// Heading sizes must be above this
    #[arg(long, global = true, value_name = "PT")]
    heading_floor: Option<i32>,
}

impl Tuning {
    fn outline_options(self) -> OutlineOptions {
        let mut options = OutlineOptions::new();
        if let Some(threshold) = self.profile_threshold {
            options = options.with_profile_threshold(threshold);
        }
        if let Some(floor) = self.heading_floor {
            options = options.with_heading_size_floor(floor);
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Process every PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(short, long, value_name = "DIR", env = "PDF_OUTLINE_INPUT")]
        input: Option<PathBuf>,

        /// Directory receiving JSON outlines
        #[arg(short, long, value_name = "DIR", env = "PDF_OUTLINE_OUTPUT")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,

        /// Treat unreadable pages as empty instead of failing the file
        #[arg(long)]
        lenient: bool,
    },

    /// Extract the outline of a single PDF
    File {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show the font profile, title and heading sizes of a PDF
    Fonts {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let outline_options = cli.tuning.outline_options();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            compact,
            sequential,
            lenient,
        }) => {
            let mut options = batch_options(input, output, outline_options).with_format(
                if compact {
                    JsonFormat::Compact
                } else {
                    JsonFormat::Pretty
                },
            );
            if sequential {
                options = options.sequential();
            }
            if lenient {
                options = options.with_extract_options(ExtractOptions::new().lenient());
            }
            cmd_batch(&options)
        }
        Some(Commands::File {
            input,
            output,
            compact,
        }) => cmd_file(&input, output.as_deref(), compact, &outline_options),
        Some(Commands::Fonts { input }) => cmd_fonts(&input, &outline_options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_batch(&batch_options(cli.input, cli.output, outline_options)),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn batch_options(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    outline: OutlineOptions,
) -> BatchOptions {
    let defaults = BatchOptions::default();
    BatchOptions::new(
        input.unwrap_or(defaults.input_dir),
        output.unwrap_or(defaults.output_dir),
    )
    .with_outline_options(outline)
}

fn cmd_batch(options: &BatchOptions) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!("batch options: {:?}", options);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let report = run_batch(options, |event| match event {
        BatchEvent::Started { total: 0 } => pb.println(format!(
            "{} {}",
            "No PDF files found in".yellow(),
            options.input_dir.display()
        )),
        BatchEvent::Started { total } => pb.set_length(total as u64),
        BatchEvent::Finished(outcome) => {
            pb.println(status_line(outcome));
            pb.set_message(outcome.file_name());
            pb.inc(1);
        }
    })?;

    pb.finish_and_clear();

    println!(
        "\n{} {} processed, {} failed",
        "Done!".green().bold(),
        report.succeeded(),
        report.failed()
    );
    println!("{}: {}", "Output".bold(), options.output_dir.display());

    Ok(())
}

fn status_line(outcome: &FileOutcome) -> String {
    let line = outcome.status_line();
    if outcome.is_success() {
        line.green().to_string()
    } else {
        line.red().to_string()
    }
}

fn cmd_file(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    outline_options: &OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline =
        pdf_outline::extract_file_with_options(input, ExtractOptions::default(), outline_options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = to_json(&outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_fonts(input: &Path, outline_options: &OutlineOptions) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient: a diagnostic view should survive a broken page
    let parser = PdfParser::open_with_options(input, ExtractOptions::new().lenient())?;
    let layout = parser.parse()?;
    let analysis = analyze(&layout, outline_options);

    println!("{}", "Font Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), parser.page_count());

    for (rank, (size, count)) in analysis.profile.iter().enumerate() {
        let marker = match analysis.heading_sizes.level_of(size) {
            Some(level) => level.to_string().green().to_string(),
            None => String::new(),
        };
        println!("  {:>2}. {:>4}pt  x{:<6} {}", rank + 1, size, count, marker);
    }

    println!();
    println!("{}", "Title".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if analysis.title.text.is_empty() {
        println!("{}", "(none)".dimmed());
    } else {
        println!("{} ({}pt)", analysis.title.text, analysis.title.max_size);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdf-outline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and outline extraction tool");
    println!();
    println!("License: MIT");
}
