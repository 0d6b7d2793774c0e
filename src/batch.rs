//! Directory batch driver.
//!
//! Every `.pdf` file in an input directory is turned into a `.json` outline
//! of the same stem in an output directory. A failing file is reported and
//! skipped; it never stops the batch.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::OutlineDocument;
use crate::outline::{extract_outline, OutlineOptions};
use crate::parser::{ExtractOptions, PdfParser};
use crate::render::{to_json, JsonFormat};

/// Default input directory of the container deployment.
pub const DEFAULT_INPUT_DIR: &str = "/app/input";
/// Default output directory of the container deployment.
pub const DEFAULT_OUTPUT_DIR: &str = "/app/output";

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned for PDF files (not recursive)
    pub input_dir: PathBuf,
    /// Directory receiving one JSON file per PDF
    pub output_dir: PathBuf,
    /// JSON layout of the written files
    pub format: JsonFormat,
    /// Process files on the rayon thread pool
    pub parallel: bool,
    /// Span extraction options
    pub extract: ExtractOptions,
    /// Outline heuristic thresholds
    pub outline: OutlineOptions,
}

impl BatchOptions {
    /// Create batch options for the given directories.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Set the JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set span extraction options.
    pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    /// Set outline thresholds.
    pub fn with_outline_options(mut self, outline: OutlineOptions) -> Self {
        self.outline = outline;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: JsonFormat::Pretty,
            parallel: true,
            extract: ExtractOptions::default(),
            outline: OutlineOptions::default(),
        }
    }
}

/// Result of processing one file.
#[derive(Debug)]
pub struct FileOutcome {
    /// Source PDF
    pub input: PathBuf,
    /// Target JSON path
    pub output: PathBuf,
    /// Number of headings written, or why the file failed
    pub result: Result<usize>,
}

impl FileOutcome {
    /// File name of the source PDF, for status lines.
    pub fn file_name(&self) -> String {
        self.input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }

    /// Check if the file was written.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// One-line human readable status.
    pub fn status_line(&self) -> String {
        match &self.result {
            Ok(_) => format!("Processed: {}", self.file_name()),
            Err(e) => format!("Failed to process {}: {}", self.file_name(), e),
        }
    }
}

/// Progress notifications from [`run_batch`].
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// The input directory was listed; nothing is processed yet
    Started { total: usize },
    /// One file finished
    Finished(&'a FileOutcome),
}

/// Summary of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Outcomes in discovery order
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Number of files written.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Total number of files seen.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

/// List the PDF files directly inside `dir`, sorted by file name.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InvalidInput(format!(
            "input directory does not exist: {}",
            dir.display()
        )));
    }

    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            pdfs.push(path);
        } else {
            log::debug!("skipping {}", path.display());
        }
    }
    pdfs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pdfs)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// `<output_dir>/<stem>.json` for a source PDF.
pub fn output_path_for(pdf: &Path, output_dir: &Path) -> PathBuf {
    let mut name = pdf.file_stem().unwrap_or(pdf.as_os_str()).to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// Extract one PDF and write its outline JSON to `output`.
pub fn process_file(pdf: &Path, output: &Path, options: &BatchOptions) -> Result<OutlineDocument> {
    let parser = PdfParser::open_with_options(pdf, options.extract.clone())?;
    let layout = parser.parse()?;
    let outline = extract_outline(&layout, &options.outline);

    let json = to_json(&outline, options.format)?;
    fs::write(output, json)?;

    if outline.is_empty() {
        log::warn!("{}: no title or headings found", pdf.display());
    }

    log::debug!(
        "{}: title {:?}, {} headings",
        pdf.display(),
        outline.title,
        outline.outline.len()
    );
    Ok(outline)
}

/// Process every PDF in the input directory.
///
/// `on_event` gets [`BatchEvent::Started`] once, then a
/// [`BatchEvent::Finished`] per file as soon as it is done; with `parallel`
/// set those may arrive from several threads.
pub fn run_batch<F>(options: &BatchOptions, on_event: F) -> Result<BatchReport>
where
    F: Fn(BatchEvent<'_>) + Sync,
{
    let pdfs = discover_pdfs(&options.input_dir)?;
    fs::create_dir_all(&options.output_dir)?;
    on_event(BatchEvent::Started { total: pdfs.len() });

    log::info!(
        "Processing {} PDF files from {}",
        pdfs.len(),
        options.input_dir.display()
    );

    let run_one = |pdf: &PathBuf| {
        let output = output_path_for(pdf, &options.output_dir);
        let result = process_file(pdf, &output, options).map(|doc| doc.outline.len());
        if let Err(e) = &result {
            log::warn!("Failed to process {}: {}", pdf.display(), e);
        }
        let outcome = FileOutcome {
            input: pdf.clone(),
            output,
            result,
        };
        on_event(BatchEvent::Finished(&outcome));
        outcome
    };

    let outcomes: Vec<FileOutcome> = if options.parallel {
        pdfs.par_iter().map(run_one).collect()
    } else {
        pdfs.iter().map(run_one).collect()
    };

    let report = BatchReport { outcomes };
    log::info!(
        "Batch finished: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}
