// Drives the per-file cleanup: load, validate columns, filter, clean, write.
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sales_shared::models::ProcessedSale;
use tracing::{error, info, warn};

use crate::config::PipelineSettings;
use crate::data::csv_parser::SalesCsvParser;
use crate::data::csv_writer::SalesCsvWriter;
use crate::error::EngineError;

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// A required column was absent. No output was written.
    Skipped { missing_columns: Vec<String> },
    /// No rows matched the target product. A header-only file was written.
    Empty { output: PathBuf },
    /// `rows` matching rows were written to `output`.
    Processed { rows: usize, output: PathBuf },
    /// The file could not be read or its output could not be written.
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub files: Vec<(String, FileOutcome)>,
}

impl RunReport {
    pub fn processed_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Processed { .. }))
    }

    pub fn empty_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Empty { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    pub fn outcome(&self, file_name: &str) -> Option<&FileOutcome> {
        self.files
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, outcome)| outcome)
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|(_, outcome)| pred(outcome)).count()
    }
}

pub struct SalesPipeline {
    settings: PipelineSettings,
}

impl SalesPipeline {
    pub fn new(settings: PipelineSettings) -> Self {
        SalesPipeline { settings }
    }

    /// Processes every `*.csv` file in the input directory. Per-file problems
    /// are recorded in the report; only an unusable output directory fails the run.
    pub fn run(&self) -> Result<RunReport, EngineError> {
        let started_at = Utc::now();
        fs::create_dir_all(&self.settings.output_dir)?;

        let inputs = self.discover_inputs();
        info!(
            input_dir = %self.settings.input_dir.display(),
            output_dir = %self.settings.output_dir.display(),
            files = inputs.len(),
            "Starting sales cleanup run"
        );

        let mut files = Vec::with_capacity(inputs.len());
        for path in inputs {
            let name = file_name_of(&path);
            let outcome = match self.process_file(&path) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(file = %name, error = %e, "Failed to process {}: {}", name, e);
                    FileOutcome::Failed { reason: e.to_string() }
                }
            };
            files.push((name, outcome));
        }

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            files,
        };
        info!(
            processed = report.processed_count(),
            empty = report.empty_count(),
            skipped = report.skipped_count(),
            failed = report.failed_count(),
            elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
            "Run complete"
        );
        Ok(report)
    }

    /// Processes one file. Schema violations come back as `Skipped`; I/O and
    /// CSV syntax problems are errors.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome, EngineError> {
        let name = file_name_of(path);
        let table = SalesCsvParser::load_table(path)?;

        let records = match table.sale_records() {
            Ok(records) => records,
            Err(EngineError::MissingColumns(missing_columns)) => {
                warn!(file = %name, missing = ?missing_columns, "Skipping {}: missing required columns", name);
                return Ok(FileOutcome::Skipped { missing_columns });
            }
            Err(e) => return Err(e),
        };

        fs::create_dir_all(&self.settings.output_dir)?;
        let output = self.settings.output_path_for(&name);
        let sales: Vec<ProcessedSale> = records
            .iter()
            .filter(|record| record.is_product(&self.settings.target_product))
            .map(ProcessedSale::from_record)
            .collect();

        if sales.is_empty() {
            info!(
                file = %name,
                "No '{}' rows in {}; writing empty output with headers.",
                display_product(&self.settings.target_product),
                name
            );
            SalesCsvWriter::write_processed(&output, &sales)?;
            return Ok(FileOutcome::Empty { output });
        }

        let missing_passthrough = table.missing_passthrough();
        if !missing_passthrough.is_empty() {
            warn!(file = %name, missing = ?missing_passthrough, "Columns absent; writing empty cells");
        }
        let unreadable = sales.iter().filter(|sale| sale.sales.is_none()).count();
        if unreadable > 0 {
            warn!(file = %name, rows = unreadable, "Rows with unreadable price or quantity; sales left empty");
        }

        SalesCsvWriter::write_processed(&output, &sales)?;
        info!(
            file = %name,
            rows = sales.len(),
            "Processed {}: {} rows -> {}",
            name,
            sales.len(),
            output.display()
        );
        Ok(FileOutcome::Processed { rows: sales.len(), output })
    }

    // `*.csv` files in name order. A missing input directory is an empty run.
    fn discover_inputs(&self) -> Vec<PathBuf> {
        let entries = match fs::read_dir(&self.settings.input_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    input_dir = %self.settings.input_dir.display(),
                    error = %e,
                    "Input directory not readable; nothing to process"
                );
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!(
                        input_dir = %self.settings.input_dir.display(),
                        error = %e,
                        "Directory entry not readable; ignoring it"
                    );
                    None
                }
            })
            .filter(|path| path.is_file() && path.extension().map_or(false, |ext| ext == "csv"))
            .collect();
        paths.sort();
        paths
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// "pink morsel" -> "Pink Morsel" for log lines.
fn display_product(product: &str) -> String {
    product
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
