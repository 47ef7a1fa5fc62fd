// Engine library root: CSV ingestion, settings and the per-file cleanup pipeline.

pub mod config;
pub mod data;
pub mod error;
pub mod services;

pub use config::PipelineSettings;
pub use error::EngineError;
pub use services::pipeline::{FileOutcome, RunReport, SalesPipeline};
