// Engine main entry point
use anyhow::Context;
use sales_engine::config::PipelineSettings;
use sales_engine::services::pipeline::SalesPipeline;
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting sales cleanup...");

    // Optional single argument: a JSON settings file overriding the defaults.
    let settings = match std::env::args().nth(1) {
        Some(path) => PipelineSettings::from_json_file(&path)
            .with_context(|| format!("Failed to load settings from '{}'", path))?,
        None => PipelineSettings::default(),
    };
    info!(
        input_dir = %settings.input_dir.display(),
        output_dir = %settings.output_dir.display(),
        product = %settings.target_product,
        "Settings loaded"
    );

    let report = SalesPipeline::new(settings)
        .run()
        .context("Sales cleanup run failed")?;
    info!(files = report.files.len(), "Done");

    Ok(())
}
