mod app;
mod chart;
mod config;
mod data;
mod error;
mod report;
mod ui;

use anyhow::{Context, Result};

use config::ReportConfig;
use ui::window::WindowRenderer;

fn main() -> Result<()> {
    env_logger::init();

    let config = ReportConfig::default();

    let dataset = data::loader::load(&config.input_path)
        .with_context(|| format!("loading {}", config.input_path.display()))?;

    if dataset.is_empty() {
        log::warn!("{} has no rows, nothing to chart", config.input_path.display());
    }

    let mut renderer = WindowRenderer::new(&config);
    let shown = report::generate_report(&dataset, &config, &mut renderer)
        .context("rendering context charts")?;

    log::info!("Done, {shown} charts shown");
    Ok(())
}
