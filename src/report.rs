use crate::chart::BarChartSpec;
use crate::config::ReportConfig;
use crate::data::group::partition;
use crate::data::model::Dataset;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Rendering seam
// ---------------------------------------------------------------------------

/// Presents one chart. Implementations may block until the chart is
/// dismissed; the report loop waits for each call before the next.
pub trait ChartRenderer {
    fn render(&mut self, chart: &BarChartSpec) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Report orchestration
// ---------------------------------------------------------------------------

/// Build one chart per context, in first-appearance order. Pure.
pub fn prepare_charts(dataset: &Dataset, config: &ReportConfig) -> Vec<BarChartSpec> {
    partition(dataset)
        .iter()
        .filter(|group| {
            log::debug!("Context {:?}: {} records", group.context, group.len());
            !group.is_empty()
        })
        .map(|group| BarChartSpec::from_group(group, config.chart_title(group.context)))
        .collect()
}

/// Render every chart in sequence. Stops at the first renderer error.
/// Returns the number of charts shown.
pub fn generate_report<R: ChartRenderer>(
    dataset: &Dataset,
    config: &ReportConfig,
    renderer: &mut R,
) -> Result<usize> {
    let charts = prepare_charts(dataset, config);
    log::info!("{} contexts to chart", charts.len());

    for chart in &charts {
        log::debug!("Rendering {:?} with {} bars", chart.title, chart.bars.len());
        renderer.render(chart)?;
    }
    Ok(charts.len())
}
