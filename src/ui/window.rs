use eframe::egui;

use crate::app::BarChartApp;
use crate::chart::BarChartSpec;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::report::ChartRenderer;

// ---------------------------------------------------------------------------
// Native window renderer
// ---------------------------------------------------------------------------

/// Shows each chart in its own native window and blocks until the user
/// closes it. Every call builds a fresh app, so nothing carries over from
/// one chart to the next.
pub struct WindowRenderer {
    window_size: [f32; 2],
    min_window_size: [f32; 2],
}

impl WindowRenderer {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            window_size: config.window_size,
            min_window_size: config.min_window_size,
        }
    }

    fn native_options(&self, title: &str) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(title)
                .with_inner_size(self.window_size)
                .with_min_inner_size(self.min_window_size),
            // Return from `run_native` on close so the next chart can open.
            run_and_return: true,
            ..Default::default()
        }
    }
}

impl ChartRenderer for WindowRenderer {
    fn render(&mut self, chart: &BarChartSpec) -> Result<()> {
        log::info!("Showing {:?} ({} bars)", chart.title, chart.bars.len());

        let app = BarChartApp::new(chart.clone());
        eframe::run_native(
            &chart.title,
            self.native_options(&chart.title),
            Box::new(move |_cc| Ok(Box::new(app))),
        )
        .map_err(|e| {
            log::error!("Failed to show {:?}: {e}", chart.title);
            ReportError::DisplayUnavailable(e.to_string())
        })
    }
}
