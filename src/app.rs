use eframe::egui;

use crate::chart::BarChartSpec;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// One window, one chart.
pub struct BarChartApp {
    pub chart: BarChartSpec,
}

impl BarChartApp {
    pub fn new(chart: BarChartSpec) -> Self {
        Self { chart }
    }
}

impl eframe::App for BarChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            panels::title_bar(ui, &self.chart);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::bar_chart(ui, &self.chart);
        });
    }
}
