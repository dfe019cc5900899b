use eframe::egui::Ui;

use crate::chart::BarChartSpec;

// ---------------------------------------------------------------------------
// Top bar – chart title
// ---------------------------------------------------------------------------

pub fn title_bar(ui: &mut Ui, chart: &BarChartSpec) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });
}
