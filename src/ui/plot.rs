use std::sync::Arc;

use eframe::egui::{self, epaint::TextShape, Color32, Galley, Sense, TextStyle, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoint};

use crate::chart::BarChartSpec;

/// Default bar fill (the usual first colour of a plotting cycle).
const BAR_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
const BAR_WIDTH: f64 = 0.8;
const TICK_PADDING: f32 = 6.0;
const MIN_PLOT_HEIGHT: f32 = 120.0;
/// Upper bound on the tick label strip, as a share of the panel height.
const MAX_LABEL_SHARE: f32 = 0.4;

// ---------------------------------------------------------------------------
// Bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render one context's bar chart: bars in the plot area, rotated symbol
/// labels under it, then the x axis label.
pub fn bar_chart(ui: &mut Ui, chart: &BarChartSpec) {
    if chart.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No records for this context");
        });
        return;
    }

    let font_id = TextStyle::Body.resolve(ui.style());
    let text_color = ui.visuals().text_color();
    let angle = -chart.tick_rotation_deg.to_radians();

    let labels: Vec<Arc<Galley>> = chart
        .bars
        .iter()
        .map(|b| {
            ui.painter()
                .layout_no_wrap(b.symbol.clone(), font_id.clone(), text_color)
        })
        .collect();

    // Rotated labels stand as tall as they are wide.
    let longest = labels.iter().map(|g| g.size().x).fold(0.0, f32::max);
    let strip_height =
        (longest + 2.0 * TICK_PADDING).min(ui.available_height() * MAX_LABEL_SHARE);
    let axis_label_height = ui.text_style_height(&TextStyle::Body) + ui.spacing().item_spacing.y;
    let plot_height =
        (ui.available_height() - strip_height - axis_label_height).max(MIN_PLOT_HEIGHT);

    let (y_min, y_max) = chart.value_range();
    let n = chart.bars.len() as f64;

    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.count as f64)
                .name(&b.symbol)
                .width(BAR_WIDTH)
        })
        .collect();

    let response = Plot::new("bar_chart")
        .height(plot_height)
        .y_axis_label(chart.y_label)
        // No x axis: symbol names are painted directly under the plot.
        .show_axes([false, true])
        .show_x(false)
        .show_grid([false, true])
        .include_x(-0.5)
        .include_x(n - 0.5)
        .include_y(y_min)
        .include_y(y_max)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            let counts = BarChart::new(bars)
                .color(BAR_COLOR)
                .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
                    format!("{}: {}", bar.name, bar.value)
                }));
            plot_ui.bar_chart(counts);
        });

    let (strip, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), strip_height),
        Sense::hover(),
    );
    let painter = ui.painter_at(strip);

    for (i, galley) in labels.into_iter().enumerate() {
        let center_x = response
            .transform
            .position_from_point(&PlotPoint::new(i as f64, 0.0))
            .x;
        let pos = label_anchor(center_x, strip.top(), galley.size());
        painter.add(TextShape::new(pos, galley, text_color).with_angle(angle));
    }

    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(chart.x_label);
    });
}

/// Where to place a tick label turned -90° about its top-left corner.
/// The text then runs upward from the anchor, so the anchor sits at the
/// label's bottom to hang it from `top`, centred on `center_x`.
fn label_anchor(center_x: f32, top: f32, size: egui::Vec2) -> egui::Pos2 {
    egui::pos2(center_x - size.y / 2.0, top + TICK_PADDING + size.x)
}
