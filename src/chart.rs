use crate::data::model::ContextGroup;

pub const X_AXIS_LABEL: &str = "Symbol";
pub const Y_AXIS_LABEL: &str = "Count";

/// Tick labels are drawn vertically, reading bottom to top.
pub const TICK_LABEL_ROTATION_DEG: f32 = 90.0;

// ---------------------------------------------------------------------------
// BarChartSpec – everything needed to draw one chart, no display attached
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub symbol: String,
    pub count: i64,
}

/// A display-independent description of one context's bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub title: String,
    /// One entry per record, in group order. Repeated symbols are not merged.
    pub bars: Vec<Bar>,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub tick_rotation_deg: f32,
}

impl BarChartSpec {
    pub fn from_group(group: &ContextGroup<'_>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            bars: group
                .bars()
                .map(|(symbol, count)| Bar {
                    symbol: symbol.to_string(),
                    count,
                })
                .collect(),
            x_label: X_AXIS_LABEL,
            y_label: Y_AXIS_LABEL,
            tick_rotation_deg: TICK_LABEL_ROTATION_DEG,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Value range the y axis must cover; always includes zero so bars
    /// grow from the baseline.
    pub fn value_range(&self) -> (f64, f64) {
        self.bars
            .iter()
            .map(|b| b.count as f64)
            .fold((0.0, 0.0), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }
}
