use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Report configuration
// ---------------------------------------------------------------------------

/// Fixed settings for one report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// CSV with `context,symbol,count` rows, no header.
    pub input_path: PathBuf,

    /// Prepended to the context value to form each chart title.
    pub title_prefix: String,

    /// Initial window size in points (a 10×6 inch figure at 100 dpi).
    pub window_size: [f32; 2],

    pub min_window_size: [f32; 2],
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("context_counts.csv"),
            title_prefix: "Context: ".to_string(),
            window_size: [1000.0, 600.0],
            min_window_size: [400.0, 300.0],
        }
    }
}

impl ReportConfig {
    pub fn chart_title(&self, context: &str) -> String {
        format!("{}{context}", self.title_prefix)
    }
}
