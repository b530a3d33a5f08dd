//! Task box height estimation
//!
//! Box heights come from a character-count heuristic: a fixed glyph width
//! gives the characters per line, the line count gives the text height, and
//! the display mode decides which fixed blocks (time info, progress bar) are
//! stacked around it. Callers with real text metrics can plug in their own
//! [`HeightEstimator`].

use serde::{Deserialize, Serialize};

use super::mode::DisplayMode;
use crate::domain::Task;

/// Measures the height a task box needs
pub trait HeightEstimator {
    /// Returns the box height for `task` rendered `box_width` wide in `mode`
    fn estimate_height(&self, task: &Task, mode: DisplayMode, box_width: f64) -> f64;
}

impl<F> HeightEstimator for F
where
    F: Fn(&Task, DisplayMode, f64) -> f64,
{
    fn estimate_height(&self, task: &Task, mode: DisplayMode, box_width: f64) -> f64 {
        self(task, mode, box_width)
    }
}

/// Fixed sizes of the blocks inside a task box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxMetrics {
    /// Inner padding in normal mode
    pub normal_padding: f64,

    /// Inner padding in compressed mode
    pub compressed_padding: f64,

    /// Height of the time required/spent line
    pub time_info_height: f64,

    /// Gap between the blocks of a normal box
    pub vertical_spacing: f64,

    pub progress_bar_height: f64,

    pub progress_bar_margin: f64,

    pub min_normal_height: f64,

    pub min_compressed_height: f64,

    /// Assumed width of one character
    pub char_width: f64,

    /// Height of one wrapped text line
    pub line_height: f64,
}

impl Default for BoxMetrics {
    fn default() -> Self {
        Self {
            normal_padding: 10.0,
            compressed_padding: 5.0,
            time_info_height: 20.0,
            vertical_spacing: 15.0,
            progress_bar_height: 20.0,
            progress_bar_margin: 10.0,
            min_normal_height: 100.0,
            min_compressed_height: 60.0,
            char_width: 8.0,
            line_height: 16.0,
        }
    }
}

/// The default character-count estimator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextHeuristic {
    metrics: BoxMetrics,
}

impl TextHeuristic {
    pub fn new(metrics: BoxMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &BoxMetrics {
        &self.metrics
    }

    /// Returns the inner padding used in `mode`
    pub fn padding(&self, mode: DisplayMode) -> f64 {
        match mode {
            DisplayMode::Normal => self.metrics.normal_padding,
            DisplayMode::Compressed => self.metrics.compressed_padding,
        }
    }

    /// Estimates how many lines `text` wraps to
    ///
    /// Always at least one line. A text exactly filling its lines still gets
    /// an extra line, which keeps headroom for word-boundary wrapping.
    pub fn line_count(&self, text: &str, mode: DisplayMode, box_width: f64) -> usize {
        let usable_width = box_width - 2.0 * self.padding(mode);
        let chars_per_line = (usable_width / self.metrics.char_width).floor().max(1.0) as usize;

        (text.chars().count() / chars_per_line + 1).max(1)
    }

    /// Estimates the height of the wrapped text block
    pub fn text_height(&self, text: &str, mode: DisplayMode, box_width: f64) -> f64 {
        self.line_count(text, mode, box_width) as f64 * self.metrics.line_height
    }
}

impl HeightEstimator for TextHeuristic {
    fn estimate_height(&self, task: &Task, mode: DisplayMode, box_width: f64) -> f64 {
        let m = &self.metrics;
        let text_height = self.text_height(&task.display_label(), mode, box_width);

        match mode {
            DisplayMode::Normal => {
                let height = m.normal_padding
                    + m.time_info_height
                    + m.vertical_spacing
                    + text_height
                    + m.vertical_spacing
                    + m.progress_bar_height
                    + m.progress_bar_margin;
                height.max(m.min_normal_height)
            }
            DisplayMode::Compressed => {
                (2.0 * m.compressed_padding + text_height).max(m.min_compressed_height)
            }
        }
    }
}
