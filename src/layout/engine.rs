//! Layout engine entry points
//!
//! [`layout`] is the pure form: tasks and mode in, geometry out.
//! [`LayoutEngine`] wraps it for callers that keep one current display mode,
//! such as a renderer with a compress/expand toggle. Neither caches anything;
//! every call recomputes the whole layout.

use std::fmt;
use tracing::debug;

use super::estimate::{HeightEstimator, TextHeuristic};
use super::lanes::{assemble_layout, LayoutMetrics, LayoutResult};
use super::mode::DisplayMode;
use crate::domain::{compute_columns, Task};

/// Lays out `tasks` in `mode` with the default metrics and estimator
pub fn layout(tasks: &[Task], mode: DisplayMode) -> LayoutResult {
    layout_with(tasks, mode, &LayoutMetrics::default(), &TextHeuristic::default())
}

/// Lays out `tasks` with explicit metrics and height estimator
pub fn layout_with(
    tasks: &[Task],
    mode: DisplayMode,
    metrics: &LayoutMetrics,
    estimator: &dyn HeightEstimator,
) -> LayoutResult {
    let columns = compute_columns(tasks);
    let result = assemble_layout(tasks, &columns, mode, metrics, estimator);

    debug!(
        tasks = tasks.len(),
        lanes = result.lanes.len(),
        columns = columns.max_column().map_or(0, |c| c + 1),
        %mode,
        "layout computed"
    );

    result
}

/// Stateful layout entry point holding the current display mode
pub struct LayoutEngine {
    mode: DisplayMode,
    metrics: LayoutMetrics,
    estimator: Box<dyn HeightEstimator + Send + Sync>,
}

impl LayoutEngine {
    /// Creates an engine in normal mode with default metrics
    pub fn new() -> Self {
        Self {
            mode: DisplayMode::default(),
            metrics: LayoutMetrics::default(),
            estimator: Box::new(TextHeuristic::default()),
        }
    }

    /// Replaces the spacing constants
    pub fn with_metrics(mut self, metrics: LayoutMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Replaces the height estimator, e.g. with one backed by real font metrics
    pub fn with_estimator(
        mut self,
        estimator: impl HeightEstimator + Send + Sync + 'static,
    ) -> Self {
        self.estimator = Box::new(estimator);
        self
    }

    /// Starts in the given mode
    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the current display mode
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Sets the display mode used by subsequent [`layout`](Self::layout) calls
    pub fn set_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "display mode changed");
        }
        self.mode = mode;
    }

    /// Switches between normal and compressed mode, returning the new mode
    pub fn toggle_mode(&mut self) -> DisplayMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Lays out `tasks` in the current mode
    pub fn layout(&self, tasks: &[Task]) -> LayoutResult {
        layout_with(tasks, self.mode, &self.metrics, self.estimator.as_ref())
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("mode", &self.mode)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}
