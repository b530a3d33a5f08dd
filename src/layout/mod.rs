//! # Layout Engine
//!
//! Turns a task collection into swim-lane geometry.
//!
//! ## Pipeline
//!
//! | Step | Module | Output |
//! |------|--------|--------|
//! | Layering | [`crate::domain::compute_columns`] | column per task |
//! | Height | [`estimate`] | box height per task and mode |
//! | Stacking | [`lanes`] | boxes, lanes, separators, bounds |
//!
//! Columns are global across projects; the display mode only changes box
//! heights, so switching modes moves boxes vertically but never sideways.
//!
//! ## Example
//!
//! ```
//! use tasklanes::domain::Task;
//! use tasklanes::layout::{layout, DisplayMode};
//!
//! let tasks = vec![
//!     Task::new("A", "Website", "Wireframes"),
//!     Task::new("B", "Website", "Build pages").with_dependencies(["A"]),
//! ];
//! let result = layout(&tasks, DisplayMode::Normal);
//! assert_eq!(result.task("B").unwrap().column, 1);
//! ```

pub mod estimate;
pub mod lanes;
mod engine;
mod geometry;
mod mode;

pub use engine::{layout, layout_with, LayoutEngine};
pub use estimate::{BoxMetrics, HeightEstimator, TextHeuristic};
pub use geometry::{Point, Rect};
pub use lanes::{
    assemble_layout, group_by_project, LaneGeometry, LayoutMetrics, LayoutResult, Separator,
    TaskBox,
};
pub use mode::DisplayMode;
