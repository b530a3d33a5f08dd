//! Lane stacking and layout assembly
//!
//! Tasks are grouped into one lane per project, lanes are stacked top to
//! bottom in first-seen project order, and inside a lane the boxes are
//! stacked in first-seen task order. The x position of a box comes from its
//! dependency column only, so boxes of one lane may share a column.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

use super::estimate::HeightEstimator;
use super::geometry::{Point, Rect};
use super::mode::DisplayMode;
use crate::domain::{ColumnMap, Task, TaskId};

/// Spacing constants of the lane layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Offset of the first lane and first column from the origin
    pub margin: f64,

    /// Width of every task box, and of one column
    pub box_width: f64,

    /// Vertical gap between boxes of one lane
    pub task_spacing: f64,

    /// Vertical gap between lanes
    pub lane_spacing: f64,

    pub lane_header_height: f64,

    /// How far a separator extends past the rightmost box of its lane
    pub separator_overhang: f64,

    /// Padding added around the union of all boxes
    pub bounds_padding: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            margin: 50.0,
            box_width: 200.0,
            task_spacing: 12.0,
            lane_spacing: 50.0,
            lane_header_height: 60.0,
            separator_overhang: 50.0,
            bounds_padding: 50.0,
        }
    }
}

/// Placement of one task box
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskBox {
    pub id: TaskId,
    pub project: String,
    pub column: usize,
    #[serde(flatten)]
    pub rect: Rect,
}

/// Placement of one project lane
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneGeometry {
    pub project: String,

    /// Top of the lane header
    pub y: f64,

    /// Header plus stacked boxes, without trailing spacing
    pub height: f64,

    /// Right edge of the widest-reaching box in the lane
    pub rightmost_x: f64,

    /// Header area, spanning from the margin to `rightmost_x`
    pub header: Rect,

    /// Indices into [`LayoutResult::tasks`], in stacking order
    pub tasks: Vec<usize>,
}

/// A horizontal line between two consecutive lanes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Separator {
    pub start: Point,
    pub end: Point,
}

/// Complete geometry for one task collection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    pub mode: DisplayMode,

    /// Task boxes in lane order, then stacking order
    pub tasks: Vec<TaskBox>,

    /// Lanes in first-seen project order
    pub lanes: Vec<LaneGeometry>,

    /// One separator below every lane but the last
    pub separators: Vec<Separator>,

    /// Union of all boxes and lane headers, padded; zero when empty
    pub bounds: Rect,

    #[serde(skip)]
    index: HashMap<TaskId, usize>,
}

impl LayoutResult {
    /// Looks up the box of a task by ID
    ///
    /// With duplicate IDs this returns the first box placed for the ID.
    pub fn task(&self, task_id: &str) -> Option<&TaskBox> {
        self.index.get(task_id).map(|&i| &self.tasks[i])
    }

    /// Looks up the lane of a project
    pub fn lane(&self, project: &str) -> Option<&LaneGeometry> {
        self.lanes.iter().find(|lane| lane.project == project)
    }

    /// Iterates over the boxes of one lane in stacking order
    pub fn lane_tasks<'a>(&'a self, lane: &'a LaneGeometry) -> impl Iterator<Item = &'a TaskBox> {
        lane.tasks.iter().map(move |&i| &self.tasks[i])
    }

    /// Returns true if no task was laid out
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Tasks of one project in input order
#[derive(Debug)]
pub struct LaneGroup<'a> {
    pub project: &'a str,
    pub tasks: Vec<&'a Task>,
}

/// Groups tasks by project, keeping first-seen order of projects and tasks
pub fn group_by_project(tasks: &[Task]) -> Vec<LaneGroup<'_>> {
    let mut groups: Vec<LaneGroup<'_>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for task in tasks {
        let pos = *positions.entry(task.project.as_str()).or_insert_with(|| {
            groups.push(LaneGroup {
                project: task.project.as_str(),
                tasks: Vec::new(),
            });
            groups.len() - 1
        });
        groups[pos].tasks.push(task);
    }

    groups
}

/// Places every task box, lane and separator
///
/// Tasks missing from `columns` are placed in column 0.
pub fn assemble_layout(
    tasks: &[Task],
    columns: &ColumnMap,
    mode: DisplayMode,
    metrics: &LayoutMetrics,
    estimator: &dyn HeightEstimator,
) -> LayoutResult {
    let groups = group_by_project(tasks);
    let mut result = LayoutResult {
        mode,
        ..LayoutResult::default()
    };
    let mut bounds: Option<Rect> = None;
    let mut current_y = metrics.margin;

    for (lane_no, group) in groups.iter().enumerate() {
        let mut offset = 0.0;
        let mut rightmost_x = metrics.margin;
        let mut lane_tasks = Vec::with_capacity(group.tasks.len());

        for task in &group.tasks {
            let column = columns.column(task.id.as_str());
            let rect = Rect::new(
                metrics.margin + column as f64 * metrics.box_width,
                current_y + metrics.lane_header_height + offset,
                metrics.box_width,
                estimator.estimate_height(task, mode, metrics.box_width),
            );
            offset += rect.height + metrics.task_spacing;
            rightmost_x = rightmost_x.max(rect.right());

            let idx = result.tasks.len();
            result.index.entry(task.id.clone()).or_insert(idx);
            lane_tasks.push(idx);
            result.tasks.push(TaskBox {
                id: task.id.clone(),
                project: task.project.clone(),
                column,
                rect,
            });
        }

        // Groups are never empty, so there is always trailing spacing to drop
        let height = metrics.lane_header_height + offset - metrics.task_spacing;
        let header = Rect::new(
            metrics.margin,
            current_y,
            rightmost_x - metrics.margin,
            metrics.lane_header_height,
        );

        let lane_bounds = lane_tasks
            .iter()
            .fold(header, |acc, &i| acc.union(&result.tasks[i].rect));
        bounds = Some(match bounds {
            Some(b) => b.union(&lane_bounds),
            None => lane_bounds,
        });

        trace!(
            project = group.project,
            y = current_y,
            height,
            tasks = lane_tasks.len(),
            "placed lane"
        );

        if lane_no + 1 < groups.len() {
            let y = current_y + height + metrics.lane_spacing / 2.0;
            result.separators.push(Separator {
                start: Point::new(metrics.margin, y),
                end: Point::new(rightmost_x + metrics.separator_overhang, y),
            });
        }

        result.lanes.push(LaneGeometry {
            project: group.project.to_string(),
            y: current_y,
            height,
            rightmost_x,
            header,
            tasks: lane_tasks,
        });

        current_y += height + metrics.lane_spacing;
    }

    result.bounds = bounds
        .map(|b| b.padded(metrics.bounds_padding))
        .unwrap_or_default();

    result
}
