//! Task domain model
//!
//! A task is one record from the task source. The layout engine only reads
//! tasks; the time and progress fields are carried for display and are
//! never parsed by layout code.

use serde::{Deserialize, Serialize};

use super::id::TaskId;

/// Relation between time spent and time required on a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeStatus {
    /// Spent time is within the estimate
    OnTrack,
    /// Spent time exceeds the estimate
    OverBudget,
    /// One of the values is not numeric
    Unknown,
}

impl TimeStatus {
    /// Returns a short display label
    pub fn label(&self) -> &'static str {
        match self {
            TimeStatus::OnTrack => "on track",
            TimeStatus::OverBudget => "over budget",
            TimeStatus::Unknown => "unknown",
        }
    }
}

/// A task within a project lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Project name; tasks sharing it form one lane
    pub project: String,

    /// Primary label
    pub description: String,

    /// Estimated effort, numeric in the common case
    #[serde(default)]
    pub time_required: String,

    /// Effort spent so far, numeric in the common case
    #[serde(default)]
    pub time_spent: String,

    /// Other departments involved, shown after the description
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_departments: Vec<String>,

    /// IDs of tasks this one depends on (may name unknown tasks)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<TaskId>,

    /// Completion percentage, expected 0-100
    #[serde(default)]
    pub progress: String,
}

impl Task {
    /// Creates a task with no metadata and no dependencies
    pub fn new(
        id: impl Into<TaskId>,
        project: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            project: project.into(),
            description: description.into(),
            time_required: String::new(),
            time_spent: String::new(),
            other_departments: Vec::new(),
            depends_on: Vec::new(),
            progress: String::new(),
        }
    }

    /// Sets the dependency list
    pub fn with_dependencies<I, T>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        self.depends_on = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the other departments list
    pub fn with_departments<I, S>(mut self, departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.other_departments = departments.into_iter().map(Into::into).collect();
        self
    }

    /// Sets required and spent time
    pub fn with_time(mut self, required: impl Into<String>, spent: impl Into<String>) -> Self {
        self.time_required = required.into();
        self.time_spent = spent.into();
        self
    }

    /// Sets the progress value
    pub fn with_progress(mut self, progress: impl Into<String>) -> Self {
        self.progress = progress.into();
        self
    }

    /// Returns the text shown inside the task box
    ///
    /// Other departments are appended in parentheses: `Review (QA, Legal)`.
    pub fn display_label(&self) -> String {
        if self.other_departments.is_empty() {
            self.description.clone()
        } else {
            format!(
                "{} ({})",
                self.description,
                self.other_departments.join(", ")
            )
        }
    }

    /// Returns progress as a percentage clamped to 0..=100, if numeric
    pub fn progress_percent(&self) -> Option<f64> {
        parse_number(&self.progress).map(|p| p.clamp(0.0, 100.0))
    }

    /// Compares time spent with time required
    pub fn time_status(&self) -> TimeStatus {
        match (
            parse_number(&self.time_required),
            parse_number(&self.time_spent),
        ) {
            (Some(required), Some(spent)) if spent > required => TimeStatus::OverBudget,
            (Some(_), Some(_)) => TimeStatus::OnTrack,
            _ => TimeStatus::Unknown,
        }
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_label_without_departments() {
        let task = Task::new("A", "P1", "Write docs");
        assert_eq!(task.display_label(), "Write docs");
    }

    #[test]
    fn display_label_appends_departments() {
        let task = Task::new("A", "P1", "Review").with_departments(["QA", "Legal"]);
        assert_eq!(task.display_label(), "Review (QA, Legal)");
    }

    #[test]
    fn progress_parses_and_clamps() {
        assert_eq!(Task::new("A", "P", "x").with_progress("40").progress_percent(), Some(40.0));
        assert_eq!(Task::new("A", "P", "x").with_progress(" 150 ").progress_percent(), Some(100.0));
        assert_eq!(Task::new("A", "P", "x").with_progress("-3").progress_percent(), Some(0.0));
    }

    #[test]
    fn non_numeric_progress_is_none() {
        assert_eq!(Task::new("A", "P", "x").with_progress("half").progress_percent(), None);
        assert_eq!(Task::new("A", "P", "x").with_progress("NaN").progress_percent(), None);
        assert_eq!(Task::new("A", "P", "x").progress_percent(), None);
    }

    #[test]
    fn time_status_compares_spent_with_required() {
        let on_track = Task::new("A", "P", "x").with_time("8", "8");
        assert_eq!(on_track.time_status(), TimeStatus::OnTrack);

        let over = Task::new("A", "P", "x").with_time("8", "9.5");
        assert_eq!(over.time_status(), TimeStatus::OverBudget);
    }

    #[test]
    fn time_status_unknown_for_non_numeric() {
        let task = Task::new("A", "P", "x").with_time("8h", "2");
        assert_eq!(task.time_status(), TimeStatus::Unknown);
        assert_eq!(task.time_status().label(), "unknown");
    }

    #[test]
    fn serde_roundtrip_skips_empty_lists() {
        let task = Task::new("A", "P1", "Plan").with_time("4", "1");
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("depends_on"));
        assert!(!json.contains("other_departments"));

        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }
}
