//! Domain models for tasklanes
//!
//! Contains the task model and dependency layering without any I/O concerns.

mod id;
mod task;
mod graph;

pub use id::{IdError, TaskId};
pub use task::{Task, TimeStatus};
pub use graph::{compute_columns, ColumnMap, DanglingDependency, DependencyGraph};
