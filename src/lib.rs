//! tasklanes - swim-lane layout for interdependent project tasks
//!
//! Tasks are grouped into one horizontal lane per project and placed in
//! columns by dependency depth, so every task sits to the right of the
//! tasks it depends on. The [`layout`] module computes the geometry; the
//! [`storage`] and [`cli`] modules read inputs and print results.

pub mod domain;
pub mod layout;
pub mod storage;
pub mod cli;

pub use domain::{compute_columns, ColumnMap, Task, TaskId};
pub use layout::{DisplayMode, LayoutEngine, LayoutResult};
