//! Layout command

use super::output::Output;
use crate::domain::Task;
use crate::layout::{DisplayMode, LayoutEngine};
use crate::storage::Config;

/// Compute and print the swim-lane layout
pub fn run(output: &Output, config: &Config, tasks: &[Task], mode: DisplayMode) {
    let engine = LayoutEngine::new()
        .with_metrics(config.layout.clone())
        .with_mode(mode);
    let result = engine.layout(tasks);

    output.verbose_ctx(
        "layout",
        &format!(
            "{} lanes, {} separators, bounds {} x {}",
            result.lanes.len(),
            result.separators.len(),
            result.bounds.width,
            result.bounds.height
        ),
    );

    if output.is_json() {
        output.data(&result);
        return;
    }

    if result.is_empty() {
        println!("No tasks to lay out.");
        return;
    }

    println!(
        "Layout ({} mode): {} tasks in {} lanes, bounds {} x {}",
        result.mode,
        result.tasks.len(),
        result.lanes.len(),
        result.bounds.width,
        result.bounds.height
    );

    for (i, lane) in result.lanes.iter().enumerate() {
        println!();
        println!(
            "Lane {} (y={}, height={}, right={})",
            lane.project, lane.y, lane.height, lane.rightmost_x
        );
        println!("  {:<12} {:>6} {:>8} {:>8} {:>6} {:>6}", "ID", "COLUMN", "X", "Y", "W", "H");
        for task_box in result.lane_tasks(lane) {
            println!(
                "  {:<12} {:>6} {:>8} {:>8} {:>6} {:>6}",
                task_box.id.as_str(),
                task_box.column,
                task_box.rect.x,
                task_box.rect.y,
                task_box.rect.width,
                task_box.rect.height
            );
        }

        if let Some(sep) = result.separators.get(i) {
            println!(
                "  separator at y={} from x={} to x={}",
                sep.start.y, sep.start.x, sep.end.x
            );
        }
    }
}
