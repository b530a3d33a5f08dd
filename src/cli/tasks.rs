//! Task commands (list, columns, check)

use serde::Serialize;

use super::output::Output;
use crate::domain::{DependencyGraph, Task, TaskId};

/// Print all tasks as a table
pub fn list(output: &Output, tasks: &[Task]) {
    if output.is_json() {
        output.data(&tasks);
        return;
    }

    if tasks.is_empty() {
        println!("No tasks available.");
        return;
    }

    let header = format!(
        "{:<6} | {:<12} | {:<20} | {:<12} | {:<10} | {:<8} | {:<15} | {:<12}",
        "TaskId",
        "Project",
        "Task",
        "TimeRequired",
        "TimeSpent",
        "Progress",
        "OtherDepts",
        "DependsOn"
    );
    println!("{}", header);
    println!("{}", "-".repeat(header.len()));

    for task in tasks {
        println!(
            "{:<6} | {:<12} | {:<20} | {:<12} | {:<10} | {:<8} | {:<15} | {:<12}",
            task.id.as_str(),
            task.project,
            task.description,
            task.time_required,
            task.time_spent,
            task.progress,
            join_or_dash(task.other_departments.iter().map(String::as_str)),
            join_or_dash(task.depends_on.iter().map(TaskId::as_str)),
        );
    }
}

#[derive(Serialize)]
struct ColumnRow<'a> {
    id: &'a TaskId,
    project: &'a str,
    column: usize,
}

/// Show the dependency column of every task, in input order
pub fn columns(output: &Output, tasks: &[Task]) {
    let graph = DependencyGraph::from_tasks(tasks);
    let columns = graph.columns();
    let column_count = columns.max_column().map_or(0, |c| c + 1);
    output.verbose_ctx(
        "columns",
        &format!("{} tasks across {} columns", tasks.len(), column_count),
    );

    let rows: Vec<_> = tasks
        .iter()
        .map(|t| ColumnRow {
            id: &t.id,
            project: &t.project,
            column: columns.column(t.id.as_str()),
        })
        .collect();

    if output.is_json() {
        output.data(&rows);
    } else if rows.is_empty() {
        println!("No tasks available.");
    } else {
        println!("{:<12} {:<16} COLUMN", "ID", "PROJECT");
        println!("{}", "-".repeat(36));
        for row in rows {
            println!("{:<12} {:<16} {}", row.id.as_str(), row.project, row.column);
        }
    }
}

/// Report dependency problems the layout tolerates
pub fn check(output: &Output, tasks: &[Task]) {
    let graph = DependencyGraph::from_tasks(tasks);
    let dangling = graph.dangling();
    let cycles = graph.cycles();

    for dep in dangling {
        output.verbose_ctx(
            "check",
            &format!("{} depends on unknown task {}", dep.task, dep.missing),
        );
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "tasks": tasks.len(),
            "dangling": dangling,
            "cycles": cycles,
        }));
        return;
    }

    if dangling.is_empty() && cycles.is_empty() {
        println!("No dependency problems found in {} tasks.", tasks.len());
        return;
    }

    if !dangling.is_empty() {
        println!("Unknown dependencies ({}):", dangling.len());
        for dep in dangling {
            println!("  {} -> {}", dep.task, dep.missing);
        }
    }

    if !cycles.is_empty() {
        if !dangling.is_empty() {
            println!();
        }
        println!("Dependency cycles ({}):", cycles.len());
        for cycle in &cycles {
            let ids: Vec<_> = cycle.iter().map(TaskId::as_str).collect();
            println!("  {}", ids.join(" <-> "));
        }
        output.warn("tasks in a cycle are placed with a fallback column");
    }
}

fn join_or_dash<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined = items.collect::<Vec<_>>().join(" ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}
