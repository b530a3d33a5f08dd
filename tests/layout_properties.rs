//! Property tests for dependency layering and lane layout

use proptest::prelude::*;
use std::collections::HashMap;

use tasklanes::domain::{compute_columns, Task};
use tasklanes::layout::{layout, DisplayMode, LayoutEngine, LayoutMetrics};

const PROJECTS: [&str; 4] = ["Web", "Ops", "Data", "Legal"];

/// Acyclic task collections: task `i` may only depend on tasks before it,
/// plus the occasional unknown ID.
fn acyclic_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(
        (
            0..PROJECTS.len(),
            prop::collection::vec(any::<usize>(), 0..4),
            0usize..80,
        ),
        1..30,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (project, raw_deps, label_len))| {
                let deps: Vec<String> = raw_deps
                    .into_iter()
                    .map(|d| {
                        if i == 0 || d % 7 == 0 {
                            format!("missing-{}", d % 3)
                        } else {
                            format!("t{}", d % i)
                        }
                    })
                    .collect();
                Task::new(format!("t{}", i), PROJECTS[project], "x".repeat(label_len))
                    .with_dependencies(deps)
            })
            .collect()
    })
}

/// Arbitrary collections, including self-dependencies and cycles
fn any_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(prop::collection::vec(any::<usize>(), 0..4), 1..20).prop_map(|specs| {
        let n = specs.len();
        specs
            .into_iter()
            .enumerate()
            .map(|(i, raw_deps)| {
                Task::new(format!("t{}", i), PROJECTS[i % PROJECTS.len()], "task")
                    .with_dependencies(raw_deps.into_iter().map(|d| format!("t{}", d % n)))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn columns_follow_longest_dependency_chain(tasks in acyclic_tasks()) {
        let columns = compute_columns(&tasks);
        let known: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();

        for task in &tasks {
            let dep_columns: Vec<usize> = task
                .depends_on
                .iter()
                .filter(|d| known.contains_key(d.as_str()))
                .map(|d| columns.column(d.as_str()))
                .collect();

            let expected = dep_columns.iter().max().map_or(0, |c| c + 1);
            prop_assert_eq!(columns.get(task.id.as_str()), Some(expected));

            for dep_column in dep_columns {
                prop_assert!(columns.column(task.id.as_str()) > dep_column);
            }
        }
    }

    #[test]
    fn columns_ignore_input_order(
        (tasks, shuffled) in acyclic_tasks().prop_flat_map(|tasks| {
            (Just(tasks.clone()), Just(tasks).prop_shuffle())
        })
    ) {
        prop_assert_eq!(compute_columns(&tasks), compute_columns(&shuffled));
    }

    #[test]
    fn cyclic_input_still_gets_a_column_for_every_task(tasks in any_tasks()) {
        let columns = compute_columns(&tasks);
        prop_assert_eq!(columns.len(), tasks.len());

        let result = layout(&tasks, DisplayMode::Normal);
        prop_assert_eq!(result.tasks.len(), tasks.len());
    }

    #[test]
    fn mode_round_trip_reproduces_layout(tasks in acyclic_tasks()) {
        let mut engine = LayoutEngine::new();
        let original = engine.layout(&tasks);

        engine.set_mode(DisplayMode::Compressed);
        let compressed = engine.layout(&tasks);
        engine.set_mode(DisplayMode::Normal);
        let restored = engine.layout(&tasks);

        prop_assert_eq!(&restored, &original);
        for (n, c) in original.tasks.iter().zip(&compressed.tasks) {
            prop_assert_eq!(n.column, c.column);
            prop_assert_eq!(n.rect.x, c.rect.x);
        }
    }

    #[test]
    fn lanes_follow_first_seen_project_order(tasks in acyclic_tasks()) {
        let mut expected: Vec<&str> = Vec::new();
        for task in &tasks {
            if !expected.contains(&task.project.as_str()) {
                expected.push(&task.project);
            }
        }

        let result = layout(&tasks, DisplayMode::Normal);
        let lanes: Vec<&str> = result.lanes.iter().map(|l| l.project.as_str()).collect();
        prop_assert_eq!(lanes, expected);

        for pair in result.lanes.windows(2) {
            prop_assert!(pair[0].y + pair[0].height < pair[1].y);
        }
        prop_assert_eq!(result.separators.len(), result.lanes.len() - 1);
    }

    #[test]
    fn boxes_stay_inside_their_lane_and_bounds(
        tasks in acyclic_tasks(),
        compressed in any::<bool>(),
    ) {
        let mode = if compressed { DisplayMode::Compressed } else { DisplayMode::Normal };
        let metrics = LayoutMetrics::default();
        let result = layout(&tasks, mode);

        for lane in &result.lanes {
            let mut previous_bottom = lane.y + metrics.lane_header_height;
            for task_box in result.lane_tasks(lane) {
                let r = task_box.rect;
                prop_assert_eq!(r.x, metrics.margin + task_box.column as f64 * metrics.box_width);
                prop_assert!(r.y >= previous_bottom);
                prop_assert!(r.bottom() <= lane.y + lane.height);
                prop_assert!(r.right() <= lane.rightmost_x);
                previous_bottom = r.bottom();

                let min_height = match mode {
                    DisplayMode::Normal => 100.0,
                    DisplayMode::Compressed => 60.0,
                };
                prop_assert!(r.height >= min_height);

                let b = result.bounds;
                prop_assert!(b.x <= r.x - metrics.bounds_padding);
                prop_assert!(b.y <= r.y - metrics.bounds_padding);
                prop_assert!(b.right() >= r.right() + metrics.bounds_padding);
                prop_assert!(b.bottom() >= r.bottom() + metrics.bounds_padding);
            }
        }
    }
}

#[test]
fn documented_chain_scenario() {
    let tasks = vec![
        Task::new("A", "P1", "a"),
        Task::new("B", "P1", "b").with_dependencies(["A"]),
        Task::new("C", "P1", "c").with_dependencies(["A", "B"]),
    ];
    let columns = compute_columns(&tasks);

    assert_eq!(columns.get("A"), Some(0));
    assert_eq!(columns.get("B"), Some(1));
    assert_eq!(columns.get("C"), Some(2));
}

#[test]
fn unknown_dependency_scenario() {
    let tasks = vec![Task::new("X", "P1", "x").with_dependencies(["Z"])];
    assert_eq!(compute_columns(&tasks).get("X"), Some(0));
}

#[test]
fn mutual_dependency_scenario() {
    let tasks = vec![
        Task::new("A", "P1", "a").with_dependencies(["B"]),
        Task::new("B", "P1", "b").with_dependencies(["A"]),
    ];
    let columns = compute_columns(&tasks);

    // A is visited first, so the re-entry through B sees A as column 0
    assert_eq!(columns.get("B"), Some(1));
    assert_eq!(columns.get("A"), Some(2));
}

#[test]
fn single_task_bounding_box_width() {
    let result = layout(&[Task::new("A", "P1", "Task A")], DisplayMode::Normal);
    assert_eq!(result.bounds.width, 300.0);
}

#[test]
fn empty_collection_has_empty_bounds() {
    let result = layout(&[], DisplayMode::Compressed);
    assert!(result.is_empty());
    assert!(result.bounds.is_empty());
}
