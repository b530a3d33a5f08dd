//! Dependency graph for tasks
//!
//! Assigns every task a column from its longest dependency chain and
//! reports the irregularities the layering tolerates (unknown dependency
//! IDs and cycles). Uses petgraph for graph operations.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use super::id::TaskId;
use super::task::Task;

/// Column index per task ID
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap(HashMap<TaskId, usize>);

impl ColumnMap {
    /// Returns the column of a task, if the task is known
    pub fn get(&self, task_id: &str) -> Option<usize> {
        self.0.get(task_id).copied()
    }

    /// Returns the column of a task, treating unknown tasks as column 0
    pub fn column(&self, task_id: &str) -> usize {
        self.get(task_id).unwrap_or(0)
    }

    /// Returns the highest assigned column
    pub fn max_column(&self) -> Option<usize> {
        self.0.values().copied().max()
    }

    /// Returns the number of tasks with a column
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no columns were assigned
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all (task, column) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&TaskId, usize)> {
        self.0.iter().map(|(id, col)| (id, *col))
    }
}

impl Serialize for ColumnMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Sorted so repeated runs print identical JSON
        let sorted: BTreeMap<_, _> = self.0.iter().collect();
        sorted.serialize(serializer)
    }
}

/// A dependency on a task ID that is not part of the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingDependency {
    /// The task declaring the dependency
    pub task: TaskId,
    /// The ID that could not be resolved
    pub missing: TaskId,
}

/// A dependency graph over one task collection
///
/// Only the first task carrying a given ID is indexed; later duplicates are
/// ignored by the graph.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// The underlying directed graph, edges run dependency -> dependent
    graph: DiGraph<TaskId, ()>,

    /// Map from TaskId to node index
    node_map: HashMap<TaskId, NodeIndex>,

    /// Resolved dependencies per node, in declared order
    dependencies: Vec<Vec<NodeIndex>>,

    /// Dependencies naming unknown tasks
    dangling: Vec<DanglingDependency>,
}

/// One pending node of the layering walk
struct Frame {
    node: NodeIndex,
    next_dep: usize,
    column: usize,
}

impl DependencyGraph {
    /// Builds a graph from a task collection
    ///
    /// Unknown dependency IDs are recorded as dangling and otherwise ignored.
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut graph = Self::default();

        // First pass: add all nodes
        let mut indexed = Vec::new();
        for task in tasks {
            if graph.node_map.contains_key(&task.id) {
                debug!(task = %task.id, "duplicate task id ignored by dependency graph");
                continue;
            }
            let idx = graph.graph.add_node(task.id.clone());
            graph.node_map.insert(task.id.clone(), idx);
            graph.dependencies.push(Vec::new());
            indexed.push((idx, task));
        }

        // Second pass: add all edges
        for (idx, task) in indexed {
            for dep_id in &task.depends_on {
                match graph.node_map.get(dep_id) {
                    Some(&dep_idx) => {
                        graph.graph.update_edge(dep_idx, idx, ());
                        graph.dependencies[idx.index()].push(dep_idx);
                    }
                    None => {
                        debug!(task = %task.id, missing = %dep_id, "ignoring unknown dependency");
                        graph.dangling.push(DanglingDependency {
                            task: task.id.clone(),
                            missing: dep_id.clone(),
                        });
                    }
                }
            }
        }

        graph
    }

    /// Computes the column of every task
    ///
    /// A task without resolvable dependencies sits in column 0; any other
    /// task sits one column right of its rightmost dependency. Re-entering a
    /// task whose column is still being computed (a cycle) counts that
    /// reference as column 0.
    ///
    /// Tasks are visited in input order and dependencies in declared order,
    /// so the cycle fallback is deterministic for a given input.
    pub fn columns(&self) -> ColumnMap {
        let node_count = self.graph.node_count();
        let mut memo: Vec<Option<usize>> = vec![None; node_count];
        let mut in_progress: HashSet<NodeIndex> = HashSet::new();
        let mut stack: Vec<Frame> = Vec::new();

        for root in self.graph.node_indices() {
            if memo[root.index()].is_some() {
                continue;
            }

            in_progress.insert(root);
            stack.push(Frame {
                node: root,
                next_dep: 0,
                column: 0,
            });

            while let Some(frame) = stack.last_mut() {
                let deps = &self.dependencies[frame.node.index()];

                if let Some(&dep) = deps.get(frame.next_dep) {
                    frame.next_dep += 1;

                    if let Some(dep_column) = memo[dep.index()] {
                        frame.column = frame.column.max(dep_column + 1);
                    } else if in_progress.contains(&dep) {
                        debug!(
                            task = %self.graph[frame.node],
                            dependency = %self.graph[dep],
                            "dependency cycle, counting re-entered task as column 0"
                        );
                        frame.column = frame.column.max(1);
                    } else {
                        in_progress.insert(dep);
                        stack.push(Frame {
                            node: dep,
                            next_dep: 0,
                            column: 0,
                        });
                    }
                    continue;
                }

                // All dependencies resolved: finalize this node
                let (node, column) = (frame.node, frame.column);
                stack.pop();
                in_progress.remove(&node);
                memo[node.index()] = Some(column);

                if let Some(parent) = stack.last_mut() {
                    parent.column = parent.column.max(column + 1);
                }
            }
        }

        ColumnMap(
            self.graph
                .node_indices()
                .map(|idx| (self.graph[idx].clone(), memo[idx.index()].unwrap_or(0)))
                .collect(),
        )
    }

    /// Returns every dependency that named an unknown task, in input order
    pub fn dangling(&self) -> &[DanglingDependency] {
        &self.dangling
    }

    /// Returns every dependency cycle as a list of task IDs
    ///
    /// Tasks within a cycle, and the cycles themselves, are ordered by first
    /// appearance in the input. Self-dependencies count as cycles.
    pub fn cycles(&self) -> Vec<Vec<TaskId>> {
        let mut cycles: Vec<Vec<NodeIndex>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || self.graph.find_edge(component[0], component[0]).is_some()
            })
            .map(|mut component| {
                component.sort();
                component
            })
            .collect();
        cycles.sort();

        cycles
            .into_iter()
            .map(|component| {
                component
                    .into_iter()
                    .map(|idx| self.graph[idx].clone())
                    .collect()
            })
            .collect()
    }

    /// Returns the resolved dependencies of a task, in declared order
    pub fn dependencies(&self, task_id: &str) -> Vec<&TaskId> {
        match self.node_map.get(task_id) {
            Some(idx) => self.dependencies[idx.index()]
                .iter()
                .map(|dep| &self.graph[*dep])
                .collect(),
            None => vec![],
        }
    }

    /// Returns true if the graph contains the task
    pub fn contains(&self, task_id: &str) -> bool {
        self.node_map.contains_key(task_id)
    }

    /// Returns the number of tasks in the graph
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}

/// Computes the column of every task in one pass over the whole collection
///
/// Columns are global: a dependency in another project still pushes a task
/// to the right.
pub fn compute_columns(tasks: &[Task]) -> ColumnMap {
    DependencyGraph::from_tasks(tasks).columns()
}
