//! Task dependency graph and topological sequencing.
//!
//! `TaskGraph` turns the flat task list into a petgraph `DiGraph` whose
//! edges point from a dependency to the task that depends on it. The
//! sequencer walks that graph depth-first, post-order, with an explicit
//! stack so deep chains cannot overflow and cycles are reported instead of
//! recursing forever.

use crate::config::UnknownDependencyPolicy;
use crate::core::task::{TaskId, WorkflowTask};
use crate::error::{Error, Result};
use crate::{mlog_debug, mlog_error, mlog_warn};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// A `dependsOn` entry that names no task in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReference {
    /// Task declaring the dependency.
    pub task: TaskId,
    /// The missing dependency ID.
    pub dependency: TaskId,
}

/// Traversal state of a node during sequencing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// The task dependency graph.
///
/// Nodes borrow the caller's tasks and are inserted in input order, so
/// `node_indices()` iterates in the original order. Edge weights hold the
/// dependency's position in the dependent's `dependsOn` list.
pub struct TaskGraph<'a> {
    graph: DiGraph<&'a WorkflowTask, usize>,
    task_index: HashMap<&'a str, NodeIndex>,
    unknown: Vec<UnknownReference>,
}

impl<'a> TaskGraph<'a> {
    /// Build the graph from a task list.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A task fails `WorkflowTask::validate`
    /// - Two tasks share an ID
    /// - A dependency is unknown and `policy` is `Reject`
    pub fn build(tasks: &'a [WorkflowTask], policy: UnknownDependencyPolicy) -> Result<Self> {
        let mut graph = DiGraph::with_capacity(tasks.len(), tasks.len());
        let mut task_index = HashMap::with_capacity(tasks.len());

        for task in tasks {
            task.validate()?;
            if task_index.contains_key(task.task_id.as_str()) {
                return Err(Error::DuplicateTask(task.task_id.to_string()));
            }
            let index = graph.add_node(task);
            task_index.insert(task.task_id.as_str(), index);
        }

        let mut unknown = Vec::new();
        for task in tasks {
            let to = task_index[task.task_id.as_str()];
            for (position, dependency) in task.depends_on.iter().enumerate() {
                let Some(&from) = task_index.get(dependency.as_str()) else {
                    if policy == UnknownDependencyPolicy::Reject {
                        mlog_error!(
                            "Task {} depends on unknown task {}",
                            task.task_id,
                            dependency
                        );
                        return Err(Error::UnknownDependency {
                            task: task.task_id.to_string(),
                            dependency: dependency.to_string(),
                        });
                    }
                    mlog_warn!(
                        "Task {} depends on unknown task {}; assuming it is satisfied",
                        task.task_id,
                        dependency
                    );
                    unknown.push(UnknownReference {
                        task: task.task_id.clone(),
                        dependency: dependency.clone(),
                    });
                    continue;
                };

                if graph.find_edge(from, to).is_none() {
                    graph.add_edge(from, to, position);
                }
            }
        }

        mlog_debug!(
            "TaskGraph built: tasks={}, dependencies={}, unknown={}",
            graph.node_count(),
            graph.edge_count(),
            unknown.len()
        );

        Ok(Self {
            graph,
            task_index,
            unknown,
        })
    }

    /// Get a task by its ID.
    pub fn get_task(&self, id: &str) -> Option<&'a WorkflowTask> {
        self.task_index.get(id).map(|&index| self.graph[index])
    }

    /// Number of tasks in the graph.
    pub fn task_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of resolved dependency edges.
    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_task(&self, id: &str) -> bool {
        self.task_index.contains_key(id)
    }

    /// Check whether `task` directly depends on `dependency`.
    pub fn has_dependency(&self, task: &str, dependency: &str) -> bool {
        match (self.task_index.get(dependency), self.task_index.get(task)) {
            (Some(&from), Some(&to)) => self.graph.find_edge(from, to).is_some(),
            _ => false,
        }
    }

    /// Resolved dependencies of a task, in declared order.
    pub fn get_dependencies(&self, id: &str) -> Vec<&'a WorkflowTask> {
        self.task_index
            .get(id)
            .map(|&index| {
                self.ordered_dependencies(index)
                    .into_iter()
                    .map(|dep| self.graph[dep])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Tasks that directly depend on the given task.
    pub fn get_dependents(&self, id: &str) -> Vec<&'a WorkflowTask> {
        match self.task_index.get(id) {
            Some(&index) => {
                let mut dependents: Vec<NodeIndex> = self
                    .graph
                    .neighbors_directed(index, Direction::Outgoing)
                    .collect();
                dependents.sort();
                dependents.into_iter().map(|n| self.graph[n]).collect()
            }
            None => Vec::new(),
        }
    }

    /// Dependency references that were skipped because no task has that ID.
    pub fn unknown_dependencies(&self) -> &[UnknownReference] {
        &self.unknown
    }

    /// Get the underlying graph for advanced operations.
    pub fn graph(&self) -> &DiGraph<&'a WorkflowTask, usize> {
        &self.graph
    }

    /// Get tasks in topological order.
    ///
    /// Depth-first post-order: tasks are taken in input order, and each
    /// task's dependencies are emitted (in declared order) before the task
    /// itself. Unconstrained tasks therefore keep their input order.
    ///
    /// # Errors
    /// Returns `Error::CyclicDependency` naming the cycle path when a task
    /// transitively depends on itself.
    pub fn topological_order(&self) -> Result<Vec<&'a WorkflowTask>> {
        let mut marks = vec![Mark::Unvisited; self.graph.node_count()];
        let mut order = Vec::with_capacity(self.graph.node_count());

        for root in self.graph.node_indices() {
            if marks[root.index()] != Mark::Unvisited {
                continue;
            }

            marks[root.index()] = Mark::Visiting;
            let mut stack = vec![(root, self.ordered_dependencies(root), 0usize)];

            while let Some((node, dependencies, next)) = stack.last_mut() {
                if let Some(&dependency) = dependencies.get(*next) {
                    *next += 1;
                    match marks[dependency.index()] {
                        Mark::Unvisited => {
                            marks[dependency.index()] = Mark::Visiting;
                            let nested = self.ordered_dependencies(dependency);
                            stack.push((dependency, nested, 0));
                        }
                        Mark::Visiting => {
                            let path: Vec<NodeIndex> =
                                stack.iter().map(|(index, _, _)| *index).collect();
                            return Err(self.cycle_error(&path, dependency));
                        }
                        Mark::Done => {}
                    }
                } else {
                    let finished = *node;
                    marks[finished.index()] = Mark::Done;
                    order.push(self.graph[finished]);
                    stack.pop();
                }
            }
        }

        Ok(order)
    }

    fn ordered_dependencies(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<(usize, NodeIndex)> = self
            .graph
            .edges_directed(index, Direction::Incoming)
            .map(|edge| (*edge.weight(), edge.source()))
            .collect();
        edges.sort_by_key(|(position, _)| *position);
        edges.into_iter().map(|(_, source)| source).collect()
    }

    /// Build the error for a back edge to `reentered`, using the DFS path.
    fn cycle_error(&self, path: &[NodeIndex], reentered: NodeIndex) -> Error {
        let start = path
            .iter()
            .position(|&index| index == reentered)
            .unwrap_or(0);
        let cycle: Vec<String> = path[start..]
            .iter()
            .chain(std::iter::once(&reentered))
            .map(|&index| self.graph[index].task_id.to_string())
            .collect();
        mlog_error!("Cycle detected: {}", cycle.join(" -> "));
        Error::CyclicDependency { cycle }
    }
}

impl std::fmt::Debug for TaskGraph<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskGraph")
            .field("tasks", &self.task_count())
            .field("dependencies", &self.dependency_count())
            .field("unknown", &self.unknown.len())
            .finish()
    }
}
