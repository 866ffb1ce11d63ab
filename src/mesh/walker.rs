//! Greedy flow-line extraction over a [`MeshGraph`].

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::MeshError;
use crate::math::point_2d::distance;
use crate::math::Point2;

use super::graph::{MeshGraph, NodeId};

/// Rounds of end extension run after the main search.
const EXTENSION_ROUNDS: usize = 3;

/// Tuning for [`FindPaths`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathOptions {
    /// Degrees. A turn sharper than five times this ends the walk in its
    /// current direction. `0` disables the check.
    pub angle_threshold: f64,
    /// Longest allowed span from the previous node to the next one. `0`
    /// disables the check.
    pub length_threshold: f64,
    /// Paths must have more than `max(1, path_length_threshold)` nodes.
    pub path_length_threshold: usize,
    /// Prefer repeating the previous turn over going straight.
    pub swirl: bool,
    /// Grow path ends into unused neighbors after the search.
    pub extend_ends: bool,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            angle_threshold: 15.0,
            length_threshold: 0.0,
            path_length_threshold: 5,
            swirl: false,
            extend_ends: true,
        }
    }
}

/// Direction state of a single walk.
///
/// A walk heads away from its start until it hits a limit, turns around
/// once to grow from the start instead, and stops at the second limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkPhase {
    Forward,
    Reversed,
    Terminated,
}

impl WalkPhase {
    /// Phase after the walk runs into a limit.
    #[must_use]
    pub fn after_limit(self) -> Self {
        match self {
            Self::Forward => Self::Reversed,
            Self::Reversed | Self::Terminated => Self::Terminated,
        }
    }
}

/// Result of [`FindPaths::execute`].
#[derive(Debug, Clone, Default)]
pub struct PathSet {
    /// Node-disjoint paths in the order they were found.
    pub paths: Vec<Vec<NodeId>>,
    /// Start nodes popped from the queue.
    pub iterations: usize,
    /// `true` when the iteration cap stopped the search with starts left.
    pub exhausted: bool,
}

impl PathSet {
    /// Resolves every path to positions.
    #[must_use]
    pub fn points(&self, graph: &MeshGraph) -> Vec<Vec<Point2>> {
        self.paths.iter().map(|path| graph.path_points(path)).collect()
    }
}

/// Signed turn at `mid` when travelling `from -> mid -> to`, in radians.
fn turn_angle(from: &Point2, mid: &Point2, to: &Point2) -> f64 {
    let d1 = mid - from;
    let d2 = to - mid;
    (d1.x * d2.y - d1.y * d2.x).atan2(d1.x * d2.x + d1.y * d2.y)
}

struct Step {
    node: NodeId,
    turn: f64,
    score: f64,
}

/// Extracts long, smooth, node-disjoint paths from a mesh.
#[derive(Debug, Clone, Default)]
pub struct FindPaths {
    options: PathOptions,
}

impl FindPaths {
    #[must_use]
    pub fn new(options: PathOptions) -> Self {
        Self { options }
    }

    /// Walks from `start` through `next` as far as the limits allow.
    ///
    /// The returned path always begins with `start` and `next` in walk
    /// order unless the walk turned around, in which case nodes added from
    /// the start side come first.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::UnknownNode`] if `start` or `next` is not a node
    /// of `graph`.
    pub fn find_path(
        &self,
        graph: &MeshGraph,
        start: NodeId,
        next: NodeId,
        global_used: &HashSet<NodeId>,
    ) -> Result<Vec<NodeId>, MeshError> {
        graph.node(start)?;
        graph.node(next)?;
        Ok(self.walk(graph, start, next, global_used))
    }

    fn best_step(
        &self,
        graph: &MeshGraph,
        prev: NodeId,
        current: NodeId,
        used: &HashSet<NodeId>,
        global_used: &HashSet<NodeId>,
        prev_turn: Option<f64>,
    ) -> Option<Step> {
        let from = graph.point(prev)?;
        let mid = graph.point(current)?;
        graph
            .neighbors(current)
            .iter()
            .filter(|&&n| n != prev && !used.contains(&n) && !global_used.contains(&n))
            // sharing a triangle with `prev` would double back across it
            .filter(|&&n| !graph.are_adjacent(n, prev))
            .filter_map(|&n| {
                let turn = turn_angle(&from, &mid, &graph.point(n)?);
                let score = match (self.options.swirl, prev_turn) {
                    (true, Some(last)) => (turn - last).abs(),
                    _ => turn.abs(),
                };
                Some(Step { node: n, turn, score })
            })
            .min_by(|a, b| a.score.total_cmp(&b.score))
    }

    fn breaks_limit(&self, graph: &MeshGraph, prev: NodeId, step: &Step) -> bool {
        let max_turn = self.options.angle_threshold.to_radians() * 5.0;
        if max_turn > 0.0 && step.score > max_turn {
            return true;
        }
        let span = match (graph.point(prev), graph.point(step.node)) {
            (Some(a), Some(b)) => distance(&a, &b),
            _ => 0.0,
        };
        self.options.length_threshold > 0.0 && span > self.options.length_threshold
    }

    fn walk(&self, graph: &MeshGraph, start: NodeId, next: NodeId, global_used: &HashSet<NodeId>) -> Vec<NodeId> {
        let mut path = vec![start, next];
        let mut used: HashSet<NodeId> = path.iter().copied().collect();
        let (mut prev, mut current) = (start, next);
        let mut prev_turn = None;
        let mut phase = WalkPhase::Forward;

        while phase != WalkPhase::Terminated {
            let Some(step) = self.best_step(graph, prev, current, &used, global_used, prev_turn) else {
                break;
            };

            if self.breaks_limit(graph, prev, &step) {
                phase = phase.after_limit();
                if phase == WalkPhase::Reversed {
                    path.reverse();
                    prev = path[path.len() - 2];
                    current = path[path.len() - 1];
                    prev_turn = None;
                }
                continue;
            }

            used.insert(step.node);
            path.push(step.node);
            prev = current;
            current = step.node;
            prev_turn = Some(step.turn);
        }

        if phase != WalkPhase::Forward {
            path.reverse();
        }
        path
    }

    /// Best unused neighbor to grow `end` by, continuing from `inner`.
    fn extension(graph: &MeshGraph, inner: NodeId, end: NodeId, used: &HashSet<NodeId>) -> Option<NodeId> {
        let from = graph.point(inner)?;
        let mid = graph.point(end)?;
        graph
            .neighbors(end)
            .iter()
            .filter(|n| !used.contains(n))
            .filter_map(|&n| Some((n, turn_angle(&from, &mid, &graph.point(n)?).abs())))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(n, _)| n)
    }

    fn extend_ends(graph: &MeshGraph, paths: &mut [Vec<NodeId>], used: &mut HashSet<NodeId>) {
        for _ in 0..EXTENSION_ROUNDS {
            for path in paths.iter_mut() {
                let n = path.len();
                if n < 2 {
                    continue;
                }
                if let Some(node) = Self::extension(graph, path[1], path[0], used) {
                    used.insert(node);
                    path.insert(0, node);
                }
                let n = path.len();
                if let Some(node) = Self::extension(graph, path[n - 2], path[n - 1], used) {
                    used.insert(node);
                    path.push(node);
                }
            }
        }
    }

    /// Runs the search over every node of `graph`.
    ///
    /// Starts are taken in order of `x * y`; after each accepted path the
    /// queue is re-sorted by distance to that path's last node. A start
    /// that yields nothing goes to the back of the queue. The search stops
    /// after `3 * node_count` pops, or earlier once every queued start has
    /// failed since the last accepted path.
    #[must_use]
    pub fn execute(&self, graph: &MeshGraph) -> PathSet {
        let position = |id: &NodeId| graph.point(*id).unwrap_or_else(Point2::origin);

        let mut queue: VecDeque<NodeId> = graph.node_ids().iter().copied().collect();
        queue
            .make_contiguous()
            .sort_by(|a, b| {
                let (pa, pb) = (position(a), position(b));
                (pa.x * pa.y).total_cmp(&(pb.x * pb.y))
            });

        let max_tries = queue.len() * 3;
        let min_len = self.options.path_length_threshold.max(1);
        let mut global_used: HashSet<NodeId> = HashSet::new();
        let mut result = PathSet::default();
        let mut failed_in_a_row = 0usize;

        while let Some(start) = queue.pop_front() {
            result.iterations += 1;
            if global_used.contains(&start) {
                continue;
            }

            let mut best: Option<Vec<NodeId>> = None;
            for &next in graph.neighbors(start) {
                if global_used.contains(&next) {
                    continue;
                }
                let path = self.walk(graph, start, next, &global_used);
                if path.len() > min_len && !best.as_ref().is_some_and(|b| b.len() >= path.len()) {
                    best = Some(path);
                }
            }

            if let Some(path) = best {
                global_used.extend(path.iter().copied());
                let last = path.last().map_or_else(Point2::origin, position);
                queue
                    .make_contiguous()
                    .sort_by(|a, b| distance(&last, &position(a)).total_cmp(&distance(&last, &position(b))));
                result.paths.push(path);
                failed_in_a_row = 0;
            } else {
                queue.push_back(start);
                failed_in_a_row += 1;
                if failed_in_a_row >= queue.len() {
                    break;
                }
            }

            if result.iterations > max_tries {
                result.exhausted = !queue.is_empty();
                break;
            }
        }

        if result.exhausted {
            tracing::warn!(
                iterations = result.iterations,
                paths = result.paths.len(),
                "path search hit its iteration cap"
            );
        }

        if self.options.extend_ends {
            Self::extend_ends(graph, &mut result.paths, &mut global_used);
        }

        tracing::debug!(
            paths = result.paths.len(),
            used = global_used.len(),
            nodes = graph.node_count(),
            "path search finished"
        );
        result
    }
}
