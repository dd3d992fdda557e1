// src/search/mod.rs
//! # Wiki race search
//!
//! Breadth-first shortest-path search over a graph that is discovered while
//! it is walked. Nodes are opaque identifiers (canonical article URLs in
//! production); the edges of a node are only known after a [`LinkResolver`]
//! has fetched and scanned it.
//!
//! ## Invariants
//! - A node enters the visited map at most once; its first parent wins.
//!   With a FIFO frontier that makes the reconstructed path a shortest one,
//!   ties going to whichever neighbour the resolver reported first.
//! - Every queued node is already in the visited map, so self links and
//!   repeated links never re-enter the queue.
//! - A failed resolution is logged and counted, and the node simply has no
//!   outbound edges. The search never aborts on a single page.
//!
//! ## Cost
//! Without a node budget the search runs until the finish is dequeued or the
//! reachable graph is exhausted. On the live site that can be very large;
//! [`GraphSearch::max_nodes`] caps the number of resolved pages.

use std::collections::{HashMap, VecDeque};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::net::FetchError;
use crate::progress::Progress;

pub mod wiki;

pub use wiki::WikiLinkResolver;

/// Canonical name of a page in the graph.
pub type NodeId = String;

/// Why a node produced no edges. The search treats every variant the same.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{node} unavailable: {reason}")]
    Unavailable { node: NodeId, reason: String },
}

/// Source of outbound edges, queried once per expanded node.
pub trait LinkResolver {
    fn resolve(&mut self, node: &str) -> Result<Vec<NodeId>, ResolveError>;
}

impl<F> LinkResolver for F
where
    F: FnMut(&str) -> Result<Vec<NodeId>, ResolveError>,
{
    fn resolve(&mut self, node: &str) -> Result<Vec<NodeId>, ResolveError> {
        self(node)
    }
}

/// Outcome of one search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchReport {
    /// `[start, ..., finish]`, or empty when no path was found.
    pub path: Vec<NodeId>,
    /// Nodes handed to the resolver.
    pub expanded: usize,
    /// Resolutions that failed (counted in `expanded` too).
    pub failed: usize,
    /// Size of the visited map when the search ended.
    pub discovered: usize,
    /// The node budget ran out before the graph was exhausted.
    pub truncated: bool,
}

impl SearchReport {
    pub fn found(&self) -> bool { !self.path.is_empty() }

    /// Number of links followed, when a path was found.
    pub fn hops(&self) -> Option<usize> { self.path.len().checked_sub(1) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphSearch {
    /// Maximum number of nodes to resolve; `None` means unbounded.
    pub max_nodes: Option<usize>,
}

impl GraphSearch {
    pub fn new() -> Self { Self::default() }

    pub fn with_max_nodes(mut self, max_nodes: Option<usize>) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Shortest path from `start` to `finish`; empty if none was found.
    pub fn find_path<R: LinkResolver + ?Sized>(
        &self,
        resolver: &mut R,
        start: &str,
        finish: &str,
    ) -> Vec<NodeId> {
        self.run(resolver, start, finish, None).path
    }

    pub fn run<R: LinkResolver + ?Sized>(
        &self,
        resolver: &mut R,
        start: &str,
        finish: &str,
        mut progress: Option<&mut dyn Progress>,
    ) -> SearchReport {
        let mut visited: HashMap<NodeId, Option<NodeId>> = HashMap::new();
        let mut queue: VecDeque<NodeId> = VecDeque::new();
        let mut report = SearchReport::default();

        visited.insert(s!(start), None);
        queue.push_back(s!(start));

        while let Some(node) = queue.pop_front() {
            if node == finish {
                report.path = reconstruct(&visited, finish);
                break;
            }

            if self.max_nodes.is_some_and(|max| report.expanded >= max) {
                report.truncated = true;
                // Already discovered means its parent chain is final.
                if visited.contains_key(finish) {
                    report.path = reconstruct(&visited, finish);
                }
                info!("Node budget of {} reached after {} pages", report.expanded, visited.len());
                break;
            }

            report.expanded += 1;
            match resolver.resolve(&node) {
                Ok(links) => {
                    let before = visited.len();
                    for next in links {
                        if !visited.contains_key(&next) {
                            visited.insert(next.clone(), Some(node.clone()));
                            queue.push_back(next);
                        }
                    }
                    debug!("Expanded {node}: {} new, frontier {}", visited.len() - before, queue.len());
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&node);
                    }
                }
                Err(e) => {
                    report.failed += 1;
                    warn!("Error: {e}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(&node, &e.to_string());
                    }
                }
            }
        }

        report.discovered = visited.len();
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        report
    }
}

/// Shortest path with no node budget.
pub fn find_path<R: LinkResolver + ?Sized>(resolver: &mut R, start: &str, finish: &str) -> Vec<NodeId> {
    GraphSearch::new().find_path(resolver, start, finish)
}

/// Follow parents from `finish` back to the start, then reverse.
fn reconstruct(visited: &HashMap<NodeId, Option<NodeId>>, finish: &str) -> Vec<NodeId> {
    let mut path = vec![s!(finish)];
    let mut cur = finish;
    while let Some(Some(parent)) = visited.get(cur) {
        path.push(parent.clone());
        cur = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
        edges
            .iter()
            .map(|(k, v)| (s!(*k), v.iter().map(|s| s!(*s)).collect()))
            .collect()
    }

    fn resolver(g: &HashMap<String, Vec<String>>) -> impl FnMut(&str) -> Result<Vec<NodeId>, ResolveError> + '_ {
        move |node: &str| Ok(g.get(node).cloned().unwrap_or_default())
    }

    #[test]
    fn diamond_prefers_first_discovered_branch() {
        let g = graph(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["D"]), ("D", &["E"])]);
        let path = find_path(&mut resolver(&g), "A", "E");
        assert_eq!(path, vec!["A", "B", "D", "E"]);

        let g = graph(&[("A", &["C", "B"]), ("B", &["D"]), ("C", &["D"]), ("D", &["E"])]);
        let path = find_path(&mut resolver(&g), "A", "E");
        assert_eq!(path, vec!["A", "C", "D", "E"]);
    }

    #[test]
    fn start_equals_finish_never_resolves() {
        let mut calls = 0;
        let mut r = |_: &str| -> Result<Vec<NodeId>, ResolveError> {
            calls += 1;
            Ok(vec![])
        };
        assert_eq!(find_path(&mut r, "X", "X"), vec!["X"]);
        assert_eq!(calls, 0);
    }

    #[test]
    fn self_loops_and_duplicates_terminate() {
        let g = graph(&[("A", &["A", "B", "B", "A"]), ("B", &["B", "A"])]);
        let report = GraphSearch::new().run(&mut resolver(&g), "A", "Z", None);
        assert!(report.path.is_empty());
        assert_eq!(report.expanded, 2);
        assert_eq!(report.discovered, 2);
        assert!(!report.truncated);
    }

    #[test]
    fn failures_are_counted_not_fatal() {
        let g = graph(&[("A", &["bad", "B"]), ("B", &["F"])]);
        let mut r = |node: &str| -> Result<Vec<NodeId>, ResolveError> {
            if node == "bad" {
                return Err(ResolveError::Unavailable { node: s!(node), reason: s!("boom") });
            }
            Ok(g.get(node).cloned().unwrap_or_default())
        };
        let report = GraphSearch::new().run(&mut r, "A", "F", None);
        assert_eq!(report.path, vec!["A", "B", "F"]);
        assert_eq!(report.failed, 1);
        assert_eq!(report.hops(), Some(2));
    }

    #[test]
    fn budget_truncates_but_keeps_discovered_finish() {
        // Chain: A -> B -> C -> D
        let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &["D"])]);

        let report = GraphSearch::new().with_max_nodes(Some(1)).run(&mut resolver(&g), "A", "D", None);
        assert!(report.truncated);
        assert!(!report.found());
        assert_eq!(report.expanded, 1);

        // D is discovered while resolving A; the budget stops at B, before D is dequeued.
        let g = graph(&[("A", &["B", "D"]), ("B", &["C"])]);
        let report = GraphSearch::new().with_max_nodes(Some(1)).run(&mut resolver(&g), "A", "D", None);
        assert!(report.truncated);
        assert_eq!(report.path, vec!["A", "D"]);
    }
}
