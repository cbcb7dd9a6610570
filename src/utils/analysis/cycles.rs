//! Elementary cycle enumeration over the include graph.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::graph::DependencyGraph;

/// A circular include chain, anchored at its lexicographically smallest file.
/// The anchor is not repeated at the end.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Cycle {
    pub nodes: Vec<String>,
}

impl Cycle {
    /// Renders the cycle closed over its anchor, e.g. `a.php -> b.php -> a.php`.
    pub fn cycle_path(&self) -> String {
        match self.nodes.first() {
            Some(anchor) => format!("{} -> {}", self.nodes.join(" -> "), anchor),
            None => String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Enumerates every elementary cycle of `graph`.
///
/// Nodes are indexed in path order; the search started from each node only
/// walks successors whose index is not below the start. Each cycle is
/// therefore found exactly once, from its smallest member. Uses an explicit
/// stack, so deep include chains do not grow the call stack.
///
/// `max_len` caps the number of files per reported cycle; `None` is unbounded.
/// Output is ordered by length, then lexicographically.
pub fn find_cycles(graph: &DependencyGraph, max_len: Option<usize>) -> Vec<Cycle> {
    let nodes: Vec<&str> = graph.nodes().collect();
    let index: HashMap<&str, usize> = nodes.iter().enumerate().map(|(i, n)| (*n, i)).collect();

    let mut seen: HashSet<Vec<&str>> = HashSet::new();
    let mut cycles: Vec<Cycle> = Vec::new();

    for (start_idx, &start) in nodes.iter().enumerate() {
        if max_len == Some(0) {
            break;
        }

        let mut path: Vec<&str> = vec![start];
        let mut on_path: HashSet<&str> = HashSet::from([start]);
        let mut frames: Vec<(Vec<&str>, usize)> = vec![(graph.successors(start).collect(), 0)];

        while let Some((successors, cursor)) = frames.last_mut() {
            let Some(&next) = successors.get(*cursor) else {
                frames.pop();
                if let Some(done) = path.pop() {
                    on_path.remove(done);
                }
                continue;
            };
            *cursor += 1;

            match index.get(next) {
                Some(&next_idx) if next_idx >= start_idx => {}
                _ => continue,
            }

            if next == start {
                if seen.insert(path.clone()) {
                    cycles.push(Cycle {
                        nodes: path.iter().map(|n| n.to_string()).collect(),
                    });
                }
                continue;
            }

            if on_path.contains(next) || max_len.is_some_and(|cap| path.len() >= cap) {
                continue;
            }

            path.push(next);
            on_path.insert(next);
            frames.push((graph.successors(next).collect(), 0));
        }
    }

    cycles.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.nodes.cmp(&b.nodes)));
    cycles
}

/// Files that take part in at least one cycle.
pub fn nodes_in_cycles(cycles: &[Cycle]) -> Vec<String> {
    let mut nodes: Vec<String> = cycles.iter().flat_map(|c| c.nodes.iter().cloned()).collect();
    nodes.sort();
    nodes.dedup();
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from(edges: &[(&str, &str)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (from, to) in edges {
            graph.add_edge(*from, *to);
        }
        graph
    }

    fn names(cycles: &[Cycle]) -> Vec<Vec<&str>> {
        cycles
            .iter()
            .map(|c| c.nodes.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_two_file_cycle() {
        let graph = graph_from(&[("b.php", "a.php"), ("a.php", "b.php")]);
        let cycles = find_cycles(&graph, None);
        assert_eq!(names(&cycles), vec![vec!["a.php", "b.php"]]);
    }

    #[test]
    fn test_chain_has_no_cycles() {
        let graph = graph_from(&[("a.php", "b.php"), ("b.php", "c.php")]);
        assert!(find_cycles(&graph, None).is_empty());
    }

    #[test]
    fn test_self_loop() {
        let graph = graph_from(&[("self.php", "self.php"), ("self.php", "other.php")]);
        let cycles = find_cycles(&graph, None);
        assert_eq!(names(&cycles), vec![vec!["self.php"]]);
    }

    #[test]
    fn test_anchor_is_smallest_member() {
        let graph = graph_from(&[("c.php", "a.php"), ("a.php", "b.php"), ("b.php", "c.php")]);
        let cycles = find_cycles(&graph, None);
        assert_eq!(names(&cycles), vec![vec!["a.php", "b.php", "c.php"]]);
        assert_eq!(cycles[0].cycle_path(), "a.php -> b.php -> c.php -> a.php");
    }

    #[test]
    fn test_overlapping_cycles_each_reported_once() {
        // a <-> b, b <-> c, a -> b -> c -> a
        let graph = graph_from(&[
            ("a.php", "b.php"),
            ("b.php", "a.php"),
            ("b.php", "c.php"),
            ("c.php", "b.php"),
            ("c.php", "a.php"),
        ]);
        let cycles = find_cycles(&graph, None);
        assert_eq!(
            names(&cycles),
            vec![
                vec!["a.php", "b.php"],
                vec!["b.php", "c.php"],
                vec!["a.php", "b.php", "c.php"],
            ]
        );
    }

    #[test]
    fn test_complete_graph_cycle_count() {
        // K4 has 6 two-cycles, 8 three-cycles and 6 four-cycles
        let files = ["a.php", "b.php", "c.php", "d.php"];
        let mut graph = DependencyGraph::new();
        for from in files {
            for to in files {
                if from != to {
                    graph.add_edge(from, to);
                }
            }
        }

        let cycles = find_cycles(&graph, None);
        assert_eq!(cycles.len(), 20);
        assert_eq!(cycles.iter().filter(|c| c.len() == 2).count(), 6);
        assert_eq!(cycles.iter().filter(|c| c.len() == 3).count(), 8);
        assert_eq!(cycles.iter().filter(|c| c.len() == 4).count(), 6);

        let unique: HashSet<&Cycle> = cycles.iter().collect();
        assert_eq!(unique.len(), cycles.len());
        for cycle in &cycles {
            let anchor = &cycle.nodes[0];
            assert!(cycle.nodes.iter().all(|n| n >= anchor));
            let distinct: HashSet<&String> = cycle.nodes.iter().collect();
            assert_eq!(distinct.len(), cycle.len());
        }
    }

    #[test]
    fn test_max_len_cap() {
        let graph = graph_from(&[
            ("a.php", "b.php"),
            ("b.php", "a.php"),
            ("b.php", "c.php"),
            ("c.php", "a.php"),
        ]);
        assert_eq!(find_cycles(&graph, None).len(), 2);
        assert_eq!(names(&find_cycles(&graph, Some(2))), vec![vec!["a.php", "b.php"]]);
        assert!(find_cycles(&graph, Some(0)).is_empty());
    }

    #[test]
    fn test_nodes_in_cycles() {
        let graph = graph_from(&[
            ("a.php", "b.php"),
            ("b.php", "a.php"),
            ("c.php", "d.php"),
            ("d.php", "c.php"),
            ("c.php", "e.php"),
        ]);
        let cycles = find_cycles(&graph, None);
        assert_eq!(nodes_in_cycles(&cycles), vec!["a.php", "b.php", "c.php", "d.php"]);
    }

    #[test]
    fn test_empty_graph() {
        assert!(find_cycles(&DependencyGraph::new(), None).is_empty());
    }
}
