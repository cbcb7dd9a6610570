use serde::Serialize;

use super::graph::DependencyGraph;

/// A heavily included file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hub {
    pub path: String,
    pub in_degree: usize,
}

/// Returns the `top_n` most included files.
///
/// Ordered by descending in-degree, ties broken by ascending path, and only
/// then truncated, so the result never depends on insertion order.
pub fn find_hubs(graph: &DependencyGraph, top_n: usize) -> Vec<Hub> {
    let mut hubs: Vec<Hub> = graph
        .nodes()
        .map(|node| Hub {
            path: node.to_string(),
            in_degree: graph.in_degree(node),
        })
        .collect();

    hubs.sort_by(|a, b| {
        b.in_degree
            .cmp(&a.in_degree)
            .then_with(|| a.path.cmp(&b.path))
    });
    hubs.truncate(top_n);
    hubs
}
