use std::collections::{BTreeMap, BTreeSet};

/// Directed include graph keyed by project-relative paths.
///
/// Edges point from the including file to the included file. Both maps are
/// ordered so every iteration (nodes, successors, edges) is deterministic
/// regardless of insertion order.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
    in_degree: BTreeMap<String, usize>,
    edge_count: usize,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` if absent. Existing nodes keep their edges.
    pub fn add_node(&mut self, node: impl Into<String>) {
        let node = node.into();
        if self.edges.contains_key(&node) {
            return;
        }
        self.in_degree.entry(node.clone()).or_insert(0);
        self.edges.insert(node, BTreeSet::new());
    }

    /// Inserts the edge `from -> to`, creating either node on first sight.
    /// Returns `false` when the edge was already present.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> bool {
        let from = from.into();
        let to = to.into();
        self.add_node(from.clone());
        self.add_node(to.clone());

        let inserted = self.edges.entry(from).or_default().insert(to.clone());
        if inserted {
            *self.in_degree.entry(to).or_insert(0) += 1;
            self.edge_count += 1;
        }
        inserted
    }

    pub fn has_node(&self, node: &str) -> bool {
        self.edges.contains_key(node)
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges.get(from).is_some_and(|targets| targets.contains(to))
    }

    /// Number of distinct includers of `node`; zero for unknown nodes.
    pub fn in_degree(&self, node: &str) -> usize {
        self.in_degree.get(node).copied().unwrap_or(0)
    }

    /// Files included by `node`, in ascending path order.
    pub fn successors<'a>(&'a self, node: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.edges
            .get(node)
            .into_iter()
            .flat_map(|targets| targets.iter().map(String::as_str))
    }

    /// All nodes in ascending path order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
