// src/graph/store.rs
//! The directed graph store.
//!
//! Hand-rolled on ordered maps so that snapshots are plain `Clone`s and
//! iteration (and therefore rendered output) is deterministic. Edges are
//! presence/absence only: re-adding an existing edge is a no-op.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A rendering attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Num(f64),
}

impl AttrValue {
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AttrValue::Str(s) => serde_json::Value::String(s.clone()),
            AttrValue::Num(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => write!(f, "{s}"),
            AttrValue::Num(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Num(n)
    }
}

/// A document (or external reference) in the graph.
///
/// A node created only as a link target carries no label: that is the
/// dangling-link case and renderers may style it accordingly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub label: Option<String>,
    pub tags: Vec<String>,
    pub is_collapsed: bool,
    pub attrs: BTreeMap<String, AttrValue>,
}

/// Directed graph keyed by canonical node identifier.
///
/// `Clone` produces a fully independent deep copy (all node, edge and
/// attribute data is owned), which is exactly what the baseline snapshot
/// relies on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiGraph {
    nodes: BTreeMap<String, Node>,
    succ: BTreeMap<String, BTreeSet<String>>,
    pred: BTreeMap<String, BTreeSet<String>>,
}

impl DiGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.succ.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Inserts the node if absent and returns it.
    pub fn add_node(&mut self, id: &str) -> &mut Node {
        self.nodes.entry(id.to_string()).or_default()
    }

    /// Adds a directed edge, creating missing endpoints implicitly.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.add_node(from);
        self.add_node(to);
        self.succ
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
        self.pred
            .entry(to.to_string())
            .or_default()
            .insert(from.to_string());
    }

    #[must_use]
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.succ.get(from).is_some_and(|ts| ts.contains(to))
    }

    /// Removes a node and every edge touching it.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let node = self.nodes.remove(id)?;
        if let Some(targets) = self.succ.remove(id) {
            for t in targets {
                if let Some(sources) = self.pred.get_mut(&t) {
                    sources.remove(id);
                }
            }
        }
        if let Some(sources) = self.pred.remove(id) {
            for s in sources {
                if let Some(targets) = self.succ.get_mut(&s) {
                    targets.remove(id);
                }
            }
        }
        Some(node)
    }

    /// Drops all outgoing edges of `id`, keeping the node itself.
    pub fn remove_outgoing(&mut self, id: &str) {
        if let Some(targets) = self.succ.remove(id) {
            for t in targets {
                if let Some(sources) = self.pred.get_mut(&t) {
                    sources.remove(id);
                }
            }
        }
    }

    /// Merges `child` into `parent`: every edge incident to `child` is
    /// redirected to `parent` (self-loops dropped), then `child` is
    /// removed.
    pub fn contract(&mut self, parent: &str, child: &str) {
        if parent == child || !self.contains(child) {
            return;
        }
        let sources: Vec<String> = self.predecessors(child).map(str::to_string).collect();
        let targets: Vec<String> = self.successors(child).map(str::to_string).collect();
        self.remove_node(child);
        for s in sources {
            if s != parent && s != child {
                self.add_edge(&s, parent);
            }
        }
        for t in targets {
            if t != parent && t != child {
                self.add_edge(parent, &t);
            }
        }
    }

    pub fn successors(&self, id: &str) -> impl Iterator<Item = &str> + '_ {
        self.succ.get(id).into_iter().flatten().map(String::as_str)
    }

    pub fn predecessors(&self, id: &str) -> impl Iterator<Item = &str> + '_ {
        self.pred.get(id).into_iter().flatten().map(String::as_str)
    }

    /// Neighbors under the undirected view of the graph.
    #[must_use]
    pub fn undirected_neighbors(&self, id: &str) -> BTreeSet<&str> {
        self.successors(id).chain(self.predecessors(id)).collect()
    }

    /// Owned identifier list, for loops that mutate the graph while
    /// iterating.
    #[must_use]
    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &Node)> + '_ {
        self.nodes.iter().map(|(id, n)| (id.as_str(), n))
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.succ
            .iter()
            .flat_map(|(s, ts)| ts.iter().map(move |t| (s.as_str(), t.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DiGraph {
        let mut g = DiGraph::new();
        g.add_edge("a", "b");
        g.add_edge("b", "c");
        g.add_edge("c", "a");
        g
    }

    #[test]
    fn test_add_edge_creates_endpoints() {
        let mut g = DiGraph::new();
        g.add_edge("a", "b");
        assert!(g.contains("a"));
        assert!(g.contains("b"));
        assert!(g.contains_edge("a", "b"));
        assert!(!g.contains_edge("b", "a"));
    }

    #[test]
    fn test_duplicate_edge_is_noop() {
        let mut g = DiGraph::new();
        g.add_edge("a", "b");
        g.add_edge("a", "b");
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut g = triangle();
        g.remove_node("b");
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(g.contains_edge("c", "a"));
        assert!(!g.contains_edge("a", "b"));
    }

    #[test]
    fn test_contract_redirects_edges_and_drops_self_loops() {
        // x -> p -> c -> y, plus c -> p which would become a self-loop.
        let mut g = DiGraph::new();
        g.add_edge("x", "p");
        g.add_edge("p", "c");
        g.add_edge("c", "y");
        g.add_edge("c", "p");
        g.contract("p", "c");
        assert!(!g.contains("c"));
        assert!(g.contains_edge("x", "p"));
        assert!(g.contains_edge("p", "y"));
        assert!(!g.contains_edge("p", "p"));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut g = triangle();
        g.add_node("a").attrs.insert("color".into(), "red".into());
        let snapshot = g.clone();
        g.remove_node("a");
        g.add_node("b").attrs.insert("color".into(), "blue".into());
        assert!(snapshot.contains("a"));
        assert_eq!(
            snapshot.node("a").and_then(|n| n.attrs.get("color")),
            Some(&AttrValue::Str("red".into()))
        );
        assert!(snapshot.node("b").is_some_and(|n| n.attrs.is_empty()));
    }

    #[test]
    fn test_undirected_neighbors() {
        let g = triangle();
        let n = g.undirected_neighbors("a");
        assert!(n.contains("b"));
        assert!(n.contains("c"));
    }
}
