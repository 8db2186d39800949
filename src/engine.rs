// src/engine.rs
//! The graph engine and its transformation pipeline.
//!
//! A [`WikiGraph`] owns two graphs: the working graph that every pipeline
//! operation mutates, and an immutable baseline snapshot taken once right
//! after the corpus scan. `reset` restores the working graph from the
//! baseline; `expand_node` recovers a collapsed node's original
//! neighborhood from it. Operations return `&mut Self` so calls chain:
//!
//! ```no_run
//! # use wikigraph_core::config::Config;
//! # use wikigraph_core::engine::{MatchMode, WikiGraph};
//! # fn demo() -> wikigraph_core::error::Result<()> {
//! let mut engine = WikiGraph::build(Config::new("/home/user/wiki"))?;
//! engine
//!     .reset()
//!     .filter_by_content(&["(?i)project".into()], MatchMode::All, false)?
//!     .scale_by_centrality("fontsize", 20.0, 100.0);
//! # Ok(())
//! # }
//! ```
//!
//! Per-item failures inside a batch (a collapse target that doesn't
//! exist, a label extension on a node without cached lines) never abort
//! the batch: they are logged and accumulated as [`PipelineFailure`]
//! records for the caller to inspect. Whole-operation preconditions
//! (expanding a node that isn't collapsed, malformed regexes) are hard
//! errors.

use crate::config::Config;
use crate::error::{Result, WikiError};
use crate::graph::traversal::{descendants_within, neighborhood_within};
use crate::graph::{centrality, AttrValue, DiGraph};
use crate::link;
use crate::scan;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::warn;

/// How a set of regexes must match a node's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every regex must match at least one line.
    All,
    /// At least one regex must match at least one line.
    Any,
}

/// A swallowed per-item failure from a batch operation.
#[derive(Debug, Clone)]
pub struct PipelineFailure {
    pub operation: &'static str,
    pub node: String,
    pub reason: String,
}

/// The engine: working graph, baseline snapshot, and line cache.
pub struct WikiGraph {
    config: Config,
    graph: DiGraph,
    baseline: DiGraph,
    lines: BTreeMap<String, Vec<String>>,
    failures: Vec<PipelineFailure>,
}

impl WikiGraph {
    /// Scans the corpus and snapshots the baseline.
    ///
    /// # Errors
    /// Fails on invalid configuration or any filesystem error during the
    /// scan.
    pub fn build(config: Config) -> Result<Self> {
        config.validate()?;
        let corpus = scan::scan_corpus(&config)?;
        Ok(Self {
            config,
            baseline: corpus.graph.clone(),
            graph: corpus.graph,
            lines: corpus.lines,
            failures: Vec::new(),
        })
    }

    /// Restores the working graph to the baseline snapshot and clears
    /// accumulated failures.
    pub fn reset(&mut self) -> &mut Self {
        self.graph = self.baseline.clone();
        self.failures.clear();
        self
    }

    /// Re-scans the corpus from disk, replacing graph, baseline and line
    /// cache. Picks up external edits to the document tree.
    ///
    /// # Errors
    /// Fails like [`WikiGraph::build`]; on error the engine keeps its
    /// previous state.
    pub fn reload(&mut self) -> Result<&mut Self> {
        let corpus = scan::scan_corpus(&self.config)?;
        self.baseline = corpus.graph.clone();
        self.graph = corpus.graph;
        self.lines = corpus.lines;
        self.failures.clear();
        Ok(self)
    }

    /// Removes every node whose cached lines fail the regex test (or pass
    /// it, when `invert` is set), along with all incident edges. Nodes
    /// without cached lines (dangling targets) test against an empty line
    /// sequence.
    ///
    /// # Errors
    /// Fails if any pattern is not a valid regex.
    pub fn filter_by_content(
        &mut self,
        patterns: &[String],
        mode: MatchMode,
        invert: bool,
    ) -> Result<&mut Self> {
        let regexes = compile_patterns(patterns)?;
        let empty: Vec<String> = Vec::new();
        let doomed: Vec<String> = self
            .graph
            .node_ids()
            .into_iter()
            .filter(|id| {
                let lines = self.lines.get(id).unwrap_or(&empty);
                lines_match(&regexes, lines, mode) == invert
            })
            .collect();
        for id in doomed {
            self.graph.remove_node(&id);
        }
        Ok(self)
    }

    /// Like [`WikiGraph::filter_by_content`], but the haystack is the
    /// node identifier itself instead of the document's lines.
    ///
    /// # Errors
    /// Fails if any pattern is not a valid regex.
    pub fn filter_by_filename(
        &mut self,
        patterns: &[String],
        mode: MatchMode,
        invert: bool,
    ) -> Result<&mut Self> {
        let regexes = compile_patterns(patterns)?;
        let doomed: Vec<String> = self
            .graph
            .node_ids()
            .into_iter()
            .filter(|id| {
                let haystack = [id.clone()];
                lines_match(&regexes, &haystack, mode) == invert
            })
            .collect();
        for id in doomed {
            self.graph.remove_node(&id);
        }
        Ok(self)
    }

    /// Keeps only nodes carrying at least one of the given tags.
    pub fn filter_by_tags(&mut self, tags: &[String]) -> &mut Self {
        let doomed: Vec<String> = self
            .graph
            .nodes()
            .filter(|(_, node)| !node.tags.iter().any(|t| tags.contains(t)))
            .map(|(id, _)| id.to_string())
            .collect();
        for id in doomed {
            self.graph.remove_node(&id);
        }
        self
    }

    /// Sets the given attribute/value pairs on every node whose lines
    /// match ALL of the given regexes. Non-matching nodes are untouched.
    ///
    /// # Errors
    /// Fails if any pattern is not a valid regex.
    pub fn annotate_by_content(
        &mut self,
        patterns: &[String],
        names: &[String],
        values: &[AttrValue],
    ) -> Result<&mut Self> {
        let regexes = compile_patterns(patterns)?;
        let empty: Vec<String> = Vec::new();
        for id in self.graph.node_ids() {
            let lines = self.lines.get(&id).unwrap_or(&empty);
            if !lines_match(&regexes, lines, MatchMode::All) {
                continue;
            }
            if let Some(node) = self.graph.node_mut(&id) {
                for (name, value) in names.iter().zip(values) {
                    node.attrs.insert(name.clone(), value.clone());
                }
            }
        }
        Ok(self)
    }

    /// Scales `attribute` by each node's betweenness centrality relative
    /// to the maximum: the most central node lands exactly on `max_val`,
    /// everything else saturates monotonically between the bounds. The
    /// exponent `ln(max_val)/ln(min_val)` makes the mapping hit both
    /// endpoints; both bounds must be above 1 for it to be meaningful.
    ///
    /// A graph with no nodes or no paths (zero maximum centrality) is a
    /// successful no-op.
    pub fn scale_by_centrality(&mut self, attribute: &str, min_val: f64, max_val: f64) -> &mut Self {
        let scores = centrality::betweenness(&self.graph);
        let max_score = scores.values().copied().fold(0.0_f64, f64::max);
        if max_score <= 0.0 {
            return self;
        }
        let exponent = max_val.ln() / min_val.ln();
        for (id, score) in scores {
            let value = (min_val * score / max_score)
                .powf(exponent)
                .min(max_val)
                .max(min_val);
            if let Some(node) = self.graph.node_mut(&id) {
                node.attrs
                    .insert(attribute.to_string(), AttrValue::Num(value));
            }
        }
        self
    }

    /// Collapses each target node's descendants (up to `depth` directed
    /// hops) into it: descendant edges are redirected onto the target,
    /// self-loops dropped, descendants removed, and the target flagged
    /// `is_collapsed`. Targets are resolved against the corpus root and
    /// completed with the document extension.
    ///
    /// A target that doesn't exist or has no descendants is recorded as a
    /// per-item failure; the remaining targets still collapse.
    pub fn collapse_children(&mut self, targets: &[String], depth: usize) -> &mut Self {
        let root = self.config.root_dir.to_string_lossy().into_owned();
        let ext = self.config.doc_extension().to_string();
        for raw in targets {
            let id = link::ensure_extension(&link::resolve_relative(&root, raw), &ext);
            if !self.graph.contains(&id) {
                self.fail("collapse_children", raw, "no such node");
                continue;
            }
            let descendants = descendants_within(&self.graph, &id, depth);
            if descendants.is_empty() {
                self.fail("collapse_children", &id, "no descendants within depth");
                continue;
            }
            for child in &descendants {
                self.graph.contract(&id, child);
            }
            if let Some(node) = self.graph.node_mut(&id) {
                node.is_collapsed = true;
            }
        }
        self
    }

    /// Undoes one collapsed layer of `id`: drops the node's current
    /// outgoing edges, then restores its baseline successors and their
    /// own successor edges from the snapshot, and clears `is_collapsed`.
    ///
    /// # Errors
    /// Fails if `id` is not a node of the working graph or is not
    /// currently collapsed.
    pub fn expand_node(&mut self, id: &str) -> Result<&mut Self> {
        let node = self
            .graph
            .node(id)
            .ok_or_else(|| WikiError::MissingNode(id.to_string()))?;
        if !node.is_collapsed {
            return Err(WikiError::NotCollapsed(id.to_string()));
        }

        self.graph.remove_outgoing(id);
        let children: Vec<String> = self.baseline.successors(id).map(str::to_string).collect();
        for child in &children {
            self.restore_from_baseline(child);
            self.graph.add_edge(id, child);
            let grandchildren: Vec<String> =
                self.baseline.successors(child).map(str::to_string).collect();
            for grandchild in grandchildren {
                self.restore_from_baseline(&grandchild);
                self.graph.add_edge(child, &grandchild);
            }
        }
        if let Some(node) = self.graph.node_mut(id) {
            node.is_collapsed = false;
        }
        Ok(self)
    }

    /// Keeps only the closed undirected neighborhood of `id` within
    /// `depth` hops and marks the anchor (red, filled) so renderers can
    /// distinguish it. The anchor is resolved against the corpus root.
    ///
    /// # Errors
    /// Fails if the resolved anchor is not a node of the working graph.
    pub fn prune_to_neighborhood(&mut self, id: &str, depth: usize) -> Result<&mut Self> {
        let root = self.config.root_dir.to_string_lossy().into_owned();
        let anchor = link::resolve_relative(&root, id);
        if !self.graph.contains(&anchor) {
            return Err(WikiError::MissingNode(anchor));
        }
        let keep = neighborhood_within(&self.graph, &anchor, depth);
        for node_id in self.graph.node_ids() {
            if !keep.contains(&node_id) {
                self.graph.remove_node(&node_id);
            }
        }
        if let Some(node) = self.graph.node_mut(&anchor) {
            node.attrs.insert("color".to_string(), "red".into());
            node.attrs.insert("style".to_string(), "filled".into());
        }
        Ok(self)
    }

    /// Appends every regex match found in a node's cached lines to its
    /// label, joined by `join`. A regex with capture groups contributes
    /// its first group; one without contributes the whole match.
    ///
    /// A node without cached lines (a dangling link target) is recorded
    /// as a per-item failure and skipped.
    ///
    /// # Errors
    /// Fails if any pattern is not a valid regex.
    pub fn extend_labels(&mut self, patterns: &[String], join: &str) -> Result<&mut Self> {
        let regexes = compile_patterns(patterns)?;
        for id in self.graph.node_ids() {
            let Some(lines) = self.lines.get(&id) else {
                self.fail("extend_labels", &id, "no cached lines");
                continue;
            };
            let mut found: Vec<String> = Vec::new();
            for regex in &regexes {
                for line in lines {
                    for caps in regex.captures_iter(line) {
                        let m = if regex.captures_len() > 1 {
                            caps.get(1)
                        } else {
                            caps.get(0)
                        };
                        if let Some(m) = m {
                            found.push(m.as_str().to_string());
                        }
                    }
                }
            }
            if let Some(node) = self.graph.node_mut(&id) {
                let base = node.label.clone().unwrap_or_default();
                node.label = Some(format!("{base}{join}{}", found.join(join)));
            }
        }
        Ok(self)
    }

    /// The working graph, as mutated by the pipeline so far.
    #[must_use]
    pub fn graph(&self) -> &DiGraph {
        &self.graph
    }

    /// The immutable baseline snapshot.
    #[must_use]
    pub fn baseline(&self) -> &DiGraph {
        &self.baseline
    }

    /// Cached lines of a scanned document, if any.
    #[must_use]
    pub fn lines(&self, id: &str) -> Option<&[String]> {
        self.lines.get(id).map(Vec::as_slice)
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.graph_name
    }

    /// Per-item failures swallowed since the last `reset`/`reload`.
    #[must_use]
    pub fn failures(&self) -> &[PipelineFailure] {
        &self.failures
    }

    pub fn take_failures(&mut self) -> Vec<PipelineFailure> {
        std::mem::take(&mut self.failures)
    }

    fn fail(&mut self, operation: &'static str, node: &str, reason: &str) {
        warn!(operation, node, reason, "pipeline item skipped");
        self.failures.push(PipelineFailure {
            operation,
            node: node.to_string(),
            reason: reason.to_string(),
        });
    }

    /// Copies a node from the baseline into the working graph if absent.
    fn restore_from_baseline(&mut self, id: &str) {
        if !self.graph.contains(id) {
            if let Some(original) = self.baseline.node(id) {
                *self.graph.add_node(id) = original.clone();
            }
        }
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(WikiError::from))
        .collect()
}

/// A regex counts as matched when it matches any single (lowercased)
/// line. `All` requires every regex matched, `Any` at least one.
fn lines_match(regexes: &[Regex], lines: &[String], mode: MatchMode) -> bool {
    let matched = regexes
        .iter()
        .filter(|regex| lines.iter().any(|line| regex.is_match(&line.to_lowercase())))
        .count();
    match mode {
        MatchMode::All => matched == regexes.len(),
        MatchMode::Any => matched > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_match_modes() {
        let regexes = vec![
            Regex::new("alpha").expect("regex"),
            Regex::new("beta").expect("regex"),
        ];
        let both = vec!["has Alpha".to_string(), "has Beta".to_string()];
        let one = vec!["has Alpha only".to_string()];
        assert!(lines_match(&regexes, &both, MatchMode::All));
        assert!(!lines_match(&regexes, &one, MatchMode::All));
        assert!(lines_match(&regexes, &one, MatchMode::Any));
        assert!(!lines_match(&regexes, &[], MatchMode::Any));
    }

    #[test]
    fn test_lines_match_lowercases_haystack() {
        let regexes = vec![Regex::new("project").expect("regex")];
        let lines = vec!["PROJECT ALPHA".to_string()];
        assert!(lines_match(&regexes, &lines, MatchMode::All));
    }

    #[test]
    fn test_empty_pattern_list_matches_all_mode() {
        assert!(lines_match(&[], &[], MatchMode::All));
    }
}
