// src/scan.rs
//! Corpus scanning and edge extraction.
//!
//! Walks the wiki root, registers one node per accepted file, caches each
//! file's lines, then turns every wiki-link occurrence into a directed
//! edge. Link targets that don't correspond to scanned files become
//! label-less dangling nodes. Walk or read failures abort the scan: a
//! partial corpus silently producing a partial graph would be worse than
//! an error.

use crate::config::Config;
use crate::error::{Result, WikiError};
use crate::graph::DiGraph;
use crate::link;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::sync::LazyLock;
use tracing::debug;
use walkdir::WalkDir;

/// A document's first line marks it as tagged when it looks like
/// `:tag1:tag2:`.
static TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:(\w+:)+").expect("tag line pattern"));

/// Everything the scan produces: the populated graph plus the line cache
/// backing every content-based pipeline operation.
pub struct Corpus {
    pub graph: DiGraph,
    pub lines: BTreeMap<String, Vec<String>>,
}

/// Scans the corpus root and builds the initial graph.
///
/// # Errors
/// Fails on any directory walk or file read error.
pub fn scan_corpus(config: &Config) -> Result<Corpus> {
    let documents = walk_documents(config)?;
    let mut graph = DiGraph::new();
    let mut lines: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let ext = config.doc_extension().to_string();

    for doc in &documents {
        let text = fs::read_to_string(&doc.id).map_err(|e| WikiError::io(e, &doc.id))?;
        let doc_lines: Vec<String> = text.lines().map(str::to_string).collect();

        let node = graph.add_node(&doc.id);
        node.label = Some(doc.label.clone());
        node.tags = parse_tags(&doc_lines);

        for line in &doc_lines {
            for caps in link::WIKI_LINK.captures_iter(line) {
                if let Some(target) = caps.get(1) {
                    let child = link::normalize(&doc.dir, target.as_str(), &ext);
                    graph.add_edge(&doc.id, &child);
                }
            }
        }
        lines.insert(doc.id.clone(), doc_lines);
    }

    debug!(
        documents = documents.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "corpus scanned"
    );
    Ok(Corpus { graph, lines })
}

struct Document {
    id: String,
    dir: String,
    label: String,
}

fn walk_documents(config: &Config) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(&config.root_dir).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| config.file_extensions.iter().any(|accepted| accepted == e));
        if !matches {
            continue;
        }
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        documents.push(Document {
            id: path.to_string_lossy().into_owned(),
            dir,
            label,
        });
    }
    Ok(documents)
}

/// Splits a leading `:tag1:tag2:` line into its non-empty segments.
fn parse_tags(lines: &[String]) -> Vec<String> {
    let Some(first) = lines.first() else {
        return Vec::new();
    };
    if !TAG_LINE.is_match(first) {
        return Vec::new();
    }
    first
        .trim()
        .split(':')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        let lines = vec![":work:project:".to_string(), "body".to_string()];
        assert_eq!(parse_tags(&lines), vec!["work", "project"]);
    }

    #[test]
    fn test_parse_tags_requires_leading_colon() {
        let lines = vec!["work:project:".to_string()];
        assert!(parse_tags(&lines).is_empty());
    }

    #[test]
    fn test_parse_tags_empty_document() {
        assert!(parse_tags(&[]).is_empty());
    }
}
