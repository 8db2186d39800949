// tests/unit_scan.rs
//! Tests for corpus scanning and edge extraction.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wikigraph_core::config::Config;
use wikigraph_core::scan;

fn write_doc(root: &Path, name: &str, content: &str) -> String {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(&path, content).expect("write doc");
    path.to_string_lossy().into_owned()
}

#[test]
fn test_chain_corpus() {
    let dir = TempDir::new().expect("tempdir");
    let a = write_doc(dir.path(), "a.wiki", "[[b]]\n");
    let b = write_doc(dir.path(), "b.wiki", "[[c]]\n");
    let c = write_doc(dir.path(), "c.wiki", "");

    let corpus = scan::scan_corpus(&Config::new(dir.path())).expect("scan");
    assert_eq!(corpus.graph.node_count(), 3);
    assert!(corpus.graph.contains_edge(&a, &b));
    assert!(corpus.graph.contains_edge(&b, &c));
    assert_eq!(corpus.graph.edge_count(), 2);
}

#[test]
fn test_labels_are_stems() {
    let dir = TempDir::new().expect("tempdir");
    let a = write_doc(dir.path(), "a.wiki", "");

    let corpus = scan::scan_corpus(&Config::new(dir.path())).expect("scan");
    let node = corpus.graph.node(&a).expect("node");
    assert_eq!(node.label.as_deref(), Some("a"));
}

#[test]
fn test_url_link_becomes_host_node() {
    let dir = TempDir::new().expect("tempdir");
    let a = write_doc(dir.path(), "a.wiki", "[[http://example.com/page]]\n");

    let corpus = scan::scan_corpus(&Config::new(dir.path())).expect("scan");
    assert!(corpus.graph.contains_edge(&a, "example.com"));
    // External hosts are never read from disk: no lines, no label.
    assert!(!corpus.lines.contains_key("example.com"));
    let host = corpus.graph.node("example.com").expect("host node");
    assert!(host.label.is_none());
}

#[test]
fn test_dangling_link_creates_labelless_node() {
    let dir = TempDir::new().expect("tempdir");
    let a = write_doc(dir.path(), "a.wiki", "[[missing]]\n");

    let corpus = scan::scan_corpus(&Config::new(dir.path())).expect("scan");
    let target = dir.path().join("missing.wiki").to_string_lossy().into_owned();
    assert!(corpus.graph.contains_edge(&a, &target));
    assert!(corpus.graph.node(&target).expect("dangling").label.is_none());
}

#[test]
fn test_subdirectory_parent_link() {
    let dir = TempDir::new().expect("tempdir");
    let a = write_doc(dir.path(), "a.wiki", "");
    let d = write_doc(dir.path(), "sub/d.wiki", "[[../a]]\n");

    let corpus = scan::scan_corpus(&Config::new(dir.path())).expect("scan");
    assert!(corpus.graph.contains_edge(&d, &a));
}

#[test]
fn test_first_line_tags() {
    let dir = TempDir::new().expect("tempdir");
    let a = write_doc(dir.path(), "a.wiki", ":work:idea:\nbody\n");
    let b = write_doc(dir.path(), "b.wiki", "no tags here\n");

    let corpus = scan::scan_corpus(&Config::new(dir.path())).expect("scan");
    assert_eq!(
        corpus.graph.node(&a).expect("node").tags,
        vec!["work".to_string(), "idea".to_string()]
    );
    assert!(corpus.graph.node(&b).expect("node").tags.is_empty());
}

#[test]
fn test_extension_filter() {
    let dir = TempDir::new().expect("tempdir");
    write_doc(dir.path(), "a.wiki", "");
    write_doc(dir.path(), "notes.txt", "[[a]]\n");

    let corpus = scan::scan_corpus(&Config::new(dir.path())).expect("scan");
    assert_eq!(corpus.graph.node_count(), 1);
    assert_eq!(corpus.graph.edge_count(), 0);
}

#[test]
fn test_anchor_and_display_are_ignored() {
    let dir = TempDir::new().expect("tempdir");
    let a = write_doc(dir.path(), "a.wiki", "[[b#section|Some Title]]\n");
    let b = dir.path().join("b.wiki").to_string_lossy().into_owned();

    let corpus = scan::scan_corpus(&Config::new(dir.path())).expect("scan");
    assert!(corpus.graph.contains_edge(&a, &b));
}

#[test]
fn test_missing_root_is_fatal() {
    let config = Config::new("/definitely/not/a/real/dir");
    assert!(scan::scan_corpus(&config).is_err());
}
