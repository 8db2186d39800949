// src/tags.rs
//! The tag index: a full-text sweep over the corpus for tag lines.
//!
//! Separate from the engine on purpose. The engine never computes tag
//! rankings; callers feed the index's output into content filters.

use crate::error::{Result, WikiError};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;
use walkdir::WalkDir;

static TAG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:((\w+:)+)").expect("tag run pattern"));

/// Frequency-ranked tag counts over a document tree, computed lazily and
/// cached until [`TagIndex::reload`].
pub struct TagIndex {
    root_dir: PathBuf,
    file_extensions: Vec<String>,
    counts: Option<Vec<(String, usize)>>,
}

impl TagIndex {
    #[must_use]
    pub fn new(root_dir: impl Into<PathBuf>, file_extensions: Vec<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            file_extensions,
            counts: None,
        }
    }

    /// Tag counts sorted by descending frequency (ties broken by name).
    ///
    /// # Errors
    /// Fails on any walk or read error during the first (or first after
    /// `reload`) call.
    pub fn counts(&mut self) -> Result<&[(String, usize)]> {
        if self.counts.is_none() {
            self.counts = Some(self.scan()?);
        }
        Ok(self.counts.as_deref().unwrap_or(&[]))
    }

    /// Drops the cached counts so the next query re-scans the tree.
    pub fn reload(&mut self) {
        self.counts = None;
    }

    fn scan(&self) -> Result<Vec<(String, usize)>> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for entry in WalkDir::new(&self.root_dir).follow_links(false) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let accepted = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| self.file_extensions.iter().any(|ext| ext == e));
            if !accepted {
                continue;
            }
            let text = fs::read_to_string(entry.path())
                .map_err(|e| WikiError::io(e, entry.path()))?;
            for line in text.lines() {
                let Some(caps) = TAG_RUN.captures(line) else {
                    continue;
                };
                let Some(run) = caps.get(1) else {
                    continue;
                };
                for tag in run.as_str().split(':').filter(|t| !t.is_empty()) {
                    *counts.entry(tag.to_string()).or_default() += 1;
                }
            }
        }
        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(ranked)
    }
}
