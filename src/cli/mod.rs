// src/cli/mod.rs
//! The command-line front end: builds the engine, applies the requested
//! transformation chain, and writes the rendered graph.

pub mod args;

pub use args::Args;

use crate::config::Config;
use crate::engine::{MatchMode, WikiGraph};
use crate::error::Result;
use crate::render::{self, OutputFormat};
use crate::tags::TagIndex;
use colored::Colorize;
use std::path::PathBuf;

/// Runs one full parse-build-transform-render cycle.
///
/// # Errors
/// Fails on configuration, scan, regex or output errors. Per-item
/// pipeline failures are reported as warnings instead.
pub fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;
    let format: OutputFormat = args.format.parse()?;

    if args.tags {
        return print_tags(&config, args.n_tags);
    }

    let mut engine = WikiGraph::build(config)?;
    apply_pipeline(&mut engine, args)?;

    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!("{}.{}", engine.name(), format.extension()))
    });
    render::write_file(engine.graph(), engine.name(), format, &output)?;

    report(&engine, &output);
    Ok(())
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = Config::default();
    if let Some(path) = &args.config {
        config.apply_file(path)?;
    }
    if let Some(root_dir) = &args.root_dir {
        config.root_dir = root_dir.clone();
    }
    if !args.extensions.is_empty() {
        config.file_extensions = args.extensions.clone();
    }
    if let Some(name) = &args.name {
        config.graph_name = name.clone();
    }
    if let Some(separator) = &args.separator {
        config.separator = separator.clone();
    }
    Ok(config)
}

/// Applies the requested operations in the canonical request order:
/// filename filter, content filter, tag filter, collapse, highlight,
/// neighborhood pruning, label extension, centrality weighting.
fn apply_pipeline(engine: &mut WikiGraph, args: &Args) -> Result<()> {
    let separator = engine.config().separator.clone();
    let mode = if args.match_any {
        MatchMode::Any
    } else {
        MatchMode::All
    };

    if let Some(patterns) = split_list(&args.file_filter, &separator) {
        engine.filter_by_filename(&patterns, mode, args.invert_file_filter)?;
    }
    if let Some(patterns) = split_list(&args.filter, &separator) {
        engine.filter_by_content(&patterns, mode, args.invert_filter)?;
    }
    if let Some(tags) = split_list(&args.tag_filter, &separator) {
        engine.filter_by_tags(&tags);
    }
    if let Some(targets) = split_list(&args.collapse, &separator) {
        engine.collapse_children(&targets, args.depth);
    }
    if let Some(patterns) = split_list(&args.highlight, &separator) {
        engine.annotate_by_content(
            &patterns,
            &["color".to_string(), "style".to_string()],
            &["red".into(), "filled".into()],
        )?;
    }
    if let Some(focus) = &args.focus {
        engine.prune_to_neighborhood(focus, args.focus_depth)?;
    }
    if let Some(patterns) = split_list(&args.labels, &separator) {
        engine.extend_labels(&patterns, &args.join)?;
    }
    if args.weight {
        engine.scale_by_centrality(&args.weight_attribute, args.min_weight, args.max_weight);
    }
    Ok(())
}

/// Splits a separator-delimited request parameter; `None`, empty and
/// all-blank inputs mean "not requested".
fn split_list(raw: &Option<String>, separator: &str) -> Option<Vec<String>> {
    let raw = raw.as_deref()?;
    let items: Vec<String> = raw
        .split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn print_tags(config: &Config, n_tags: usize) -> Result<()> {
    let mut index = TagIndex::new(&config.root_dir, config.file_extensions.clone());
    for (tag, count) in index.counts()?.iter().take(n_tags) {
        println!("* {count:<3} {tag}");
    }
    Ok(())
}

fn report(engine: &WikiGraph, output: &std::path::Path) {
    for failure in engine.failures() {
        eprintln!(
            "{} {}: {} ({})",
            "warning:".yellow().bold(),
            failure.operation,
            failure.node,
            failure.reason
        );
    }
    println!(
        "{} {} nodes, {} edges -> {}",
        "wrote".green().bold(),
        engine.graph().node_count(),
        engine.graph().edge_count(),
        output.display()
    );
}
