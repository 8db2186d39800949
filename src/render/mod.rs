// src/render/mod.rs
//! Renderers consuming the working graph.
//!
//! The engine only exposes node identifiers, attributes and edge pairs;
//! everything here is a serialization of that view.

mod dot;
mod gml;
mod network;

use crate::error::{Result, WikiError};
use crate::graph::DiGraph;
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Graphviz dot text.
    Dot,
    /// Graph Modelling Language markup.
    Gml,
    /// vis-network style JSON payload.
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Gml => "gml",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = WikiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dot" => Ok(OutputFormat::Dot),
            "gml" => Ok(OutputFormat::Gml),
            "json" => Ok(OutputFormat::Json),
            other => Err(WikiError::UnknownFormat(other.to_string())),
        }
    }
}

/// Serializes the graph in the requested format.
///
/// # Errors
/// Only the JSON backend can fail, on serialization.
pub fn render(graph: &DiGraph, name: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Dot => Ok(dot::render(graph, name)),
        OutputFormat::Gml => Ok(gml::render(graph, name)),
        OutputFormat::Json => network::render(graph),
    }
}

/// Renders the graph and writes it to `path`.
///
/// # Errors
/// Fails on render or write errors.
pub fn write_file(graph: &DiGraph, name: &str, format: OutputFormat, path: &Path) -> Result<()> {
    let text = render(graph, name, format)?;
    fs::write(path, text).map_err(|e| WikiError::io(e, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("dot".parse::<OutputFormat>().ok(), Some(OutputFormat::Dot));
        assert_eq!("gml".parse::<OutputFormat>().ok(), Some(OutputFormat::Gml));
        assert_eq!("json".parse::<OutputFormat>().ok(), Some(OutputFormat::Json));
    }

    #[test]
    fn test_unknown_format_is_fatal() {
        assert!(matches!(
            "png".parse::<OutputFormat>(),
            Err(WikiError::UnknownFormat(_))
        ));
    }
}
