// src/cli/args.rs
//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wikigraph")]
#[command(about = "Render a directory of interlinked wiki documents as a graph", version)]
pub struct Args {
    /// Path to the wiki root directory
    #[arg(short = 'p', long)]
    pub root_dir: Option<PathBuf>,

    /// TOML config file providing defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Accepted file extensions (first one is the canonical extension)
    #[arg(short = 'e', long = "extension")]
    pub extensions: Vec<String>,

    /// Name used for the graph and the default output file
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output format: dot, gml or json
    #[arg(short, long, default_value = "dot")]
    pub format: String,

    /// Output file (defaults to <name>.<format extension>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Separator for list-valued options
    #[arg(long)]
    pub separator: Option<String>,

    /// Content filter regexes (separator-delimited); keeps matching documents
    #[arg(long)]
    pub filter: Option<String>,

    /// Remove matching documents instead of keeping them
    #[arg(long)]
    pub invert_filter: bool,

    /// Content filter keeps documents matching ANY regex instead of ALL
    #[arg(long)]
    pub match_any: bool,

    /// Filename filter regexes (separator-delimited)
    #[arg(long)]
    pub file_filter: Option<String>,

    /// Remove documents with matching filenames instead of keeping them
    #[arg(long)]
    pub invert_file_filter: bool,

    /// Keep only documents carrying one of these tags (separator-delimited)
    #[arg(long)]
    pub tag_filter: Option<String>,

    /// Highlight documents whose contents match these regexes
    #[arg(long)]
    pub highlight: Option<String>,

    /// Collapse the descendants of these documents (separator-delimited)
    #[arg(long)]
    pub collapse: Option<String>,

    /// Collapse depth
    #[arg(long, default_value_t = 1)]
    pub depth: usize,

    /// Keep only the neighborhood of this document
    #[arg(long)]
    pub focus: Option<String>,

    /// Neighborhood depth for --focus
    #[arg(long, default_value_t = 1)]
    pub focus_depth: usize,

    /// Regexes whose matches extend node labels (separator-delimited)
    #[arg(long)]
    pub labels: Option<String>,

    /// Join string for extended labels
    #[arg(long, default_value = "\n")]
    pub join: String,

    /// Scale an attribute by betweenness centrality
    #[arg(long)]
    pub weight: bool,

    /// Attribute scaled by --weight
    #[arg(long, default_value = "fontsize")]
    pub weight_attribute: String,

    /// Lower bound for --weight
    #[arg(long, default_value_t = 20.0)]
    pub min_weight: f64,

    /// Upper bound for --weight
    #[arg(long, default_value_t = 100.0)]
    pub max_weight: f64,

    /// Print the ranked tag index and exit
    #[arg(long)]
    pub tags: bool,

    /// Number of tags printed by --tags
    #[arg(long, default_value_t = 30)]
    pub n_tags: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["wikigraph", "-p", "/tmp/wiki"]);
        assert_eq!(args.format, "dot");
        assert_eq!(args.depth, 1);
        assert!(!args.weight);
        assert!(args.filter.is_none());
    }

    #[test]
    fn test_list_flags_stay_raw_until_split() {
        let args = Args::parse_from(["wikigraph", "--filter", "alpha;beta"]);
        assert_eq!(args.filter.as_deref(), Some("alpha;beta"));
    }
}
