// src/render/gml.rs
//! GML serialization. Node identifiers become integer ids; the canonical
//! identifier is kept in the `name` field.

use crate::graph::{AttrValue, DiGraph};
use std::collections::HashMap;

pub fn render(graph: &DiGraph, name: &str) -> String {
    let index: HashMap<&str, usize> = graph
        .nodes()
        .enumerate()
        .map(|(i, (id, _))| (id, i))
        .collect();

    let mut out = String::new();
    out.push_str("graph [\n");
    out.push_str("  directed 1\n");
    out.push_str(&format!("  label \"{}\"\n", escape(name)));
    for (i, (id, node)) in graph.nodes().enumerate() {
        out.push_str("  node [\n");
        out.push_str(&format!("    id {i}\n"));
        out.push_str(&format!("    name \"{}\"\n", escape(id)));
        if let Some(label) = &node.label {
            out.push_str(&format!("    label \"{}\"\n", escape(label)));
        }
        for (key, value) in &node.attrs {
            match value {
                AttrValue::Num(n) => out.push_str(&format!("    {key} {n}\n")),
                AttrValue::Str(s) => out.push_str(&format!("    {key} \"{}\"\n", escape(s))),
            }
        }
        out.push_str("  ]\n");
    }
    for (from, to) in graph.edges() {
        let (Some(source), Some(target)) = (index.get(from), index.get(to)) else {
            continue;
        };
        out.push_str("  edge [\n");
        out.push_str(&format!("    source {source}\n"));
        out.push_str(&format!("    target {target}\n"));
        out.push_str("  ]\n");
    }
    out.push_str("]\n");
    out
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', " ")
}
