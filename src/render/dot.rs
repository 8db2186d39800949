// src/render/dot.rs
//! Graphviz dot serialization, left-to-right rank direction.

use crate::graph::DiGraph;

pub fn render(graph: &DiGraph, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("digraph \"{}\" {{\n", escape(name)));
    out.push_str("    rankdir=LR;\n");
    for (id, node) in graph.nodes() {
        let mut attrs: Vec<String> = Vec::new();
        if let Some(label) = &node.label {
            attrs.push(format!("label=\"{}\"", escape(label)));
        }
        for (key, value) in &node.attrs {
            attrs.push(format!("{key}=\"{}\"", escape(&value.to_string())));
        }
        if attrs.is_empty() {
            out.push_str(&format!("    \"{}\";\n", escape(id)));
        } else {
            out.push_str(&format!("    \"{}\" [{}];\n", escape(id), attrs.join(", ")));
        }
    }
    for (from, to) in graph.edges() {
        out.push_str(&format!(
            "    \"{}\" -> \"{}\";\n",
            escape(from),
            escape(to)
        ));
    }
    out.push_str("}\n");
    out
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}
