// src/render/network.rs
//! vis-network style JSON payload: `{"nodes": [...], "edges": [...]}`.

use crate::error::Result;
use crate::graph::DiGraph;
use serde_json::{json, Map, Value};

pub fn render(graph: &DiGraph) -> Result<String> {
    let nodes: Vec<Value> = graph
        .nodes()
        .map(|(id, node)| {
            let mut obj = Map::new();
            obj.insert("id".to_string(), Value::String(id.to_string()));
            let label = node.label.clone().unwrap_or_else(|| id.to_string());
            obj.insert("label".to_string(), Value::String(label));
            if !node.tags.is_empty() {
                obj.insert(
                    "tags".to_string(),
                    Value::Array(
                        node.tags
                            .iter()
                            .map(|t| Value::String(t.clone()))
                            .collect(),
                    ),
                );
            }
            if node.is_collapsed {
                obj.insert("is_collapsed".to_string(), Value::Bool(true));
            }
            for (key, value) in &node.attrs {
                obj.insert(key.clone(), value.to_json());
            }
            Value::Object(obj)
        })
        .collect();
    let edges: Vec<Value> = graph
        .edges()
        .map(|(from, to)| json!({ "from": from, "to": to }))
        .collect();
    Ok(serde_json::to_string_pretty(&json!({
        "nodes": nodes,
        "edges": edges,
    }))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let mut g = DiGraph::new();
        g.add_edge("a.wiki", "b.wiki");
        g.add_node("a.wiki").label = Some("a".to_string());
        let payload: Value =
            serde_json::from_str(&render(&g).expect("render")).expect("valid json");
        assert_eq!(payload["nodes"][0]["id"], "a.wiki");
        assert_eq!(payload["nodes"][0]["label"], "a");
        // Dangling target falls back to its identifier as label.
        assert_eq!(payload["nodes"][1]["label"], "b.wiki");
        assert_eq!(payload["edges"][0]["from"], "a.wiki");
        assert_eq!(payload["edges"][0]["to"], "b.wiki");
    }
}
