// src/graph/centrality.rs
//! Betweenness centrality (Brandes' algorithm, unweighted, directed).
//!
//! Scores are left unnormalized: the pipeline only ever consumes the
//! ratio of a node's score to the maximum, and any constant normalization
//! factor cancels out of that ratio.

use super::store::DiGraph;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Fraction of shortest paths between node pairs passing through each
/// node, endpoints excluded. Empty graphs yield an empty map.
#[must_use]
pub fn betweenness(graph: &DiGraph) -> BTreeMap<String, f64> {
    let ids: Vec<String> = graph.node_ids();
    let index: HashMap<&str, usize> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();
    let adjacency: Vec<Vec<usize>> = ids
        .iter()
        .map(|id| {
            graph
                .successors(id)
                .filter_map(|s| index.get(s).copied())
                .collect()
        })
        .collect();

    let n = ids.len();
    let mut scores = vec![0.0_f64; n];

    for source in 0..n {
        accumulate_from(source, &adjacency, &mut scores);
    }

    ids.into_iter().zip(scores).collect()
}

/// One Brandes iteration: shortest-path counts by BFS from `source`,
/// then dependency accumulation in reverse finish order.
fn accumulate_from(source: usize, adjacency: &[Vec<usize>], scores: &mut [f64]) {
    let n = adjacency.len();
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut dist = vec![-1_i64; n];
    sigma[source] = 1.0;
    dist[source] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);
    while let Some(v) = queue.pop_front() {
        stack.push(v);
        for &w in &adjacency[v] {
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }
            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
                preds[w].push(v);
            }
        }
    }

    let mut delta = vec![0.0_f64; n];
    while let Some(w) = stack.pop() {
        for &v in &preds[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != source {
            scores[w] += delta[w];
        }
    }
}
