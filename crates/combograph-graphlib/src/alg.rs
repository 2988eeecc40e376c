//! Small helper algorithms over [`Graph`].

use crate::Graph;
use indexmap::IndexMap;

/// Degree of every node, in node order.
pub fn degrees(g: &Graph) -> IndexMap<&str, usize> {
    let mut out: IndexMap<&str, usize> = g.nodes().map(|n| (n, 0)).collect();
    for e in g.edges() {
        if let Some(d) = out.get_mut(e.source) {
            *d += 1;
        }
        if let Some(d) = out.get_mut(e.target) {
            *d += 1;
        }
    }
    out
}

/// Nodes without incident edges, in node order.
pub fn isolates(g: &Graph) -> Vec<String> {
    degrees(g)
        .into_iter()
        .filter(|(_, d)| *d == 0)
        .map(|(n, _)| n.to_string())
        .collect()
}
