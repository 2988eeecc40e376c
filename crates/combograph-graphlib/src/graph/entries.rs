//! Internal storage entries for [`Graph`](super::Graph).

use super::EdgeKey;
use crate::Attrs;

#[derive(Debug, Clone)]
pub(in crate::graph) struct NodeEntry {
    pub(in crate::graph) id: String,
    pub(in crate::graph) attrs: Attrs,
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeEntry {
    pub(in crate::graph) key: EdgeKey,
    /// Endpoints in the order the edge was first inserted.
    pub(in crate::graph) source: String,
    pub(in crate::graph) target: String,
    pub(in crate::graph) attrs: Attrs,
}
