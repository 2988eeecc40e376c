//! Graph container used across combograph.
//!
//! The container is an undirected simple graph: nodes are string ids in insertion order, edges
//! are unordered pairs of distinct nodes, and both carry an [`Attrs`] bag. Edge lookups are
//! orientation-free.

use crate::{AttrValue, Attrs};
use rustc_hash::FxBuildHasher;
use serde::ser::{Serialize, SerializeStruct, Serializer};

mod edge_key;
mod entries;

pub use edge_key::EdgeKey;
use edge_key::EdgeKeyView;
use entries::{EdgeEntry, NodeEntry};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// A borrowed edge: endpoints in insertion order plus its attributes.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRef<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub attrs: &'a Attrs,
}

impl<'a> EdgeRef<'a> {
    pub fn attr(&self, name: &str) -> Option<&'a AttrValue> {
        self.attrs.get(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<NodeEntry>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry>,
    edge_index: HashMap<EdgeKey, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Inserts the node if absent. Existing attributes are left untouched.
    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            attrs: Attrs::new(),
        });
        self.node_index.insert(id, idx);
        self
    }

    /// Inserts the node, or merges `attrs` into the existing node (incoming values win).
    pub fn set_node(&mut self, id: impl Into<String>, attrs: Attrs) -> &mut Self {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(&id) {
            self.nodes[idx].attrs.extend(attrs);
            return self;
        }
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            attrs,
        });
        self.node_index.insert(id, idx);
        self
    }

    pub fn node(&self, id: &str) -> Option<&Attrs> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx].attrs)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Attrs> {
        self.node_index
            .get(id)
            .copied()
            .map(move |idx| &mut self.nodes[idx].attrs)
    }

    pub fn node_attr(&self, id: &str, name: &str) -> Option<&AttrValue> {
        self.node(id)?.get(name)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn nodes_with_attrs(&self) -> impl Iterator<Item = (&str, &Attrs)> {
        self.nodes.iter().map(|n| (n.id.as_str(), &n.attrs))
    }

    pub fn nodes_with_attrs_mut(&mut self) -> impl Iterator<Item = (&str, &mut Attrs)> {
        self.nodes.iter_mut().map(|n| (n.id.as_str(), &mut n.attrs))
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    /// Inserts an undirected edge, creating missing endpoints. If the pair already exists (in
    /// either orientation) `attrs` are merged into it. Self-loops are not representable: when
    /// `v == w` only the node is ensured.
    pub fn set_edge(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        attrs: Attrs,
    ) -> &mut Self {
        let v = v.into();
        let w = w.into();
        self.ensure_node(v.clone());
        if v == w {
            return self;
        }
        self.ensure_node(w.clone());

        let key = EdgeKey::new(v.clone(), w.clone());
        if let Some(&idx) = self.edge_index.get(&key) {
            self.edges[idx].attrs.extend(attrs);
            return self;
        }

        let idx = self.edges.len();
        self.edges.push(EdgeEntry {
            key: key.clone(),
            source: v,
            target: w,
            attrs,
        });
        self.edge_index.insert(key, idx);
        self
    }

    pub fn has_edge(&self, v: &str, w: &str) -> bool {
        self.edge_index
            .contains_key(&EdgeKeyView::canonical(v, w))
    }

    pub fn edge(&self, v: &str, w: &str) -> Option<&Attrs> {
        self.edge_index
            .get(&EdgeKeyView::canonical(v, w))
            .map(|&idx| &self.edges[idx].attrs)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str) -> Option<&mut Attrs> {
        self.edge_index
            .get(&EdgeKeyView::canonical(v, w))
            .copied()
            .map(move |idx| &mut self.edges[idx].attrs)
    }

    pub fn edge_attr(&self, v: &str, w: &str, name: &str) -> Option<&AttrValue> {
        self.edge(v, w)?.get(name)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> {
        self.edges.iter().map(|e| EdgeRef {
            source: e.source.as_str(),
            target: e.target.as_str(),
            attrs: &e.attrs,
        })
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.iter().map(|e| e.key.clone()).collect()
    }

    pub fn remove_edge(&mut self, v: &str, w: &str) -> bool {
        let Some(idx) = self.edge_index.remove(&EdgeKeyView::canonical(v, w)) else {
            return false;
        };
        self.edges.remove(idx);
        self.rebuild_edge_index();
        true
    }

    /// Keeps only the edges for which `keep` returns true. Order of the survivors is preserved.
    pub fn retain_edges(&mut self, mut keep: impl FnMut(EdgeRef<'_>) -> bool) {
        let before = self.edges.len();
        self.edges.retain(|e| {
            keep(EdgeRef {
                source: e.source.as_str(),
                target: e.target.as_str(),
                attrs: &e.attrs,
            })
        });
        if self.edges.len() != before {
            self.rebuild_edge_index();
        }
    }

    /// Keeps only the nodes for which `keep` returns true, dropping incident edges of removed
    /// nodes. Indexes are rebuilt once, regardless of how many nodes go.
    pub fn retain_nodes(&mut self, mut keep: impl FnMut(&str, &Attrs) -> bool) {
        let before = self.nodes.len();
        self.nodes.retain(|n| keep(n.id.as_str(), &n.attrs));
        if self.nodes.len() == before {
            return;
        }
        self.node_index.clear();
        for (i, n) in self.nodes.iter().enumerate() {
            self.node_index.insert(n.id.clone(), i);
        }
        let node_index = &self.node_index;
        self.edges
            .retain(|e| node_index.contains_key(&e.source) && node_index.contains_key(&e.target));
        self.rebuild_edge_index();
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        if !self.has_node(id) {
            return false;
        }
        self.retain_nodes(|n, _| n != id);
        true
    }

    pub fn remove_nodes<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        let doomed: hashbrown::HashSet<&str, FxBuildHasher> = ids.into_iter().collect();
        if doomed.is_empty() {
            return;
        }
        self.retain_nodes(|n, _| !doomed.contains(n));
    }

    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter_map(|e| e.key.other(v))
            .collect()
    }

    pub fn degree(&self, v: &str) -> usize {
        self.edges.iter().filter(|e| e.key.other(v).is_some()).count()
    }

    /// Induced subgraph over `keep`: the kept nodes (in this graph's order) and every edge whose
    /// endpoints are both kept. Attributes are cloned unchanged.
    pub fn subgraph(&self, mut keep: impl FnMut(&str) -> bool) -> Graph {
        let mut out = Graph::new();
        for n in &self.nodes {
            if keep(n.id.as_str()) {
                out.set_node(n.id.clone(), n.attrs.clone());
            }
        }
        for e in &self.edges {
            if out.has_node(&e.source) && out.has_node(&e.target) {
                out.set_edge(e.source.clone(), e.target.clone(), e.attrs.clone());
            }
        }
        out
    }

    fn rebuild_edge_index(&mut self) {
        self.edge_index.clear();
        for (i, e) in self.edges.iter().enumerate() {
            self.edge_index.insert(e.key.clone(), i);
        }
    }
}

/// Node-link JSON: `{"nodes": [{"id", ..attrs}], "edges": [{"source", "target", ..attrs}]}`.
impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct NodeOut<'a> {
            id: &'a str,
            #[serde(flatten)]
            attrs: &'a Attrs,
        }

        #[derive(serde::Serialize)]
        struct EdgeOut<'a> {
            source: &'a str,
            target: &'a str,
            #[serde(flatten)]
            attrs: &'a Attrs,
        }

        let nodes: Vec<NodeOut<'_>> = self
            .nodes
            .iter()
            .map(|n| NodeOut {
                id: &n.id,
                attrs: &n.attrs,
            })
            .collect();
        let edges: Vec<EdgeOut<'_>> = self
            .edges()
            .map(|e| EdgeOut {
                source: e.source,
                target: e.target,
                attrs: e.attrs,
            })
            .collect();

        let mut st = serializer.serialize_struct("Graph", 2)?;
        st.serialize_field("nodes", &nodes)?;
        st.serialize_field("edges", &edges)?;
        st.end()
    }
}
