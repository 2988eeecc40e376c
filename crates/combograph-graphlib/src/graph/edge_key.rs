//! Edge key types.
//!
//! Edges are undirected, so keys are stored with endpoints in canonical (`v <= w`) order; the
//! borrowed view lets lookups avoid allocating.

use std::hash::{Hash, Hasher};

#[derive(Clone, Copy, Hash)]
pub(in crate::graph) struct EdgeKeyView<'a> {
    pub(in crate::graph) v: &'a str,
    pub(in crate::graph) w: &'a str,
}

impl<'a> EdgeKeyView<'a> {
    pub(in crate::graph) fn canonical(v: &'a str, w: &'a str) -> Self {
        if v <= w { Self { v, w } } else { Self { v: w, w: v } }
    }
}

impl<'a> hashbrown::Equivalent<EdgeKey> for EdgeKeyView<'a> {
    fn equivalent(&self, key: &EdgeKey) -> bool {
        key.v == self.v && key.w == self.w
    }
}

/// An unordered node pair. `v` and `w` are kept in canonical order, so `EdgeKey::new("b", "a")`
/// equals `EdgeKey::new("a", "b")`.
#[derive(Debug, Clone, PartialOrd, Ord)]
pub struct EdgeKey {
    pub v: String,
    pub w: String,
}

impl EdgeKey {
    pub fn new(v: impl Into<String>, w: impl Into<String>) -> Self {
        let v = v.into();
        let w = w.into();
        if v <= w { Self { v, w } } else { Self { v: w, w: v } }
    }

    /// Returns the endpoint opposite to `node`, if `node` is an endpoint.
    pub fn other(&self, node: &str) -> Option<&str> {
        if self.v == node {
            Some(self.w.as_str())
        } else if self.w == node {
            Some(self.v.as_str())
        } else {
            None
        }
    }
}

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v && self.w == other.w
    }
}

impl Eq for EdgeKey {}

// Must hash exactly like `EdgeKeyView` so borrowed lookups land in the same bucket.
impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.v.as_str().hash(state);
        self.w.as_str().hash(state);
    }
}
