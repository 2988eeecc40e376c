use super::Layout;
use crate::position::{Point, PositionMap};
use combograph_graphlib::Graph;

pub fn has_non_finite(pos: &PositionMap) -> bool {
    pos.values().any(|p| !p.is_finite())
}

/// Runs `primary`, substituting `fallback` when any coordinate comes back non-finite.
///
/// Without a fallback the degenerate result is passed through with a warning.
pub struct WithFallback<P, F = Box<dyn Layout>> {
    pub primary: P,
    pub fallback: Option<F>,
}

impl<P: Layout> WithFallback<P> {
    pub fn without_fallback(primary: P) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }
}

impl<P: Layout, F: Layout> WithFallback<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self {
            primary,
            fallback: Some(fallback),
        }
    }
}

impl<P: Layout, F: Layout> Layout for WithFallback<P, F> {
    fn layout(&self, graph: &Graph) -> PositionMap {
        let pos = self.primary.layout(graph);
        if !has_non_finite(&pos) {
            return pos;
        }
        match &self.fallback {
            Some(fallback) => {
                tracing::debug!(
                    nodes = graph.node_count(),
                    "layout produced non-finite coordinates, using fallback layout"
                );
                fallback.layout(graph)
            }
            None => {
                tracing::warn!(
                    nodes = graph.node_count(),
                    "layout produced non-finite coordinates and no fallback is configured"
                );
                pos
            }
        }
    }
}

/// Positions computed elsewhere. Nodes without an entry get NaN coordinates, so wrapping this in
/// [`WithFallback`] fills the gaps with a real layout.
#[derive(Debug, Clone, Default)]
pub struct Precomputed(pub PositionMap);

impl Layout for Precomputed {
    fn layout(&self, graph: &Graph) -> PositionMap {
        graph
            .nodes()
            .map(|id| {
                let p = self
                    .0
                    .get(id)
                    .copied()
                    .unwrap_or(Point::new(f64::NAN, f64::NAN));
                (id.to_string(), p)
            })
            .collect()
    }
}
