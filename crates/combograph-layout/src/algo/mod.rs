pub mod fallback;
pub mod force_atlas;
pub mod fruchterman_reingold;

pub use fallback::{Precomputed, WithFallback, has_non_finite};
pub use force_atlas::ForceAtlas2;
pub use fruchterman_reingold::FruchtermanReingold;

use crate::position::PositionMap;
use crate::rng::XorShift64Star;
use combograph_graphlib::Graph;
use nalgebra::Vector2;
use rustc_hash::FxHashMap;

/// Anything that assigns a 2D position to every node of a graph.
///
/// Implementations must return one entry per node. Coordinates may be non-finite when an
/// algorithm degenerates; [`WithFallback`] exists to recover from that.
pub trait Layout {
    fn layout(&self, graph: &Graph) -> PositionMap;
}

impl<F> Layout for F
where
    F: Fn(&Graph) -> PositionMap,
{
    fn layout(&self, graph: &Graph) -> PositionMap {
        self(graph)
    }
}

impl Layout for Box<dyn Layout> {
    fn layout(&self, graph: &Graph) -> PositionMap {
        (**self).layout(graph)
    }
}

/// Index-based view of a graph shared by the force simulations.
pub(crate) struct SimGraph<'a> {
    pub(crate) ids: Vec<&'a str>,
    /// `(i, j, weight)` with `i != j`, one entry per undirected edge.
    pub(crate) edges: Vec<(usize, usize, f64)>,
    pub(crate) degree: Vec<usize>,
}

impl<'a> SimGraph<'a> {
    /// Edge weights come from `weight_attr` when set; missing or non-numeric values count as 1.
    pub(crate) fn new(graph: &'a Graph, weight_attr: Option<&str>) -> Self {
        let ids: Vec<&str> = graph.nodes().collect();
        let index: FxHashMap<&str, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let mut degree = vec![0; ids.len()];
        let mut edges = Vec::with_capacity(graph.edge_count());
        for e in graph.edges() {
            let (Some(&i), Some(&j)) = (index.get(e.source), index.get(e.target)) else {
                continue;
            };
            let w = weight_attr
                .and_then(|attr| e.attr(attr))
                .and_then(|v| v.as_f64())
                .unwrap_or(1.0);
            degree[i] += 1;
            degree[j] += 1;
            edges.push((i, j, w));
        }
        Self {
            ids,
            edges,
            degree,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn random_positions(&self, seed: u64) -> Vec<Vector2<f64>> {
        let mut rng = XorShift64Star::new(seed);
        (0..self.len())
            .map(|_| Vector2::new(rng.next_f64_unit(), rng.next_f64_unit()))
            .collect()
    }

    pub(crate) fn into_positions(self, pos: &[Vector2<f64>]) -> PositionMap {
        self.ids
            .into_iter()
            .zip(pos)
            .map(|(id, p)| (id.to_string(), crate::Point::new(p.x, p.y)))
            .collect()
    }
}
