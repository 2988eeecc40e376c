//! Fruchterman-Reingold spring layout.
//!
//! Follows the classic dense formulation: every pair repels with `k^2 / d`, every edge attracts
//! with `w * d^2 / k`, displacement is capped by a temperature that cools linearly to zero. The
//! result is centred on the origin and rescaled so the largest component is 1.

use super::{Layout, SimGraph};
use crate::position::PositionMap;
use combograph_graphlib::Graph;
use nalgebra::Vector2;

const MIN_DISTANCE: f64 = 0.01;
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct FruchtermanReingold {
    pub iterations: usize,
    pub seed: u64,
    /// Edge attribute used as attraction weight. Edges without it weigh 1.
    pub weight_attr: Option<String>,
    /// Optimal distance between nodes. Defaults to `1 / sqrt(n)`.
    pub k: Option<f64>,
}

impl Default for FruchtermanReingold {
    fn default() -> Self {
        Self {
            iterations: 50,
            seed: 0,
            weight_attr: None,
            k: None,
        }
    }
}

impl FruchtermanReingold {
    pub fn with_weight_attr(mut self, weight_attr: impl Into<String>) -> Self {
        self.weight_attr = Some(weight_attr.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn run(&self, sim: &SimGraph<'_>) -> Vec<Vector2<f64>> {
        let n = sim.len();
        let mut pos = sim.random_positions(self.seed);

        let k = self.k.unwrap_or_else(|| (1.0 / n as f64).sqrt());
        let (min, max) = bounds(&pos);
        let extent = max - min;
        let mut t = extent.x.max(extent.y) * 0.1;
        let dt = t / (self.iterations as f64 + 1.0);

        let mut disp = vec![Vector2::zeros(); n];
        for _ in 0..self.iterations {
            disp.iter_mut().for_each(|d| *d = Vector2::zeros());

            for i in 0..n {
                for j in (i + 1)..n {
                    let delta = pos[i] - pos[j];
                    let d = delta.norm().max(MIN_DISTANCE);
                    let f = delta * (k * k / (d * d));
                    disp[i] += f;
                    disp[j] -= f;
                }
            }
            for &(i, j, w) in &sim.edges {
                let delta = pos[i] - pos[j];
                let d = delta.norm().max(MIN_DISTANCE);
                let f = delta * (w * d / k);
                disp[i] -= f;
                disp[j] += f;
            }

            let mut moved = 0.0;
            for (p, d) in pos.iter_mut().zip(&disp) {
                let len = match d.norm() {
                    l if l < MIN_DISTANCE => 0.1,
                    l => l,
                };
                let step = d * (t / len);
                moved += step.norm();
                *p += step;
            }
            t -= dt;
            if moved / (n as f64) < CONVERGENCE_THRESHOLD {
                break;
            }
        }
        pos
    }
}

impl Layout for FruchtermanReingold {
    fn layout(&self, graph: &Graph) -> PositionMap {
        let sim = SimGraph::new(graph, self.weight_attr.as_deref());
        match sim.len() {
            0 => PositionMap::new(),
            1 => sim.into_positions(&[Vector2::zeros()]),
            _ => {
                let mut pos = self.run(&sim);
                rescale(&mut pos);
                tracing::trace!(nodes = pos.len(), "fruchterman-reingold layout done");
                sim.into_positions(&pos)
            }
        }
    }
}

fn bounds(pos: &[Vector2<f64>]) -> (Vector2<f64>, Vector2<f64>) {
    let mut min = Vector2::repeat(f64::INFINITY);
    let mut max = Vector2::repeat(f64::NEG_INFINITY);
    for p in pos {
        min = min.inf(p);
        max = max.sup(p);
    }
    (min, max)
}

/// Centres on the origin and scales so the largest absolute component is 1.
pub(crate) fn rescale(pos: &mut [Vector2<f64>]) {
    if pos.is_empty() {
        return;
    }
    let mean = pos.iter().fold(Vector2::zeros(), |acc, p| acc + p) / pos.len() as f64;
    let mut lim: f64 = 0.0;
    for p in pos.iter_mut() {
        *p -= mean;
        lim = lim.max(p.x.abs()).max(p.y.abs());
    }
    if lim > 0.0 {
        for p in pos.iter_mut() {
            *p /= lim;
        }
    }
}
