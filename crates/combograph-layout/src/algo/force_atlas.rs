//! ForceAtlas2 (Jacomy et al. 2014), exact O(n^2) repulsion, no Barnes-Hut.
//!
//! Node mass is `1 + degree`. Speed is adapted globally from the swinging/traction balance of
//! consecutive force vectors, then damped per node by its own swinging.

use super::{Layout, SimGraph};
use crate::position::PositionMap;
use combograph_graphlib::Graph;
use nalgebra::Vector2;

#[derive(Debug, Clone)]
pub struct ForceAtlas2 {
    pub iterations: usize,
    pub seed: u64,
    pub weight_attr: Option<String>,
    /// Repulsion strength. Larger values spread the graph out.
    pub scaling_ratio: f64,
    pub gravity: f64,
    /// Gravity grows linearly with the distance to the centre instead of staying constant.
    pub strong_gravity: bool,
    /// Divides a node's attraction by its mass, pushing hubs to the periphery.
    pub outbound_attraction_distribution: bool,
    /// Exponent applied to edge weights; `0` ignores weights.
    pub edge_weight_influence: f64,
    pub jitter_tolerance: f64,
}

impl Default for ForceAtlas2 {
    fn default() -> Self {
        Self {
            iterations: 5000,
            seed: 0,
            weight_attr: None,
            scaling_ratio: 2.0,
            gravity: 1.0,
            strong_gravity: false,
            outbound_attraction_distribution: true,
            edge_weight_influence: 1.0,
            jitter_tolerance: 1.0,
        }
    }
}

impl ForceAtlas2 {
    /// The compact variant used for whole networks and combo interiors.
    pub fn strong_gravity() -> Self {
        Self {
            strong_gravity: true,
            ..Self::default()
        }
    }

    pub fn with_weight_attr(mut self, weight_attr: impl Into<String>) -> Self {
        self.weight_attr = Some(weight_attr.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    fn run(&self, sim: &SimGraph<'_>) -> Vec<Vector2<f64>> {
        let n = sim.len();
        let mut pos = sim.random_positions(self.seed);
        let mass: Vec<f64> = sim.degree.iter().map(|d| 1.0 + *d as f64).collect();
        let outbound_compensation = if self.outbound_attraction_distribution {
            mass.iter().sum::<f64>() / n as f64
        } else {
            1.0
        };
        let edges: Vec<(usize, usize, f64)> = sim
            .edges
            .iter()
            .map(|&(i, j, w)| (i, j, self.edge_weight(w)))
            .collect();

        let mut speed = 1.0;
        let mut speed_efficiency = 1.0;
        let mut force = vec![Vector2::zeros(); n];
        let mut old_force = vec![Vector2::zeros(); n];

        for _ in 0..self.iterations {
            std::mem::swap(&mut force, &mut old_force);
            force.iter_mut().for_each(|f| *f = Vector2::zeros());

            self.apply_repulsion(&pos, &mass, &mut force);
            self.apply_gravity(&pos, &mass, &mut force);
            self.apply_attraction(&pos, &mass, &edges, outbound_compensation, &mut force);

            let (next_speed, next_efficiency) =
                self.adjust_speed(&mass, &force, &old_force, speed, speed_efficiency);
            speed = next_speed;
            speed_efficiency = next_efficiency;

            let mut moved = 0.0;
            for i in 0..n {
                let swinging = mass[i] * (old_force[i] - force[i]).norm();
                let factor = speed / (1.0 + (speed * swinging).sqrt());
                let step = force[i] * factor;
                moved += step.x.abs() + step.y.abs();
                pos[i] += step;
            }
            if moved < 1e-10 {
                break;
            }
        }
        pos
    }

    fn edge_weight(&self, w: f64) -> f64 {
        if self.edge_weight_influence == 0.0 {
            1.0
        } else if self.edge_weight_influence == 1.0 {
            w
        } else {
            w.powf(self.edge_weight_influence)
        }
    }

    fn apply_repulsion(&self, pos: &[Vector2<f64>], mass: &[f64], force: &mut [Vector2<f64>]) {
        for i in 0..pos.len() {
            for j in (i + 1)..pos.len() {
                let delta = pos[i] - pos[j];
                let d2 = delta.norm_squared();
                if d2 > 0.0 {
                    let f = delta * (self.scaling_ratio * mass[i] * mass[j] / d2);
                    force[i] += f;
                    force[j] -= f;
                }
            }
        }
    }

    fn apply_gravity(&self, pos: &[Vector2<f64>], mass: &[f64], force: &mut [Vector2<f64>]) {
        for ((p, m), f) in pos.iter().zip(mass).zip(force.iter_mut()) {
            if self.strong_gravity {
                *f -= p * (self.scaling_ratio * m * self.gravity);
            } else {
                let d = p.norm();
                if d > 0.0 {
                    *f -= p * (m * self.gravity / d);
                }
            }
        }
    }

    fn apply_attraction(
        &self,
        pos: &[Vector2<f64>],
        mass: &[f64],
        edges: &[(usize, usize, f64)],
        outbound_compensation: f64,
        force: &mut [Vector2<f64>],
    ) {
        for &(i, j, w) in edges {
            let delta = pos[i] - pos[j];
            let factor = if self.outbound_attraction_distribution {
                -outbound_compensation * w / mass[i]
            } else {
                -w
            };
            force[i] += delta * factor;
            force[j] -= delta * factor;
        }
    }

    fn adjust_speed(
        &self,
        mass: &[f64],
        force: &[Vector2<f64>],
        old_force: &[Vector2<f64>],
        speed: f64,
        mut speed_efficiency: f64,
    ) -> (f64, f64) {
        let n = mass.len() as f64;
        let mut swinging = 0.0;
        let mut traction = 0.0;
        for ((m, f), old) in mass.iter().zip(force).zip(old_force) {
            swinging += m * (old - f).norm();
            traction += 0.5 * m * (old + f).norm();
        }

        let optimal_jitter = 0.05 * n.sqrt();
        let min_jitter = optimal_jitter.sqrt();
        let max_jitter: f64 = 10.0;
        let mut jitter = self.jitter_tolerance
            * min_jitter.max(max_jitter.min(optimal_jitter * traction / (n * n)));

        let min_speed_efficiency = 0.05;
        if traction > 0.0 && swinging / traction > 2.0 {
            if speed_efficiency > min_speed_efficiency {
                speed_efficiency *= 0.5;
            }
            jitter = jitter.max(self.jitter_tolerance);
        }

        let target_speed = if swinging == 0.0 {
            f64::INFINITY
        } else {
            jitter * speed_efficiency * traction / swinging
        };

        if swinging > jitter * traction {
            if speed_efficiency > min_speed_efficiency {
                speed_efficiency *= 0.7;
            }
        } else if speed < 1000.0 {
            speed_efficiency *= 1.3;
        }

        let max_rise = 0.5;
        let speed = speed + (target_speed - speed).min(max_rise * speed);
        (speed, speed_efficiency)
    }
}

impl Layout for ForceAtlas2 {
    fn layout(&self, graph: &Graph) -> PositionMap {
        let sim = SimGraph::new(graph, self.weight_attr.as_deref());
        if sim.len() == 0 {
            return PositionMap::new();
        }
        let pos = self.run(&sim);
        tracing::trace!(
            nodes = pos.len(),
            strong_gravity = self.strong_gravity,
            "forceatlas2 layout done"
        );
        sim.into_positions(&pos)
    }
}
