//! Force models.
//!
//! Forces read an immutable snapshot of positions and write into a
//! [`ForceBuffer`]; nothing here touches live positions.

use std::fmt;

use fv_core::{Real, Vec2};

use crate::quadtree::QuadTree;

/// Per-node accumulators filled by forces during one tick.
#[derive(Debug, Clone, Default)]
pub struct ForceBuffer {
    /// Added to velocity before decay.
    pub velocity: Vec<Vec2>,
    /// Added to position directly.
    pub displacement: Vec<Vec2>,
}

impl ForceBuffer {
    pub fn new(len: usize) -> Self {
        Self {
            velocity: vec![Vec2::zeros(); len],
            displacement: vec![Vec2::zeros(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.velocity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.velocity.is_empty()
    }

    pub fn clear(&mut self) {
        self.velocity.iter_mut().for_each(|v| *v = Vec2::zeros());
        self.displacement.iter_mut().for_each(|v| *v = Vec2::zeros());
    }
}

/// A force acting on all nodes.
pub trait Force: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Accumulate this force's contribution for every node.
    fn apply(&self, positions: &[Vec2], alpha: Real, out: &mut ForceBuffer);
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Link {
    source: usize,
    target: usize,
    strength: Real,
    /// Share of the correction taken by the target.
    bias: Real,
}

/// Spring along every edge toward a rest length.
#[derive(Debug, Clone)]
pub struct LinkForce {
    links: Vec<Link>,
    distance: Real,
}

impl LinkForce {
    /// Build from endpoint index pairs. Self-loops count toward degree but
    /// exert no force.
    pub fn new(node_count: usize, pairs: &[(usize, usize)], distance: Real) -> Self {
        let mut degree = vec![0usize; node_count];
        for &(s, t) in pairs {
            degree[s] += 1;
            degree[t] += 1;
        }
        let links = pairs
            .iter()
            .filter(|(s, t)| s != t)
            .map(|&(source, target)| {
                let ds = degree[source] as Real;
                let dt = degree[target] as Real;
                Link {
                    source,
                    target,
                    strength: 1.0 / ds.max(dt),
                    bias: ds / (ds + dt),
                }
            })
            .collect();
        Self { links, distance }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Force for LinkForce {
    fn name(&self) -> &'static str {
        "link"
    }

    fn apply(&self, positions: &[Vec2], alpha: Real, out: &mut ForceBuffer) {
        for link in &self.links {
            let delta = positions[link.target] - positions[link.source];
            let len = delta.norm();
            if len <= Real::EPSILON {
                continue;
            }
            let pull = delta * ((len - self.distance) / len * alpha * link.strength);
            out.velocity[link.target] -= pull * link.bias;
            out.velocity[link.source] += pull * (1.0 - link.bias);
        }
    }
}

/// Pairwise repulsion (or attraction for positive strength).
#[derive(Debug, Clone)]
pub struct ChargeForce {
    pub strength: Real,
    pub min_distance: Real,
    pub theta: Real,
    /// Above this many nodes the quadtree approximation is used.
    pub threshold: usize,
}

impl ChargeForce {
    fn apply_exact(&self, positions: &[Vec2], k: Real, out: &mut ForceBuffer) {
        let min2 = self.min_distance * self.min_distance;
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let delta = positions[j] - positions[i];
                let push = delta * (k / delta.norm_squared().max(min2));
                out.velocity[i] += push;
                out.velocity[j] -= push;
            }
        }
    }
}

impl Force for ChargeForce {
    fn name(&self) -> &'static str {
        "charge"
    }

    fn apply(&self, positions: &[Vec2], alpha: Real, out: &mut ForceBuffer) {
        let k = self.strength * alpha;
        if positions.len() <= self.threshold {
            self.apply_exact(positions, k, out);
            return;
        }
        let tree = QuadTree::build(positions, self.theta);
        for (i, v) in out.velocity.iter_mut().enumerate() {
            *v += tree.charge_on(i, k, self.min_distance);
        }
    }
}

/// Shifts every node so the centroid moves toward a point.
#[derive(Debug, Clone)]
pub struct CenterForce {
    pub center: Vec2,
    pub gain: Real,
}

impl Force for CenterForce {
    fn name(&self) -> &'static str {
        "center"
    }

    fn apply(&self, positions: &[Vec2], _alpha: Real, out: &mut ForceBuffer) {
        if positions.is_empty() {
            return;
        }
        let mean = positions.iter().sum::<Vec2>() / positions.len() as Real;
        let shift = (self.center - mean) * self.gain;
        out.displacement.iter_mut().for_each(|d| *d += shift);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Pulls one coordinate of every node toward a target value.
#[derive(Debug, Clone)]
pub struct AxisForce {
    pub axis: Axis,
    pub target: Real,
    pub gain: Real,
}

impl Force for AxisForce {
    fn name(&self) -> &'static str {
        match self.axis {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }

    fn apply(&self, positions: &[Vec2], alpha: Real, out: &mut ForceBuffer) {
        let k = self.gain * alpha;
        for (p, v) in positions.iter().zip(out.velocity.iter_mut()) {
            match self.axis {
                Axis::X => v.x += (self.target - p.x) * k,
                Axis::Y => v.y += (self.target - p.y) * k,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fv_core::vec2;

    #[test]
    fn stretched_link_pulls_endpoints_together() {
        let force = LinkForce::new(2, &[(0, 1)], 100.0);
        let pos = vec![vec2(0.0, 0.0), vec2(200.0, 0.0)];
        let mut buf = ForceBuffer::new(2);
        force.apply(&pos, 1.0, &mut buf);
        assert!(buf.velocity[0].x > 0.0);
        assert!(buf.velocity[1].x < 0.0);
        // Equal degree: equal split.
        assert!((buf.velocity[0].x + buf.velocity[1].x).abs() < 1e-12);
    }

    #[test]
    fn high_degree_endpoint_moves_less() {
        // Node 0 is a hub with three links; node 1 a leaf.
        let force = LinkForce::new(4, &[(0, 1), (0, 2), (0, 3)], 100.0);
        let pos = vec![
            vec2(0.0, 0.0),
            vec2(300.0, 0.0),
            vec2(0.0, 100.0),
            vec2(-100.0, 0.0),
        ];
        let mut buf = ForceBuffer::new(4);
        force.apply(&pos, 1.0, &mut buf);
        assert!(buf.velocity[1].x.abs() > 0.0);
        // Hub's x correction from the long link is a quarter of the total.
        assert!(buf.velocity[0].x.abs() < buf.velocity[1].x.abs());
    }

    #[test]
    fn self_loop_has_no_force() {
        let force = LinkForce::new(1, &[(0, 0)], 100.0);
        assert!(force.is_empty());
    }

    #[test]
    fn charge_repels() {
        let force = ChargeForce {
            strength: -800.0,
            min_distance: 1.0,
            theta: 0.9,
            threshold: 64,
        };
        let pos = vec![vec2(0.0, 0.0), vec2(10.0, 0.0)];
        let mut buf = ForceBuffer::new(2);
        force.apply(&pos, 1.0, &mut buf);
        assert!((buf.velocity[0].x - -80.0).abs() < 1e-9);
        assert!((buf.velocity[1].x - 80.0).abs() < 1e-9);
    }

    #[test]
    fn charge_distance_is_floored() {
        let force = ChargeForce {
            strength: -1.0,
            min_distance: 10.0,
            theta: 0.9,
            threshold: 64,
        };
        let pos = vec![vec2(0.0, 0.0), vec2(1e-9, 0.0)];
        let mut buf = ForceBuffer::new(2);
        force.apply(&pos, 1.0, &mut buf);
        assert!(buf.velocity[0].x.abs() < 1e-9);
    }

    #[test]
    fn center_moves_centroid_not_alpha_scaled() {
        let force = CenterForce {
            center: vec2(100.0, 100.0),
            gain: 0.1,
        };
        let pos = vec![vec2(0.0, 0.0), vec2(0.0, 0.0)];
        let mut buf = ForceBuffer::new(2);
        force.apply(&pos, 0.001, &mut buf);
        assert_eq!(buf.displacement[0], vec2(10.0, 10.0));
        assert_eq!(buf.velocity[0], Vec2::zeros());
    }

    #[test]
    fn axis_force_scales_with_alpha() {
        let force = AxisForce {
            axis: Axis::Y,
            target: 50.0,
            gain: 0.1,
        };
        let pos = vec![vec2(7.0, 0.0)];
        let mut buf = ForceBuffer::new(1);
        force.apply(&pos, 0.5, &mut buf);
        assert_eq!(buf.velocity[0], vec2(0.0, 2.5));
    }
}
