//! The force simulation.
//!
//! A [`Simulation`] owns the position, velocity and pin tables for one graph.
//! Each `tick()` computes all forces from a snapshot of the current
//! positions, then integrates. Alpha, the "temperature", decays
//! geometrically after every tick; once it reaches `alpha_min` further ticks
//! do nothing until `restart()`.

use std::collections::HashMap;
use std::f64::consts::PI;

use fv_core::{NodeId, Real, Vec2, vec2};
use fv_graph::Graph;

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::force::{Axis, AxisForce, CenterForce, ChargeForce, Force, ForceBuffer, LinkForce};
use crate::schedule::{Frame, FrameClock, Subscription};

/// Deterministic linear congruential generator for jiggling coincident nodes.
#[derive(Debug, Clone)]
struct Lcg {
    state: u32,
}

impl Lcg {
    const A: u32 = 1_664_525;
    const C: u32 = 1_013_904_223;

    fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Uniform in [0, 1).
    fn next(&mut self) -> Real {
        self.state = self.state.wrapping_mul(Self::A).wrapping_add(Self::C);
        self.state as Real / 4_294_967_296.0
    }

    fn jiggle(&mut self) -> Real {
        (self.next() - 0.5) * 1e-6
    }
}

/// Force-directed layout state for one graph.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    pins: Vec<Option<Vec2>>,
    forces: Vec<Box<dyn Force>>,
    buffer: ForceBuffer,
    alpha: Real,
    tick_count: u64,
    stopped: bool,
    rng: Lcg,
    subscription: Option<Subscription>,
}

impl Simulation {
    /// Create a simulation over `node_count` nodes joined by `links`.
    pub fn new(node_count: usize, links: &[(NodeId, NodeId)], config: SimConfig) -> SimResult<Self> {
        config.validate()?;

        let mut pairs = Vec::with_capacity(links.len());
        for (index, &(s, t)) in links.iter().enumerate() {
            for node in [s, t] {
                if node.index() >= node_count {
                    return Err(SimError::InvalidLink { index, node });
                }
            }
            pairs.push((s.index(), t.index()));
        }

        let center = config.canvas.center();
        let forces: Vec<Box<dyn Force>> = vec![
            Box::new(LinkForce::new(node_count, &pairs, config.link_distance)),
            Box::new(ChargeForce {
                strength: config.charge_strength,
                min_distance: config.min_distance,
                theta: config.theta,
                threshold: config.barnes_hut_threshold,
            }),
            Box::new(CenterForce {
                center,
                gain: config.center_gain,
            }),
            Box::new(AxisForce {
                axis: Axis::X,
                target: center.x,
                gain: config.axis_gain,
            }),
            Box::new(AxisForce {
                axis: Axis::Y,
                target: center.y,
                gain: config.axis_gain,
            }),
        ];

        tracing::debug!(
            nodes = node_count,
            links = links.len(),
            barnes_hut = node_count > config.barnes_hut_threshold,
            "simulation created"
        );

        Ok(Self {
            positions: initial_positions(node_count, center, config.initial_radius),
            velocities: vec![Vec2::zeros(); node_count],
            pins: vec![None; node_count],
            forces,
            buffer: ForceBuffer::new(node_count),
            alpha: 1.0,
            tick_count: 0,
            stopped: false,
            rng: Lcg::new(1),
            subscription: None,
            config,
        })
    }

    /// Create a simulation for every node and edge of `graph`.
    pub fn from_graph(graph: &Graph, config: SimConfig) -> SimResult<Self> {
        let links: Vec<(NodeId, NodeId)> =
            graph.edges().iter().map(|e| (e.source, e.target)).collect();
        Self::new(graph.nodes().len(), &links, config)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn position(&self, node: NodeId) -> Option<Vec2> {
        self.positions.get(node.index()).copied()
    }

    pub fn alpha(&self) -> Real {
        self.alpha
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_converged(&self) -> bool {
        self.alpha <= self.config.alpha_min
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Advance one step. Returns `false` if the simulation is stopped or
    /// converged, in which case nothing changes.
    pub fn tick(&mut self) -> bool {
        if self.stopped || self.is_converged() {
            return false;
        }

        self.separate_coincident();

        self.buffer.clear();
        for force in &self.forces {
            force.apply(&self.positions, self.alpha, &mut self.buffer);
        }

        let decay = self.config.velocity_decay;
        for i in 0..self.positions.len() {
            if let Some(pin) = self.pins[i] {
                self.positions[i] = pin;
                self.velocities[i] = Vec2::zeros();
                continue;
            }
            let v = (self.velocities[i] + self.buffer.velocity[i]) * decay;
            let p = self.positions[i] + self.buffer.displacement[i] + v;
            if p.x.is_finite() && p.y.is_finite() {
                self.velocities[i] = v;
                self.positions[i] = p;
            } else {
                tracing::warn!(node = i, "non-finite position discarded");
                self.velocities[i] = Vec2::zeros();
            }
        }

        self.alpha = (self.alpha * self.config.alpha_decay).max(self.config.alpha_min);
        self.tick_count += 1;
        tracing::trace!(tick = self.tick_count, alpha = self.alpha, "tick");
        if self.is_converged() {
            tracing::debug!(ticks = self.tick_count, "simulation converged");
        }
        true
    }

    /// Tick until converged or `max_ticks` have run. Returns ticks run.
    pub fn run_until_converged(&mut self, max_ticks: usize) -> usize {
        let mut ran = 0;
        while ran < max_ticks && self.tick() {
            ran += 1;
        }
        ran
    }

    /// Reheat without touching positions. Also un-stops a stopped engine.
    pub fn restart(&mut self) {
        self.alpha = self.config.reheat_alpha;
        self.stopped = false;
        tracing::debug!(alpha = self.alpha, "simulation restarted");
    }

    /// Halt ticking and release the frame subscription. Idempotent.
    pub fn stop(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.cancel();
        }
        if !self.stopped {
            self.stopped = true;
            tracing::debug!(ticks = self.tick_count, "simulation stopped");
        }
    }

    /// Receive frames from `clock`, replacing any previous subscription.
    pub fn attach(&mut self, clock: &FrameClock) {
        self.subscription = Some(clock.subscribe());
    }

    pub fn is_attached(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|s| !s.is_cancelled())
    }

    /// Take the next pending frame and run exactly one tick for it.
    ///
    /// Returns `None` when there is no pending frame or the simulation has
    /// been stopped.
    pub fn next_frame(&mut self) -> Option<Frame> {
        if self.stopped {
            return None;
        }
        let frame = self.subscription.as_ref()?.poll()?;
        self.tick();
        Some(frame)
    }

    /// Fix a node at `at`. Applied on the next tick.
    pub fn pin(&mut self, node: NodeId, at: Vec2) -> SimResult<()> {
        let i = self.check(node)?;
        if !(at.x.is_finite() && at.y.is_finite()) {
            return Err(SimError::NonFinite { what: "pin position" });
        }
        self.pins[i] = Some(at);
        Ok(())
    }

    pub fn unpin(&mut self, node: NodeId) -> SimResult<()> {
        let i = self.check(node)?;
        self.pins[i] = None;
        Ok(())
    }

    pub fn pin_of(&self, node: NodeId) -> Option<Vec2> {
        self.pins.get(node.index()).copied().flatten()
    }

    pub fn pinned_count(&self) -> usize {
        self.pins.iter().filter(|p| p.is_some()).count()
    }

    pub fn clear_pins(&mut self) {
        self.pins.iter_mut().for_each(|p| *p = None);
    }

    fn check(&self, node: NodeId) -> SimResult<usize> {
        let i = node.index();
        if i < self.positions.len() {
            Ok(i)
        } else {
            Err(SimError::UnknownNode {
                node,
                len: self.positions.len(),
            })
        }
    }

    /// Nudge unpinned nodes that sit exactly on top of an earlier node, so
    /// pairwise forces have a direction.
    fn separate_coincident(&mut self) {
        let mut seen: HashMap<(u64, u64), usize> = HashMap::with_capacity(self.positions.len());
        for i in 0..self.positions.len() {
            let p = self.positions[i];
            let key = (p.x.to_bits(), p.y.to_bits());
            if seen.insert(key, i).is_some() && self.pins[i].is_none() {
                let nudge = vec2(self.rng.jiggle(), self.rng.jiggle());
                self.positions[i] += nudge;
            }
        }
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sunflower spiral around `center`; spreads nodes evenly without overlap.
fn initial_positions(count: usize, center: Vec2, radius: Real) -> Vec<Vec2> {
    let golden = PI * (3.0 - Real::sqrt(5.0));
    (0..count)
        .map(|i| {
            let r = radius * (0.5 + i as Real).sqrt();
            let a = i as Real * golden;
            center + vec2(r * a.cos(), r * a.sin())
        })
        .collect()
}
