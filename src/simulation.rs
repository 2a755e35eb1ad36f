//! Target-seeking position simulation for the node movement phase.
//!
//! Each body is pulled towards its target with a force proportional to the
//! remaining distance and the current energy `alpha`. Velocity is damped every
//! tick. The simulation stops itself once `alpha` drops below the configured
//! minimum; bodies are then snapped onto their targets, because the decaying
//! pull leaves a small residual offset.

use crate::config::SimulationParams;
use crate::tree::NodeId;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Body {
    id: NodeId,
    position: (f32, f32),
    velocity: (f32, f32),
    target: (f32, f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    Running,
    Converged,
}

#[derive(Debug, Clone)]
pub struct PositionSimulation {
    bodies: Vec<Body>,
    alpha: f32,
    params: SimulationParams,
    ticks: u32,
}

impl PositionSimulation {
    /// Create a simulation from `(id, current position, target)` triples.
    ///
    /// `params` are [sanitized](SimulationParams::sanitized) first, so the
    /// simulation always converges.
    pub fn new<I>(bodies: I, params: SimulationParams) -> Self
    where
        I: IntoIterator<Item = (NodeId, (f32, f32), (f32, f32))>,
    {
        Self {
            bodies: bodies
                .into_iter()
                .map(|(id, position, target)| Body { id, position, velocity: (0.0, 0.0), target })
                .collect(),
            alpha: 1.0,
            params: params.sanitized(),
            ticks: 0,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_converged(&self) -> bool {
        self.alpha < self.params.alpha_min
    }

    /// Advance one step. Ticking a converged simulation does nothing.
    pub fn tick(&mut self) -> SimulationStatus {
        if self.is_converged() {
            return SimulationStatus::Converged;
        }

        self.alpha += (0.0 - self.alpha) * self.params.alpha_decay;
        self.ticks += 1;

        let pull = self.params.seek_strength * self.alpha;
        let friction = 1.0 - self.params.velocity_decay;
        for body in &mut self.bodies {
            body.velocity.0 += (body.target.0 - body.position.0) * pull;
            body.velocity.1 += (body.target.1 - body.position.1) * pull;
            body.velocity.0 *= friction;
            body.velocity.1 *= friction;
            body.position.0 += body.velocity.0;
            body.position.1 += body.velocity.1;
        }

        if self.is_converged() {
            SimulationStatus::Converged
        } else {
            SimulationStatus::Running
        }
    }

    /// Place every body exactly on its target and stop it.
    pub fn snap_to_targets(&mut self) {
        for body in &mut self.bodies {
            body.position = body.target;
            body.velocity = (0.0, 0.0);
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = (NodeId, (f32, f32))> + '_ {
        self.bodies.iter().map(|b| (b.id, b.position))
    }

    pub fn targets(&self) -> impl Iterator<Item = (NodeId, (f32, f32))> + '_ {
        self.bodies.iter().map(|b| (b.id, b.target))
    }

    pub fn position_of(&self, id: NodeId) -> Option<(f32, f32)> {
        self.bodies.iter().find(|b| b.id == id).map(|b| b.position)
    }
}
