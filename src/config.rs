//! Tunable constants for the editor.
//!
//! All distances are in logical pixels. The defaults reproduce the classic
//! teaching layout: an 80px grid between parent and child, a 40px rotation
//! ring around each node and a 100px preview ring beyond it.

use std::ops::RangeInclusive;
use std::time::Duration;

/// Configuration shared by the preview, animation and input layers.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct EditorConfig {
    /// Pointer distances in `[0, rotation_ring_radius)` target a node's rotation ring.
    pub rotation_ring_radius: f32,
    /// Pointer distances in `[rotation_ring_radius, preview_ring_radius)` produce a preview.
    pub preview_ring_radius: f32,
    /// Horizontal and vertical offset of a previewed node from its anchor.
    pub preview_offset: f32,
    /// Diagonal offset the demoted node moves by during a rotation.
    pub rotation_offset: f32,
    /// Radius used to resolve which node a secondary click landed on.
    pub node_radius: f32,
    /// Range of values a freshly created root may receive.
    pub root_value_range: RangeInclusive<i32>,
    /// Interval between animation ticks.
    pub tick_interval: Duration,
    /// Progress added to every animated link per tick.
    pub link_progress_step: f32,
    /// Physics of the node movement phase.
    pub simulation: SimulationParams,
    /// Whether subtrees hanging off the rotated nodes move rigidly with them.
    pub carry_subtrees: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            rotation_ring_radius: 40.0,
            preview_ring_radius: 100.0,
            preview_offset: 80.0,
            rotation_offset: 50.0,
            node_radius: 20.0,
            root_value_range: 5..=54,
            tick_interval: Duration::from_millis(16),
            link_progress_step: 0.05,
            simulation: SimulationParams::default(),
            carry_subtrees: false,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rotation_ring_radius(mut self, radius: f32) -> Self {
        self.rotation_ring_radius = radius;
        self
    }

    pub fn with_preview_ring_radius(mut self, radius: f32) -> Self {
        self.preview_ring_radius = radius;
        self
    }

    pub fn with_preview_offset(mut self, offset: f32) -> Self {
        self.preview_offset = offset;
        self
    }

    pub fn with_rotation_offset(mut self, offset: f32) -> Self {
        self.rotation_offset = offset;
        self
    }

    pub fn with_root_value_range(mut self, range: RangeInclusive<i32>) -> Self {
        self.root_value_range = range;
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_link_progress_step(mut self, step: f32) -> Self {
        self.link_progress_step = step;
        self
    }

    pub fn with_simulation(mut self, simulation: SimulationParams) -> Self {
        self.simulation = simulation;
        self
    }

    pub fn with_carry_subtrees(mut self, carry: bool) -> Self {
        self.carry_subtrees = carry;
        self
    }
}

/// Parameters of the target-seeking simulation.
///
/// The energy (`alpha`) starts at 1.0 and decays geometrically towards zero;
/// the simulation is converged as soon as it drops below `alpha_min`. With the
/// default decay this takes 300 ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct SimulationParams {
    pub alpha_min: f32,
    pub alpha_decay: f32,
    /// Fraction of velocity lost per tick (friction).
    pub velocity_decay: f32,
    /// Pull towards the target, scaled by the current alpha.
    pub seek_strength: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            seek_strength: 0.1,
        }
    }
}

impl SimulationParams {
    /// Replace values that would keep the simulation from ever converging with
    /// their defaults. `alpha_decay` must lie in `(0, 1]` and `alpha_min` in `(0, 1)`.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            alpha_min: if self.alpha_min > 0.0 && self.alpha_min < 1.0 {
                self.alpha_min
            } else {
                defaults.alpha_min
            },
            alpha_decay: if self.alpha_decay > 0.0 && self.alpha_decay <= 1.0 {
                self.alpha_decay
            } else {
                defaults.alpha_decay
            },
            ..self
        }
    }

    pub fn with_alpha_decay(mut self, decay: f32) -> Self {
        self.alpha_decay = decay;
        self
    }

    pub fn with_seek_strength(mut self, strength: f32) -> Self {
        self.seek_strength = strength;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rings_are_nested() {
        let config = EditorConfig::default();
        assert!(config.rotation_ring_radius < config.preview_ring_radius);
        assert_eq!(config.root_value_range, 5..=54);
        assert_eq!(config.tick_interval, Duration::from_millis(16));
    }

    #[test]
    fn test_default_decay_reaches_threshold_in_300_ticks() {
        let params = SimulationParams::default();
        let alpha = (1.0 - params.alpha_decay).powi(300);
        assert!((alpha - params.alpha_min).abs() < 1e-4);
    }

    #[test]
    fn test_builder_overrides_fields() {
        let config = EditorConfig::new()
            .with_preview_offset(60.0)
            .with_carry_subtrees(true)
            .with_link_progress_step(0.25);
        assert_eq!(config.preview_offset, 60.0);
        assert!(config.carry_subtrees);
        assert_eq!(config.link_progress_step, 0.25);
    }

    #[test]
    fn test_sanitized_replaces_stalling_decay() {
        let defaults = SimulationParams::default();
        for decay in [0.0, -0.1, 1.5, f32::NAN] {
            assert_eq!(defaults.with_alpha_decay(decay).sanitized().alpha_decay, defaults.alpha_decay);
        }
        assert_eq!(defaults.with_alpha_decay(0.5).sanitized().alpha_decay, 0.5);
        assert_eq!(defaults.with_alpha_decay(1.0).sanitized().alpha_decay, 1.0);

        let never_done = SimulationParams { alpha_min: 0.0, ..defaults };
        assert_eq!(never_done.sanitized().alpha_min, defaults.alpha_min);
    }
}
