//! Simulation parameters.

use fv_core::{CanvasSize, Real};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Tunables for the force simulation.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Canvas the layout is centered on.
    pub canvas: CanvasSize,
    /// Rest length of every link.
    pub link_distance: Real,
    /// Pairwise charge; negative repels.
    pub charge_strength: Real,
    /// Node count above which charge uses the Barnes-Hut approximation.
    pub barnes_hut_threshold: usize,
    /// Barnes-Hut opening criterion.
    pub theta: Real,
    /// Fraction of the centroid offset removed each tick.
    pub center_gain: Real,
    /// Per-axis pull toward the canvas center, scaled by alpha.
    pub axis_gain: Real,
    /// Alpha multiplier applied after every tick.
    pub alpha_decay: Real,
    pub alpha_min: Real,
    /// Alpha set by `restart()`.
    pub reheat_alpha: Real,
    /// Velocity multiplier applied during integration.
    pub velocity_decay: Real,
    /// Distance floor used in every division.
    pub min_distance: Real,
    /// Radius scale of the initial spiral.
    pub initial_radius: Real,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            link_distance: 120.0,
            charge_strength: -800.0,
            barnes_hut_threshold: 64,
            theta: 0.9,
            center_gain: 0.1,
            axis_gain: 0.1,
            alpha_decay: 0.99,
            alpha_min: 0.001,
            reheat_alpha: 0.3,
            velocity_decay: 0.6,
            min_distance: 1.0,
            initial_radius: 10.0,
        }
    }
}

impl SimConfig {
    /// Reject parameter combinations the integrator cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        let finite = [
            self.canvas.width,
            self.canvas.height,
            self.link_distance,
            self.charge_strength,
            self.theta,
            self.center_gain,
            self.axis_gain,
            self.alpha_decay,
            self.alpha_min,
            self.reheat_alpha,
            self.velocity_decay,
            self.min_distance,
            self.initial_radius,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(SimError::NonFinite {
                what: "simulation parameter",
            });
        }
        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "canvas dimensions must be positive",
            });
        }
        if !(self.alpha_decay > 0.0 && self.alpha_decay < 1.0) {
            return Err(SimError::InvalidArg {
                what: "alpha_decay must be in (0, 1)",
            });
        }
        if !(self.alpha_min > 0.0 && self.alpha_min < 1.0) {
            return Err(SimError::InvalidArg {
                what: "alpha_min must be in (0, 1)",
            });
        }
        if !(self.reheat_alpha > 0.0 && self.reheat_alpha <= 1.0) {
            return Err(SimError::InvalidArg {
                what: "reheat_alpha must be in (0, 1]",
            });
        }
        if self.reheat_alpha <= self.alpha_min {
            return Err(SimError::InvalidArg {
                what: "reheat_alpha must exceed alpha_min",
            });
        }
        if !(0.0..=1.0).contains(&self.velocity_decay) {
            return Err(SimError::InvalidArg {
                what: "velocity_decay must be in [0, 1]",
            });
        }
        if self.min_distance <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "min_distance must be positive",
            });
        }
        if self.link_distance < 0.0 {
            return Err(SimError::InvalidArg {
                what: "link_distance must be non-negative",
            });
        }
        if self.theta <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "theta must be positive",
            });
        }
        Ok(())
    }

    /// Upper bound on ticks from alpha 1 to `alpha_min` without reheat.
    pub fn ticks_to_converge(&self) -> usize {
        (self.alpha_min.ln() / self.alpha_decay.ln()).ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.ticks_to_converge(), 688);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: SimConfig =
            serde_json::from_str(r#"{"link_distance": 80, "canvas": {"width": 900, "height": 600}}"#)
                .unwrap();
        assert_eq!(cfg.link_distance, 80.0);
        assert_eq!(cfg.canvas, CanvasSize::new(900.0, 600.0));
        assert_eq!(cfg.charge_strength, -800.0);
    }

    #[test]
    fn bad_decay_rejected() {
        let cfg = SimConfig {
            alpha_decay: 1.0,
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SimError::InvalidArg { .. })));
    }

    #[test]
    fn reheat_must_exceed_alpha_min() {
        let cfg = SimConfig {
            alpha_min: 0.5,
            reheat_alpha: 0.3,
            ..SimConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(SimError::InvalidArg {
                what: "reheat_alpha must exceed alpha_min",
            })
        );

        let equal = SimConfig {
            alpha_min: 0.3,
            reheat_alpha: 0.3,
            ..SimConfig::default()
        };
        assert!(equal.validate().is_err());
    }

    #[test]
    fn theta_and_link_distance_reported_separately() {
        let zero_theta = SimConfig {
            theta: 0.0,
            ..SimConfig::default()
        };
        assert_eq!(
            zero_theta.validate(),
            Err(SimError::InvalidArg {
                what: "theta must be positive",
            })
        );
        let negative_link = SimConfig {
            link_distance: -1.0,
            ..SimConfig::default()
        };
        assert_eq!(
            negative_link.validate(),
            Err(SimError::InvalidArg {
                what: "link_distance must be non-negative",
            })
        );
        let zero_link = SimConfig {
            link_distance: 0.0,
            ..SimConfig::default()
        };
        assert!(zero_link.validate().is_ok());
    }
}
