//! Bang-bang altitude hold for demo and idle play.
//!
//! Keeps the gondola inside a height band above the terrain by driving the
//! burner and valve with hysteresis on envelope temperature. Steering keys
//! and weight toggles are never pressed.

use crate::balloon::Balloon;
use crate::float::Float;
use crate::input::ControlInput;
use crate::terrain::Terrain;
use serde::{Deserialize, Serialize};

/// Height band and temperature thresholds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotConfig<F: Float> {
    pub min_height: F,
    pub max_height: F,
    /// Below the band: burn until this temperature.
    pub climb_burn_on: F,
    pub climb_burn_off: F,
    /// Above the band: vent while hotter than this.
    pub descend_vent_on: F,
    pub descend_vent_off: F,
    /// Above the band: still keep the envelope from going cold.
    pub descend_burn_on: F,
    pub descend_burn_off: F,
}

impl<F: Float> Default for AutopilotConfig<F> {
    fn default() -> Self {
        AutopilotConfig {
            min_height: F::from_f64(290.0),
            max_height: F::from_f64(310.0),
            climb_burn_on: F::from_f64(0.9),
            climb_burn_off: F::from_f64(0.95),
            descend_vent_on: F::from_f64(0.8),
            descend_vent_off: F::from_f64(0.6),
            descend_burn_on: F::from_f64(0.5),
            descend_burn_off: F::from_f64(0.75),
        }
    }
}

/// Holds burner and valve state between updates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Autopilot<F: Float> {
    config: AutopilotConfig<F>,
    up: bool,
    down: bool,
}

impl<F: Float> Autopilot<F> {
    pub fn new(config: AutopilotConfig<F>) -> Self {
        Autopilot { config, up: false, down: false }
    }

    /// Controls for the next frame given height above ground and envelope
    /// temperature ratio. Inside the band the previous controls are held.
    pub fn update(&mut self, height: F, temperature: F) -> ControlInput {
        let c = &self.config;
        if height < c.min_height {
            self.down = false;
            if temperature < c.climb_burn_on {
                self.up = true;
            }
            if temperature > c.climb_burn_off {
                self.up = false;
            }
        } else if height > c.max_height {
            if temperature < c.descend_vent_off {
                self.down = false;
            }
            if temperature > c.descend_vent_on {
                self.down = true;
            }
            if temperature < c.descend_burn_on {
                self.up = true;
            }
            if temperature > c.descend_burn_off {
                self.up = false;
            }
        }
        ControlInput { up: self.up, down: self.down, ..ControlInput::default() }
    }

    /// [`Autopilot::update`] fed from a balloon's current state.
    pub fn fly(&mut self, balloon: &Balloon<F>, terrain: &Terrain<F>) -> ControlInput {
        let height = balloon.height_above_ground(terrain);
        self.update(height, balloon.envelope().temperature())
    }

    pub fn config(&self) -> &AutopilotConfig<F> { &self.config }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pilot() -> Autopilot<f64> {
        Autopilot::new(AutopilotConfig::default())
    }

    #[test]
    fn burns_when_low_and_cool() {
        let mut ap = pilot();
        let input = ap.update(100.0, 0.5);
        assert!(input.up && !input.down);
    }

    #[test]
    fn stops_burning_when_low_but_hot() {
        let mut ap = pilot();
        ap.update(100.0, 0.5);
        let input = ap.update(100.0, 0.96);
        assert!(!input.up);
    }

    #[test]
    fn holds_controls_inside_band() {
        let mut ap = pilot();
        ap.update(100.0, 0.5);
        let input = ap.update(300.0, 0.99);
        assert!(input.up);
    }

    #[test]
    fn vents_when_high_and_hot() {
        let mut ap = pilot();
        let input = ap.update(400.0, 0.85);
        assert!(input.down && !input.up);
        let input = ap.update(400.0, 0.7);
        assert!(input.down, "hysteresis keeps the valve open");
        let input = ap.update(400.0, 0.4);
        assert!(!input.down && input.up);
    }

    #[test]
    fn never_emits_edges() {
        let mut ap = pilot();
        assert!(!ap.update(0.0, 0.0).has_edges());
    }
}
