//! Simulation configuration.

use nd_core::units::Time;

use crate::error::{SimError, SimResult};

/// Fixed-step simulation settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Simulation time of the first step (seconds)
    pub start_time: f64,
    /// Fixed time step Δt (seconds)
    pub time_step: f64,
    /// Force every node to 0 V on the first step (all capacitors uncharged)
    pub zero_initial_voltage: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            time_step: 1e-3,
            zero_initial_voltage: false,
        }
    }
}

impl SimConfig {
    /// Config with the given step, starting at t = 0.
    pub fn with_time_step(time_step: f64) -> Self {
        Self {
            time_step,
            ..Self::default()
        }
    }

    /// Config with a step given as a time quantity.
    pub fn with_step(step: Time) -> Self {
        Self::with_time_step(step.value)
    }

    /// Enable or disable the zero-initial-voltage startup.
    pub fn zero_initial_voltage(mut self, enabled: bool) -> Self {
        self.zero_initial_voltage = enabled;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "time_step must be positive and finite",
            });
        }
        if !self.start_time.is_finite() {
            return Err(SimError::InvalidArg {
                what: "start_time must be finite",
            });
        }
        Ok(())
    }
}
