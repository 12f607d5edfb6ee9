use crate::Real;
use getset::{CopyGetters, Setters};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Coefficients of the SIR system.
///
/// Defaults reproduce the explorer's informal South-Korea-scale calibration.
/// They are plain data handed to the solver per request; nothing in the crate
/// reads them implicitly, so concurrent requests with different parameter
/// sets cannot interfere.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, CopyGetters, Setters)]
#[serde(default)]
#[getset(get_copy = "pub", set = "pub")]
pub struct SirParams {
    /// Transmission coefficient. Zero is degenerate (no spread) but valid.
    beta: Real,
    /// Recovery coefficient. Zero is degenerate (no recovery) but valid.
    gamma: Real,
}

impl Default for SirParams {
    fn default() -> Self {
        SirParams {
            beta: 1.1e-8,
            gamma: 0.05,
        }
    }
}

impl SirParams {
    pub fn new(beta: Real, gamma: Real) -> Self {
        SirParams { beta, gamma }
    }
}

/// Compartment populations at one instant. Values are real-valued counts;
/// fractional individuals are expected mid-simulation and never rounded.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SirState {
    pub s: Real,
    pub i: Real,
    pub r: Real,
}

impl SirState {
    pub fn new(s: Real, i: Real, r: Real) -> Self {
        SirState { s, i, r }
    }

    /// Initial condition used for every simulation: the full reported
    /// population susceptible, exactly one infected individual, nobody
    /// recovered. Observed day-0 counts are deliberately ignored.
    pub fn seed(population: u64) -> Self {
        SirState {
            s: population as Real,
            i: 1.0,
            r: 0.0,
        }
    }

    /// Rate of change of each compartment. Pure and time-invariant: the
    /// system is autonomous, so the derivative depends on the state only.
    ///
    /// ```text
    /// dS/dt = -beta * S * I
    /// dI/dt =  beta * S * I - gamma * I
    /// dR/dt =  gamma * I
    /// ```
    pub fn derivative(&self, params: &SirParams) -> SirState {
        let flow = params.beta() * self.s * self.i;
        let recov = params.gamma() * self.i;
        SirState {
            s: -flow,
            i: flow - recov,
            r: recov,
        }
    }

    pub fn total(&self) -> Real {
        self.s + self.i + self.r
    }

    pub fn is_finite(&self) -> bool {
        self.s.is_finite() && self.i.is_finite() && self.r.is_finite()
    }
}

impl Add for SirState {
    type Output = SirState;

    fn add(self, other: SirState) -> SirState {
        SirState {
            s: self.s + other.s,
            i: self.i + other.i,
            r: self.r + other.r,
        }
    }
}

impl Mul<Real> for SirState {
    type Output = SirState;

    fn mul(self, k: Real) -> SirState {
        SirState {
            s: self.s * k,
            i: self.i * k,
            r: self.r * k,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn params_roundtrip() {
        let params = SirParams::default();
        let data = toml::to_string(&params).unwrap();
        let params_: SirParams = toml::from_str(&data).unwrap();
        assert_eq!(params, params_);
    }

    #[test]
    fn derivative_matches_equations() {
        let params = SirParams::new(2e-4, 0.1);
        let state = SirState::new(1000.0, 10.0, 5.0);
        let d = state.derivative(&params);
        assert_approx_eq!(d.s, -2.0, 1e-12);
        assert_approx_eq!(d.i, 2.0 - 1.0, 1e-12);
        assert_approx_eq!(d.r, 1.0, 1e-12);
        // Flows balance: the derivative sums to zero, so S+I+R is conserved.
        assert_approx_eq!(d.total(), 0.0, 1e-12);
    }

    #[test]
    fn degenerate_params_are_valid() {
        let state = SirState::new(100.0, 10.0, 0.0);
        let no_spread = state.derivative(&SirParams::new(0.0, 0.1));
        assert_eq!(no_spread.s, 0.0);
        let no_recovery = state.derivative(&SirParams::new(1e-3, 0.0));
        assert_eq!(no_recovery.r, 0.0);
    }

    #[test]
    fn seed_policy() {
        let state = SirState::seed(51_000_000);
        assert_eq!(state.s, 51_000_000.0);
        assert_eq!(state.i, 1.0);
        assert_eq!(state.r, 0.0);
    }
}
