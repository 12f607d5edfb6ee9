use crate::error::{Error, Result};
use crate::model::{SirParams, SirState};
use crate::observations::ObservationSeries;
use crate::Real;

/// RK4 sub-steps per one-day interval. The output contract only covers the
/// integer-time samples; the sub-step count is an internal accuracy knob.
const SUBSTEPS_PER_DAY: u32 = 24;

/// Time-sampled solution of the SIR system, one state per day at
/// t = 0, 1, …, nb_steps-1. Produced once per request and read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    states: Vec<SirState>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[SirState] {
        &self.states
    }

    /// Sample times 0.0, 1.0, …
    pub fn times(&self) -> Vec<Real> {
        (0..self.states.len()).map(|t| t as Real).collect()
    }

    pub fn susceptible(&self) -> Vec<Real> {
        self.states.iter().map(|y| y.s).collect()
    }

    pub fn infected(&self) -> Vec<Real> {
        self.states.iter().map(|y| y.i).collect()
    }

    pub fn recovered(&self) -> Vec<Real> {
        self.states.iter().map(|y| y.r).collect()
    }
}

/// One classical RK4 step of size `dt`. The system is autonomous, so the
/// stage evaluations need no explicit time argument.
fn rk4_step(y: SirState, dt: Real, params: &SirParams) -> SirState {
    let k1 = y.derivative(params);
    let k2 = (y + k1 * (0.5 * dt)).derivative(params);
    let k3 = (y + k2 * (0.5 * dt)).derivative(params);
    let k4 = (y + k3 * dt).derivative(params);
    y + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}

/// Solve the SIR system from `initial` over `nb_steps` daily samples.
///
/// The first sample is always the initial state itself, so `nb_steps = 1`
/// never touches the stepper. A non-finite state at any sampled day aborts
/// with [`Error::IntegrationFailure`]; the inputs are deterministic, so the
/// failure is not retried. The call is referentially transparent: no shared
/// state, identical inputs give identical trajectories.
pub fn integrate(params: &SirParams, initial: SirState, nb_steps: usize) -> Result<Trajectory> {
    debug_assert!(nb_steps >= 1, "caller must reject empty observation series");
    if !initial.is_finite() {
        return Err(Error::IntegrationFailure {
            t: 0.0,
            state: initial,
        });
    }

    let mut states = Vec::with_capacity(nb_steps);
    states.push(initial);

    let dt = 1.0 / SUBSTEPS_PER_DAY as Real;
    let mut y = initial;
    for day in 1..nb_steps {
        for _ in 0..SUBSTEPS_PER_DAY {
            y = rk4_step(y, dt, params);
        }
        if !y.is_finite() {
            return Err(Error::IntegrationFailure {
                t: day as Real,
                state: y,
            });
        }
        states.push(y);
    }
    Ok(Trajectory { states })
}

/// Run the standard simulation for an observation series: seed from the
/// country's population (S0 = population, I0 = 1, R0 = 0) and sample one
/// state per observed day.
pub fn simulate(series: &ObservationSeries, params: &SirParams) -> Result<Trajectory> {
    log::debug!(
        "integrating SIR for {} over {} days (beta={:e}, gamma={})",
        series.country(),
        series.nb_steps(),
        params.beta(),
        params.gamma()
    );
    integrate(
        params,
        SirState::seed(series.total_population()),
        series.nb_steps(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn conserves_total_and_orders_compartments() {
        let params = SirParams::default();
        let initial = SirState::seed(51_000_000);
        let traj = integrate(&params, initial, 60).unwrap();
        assert_eq!(traj.len(), 60);

        let total = initial.total();
        for pair in traj.states().windows(2) {
            // S never increases, R never decreases.
            assert!(pair[1].s <= pair[0].s);
            assert!(pair[1].r >= pair[0].r);
        }
        for y in traj.states() {
            assert_approx_eq!(y.total(), total, total * 1e-9);
            assert!(y.i >= 0.0);
        }
    }

    #[test]
    fn zero_gamma_never_recovers() {
        let params = SirParams::new(1e-6, 0.0);
        let traj = integrate(&params, SirState::seed(100_000), 30).unwrap();
        for y in traj.states() {
            assert_eq!(y.r, 0.0);
        }
    }

    #[test]
    fn zero_beta_decays_exponentially() {
        // With beta = 0 the infected compartment has the closed form
        // I(t) = I0 * exp(-gamma * t) and S stays put.
        let gamma = 0.05;
        let params = SirParams::new(0.0, gamma);
        let initial = SirState::seed(1000);
        let traj = integrate(&params, initial, 20).unwrap();
        for (t, y) in traj.states().iter().enumerate() {
            assert_eq!(y.s, initial.s);
            assert_approx_eq!(y.i, (-gamma * t as Real).exp(), 1e-9);
        }
    }

    #[test]
    fn single_step_returns_initial_state() {
        let traj = integrate(&SirParams::default(), SirState::seed(1000), 1).unwrap();
        assert_eq!(traj.len(), 1);
        assert_eq!(traj.states()[0], SirState::seed(1000));
    }

    #[test]
    fn numeric_blowup_is_reported() {
        // Absurd transmission coefficient overflows S*I within a day.
        let params = SirParams::new(1e305, 0.0);
        let initial = SirState::new(1e10, 1e10, 0.0);
        let err = integrate(&params, initial, 5).unwrap_err();
        assert!(matches!(err, Error::IntegrationFailure { .. }));
    }

    #[test]
    fn non_finite_initial_state_is_rejected() {
        let initial = SirState::new(Real::NAN, 1.0, 0.0);
        let err = integrate(&SirParams::default(), initial, 3).unwrap_err();
        assert!(matches!(err, Error::IntegrationFailure { t, .. } if t == 0.0));
    }

    #[test]
    fn identical_inputs_give_identical_trajectories() {
        let params = SirParams::new(2e-7, 0.1);
        let a = integrate(&params, SirState::seed(1_000_000), 40).unwrap();
        let b = integrate(&params, SirState::seed(1_000_000), 40).unwrap();
        assert_eq!(a, b);
    }
}
