use std::ops::{AddAssign, MulAssign};
use std::{error::Error, fmt::Debug};

/// Submodules for core ODE system components.
pub mod result;
pub mod rk;
pub mod state_array;
pub mod tableau;

use result::MemoryResult;
use rk::RungeKutta;
use tableau::ButcherTableau;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum DiffeqErrors {
    #[error("step size must be positive and finite, got {0}")]
    InvalidStep(f64),
    #[error("final time {1} must not precede initial time {0}")]
    InvalidSpan(f64, f64),
}

/// States that can be advanced by an explicit Runge-Kutta method. The
/// derivative has the same shape as the state.
pub trait Integrable: Clone + Debug + Default + for<'a> AddAssign<&'a Self> + MulAssign<f64> {}

/// Trait for defining a dynamical system model that can be numerically integrated.
///
/// Types implementing this trait must define how to compute the derivative (or RHS function)
/// of the ODE at a given time and state.
pub trait OdeModel: Debug {
    type State: Integrable;
    /// Compute the derivative at time `t` and state `state`, storing the result in `derivative`.
    fn f(
        &mut self,
        t: f64,
        state: &Self::State,
        derivative: &mut Self::State,
    ) -> Result<(), Box<dyn Error>>;
}

/// Container for an ODE problem, the model and the fixed step solve.
pub struct OdeProblem<Model>
where
    Model: OdeModel,
{
    model: Model,
}

impl<Model> OdeProblem<Model>
where
    Model: OdeModel,
{
    pub fn new(model: Model) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    /// Solves the ODE problem over the specified time span with the classic
    /// fourth order Runge-Kutta method.
    ///
    /// # Arguments
    ///
    /// * `x0` - Initial state.
    /// * `tspan` - Tuple of start and end times.
    /// * `dt` - Step size, the last step is shortened to land on the end time.
    ///
    /// # Returns
    ///
    /// The saved states, starting with `x0` at the start time.
    pub fn solve_fixed(
        &mut self,
        x0: &Model::State,
        tspan: (f64, f64),
        dt: f64,
    ) -> Result<MemoryResult<Model::State>, Box<dyn Error>> {
        let mut solver = RungeKutta::new(ButcherTableau::<4>::RK4);
        solver.solve_fixed(&mut self.model, x0, tspan, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use state_array::StateArray;

    /// Undamped harmonic oscillator, x'' = -x
    #[derive(Debug)]
    struct Oscillator;

    impl OdeModel for Oscillator {
        type State = StateArray<2>;
        fn f(
            &mut self,
            _t: f64,
            state: &StateArray<2>,
            derivative: &mut StateArray<2>,
        ) -> Result<(), Box<dyn Error>> {
            derivative[0] = state[1];
            derivative[1] = -state[0];
            Ok(())
        }
    }

    #[test]
    fn test_oscillator_period() {
        let mut problem = OdeProblem::new(Oscillator);
        let x0 = StateArray::new([1.0, 0.0]);
        let period = 2.0 * std::f64::consts::PI;
        let result = problem.solve_fixed(&x0, (0.0, period), 0.01).unwrap();

        let last = result.y.last().unwrap();
        assert_abs_diff_eq!(*result.t.last().unwrap(), period, epsilon = 1e-12);
        assert_abs_diff_eq!(last[0], 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(last[1], 0.0, epsilon = 1e-8);
    }

    #[test]
    fn test_invalid_step() {
        let mut problem = OdeProblem::new(Oscillator);
        let x0 = StateArray::new([1.0, 0.0]);
        assert!(problem.solve_fixed(&x0, (0.0, 1.0), 0.0).is_err());
        assert!(problem.solve_fixed(&x0, (1.0, 0.0), 0.1).is_err());
    }
}
