use std::{array, error::Error};

use crate::{DiffeqErrors, Integrable, OdeModel, result::MemoryResult, tableau::ButcherTableau};

/// Explicit Runge-Kutta stepper with preallocated stage storage.
pub struct RungeKutta<State: Integrable, const STAGES: usize> {
    tableau: ButcherTableau<STAGES>,
    /// state at the start of the step
    x: State,
    /// state at the end of the step
    y: State,
    /// stage derivatives
    k: [State; STAGES],
    /// scratch for stage states and scaled derivatives
    stage_state: State,
    scaled: State,
}

impl<State: Integrable, const STAGES: usize> RungeKutta<State, STAGES> {
    pub fn new(tableau: ButcherTableau<STAGES>) -> Self {
        Self {
            tableau,
            x: State::default(),
            y: State::default(),
            k: array::from_fn(|_| State::default()),
            stage_state: State::default(),
            scaled: State::default(),
        }
    }

    /// Integrates from `tspan.0` to `tspan.1` with step `dt`, saving every
    /// step. The last step is shortened to land on `tspan.1`.
    pub fn solve_fixed<Model: OdeModel<State = State>>(
        &mut self,
        model: &mut Model,
        x0: &State,
        tspan: (f64, f64),
        dt: f64,
    ) -> Result<MemoryResult<State>, Box<dyn Error>> {
        let (t0, tf) = tspan;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(DiffeqErrors::InvalidStep(dt).into());
        }
        if !(t0.is_finite() && tf.is_finite() && tf >= t0) {
            return Err(DiffeqErrors::InvalidSpan(t0, tf).into());
        }

        // a span within rounding of a whole number of steps takes no sliver step
        let n = (tf - t0) / dt;
        let steps = if (n - n.round()).abs() <= 1e-9 * n.max(1.0) {
            n.round() as usize
        } else {
            n.ceil() as usize
        };
        let steps = if tf > t0 { steps.max(1) } else { 0 };
        let mut result = MemoryResult::new(steps + 1);
        result.insert(t0, x0);
        self.x.clone_from(x0);

        let mut t = t0;
        for i in 0..steps {
            let next = if i + 1 == steps {
                tf
            } else {
                t0 + (i + 1) as f64 * dt
            };
            self.step(model, t, next - t)?;
            t = next;

            result.insert(t, &self.y);
            std::mem::swap(&mut self.x, &mut self.y);
        }
        Ok(result)
    }

    /// Advances the current state by one step of size `h` from time `t`.
    pub fn step<Model: OdeModel<State = State>>(
        &mut self,
        model: &mut Model,
        t: f64,
        h: f64,
    ) -> Result<(), Box<dyn Error>> {
        for s in 0..STAGES {
            // x + h * sum(a[s][i] * k[i])
            self.stage_state.clone_from(&self.x);
            for i in 0..s {
                let a = self.tableau.a[s][i];
                if a != 0.0 {
                    self.scaled.clone_from(&self.k[i]);
                    self.scaled *= a * h;
                    self.stage_state += &self.scaled;
                }
            }
            model.f(t + self.tableau.c[s] * h, &self.stage_state, &mut self.k[s])?;
        }

        self.y.clone_from(&self.x);
        for (k, b) in self.k.iter().zip(self.tableau.b) {
            self.scaled.clone_from(k);
            self.scaled *= b * h;
            self.y += &self.scaled;
        }
        Ok(())
    }

    /// State at the start of the next step.
    pub fn state(&self) -> &State {
        &self.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_array::StateArray;
    use approx::assert_abs_diff_eq;

    /// x' = -2x
    #[derive(Debug)]
    struct Decay;

    impl OdeModel for Decay {
        type State = StateArray<1>;
        fn f(
            &mut self,
            _t: f64,
            state: &StateArray<1>,
            derivative: &mut StateArray<1>,
        ) -> Result<(), Box<dyn Error>> {
            derivative[0] = -2.0 * state[0];
            Ok(())
        }
    }

    #[test]
    fn test_single_step_matches_series() {
        let mut rk = RungeKutta::new(ButcherTableau::<4>::RK4);
        let result = rk
            .solve_fixed(&mut Decay, &StateArray::new([1.0]), (0.0, 0.1), 0.1)
            .unwrap();
        // RK4 reproduces the Taylor series of exp(-2h) through h^4
        let z: f64 = -0.2;
        let series = 1.0 + z + z * z / 2.0 + z.powi(3) / 6.0 + z.powi(4) / 24.0;
        assert_eq!(result.len(), 2);
        assert_abs_diff_eq!(result.y[1][0], series, epsilon = 1e-14);
        assert_abs_diff_eq!(rk.state()[0], series, epsilon = 1e-14);
    }

    #[test]
    fn test_step_count_without_drift() {
        let mut rk = RungeKutta::new(ButcherTableau::<4>::RK4);
        let result = rk
            .solve_fixed(&mut Decay, &StateArray::new([1.0]), (0.0, 1.0), 0.1)
            .unwrap();
        assert_eq!(result.len(), 11);
        assert_eq!(result.t[10], 1.0);
        assert_abs_diff_eq!(result.t[5], 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(result.y[10][0], (-2.0f64).exp(), epsilon = 1e-5);
    }

    #[test]
    fn test_short_last_step() {
        let mut rk = RungeKutta::new(ButcherTableau::<4>::RK4);
        let result = rk
            .solve_fixed(&mut Decay, &StateArray::new([1.0]), (0.0, 0.25), 0.1)
            .unwrap();
        assert_eq!(result.len(), 4);
        assert_eq!(result.t[3], 0.25);
        assert_abs_diff_eq!(result.t[2], 0.2, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_span() {
        let mut rk = RungeKutta::new(ButcherTableau::<4>::RK4);
        let result = rk
            .solve_fixed(&mut Decay, &StateArray::new([3.0]), (1.0, 1.0), 0.1)
            .unwrap();
        assert_eq!(result.t, vec![1.0]);
    }
}
