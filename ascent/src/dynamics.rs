use std::{error::Error, fmt::Debug};

use ascent_diffeq::{OdeModel, state_array::StateArray};
use log::trace;
use vehicle::prelude::{Vehicle, VehicleModel};

use crate::{
    FlightErrors,
    clock::Clock,
    environment::{Environment, EnvironmentModel},
    rocket::Rocket,
    sample::FlightSample,
    state::{FIELD_NAMES, FlightState, STATE_SIZE},
};

/// Six degree of freedom rigid body dynamics with aerodynamics, thrust and
/// gravity.
#[derive(Debug, Clone)]
pub struct Dynamics6dofAero<V: VehicleModel = Vehicle, E: EnvironmentModel = Environment> {
    pub rocket: Rocket<V>,
    pub environment: E,
    pub clock: Clock,
}

impl<V: VehicleModel, E: EnvironmentModel> Dynamics6dofAero<V, E> {
    pub fn new(rocket: Rocket<V>, environment: E) -> Self {
        Self {
            rocket,
            environment,
            clock: Clock::default(),
        }
    }

    /// Writes the derivative of the flight state `x` at time `t` into `dx`.
    ///
    /// Both clocks are set from `t` before anything else is evaluated. On
    /// success every element of `dx` is overwritten, on error `dx` is left
    /// untouched.
    ///
    /// # Arguments
    ///
    /// * `x` - Flight state, 14 finite values.
    /// * `dx` - Output buffer of 14 values.
    /// * `t` - Simulation time (s).
    pub fn derivative(&mut self, x: &[f64], dx: &mut [f64], t: f64) -> Result<(), FlightErrors> {
        if !t.is_finite() {
            return Err(FlightErrors::NonFiniteTime(t));
        }
        if dx.len() != STATE_SIZE {
            return Err(FlightErrors::DerivativeLength(dx.len()));
        }
        self.clock.sync(t);
        self.rocket.burn_clock.sync(t);

        let sample = self.evaluate(x)?;
        let derivative = sample.derivative();
        if let Some(i) = derivative.iter().position(|v| !v.is_finite()) {
            return Err(FlightErrors::NonFiniteModelOutput(FIELD_NAMES[i]));
        }
        dx.copy_from_slice(&derivative);

        trace!(
            "t = {:.4} alt = {:.2} m mach = {:.3} aoa = {:.4} rad thrust = {:.2} N",
            t,
            sample.geodetic.altitude,
            sample.air_data.mach,
            sample.air_data.angle_of_attack,
            sample.thrust
        );
        self.rocket.record(sample);
        Ok(())
    }

    /// Evaluates every derived quantity at the time the clocks were last
    /// synced to.
    pub(crate) fn evaluate(&self, x: &[f64]) -> Result<FlightSample, FlightErrors> {
        let state = FlightState::from_slice(x)?;
        FlightSample::evaluate(
            self.rocket.vehicle(),
            &self.environment,
            &state,
            self.clock.time(),
            self.rocket.burn_clock.burn_time(),
        )
    }
}

impl<V, E> OdeModel for Dynamics6dofAero<V, E>
where
    V: VehicleModel + Debug,
    E: EnvironmentModel + Debug,
{
    type State = StateArray<STATE_SIZE>;

    fn f(
        &mut self,
        t: f64,
        state: &Self::State,
        derivative: &mut Self::State,
    ) -> Result<(), Box<dyn Error>> {
        self.derivative(&state[..], &mut derivative[..], t)?;
        Ok(())
    }
}
