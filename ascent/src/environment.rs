use atmosphere::{
    AirProperties, Atmosphere, AtmosphereModel,
    wind::{Wind, WindModel},
};
use gravity::{Gravity, GravityModel};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::FlightErrors;

/// Everything the flight dynamics reads from the environment at one altitude.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvironmentSample {
    pub air: AirProperties,
    /// NED (m/s)
    pub wind: Vector3<f64>,
    /// along local down (m/s^2)
    pub gravity: f64,
}

/// Source of air properties, wind and gravity keyed by geodetic altitude.
pub trait EnvironmentModel {
    fn air(&self, altitude: f64) -> Result<AirProperties, FlightErrors>;
    fn wind(&self, altitude: f64) -> Result<Vector3<f64>, FlightErrors>;
    fn gravity(&self, altitude: f64) -> Result<f64, FlightErrors>;

    /// Queries every model and rejects outputs that would poison the state
    /// derivative.
    fn sample(&self, altitude: f64) -> Result<EnvironmentSample, FlightErrors> {
        let air = self.air(altitude)?;
        let wind = self.wind(altitude)?;
        let gravity = self.gravity(altitude)?;

        if !(air.density.is_finite() && air.density >= 0.0) {
            return Err(FlightErrors::NonFiniteModelOutput("air density"));
        }
        if !(air.pressure.is_finite() && air.pressure >= 0.0) {
            return Err(FlightErrors::NonFiniteModelOutput("air pressure"));
        }
        if !(air.speed_of_sound.is_finite() && air.speed_of_sound > 0.0) {
            return Err(FlightErrors::NonFiniteModelOutput("speed of sound"));
        }
        if !wind.iter().all(|w| w.is_finite()) {
            return Err(FlightErrors::NonFiniteModelOutput("wind"));
        }
        if !gravity.is_finite() {
            return Err(FlightErrors::NonFiniteModelOutput("gravity"));
        }

        Ok(EnvironmentSample { air, wind, gravity })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub atmosphere: Atmosphere,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub gravity: Gravity,
}

impl Environment {
    pub fn validate(&self) -> Result<(), FlightErrors> {
        self.atmosphere.validate()?;
        self.wind.validate()?;
        Ok(())
    }
}

impl EnvironmentModel for Environment {
    fn air(&self, altitude: f64) -> Result<AirProperties, FlightErrors> {
        Ok(self.atmosphere.properties(altitude)?)
    }

    fn wind(&self, altitude: f64) -> Result<Vector3<f64>, FlightErrors> {
        Ok(self.wind.velocity(altitude)?)
    }

    fn gravity(&self, altitude: f64) -> Result<f64, FlightErrors> {
        Ok(self.gravity.calculate(altitude)?)
    }
}
