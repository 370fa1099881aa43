use exponential::ExponentialAtmosphere;
use serde::{Deserialize, Serialize};
use standard::StandardAtmosphere;
use thiserror::Error;
use utilities::TableErrors;

pub mod exponential;
pub mod standard;
pub mod wind;

/// Specific gas constant of dry air (J/kg/K)
pub const GAS_CONSTANT_AIR: f64 = 287.05287;
/// Ratio of specific heats of dry air
pub const HEAT_CAPACITY_RATIO: f64 = 1.4;
/// Lowest altitude the models are evaluated at (m), queries below are clamped
pub const MIN_ALTITUDE: f64 = -5000.0;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AtmosphereErrors {
    #[error("altitude must be finite")]
    NonFiniteAltitude,
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("{0}")]
    TableErrors(#[from] TableErrors),
}

/// Properties of the air at a single altitude.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AirProperties {
    /// kg/m^3
    pub density: f64,
    /// Pa
    pub pressure: f64,
    /// K
    pub temperature: f64,
    /// m/s
    pub speed_of_sound: f64,
}

impl AirProperties {
    /// Builds the properties of an ideal gas from pressure and temperature.
    pub fn from_pressure_temperature(pressure: f64, temperature: f64) -> Self {
        Self {
            density: pressure / (GAS_CONSTANT_AIR * temperature),
            pressure,
            temperature,
            speed_of_sound: (HEAT_CAPACITY_RATIO * GAS_CONSTANT_AIR * temperature).sqrt(),
        }
    }
}

pub trait AtmosphereModel {
    // input is geodetic altitude in meters
    fn properties(&self, altitude: f64) -> Result<AirProperties, AtmosphereErrors>;
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub enum Atmosphere {
    #[default]
    Standard1976,
    Exponential(ExponentialAtmosphere),
}

impl Atmosphere {
    /// Checks the model parameters once, before any query.
    pub fn validate(&self) -> Result<(), AtmosphereErrors> {
        match self {
            Atmosphere::Standard1976 => Ok(()),
            Atmosphere::Exponential(a) => a.validate(),
        }
    }
}

impl AtmosphereModel for Atmosphere {
    fn properties(&self, altitude: f64) -> Result<AirProperties, AtmosphereErrors> {
        if !altitude.is_finite() {
            return Err(AtmosphereErrors::NonFiniteAltitude);
        }
        let altitude = altitude.max(MIN_ALTITUDE);
        match self {
            Atmosphere::Standard1976 => StandardAtmosphere.properties(altitude),
            Atmosphere::Exponential(a) => a.properties(altitude),
        }
    }
}
