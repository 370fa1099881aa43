use serde::{Deserialize, Serialize};

use crate::{
    AirProperties, AtmosphereErrors, AtmosphereModel, GAS_CONSTANT_AIR, HEAT_CAPACITY_RATIO,
};

/// Isothermal atmosphere with density and pressure decaying exponentially.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExponentialAtmosphere {
    pub sea_level_density: f64,
    pub sea_level_pressure: f64,
    pub scale_height: f64,
    pub temperature: f64,
}

impl Default for ExponentialAtmosphere {
    fn default() -> Self {
        Self {
            sea_level_density: 1.225,
            sea_level_pressure: 101325.0,
            scale_height: 8500.0,
            temperature: 288.15,
        }
    }
}

impl ExponentialAtmosphere {
    pub fn validate(&self) -> Result<(), AtmosphereErrors> {
        if self.scale_height <= 0.0 {
            return Err(AtmosphereErrors::NotPositive("scale_height"));
        }
        if self.temperature <= 0.0 {
            return Err(AtmosphereErrors::NotPositive("temperature"));
        }
        if self.sea_level_density < 0.0 {
            return Err(AtmosphereErrors::Negative("sea_level_density"));
        }
        if self.sea_level_pressure < 0.0 {
            return Err(AtmosphereErrors::Negative("sea_level_pressure"));
        }
        Ok(())
    }
}

impl AtmosphereModel for ExponentialAtmosphere {
    fn properties(&self, altitude: f64) -> Result<AirProperties, AtmosphereErrors> {
        let decay = (-altitude / self.scale_height).exp();
        Ok(AirProperties {
            density: self.sea_level_density * decay,
            pressure: self.sea_level_pressure * decay,
            temperature: self.temperature,
            speed_of_sound: (HEAT_CAPACITY_RATIO * GAS_CONSTANT_AIR * self.temperature).sqrt(),
        })
    }
}
