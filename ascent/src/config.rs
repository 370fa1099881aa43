use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use coordinate_systems::prelude::Geodetic;
use log::info;
use ron::{
    from_str,
    ser::{PrettyConfig, to_string_pretty},
};
use rotations::prelude::EulerAngles;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vehicle::prelude::{VehicleBuilder, VehicleErrors};

use crate::{
    FlightErrors, dynamics::Dynamics6dofAero, environment::Environment, rocket::Rocket,
    state::FlightState,
};

#[derive(Debug, Error)]
pub enum ConfigErrors {
    #[error("{0}")]
    FlightErrors(#[from] FlightErrors),
    #[error("{0}")]
    VehicleErrors(#[from] VehicleErrors),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("{0}")]
    Serialize(#[from] ron::Error),
    #[error("elevation {0} deg is outside [-90, 90]")]
    Elevation(f64),
    #[error("propellant mass {0} kg exceeds the capacity {1} kg")]
    PropellantOverload(f64, f64),
}

/// Launcher position and orientation. Angles are in degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    pub latitude: f64,
    pub longitude: f64,
    /// m above the ellipsoid
    #[serde(default)]
    pub altitude: f64,
    /// clockwise from north
    pub azimuth: f64,
    /// above the horizon
    pub elevation: f64,
    #[serde(default)]
    pub roll: f64,
    /// s
    #[serde(default)]
    pub start_time: f64,
    /// s
    #[serde(default)]
    pub ignition_time: f64,
    /// kg, full load when omitted
    #[serde(default)]
    pub propellant_mass: Option<f64>,
}

impl LaunchConfig {
    pub fn site(&self) -> Result<Geodetic, ConfigErrors> {
        Ok(Geodetic::from_degrees(self.latitude, self.longitude, self.altitude)
            .map_err(FlightErrors::from)?)
    }

    pub fn attitude(&self) -> Result<EulerAngles, ConfigErrors> {
        if !(-90.0..=90.0).contains(&self.elevation) {
            return Err(ConfigErrors::Elevation(self.elevation));
        }
        Ok(EulerAngles::new(
            self.roll.to_radians(),
            self.elevation.to_radians(),
            self.azimuth.to_radians(),
        ))
    }
}

/// A complete flight description, stored as RON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub vehicle: VehicleBuilder,
    #[serde(default)]
    pub environment: Environment,
    pub launch: LaunchConfig,
}

impl SimulationConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigErrors> {
        Ok(from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigErrors> {
        let mut contents = String::new();
        File::open(path)?.read_to_string(&mut contents)?;
        let config = Self::from_ron_str(&contents)?;
        info!("loaded flight '{}' from {path:?}", config.vehicle.name);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigErrors> {
        let ron_string = to_string_pretty(self, PrettyConfig::new())?;
        File::create(path)?.write_all(ron_string.as_bytes())?;
        Ok(())
    }

    /// Validates every model and returns the dynamics with the state of the
    /// vehicle on the launcher.
    pub fn build(&self) -> Result<(Dynamics6dofAero, FlightState), ConfigErrors> {
        let vehicle = self.vehicle.build()?;
        self.environment.validate()?;

        let capacity = vehicle.propellant_capacity();
        let propellant_mass = self.launch.propellant_mass.unwrap_or(capacity);
        if !(propellant_mass >= 0.0) {
            return Err(VehicleErrors::Negative("propellant_mass").into());
        }
        if propellant_mass > capacity {
            return Err(ConfigErrors::PropellantOverload(propellant_mass, capacity));
        }
        if !self.launch.start_time.is_finite() {
            return Err(FlightErrors::NonFiniteTime(self.launch.start_time).into());
        }
        if !self.launch.ignition_time.is_finite() {
            return Err(FlightErrors::NonFiniteTime(self.launch.ignition_time).into());
        }

        let state = FlightState::at_launch(
            &self.launch.site()?,
            &self.launch.attitude()?,
            propellant_mass,
            self.launch.start_time,
        );
        info!(
            "vehicle '{}' on the launcher at lat {:.4} lon {:.4}, {:.3} kg propellant",
            vehicle.name, self.launch.latitude, self.launch.longitude, propellant_mass
        );

        let rocket = Rocket::new(vehicle, self.launch.ignition_time);
        Ok((Dynamics6dofAero::new(rocket, self.environment.clone()), state))
    }
}
