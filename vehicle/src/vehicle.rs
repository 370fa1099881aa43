use mass_properties::MassProperties;
use serde::{Deserialize, Serialize};

use crate::{
    VehicleErrors, VehicleModel,
    aerodynamics::{AeroCoefficients, AerodynamicModel, Aerodynamics},
    geometry::Geometry,
    propulsion::{Engine, Propulsion, PropulsionModel, ThrustAlignment},
    structure::{Component, Structure},
};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct VehicleBuilder {
    pub name: String,
    pub geometry: Geometry,
    pub structure: Structure,
    pub aerodynamics: Aerodynamics,
    #[serde(default)]
    pub propulsion: Propulsion,
}

impl VehicleBuilder {
    pub fn new(
        name: &str,
        geometry: Geometry,
        dry: Component,
        aerodynamics: Aerodynamics,
    ) -> Result<Self, VehicleErrors> {
        Ok(Self {
            name: name.to_string(),
            geometry,
            structure: Structure::new(dry)?,
            aerodynamics,
            propulsion: Propulsion::Unpowered,
        })
    }

    pub fn with_propellant(mut self, propellant: Component) -> Result<Self, VehicleErrors> {
        self.structure = self.structure.with_propellant(propellant)?;
        Ok(self)
    }

    pub fn with_engine(mut self, engine: Engine) -> Result<Self, VehicleErrors> {
        engine.validate()?;
        self.propulsion = Propulsion::Engine(engine);
        Ok(self)
    }

    pub fn build(&self) -> Result<Vehicle, VehicleErrors> {
        self.geometry.validate()?;
        self.structure.validate()?;
        self.aerodynamics.validate()?;
        self.propulsion.validate()?;
        Ok(Vehicle {
            name: self.name.clone(),
            geometry: self.geometry,
            structure: self.structure.clone(),
            aerodynamics: self.aerodynamics.clone(),
            propulsion: self.propulsion.clone(),
        })
    }
}

/// A validated single stage rocket.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub name: String,
    geometry: Geometry,
    structure: Structure,
    aerodynamics: Aerodynamics,
    propulsion: Propulsion,
}

impl Vehicle {
    pub fn propellant_capacity(&self) -> f64 {
        self.structure.propellant_capacity()
    }
}

impl VehicleModel for Vehicle {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn mass_properties(&self, propellant_mass: f64) -> Result<MassProperties, VehicleErrors> {
        self.structure.mass_properties(propellant_mass)
    }

    fn aero_coefficients(&self, mach: f64) -> AeroCoefficients {
        self.aerodynamics.coefficients(mach)
    }

    fn thrust(&self, burn_time: f64, ambient_pressure: f64) -> f64 {
        self.propulsion.thrust(burn_time, ambient_pressure)
    }

    fn mass_flow_rate(&self, burn_time: f64) -> f64 {
        self.propulsion.mass_flow_rate(burn_time)
    }

    fn thrust_alignment(&self) -> ThrustAlignment {
        self.propulsion.alignment()
    }

    fn nozzle_exit_radius(&self) -> f64 {
        self.propulsion.nozzle_exit_radius()
    }
}
