use mass_properties::{CenterOfMass, Inertia, MassProperties};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::{VehicleErrors, non_negative, positive};

/// Mass properties of one component placed along the body axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// kg
    pub mass: f64,
    /// center of mass aft of the nose (m)
    pub length_cg: f64,
    /// inertia about the component center of mass (kg m^2)
    pub inertia: Inertia,
}

impl Component {
    fn center_of_mass(&self) -> Vector3<f64> {
        Vector3::new(-self.length_cg, 0.0, 0.0)
    }
}

/// Dry airframe plus a propellant load whose inertia scales with the
/// remaining propellant fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub dry: Component,
    #[serde(default)]
    pub propellant: Option<Component>,
}

impl Structure {
    pub fn new(dry: Component) -> Result<Self, VehicleErrors> {
        let structure = Self {
            dry,
            propellant: None,
        };
        structure.validate()?;
        Ok(structure)
    }

    pub fn with_propellant(mut self, propellant: Component) -> Result<Self, VehicleErrors> {
        self.propellant = Some(propellant);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), VehicleErrors> {
        positive("dry mass", self.dry.mass)?;
        non_negative("dry length_cg", self.dry.length_cg)?;
        self.dry.inertia.validate()?;
        if let Some(propellant) = &self.propellant {
            positive("propellant mass", propellant.mass)?;
            non_negative("propellant length_cg", propellant.length_cg)?;
            propellant.inertia.validate()?;
        }
        Ok(())
    }

    /// Full propellant load (kg), zero when there is none.
    pub fn propellant_capacity(&self) -> f64 {
        self.propellant.map_or(0.0, |p| p.mass)
    }

    pub fn dry_mass_properties(&self) -> Result<MassProperties, VehicleErrors> {
        Ok(MassProperties::new(
            self.dry.mass,
            CenterOfMass::from(self.dry.center_of_mass()),
            self.dry.inertia,
        )?)
    }

    /// Mass properties with `propellant_mass` of propellant on board.
    ///
    /// # Arguments
    ///
    /// * `propellant_mass` - Remaining propellant (kg), negative values count as zero.
    pub fn mass_properties(&self, propellant_mass: f64) -> Result<MassProperties, VehicleErrors> {
        let dry = self.dry_mass_properties()?;
        let propellant_mass = propellant_mass.max(0.0);

        let (center, inertia) = match &self.propellant {
            Some(load) => (
                load.center_of_mass(),
                load.inertia.matrix() * (propellant_mass / load.mass),
            ),
            // propellant with no declared load is lumped at the dry center of mass
            None => (dry.center_of_mass.vector(), Matrix3::zeros()),
        };

        Ok(dry.with_added(propellant_mass, &center, &inertia)?)
    }
}
