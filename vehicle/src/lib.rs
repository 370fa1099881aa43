use aerodynamics::AeroCoefficients;
use geometry::Geometry;
use mass_properties::{MassProperties, MassPropertiesErrors};
use propulsion::ThrustAlignment;
use thiserror::Error;
use utilities::TableErrors;

pub mod aerodynamics;
pub mod geometry;
pub mod propulsion;
pub mod structure;
pub mod vehicle;

pub mod prelude {
    pub use crate::aerodynamics::*;
    pub use crate::geometry::*;
    pub use crate::propulsion::*;
    pub use crate::structure::*;
    pub use crate::vehicle::*;
    pub use crate::{VehicleErrors, VehicleModel};
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum VehicleErrors {
    #[error("{0}")]
    MassPropertiesErrors(#[from] MassPropertiesErrors),
    #[error("{0}")]
    TableErrors(#[from] TableErrors),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("{0} must be finite")]
    NonFinite(&'static str),
}

/// Everything the flight dynamics needs to know about a vehicle.
///
/// Lengths along the body axis (`length_cg`, `length_cp`, `Geometry::length`)
/// are measured aft from the nose. Body x points toward the nose, so a
/// station at length `l` sits at `x = -l` in body coordinates.
pub trait VehicleModel {
    fn geometry(&self) -> &Geometry;

    /// Combined dry and propellant mass properties in body coordinates
    /// with the origin at the nose.
    fn mass_properties(&self, propellant_mass: f64) -> Result<MassProperties, VehicleErrors>;

    /// Aerodynamic coefficients, defined for every Mach number.
    fn aero_coefficients(&self, mach: f64) -> AeroCoefficients;

    /// Thrust magnitude (N) at a burn time and ambient pressure. The caller is
    /// responsible for cutting thrust once propellant is exhausted.
    fn thrust(&self, burn_time: f64, ambient_pressure: f64) -> f64;

    /// Propellant consumption (kg/s) at a burn time, never negative.
    fn mass_flow_rate(&self, burn_time: f64) -> f64;

    fn thrust_alignment(&self) -> ThrustAlignment;

    /// m
    fn nozzle_exit_radius(&self) -> f64;
}

/// Returns `value` when it is finite, otherwise a `VehicleErrors::NonFinite` naming it.
pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64, VehicleErrors> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(VehicleErrors::NonFinite(name))
    }
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, VehicleErrors> {
    if finite(name, value)? <= 0.0 {
        return Err(VehicleErrors::NotPositive(name));
    }
    Ok(value)
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64, VehicleErrors> {
    if finite(name, value)? < 0.0 {
        return Err(VehicleErrors::Negative(name));
    }
    Ok(value)
}
