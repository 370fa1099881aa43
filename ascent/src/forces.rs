use nalgebra::Vector3;
use rotations::prelude::*;
use vehicle::prelude::{AeroCoefficients, ThrustAlignment};

use crate::air_data::AirData;

/// Body axis forces acting on the vehicle (N).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Forces {
    pub thrust: Vector3<f64>,
    pub aero: Vector3<f64>,
    pub gravity: Vector3<f64>,
}

impl Forces {
    pub fn total(&self) -> Vector3<f64> {
        self.thrust + self.aero + self.gravity
    }
}

/// Thrust along the misaligned thrust line.
pub fn thrust_force(thrust: f64, alignment: &ThrustAlignment) -> Vector3<f64> {
    thrust * alignment.direction()
}

/// Axial and normal aerodynamic force.
///
/// `F = (-q S CA, q S CNa beta, -q S CNa alpha)`
pub fn aero_force(
    air_data: &AirData,
    reference_area: f64,
    coefficients: &AeroCoefficients,
) -> Vector3<f64> {
    let qs = air_data.dynamic_pressure * reference_area;
    Vector3::new(
        -qs * coefficients.ca,
        qs * coefficients.cna * air_data.sideslip,
        -qs * coefficients.cna * air_data.angle_of_attack,
    )
}

/// Weight along local down, expressed in body axes.
pub fn gravity_force(mass: f64, gravity: f64, ned_to_body: &RotationMatrix) -> Vector3<f64> {
    ned_to_body.transform(&Vector3::new(0.0, 0.0, mass * gravity))
}
