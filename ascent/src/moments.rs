use nalgebra::{Matrix3, Vector3};
use vehicle::prelude::{AeroCoefficients, ThrustAlignment};

use crate::air_data::AirData;

/// Body axis moments about the center of mass (N m).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    pub gyro: Vector3<f64>,
    pub thrust: Vector3<f64>,
    pub aero_force: Vector3<f64>,
    pub aero_damping: Vector3<f64>,
    pub jet_damping: Vector3<f64>,
}

impl Moments {
    pub fn total(&self) -> Vector3<f64> {
        self.gyro + self.thrust + self.aero_force + self.aero_damping + self.jet_damping
    }
}

/// `-w x (I w)`
pub fn gyro_moment(inertia: &Matrix3<f64>, omega: &Vector3<f64>) -> Vector3<f64> {
    -omega.cross(&(inertia * omega))
}

/// Moment of the thrust about the center of mass.
///
/// The nozzle sits at the aft end with its lateral offsets, so the lever arm
/// from the center of mass is `(length_cg - length, offset_y, offset_z)`.
pub fn thrust_moment(
    thrust_force: &Vector3<f64>,
    alignment: &ThrustAlignment,
    length_cg: f64,
    length: f64,
) -> Vector3<f64> {
    let arm = Vector3::new(length_cg - length, alignment.offset_y, alignment.offset_z);
    arm.cross(thrust_force)
}

/// Roll moment from fin cant plus the normal force acting at the center of
/// pressure.
pub fn aero_force_moment(
    aero_force: &Vector3<f64>,
    air_data: &AirData,
    reference_area: f64,
    diameter: f64,
    coefficients: &AeroCoefficients,
    length_cg: f64,
) -> Vector3<f64> {
    let arm = coefficients.length_cp - length_cg;
    Vector3::new(
        air_data.dynamic_pressure * reference_area * diameter * coefficients.cld,
        arm * aero_force[2],
        -arm * aero_force[1],
    )
}

/// Rate damping from the roll, pitch and yaw damping derivatives.
///
/// Roll uses the diameter as reference length, pitch and yaw the body length.
/// Zero when the airspeed is zero.
pub fn aero_damping_moment(
    air_data: &AirData,
    reference_area: f64,
    diameter: f64,
    length: f64,
    coefficients: &AeroCoefficients,
    omega: &Vector3<f64>,
) -> Vector3<f64> {
    if air_data.airspeed <= 0.0 {
        return Vector3::zeros();
    }
    let qs = air_data.dynamic_pressure * reference_area;
    let two_v = 2.0 * air_data.airspeed;
    Vector3::new(
        qs * coefficients.clp * diameter * diameter / two_v * omega[0],
        qs * coefficients.cmq * length * length / two_v * omega[1],
        qs * coefficients.cnr * length * length / two_v * omega[2],
    )
}

/// Damping from the angular momentum carried away by the exhaust.
pub fn jet_damping_moment(
    mass_flow_rate: f64,
    nozzle_exit_radius: f64,
    length: f64,
    length_cg: f64,
    omega: &Vector3<f64>,
) -> Vector3<f64> {
    let arm_sq = (length - length_cg).powi(2);
    Vector3::new(
        -mass_flow_rate * 0.5 * nozzle_exit_radius * nozzle_exit_radius * omega[0],
        -mass_flow_rate * arm_sq * omega[1],
        -mass_flow_rate * arm_sq * omega[2],
    )
}
