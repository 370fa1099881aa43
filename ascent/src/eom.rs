use coordinate_systems::prelude::FrameSet;
use nalgebra::{Matrix3, Vector3};
use rotations::prelude::*;

use crate::FlightErrors;

/// Relative determinant below which an inertia tensor is treated as singular.
pub const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Translational acceleration in body axes.
pub fn body_acceleration(force: &Vector3<f64>, mass: f64) -> Vector3<f64> {
    force / mass
}

/// Body acceleration expressed in ECI through the NED and ECEF frames.
pub fn inertial_acceleration(frames: &FrameSet, body_acceleration: &Vector3<f64>) -> Vector3<f64> {
    frames.body_to_eci().transform(body_acceleration)
}

/// Solves `I w_dot = M` for the angular acceleration.
///
/// The tensor is rejected when it cannot be inverted or its determinant is
/// tiny compared to the cube of its mean principal moment.
pub fn angular_acceleration(
    inertia: &Matrix3<f64>,
    moment: &Vector3<f64>,
) -> Result<Vector3<f64>, FlightErrors> {
    let scale = (inertia.trace() / 3.0).powi(3);
    if !(inertia.determinant() > SINGULARITY_TOLERANCE * scale) {
        return Err(FlightErrors::SingularInertia);
    }
    let inverse = inertia
        .try_inverse()
        .ok_or(FlightErrors::SingularInertia)?;
    Ok(inverse * moment)
}

/// `q_dot = 0.5 * Omega(w) * q` on the normalized attitude.
pub fn quaternion_rate(attitude: &UnitQuaternion, omega: &Vector3<f64>) -> Quaternion {
    attitude.rate(omega)
}
