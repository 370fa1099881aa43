use coordinate_systems::prelude::*;
use nalgebra::{Vector3, Vector4};
use rotations::prelude::*;

use crate::FlightErrors;

pub const STATE_SIZE: usize = 14;

pub const POSITION: usize = 0;
pub const VELOCITY: usize = 3;
pub const QUATERNION: usize = 6;
pub const ANGULAR_VELOCITY: usize = 10;
pub const PROPELLANT_MASS: usize = 13;

/// Name of every state element, used to report bad input.
pub const FIELD_NAMES: [&str; STATE_SIZE] = [
    "position_eci[0]",
    "position_eci[1]",
    "position_eci[2]",
    "velocity_eci[0]",
    "velocity_eci[1]",
    "velocity_eci[2]",
    "quaternion[0]",
    "quaternion[1]",
    "quaternion[2]",
    "quaternion[3]",
    "angular_velocity[0]",
    "angular_velocity[1]",
    "angular_velocity[2]",
    "propellant_mass",
];

/// Unpacked flight state.
///
/// The attitude is kept exactly as given, normalization happens when the
/// state is evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    /// ECI (m)
    pub position: Vector3<f64>,
    /// ECI (m/s)
    pub velocity: Vector3<f64>,
    /// NED to body
    pub attitude: Quaternion,
    /// body (rad/s)
    pub angular_velocity: Vector3<f64>,
    /// kg
    pub propellant_mass: f64,
}

impl FlightState {
    /// Unpacks and checks a raw state vector.
    ///
    /// # Arguments
    ///
    /// * `x` - Exactly 14 finite values.
    ///
    /// # Returns
    ///
    /// The `FlightState`, or the error naming the first offending element.
    pub fn from_slice(x: &[f64]) -> Result<Self, FlightErrors> {
        if x.len() != STATE_SIZE {
            return Err(FlightErrors::StateLength(x.len()));
        }
        if let Some(i) = x.iter().position(|v| !v.is_finite()) {
            return Err(FlightErrors::NonFiniteState(FIELD_NAMES[i]));
        }

        let v3 = |i: usize| Vector3::new(x[i], x[i + 1], x[i + 2]);
        Ok(Self {
            position: v3(POSITION),
            velocity: v3(VELOCITY),
            attitude: Quaternion::from_scalar_first(&Vector4::new(
                x[QUATERNION],
                x[QUATERNION + 1],
                x[QUATERNION + 2],
                x[QUATERNION + 3],
            )),
            angular_velocity: v3(ANGULAR_VELOCITY),
            propellant_mass: x[PROPELLANT_MASS],
        })
    }

    pub fn to_array(&self) -> [f64; STATE_SIZE] {
        let q = self.attitude.to_scalar_first();
        [
            self.position[0],
            self.position[1],
            self.position[2],
            self.velocity[0],
            self.velocity[1],
            self.velocity[2],
            q[0],
            q[1],
            q[2],
            q[3],
            self.angular_velocity[0],
            self.angular_velocity[1],
            self.angular_velocity[2],
            self.propellant_mass,
        ]
    }

    /// State of a vehicle resting on the launcher.
    ///
    /// The vehicle moves with the rotating earth and has no angular rate
    /// relative to the local NED frame.
    ///
    /// # Arguments
    ///
    /// * `site` - Geodetic position of the launcher.
    /// * `attitude` - Launcher attitude, yaw is the azimuth and pitch the elevation.
    /// * `propellant_mass` - Propellant on board (kg).
    /// * `t` - Time of the state, fixes the ECI to ECEF rotation.
    pub fn at_launch(
        site: &Geodetic,
        attitude: &EulerAngles,
        propellant_mass: f64,
        t: f64,
    ) -> Self {
        let position = eci_to_ecef(t).rotate(&site.to_ecef());
        Self {
            position,
            velocity: earth_angular_velocity().cross(&position),
            attitude: UnitQuaternion::from(attitude).0,
            angular_velocity: Vector3::zeros(),
            propellant_mass,
        }
    }
}
