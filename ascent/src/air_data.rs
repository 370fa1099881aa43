use atmosphere::AirProperties;
use nalgebra::Vector3;
use rotations::prelude::*;

/// Air relative flow quantities seen by the body.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AirData {
    /// velocity relative to the air, body axes (m/s)
    pub velocity: Vector3<f64>,
    /// m/s
    pub airspeed: f64,
    /// Pa
    pub dynamic_pressure: f64,
    pub mach: f64,
    /// rad
    pub angle_of_attack: f64,
    /// rad
    pub sideslip: f64,
}

impl AirData {
    /// Computes air data from the NED ground velocity and wind.
    ///
    /// Flow angles are `asin(w / V)` and `asin(-v / V)` with the ratio
    /// clamped to [-1, 1]. Both are exactly zero when the airspeed is zero.
    ///
    /// # Arguments
    ///
    /// * `velocity_ned` - Velocity relative to the earth in NED (m/s).
    /// * `wind_ned` - Wind velocity in NED (m/s).
    /// * `ned_to_body` - Current attitude.
    /// * `air` - Local air properties, speed of sound must be positive.
    pub fn new(
        velocity_ned: &Vector3<f64>,
        wind_ned: &Vector3<f64>,
        ned_to_body: &RotationMatrix,
        air: &AirProperties,
    ) -> Self {
        let velocity = ned_to_body.transform(&(velocity_ned - wind_ned));
        let airspeed = velocity.norm();

        let (angle_of_attack, sideslip) = if airspeed > 0.0 {
            (
                (velocity[2] / airspeed).clamp(-1.0, 1.0).asin(),
                (-velocity[1] / airspeed).clamp(-1.0, 1.0).asin(),
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            velocity,
            airspeed,
            dynamic_pressure: 0.5 * air.density * airspeed * airspeed,
            mach: airspeed / air.speed_of_sound,
            angle_of_attack,
            sideslip,
        }
    }
}
