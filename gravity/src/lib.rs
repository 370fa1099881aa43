use constant::ConstantGravity;
use inverse_square::InverseSquareGravity;
use newtonian::NewtonianGravity;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod constant;
pub mod inverse_square;
pub mod newtonian;

/// Standard gravity (m/s^2)
pub const STANDARD_GRAVITY: f64 = 9.80665;
/// Earth equatorial radius (m)
pub const EARTH_RADIUS: f64 = 6378137.0;
/// Earth gravitational parameter (m^3/s^2)
pub const EARTH_MU: f64 = 3.986004418e14;

#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum GravityErrors {
    #[error("altitude {0} m places the vehicle at or below the earth center")]
    BelowEarthCenter(f64),
    #[error("altitude must be finite")]
    NonFiniteAltitude,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Gravity {
    Constant(ConstantGravity),
    InverseSquare(InverseSquareGravity),
    Newtonian(NewtonianGravity),
}

impl Default for Gravity {
    fn default() -> Self {
        Gravity::InverseSquare(InverseSquareGravity::default())
    }
}

impl GravityModel for Gravity {
    fn calculate(&self, altitude: f64) -> Result<f64, GravityErrors> {
        if !altitude.is_finite() {
            return Err(GravityErrors::NonFiniteAltitude);
        }
        match self {
            Gravity::Constant(g) => g.calculate(altitude),
            Gravity::InverseSquare(g) => g.calculate(altitude),
            Gravity::Newtonian(g) => g.calculate(altitude),
        }
    }
}

pub trait GravityModel {
    // input is geodetic altitude above the ellipsoid
    // returns the magnitude of gravitational acceleration along local down
    fn calculate(&self, altitude: f64) -> Result<f64, GravityErrors>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_is_standard_at_sea_level() {
        let g = Gravity::default();
        assert_abs_diff_eq!(g.calculate(0.0).unwrap(), STANDARD_GRAVITY, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_altitude() {
        let g = Gravity::Constant(ConstantGravity::new(9.8));
        assert_eq!(g.calculate(f64::NAN), Err(GravityErrors::NonFiniteAltitude));
    }

    #[test]
    fn test_deserialize() {
        let g: Gravity = ron::from_str("Newtonian((mu: 3.986004418e14, radius: 6378137.0))").unwrap();
        let expected = EARTH_MU / (EARTH_RADIUS * EARTH_RADIUS);
        assert_abs_diff_eq!(g.calculate(0.0).unwrap(), expected, epsilon = 1e-12);
    }
}
