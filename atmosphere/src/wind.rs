use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use utilities::Table1d;

use crate::AtmosphereErrors;

pub trait WindModel {
    // input is geodetic altitude in meters
    // returns the wind velocity in NED (m/s)
    fn velocity(&self, altitude: f64) -> Result<Vector3<f64>, AtmosphereErrors>;
}

/// Horizontal wind of fixed speed and direction at every altitude.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstantWind {
    /// m/s
    pub speed: f64,
    /// direction the wind blows from, clockwise from north (rad)
    pub direction_from: f64,
}

/// Wind profile following `V = V_ref * (h / h_ref)^(1 / exponent)`.
///
/// Zero at and below ground level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerLawWind {
    /// speed at the reference altitude (m/s)
    pub reference_speed: f64,
    /// m
    pub reference_altitude: f64,
    pub exponent: f64,
    /// direction the wind blows from, clockwise from north (rad)
    pub direction_from: f64,
}

/// North and east wind components tabulated against altitude.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabulatedWind {
    pub north: Table1d,
    pub east: Table1d,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub enum Wind {
    #[default]
    None,
    Constant(ConstantWind),
    PowerLaw(PowerLawWind),
    Tabulated(TabulatedWind),
}

fn horizontal(speed: f64, direction_from: f64) -> Vector3<f64> {
    let (s, c) = direction_from.sin_cos();
    // a wind from the north blows toward the south
    Vector3::new(-speed * c, -speed * s, 0.0)
}

impl Wind {
    /// Checks the model parameters once, before any query.
    pub fn validate(&self) -> Result<(), AtmosphereErrors> {
        match self {
            Wind::None | Wind::Tabulated(_) => Ok(()),
            Wind::Constant(w) => {
                if w.speed < 0.0 {
                    return Err(AtmosphereErrors::Negative("speed"));
                }
                Ok(())
            }
            Wind::PowerLaw(w) => {
                if w.reference_speed < 0.0 {
                    return Err(AtmosphereErrors::Negative("reference_speed"));
                }
                if w.reference_altitude <= 0.0 {
                    return Err(AtmosphereErrors::NotPositive("reference_altitude"));
                }
                if w.exponent <= 0.0 {
                    return Err(AtmosphereErrors::NotPositive("exponent"));
                }
                Ok(())
            }
        }
    }
}

impl WindModel for Wind {
    fn velocity(&self, altitude: f64) -> Result<Vector3<f64>, AtmosphereErrors> {
        if !altitude.is_finite() {
            return Err(AtmosphereErrors::NonFiniteAltitude);
        }
        let wind = match self {
            Wind::None => Vector3::zeros(),
            Wind::Constant(w) => horizontal(w.speed, w.direction_from),
            Wind::PowerLaw(w) => {
                if altitude <= 0.0 {
                    Vector3::zeros()
                } else {
                    let speed = w.reference_speed
                        * (altitude / w.reference_altitude).powf(1.0 / w.exponent);
                    horizontal(speed, w.direction_from)
                }
            }
            Wind::Tabulated(w) => Vector3::new(w.north.eval(altitude), w.east.eval(altitude), 0.0),
        };
        Ok(wind)
    }
}
