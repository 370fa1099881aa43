use serde::{Deserialize, Serialize};

use crate::{EARTH_RADIUS, GravityErrors, GravityModel, STANDARD_GRAVITY};

/// Sea level gravity scaled by the inverse square of the geocentric distance,
/// `g0 * (R / (R + h))^2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InverseSquareGravity {
    pub g0: f64,
    pub radius: f64,
}

impl InverseSquareGravity {
    pub fn new(g0: f64, radius: f64) -> Self {
        Self { g0, radius }
    }
}

impl Default for InverseSquareGravity {
    fn default() -> Self {
        Self::new(STANDARD_GRAVITY, EARTH_RADIUS)
    }
}

impl GravityModel for InverseSquareGravity {
    fn calculate(&self, altitude: f64) -> Result<f64, GravityErrors> {
        let r = self.radius + altitude;
        if r <= 0.0 {
            return Err(GravityErrors::BelowEarthCenter(altitude));
        }
        let ratio = self.radius / r;
        Ok(self.g0 * ratio * ratio)
    }
}
