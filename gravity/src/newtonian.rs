use serde::{Deserialize, Serialize};

use crate::{EARTH_MU, EARTH_RADIUS, GravityErrors, GravityModel};

/// Point mass gravity, `mu / (R + h)^2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewtonianGravity {
    pub mu: f64,
    pub radius: f64,
}

impl NewtonianGravity {
    pub fn new(mu: f64, radius: f64) -> Self {
        Self { mu, radius }
    }
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self::new(EARTH_MU, EARTH_RADIUS)
    }
}

impl GravityModel for NewtonianGravity {
    fn calculate(&self, altitude: f64) -> Result<f64, GravityErrors> {
        let r = self.radius + altitude;
        if r <= 0.0 {
            return Err(GravityErrors::BelowEarthCenter(altitude));
        }
        Ok(self.mu / (r * r))
    }
}
