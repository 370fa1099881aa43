use serde::{Deserialize, Serialize};

use crate::{GravityErrors, GravityModel, STANDARD_GRAVITY};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstantGravity {
    pub g: f64,
}

impl ConstantGravity {
    pub fn new(g: f64) -> Self {
        Self { g }
    }
}

impl Default for ConstantGravity {
    fn default() -> Self {
        Self::new(STANDARD_GRAVITY)
    }
}

impl GravityModel for ConstantGravity {
    fn calculate(&self, _altitude: f64) -> Result<f64, GravityErrors> {
        Ok(self.g)
    }
}
