use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::{VehicleErrors, positive};

/// Outer dimensions of the airframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// nose to nozzle exit (m)
    pub length: f64,
    /// reference diameter (m)
    pub diameter: f64,
}

impl Geometry {
    pub fn new(length: f64, diameter: f64) -> Result<Self, VehicleErrors> {
        let geometry = Self { length, diameter };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<(), VehicleErrors> {
        positive("length", self.length)?;
        positive("diameter", self.diameter)?;
        Ok(())
    }

    /// Cross sectional reference area, `pi * d^2 / 4`.
    pub fn reference_area(&self) -> f64 {
        PI * self.diameter * self.diameter / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_area() {
        let geometry = Geometry::new(2.0, 0.2).unwrap();
        assert_abs_diff_eq!(geometry.reference_area(), 0.031415926535897934, epsilon = 1e-15);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Geometry::new(2.0, 0.0),
            Err(VehicleErrors::NotPositive("diameter"))
        );
        assert_eq!(
            Geometry::new(f64::NAN, 0.1),
            Err(VehicleErrors::NonFinite("length"))
        );
    }
}
