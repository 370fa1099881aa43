use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum MassPropertiesErrors {
    #[error("Ixx cant be less than or equal to  zero")]
    IxxLessThanOrEqualToZero,
    #[error("Iyy cant be less than or equal to zero")]
    IyyLessThanOrEqualToZero,
    #[error("Izz cant be less than or equal to zero")]
    IzzLessThanOrEqualToZero,
    #[error("mass cannot be less than or equal to zero")]
    MassLessThanOrEqualToZero,
    #[error("added mass cannot be negative")]
    NegativeAddedMass,
    #[error("mass properties must be finite")]
    NonFinite,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CenterOfMass {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CenterOfMass {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for CenterOfMass {
    fn from(v: Vector3<f64>) -> CenterOfMass {
        CenterOfMass::new(v[0], v[1], v[2])
    }
}

/// Inertia tensor about a center of mass, in kg m^2.
///
/// The off diagonal terms are the tensor elements themselves, so `matrix()`
/// is used as is in the Euler equations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inertia {
    pub ixx: f64,
    pub iyy: f64,
    pub izz: f64,
    #[serde(default)]
    pub ixy: f64,
    #[serde(default)]
    pub ixz: f64,
    #[serde(default)]
    pub iyz: f64,
}

impl Inertia {
    pub fn new(
        ixx: f64,
        iyy: f64,
        izz: f64,
        ixy: f64,
        ixz: f64,
        iyz: f64,
    ) -> Result<Self, MassPropertiesErrors> {
        let inertia = Self {
            ixx,
            iyy,
            izz,
            ixy,
            ixz,
            iyz,
        };
        inertia.validate()?;
        Ok(inertia)
    }

    /// Checks the diagonal is positive and every term finite.
    pub fn validate(&self) -> Result<(), MassPropertiesErrors> {
        let terms = [self.ixx, self.iyy, self.izz, self.ixy, self.ixz, self.iyz];
        if terms.iter().any(|v| !v.is_finite()) {
            return Err(MassPropertiesErrors::NonFinite);
        }
        if self.ixx <= f64::EPSILON {
            return Err(MassPropertiesErrors::IxxLessThanOrEqualToZero);
        }
        if self.iyy <= f64::EPSILON {
            return Err(MassPropertiesErrors::IyyLessThanOrEqualToZero);
        }
        if self.izz <= f64::EPSILON {
            return Err(MassPropertiesErrors::IzzLessThanOrEqualToZero);
        }
        Ok(())
    }

    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.ixx, self.ixy, self.ixz, self.ixy, self.iyy, self.iyz, self.ixz, self.iyz,
            self.izz,
        )
    }
}

impl TryFrom<Matrix3<f64>> for Inertia {
    type Error = MassPropertiesErrors;
    fn try_from(m: Matrix3<f64>) -> Result<Inertia, MassPropertiesErrors> {
        Inertia::new(
            m[(0, 0)],
            m[(1, 1)],
            m[(2, 2)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 2)],
        )
    }
}

/// Represents the mass properties of an object
/// Mass, Center of Mass, Inertia
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassProperties {
    pub mass: f64,
    pub center_of_mass: CenterOfMass,
    pub inertia: Inertia,
}

impl MassProperties {
    pub fn new(
        mass: f64,
        center_of_mass: CenterOfMass,
        inertia: Inertia,
    ) -> Result<Self, MassPropertiesErrors> {
        let mp = MassProperties {
            mass,
            center_of_mass,
            inertia,
        };
        mp.validate()?;
        Ok(mp)
    }

    pub fn validate(&self) -> Result<(), MassPropertiesErrors> {
        if !self.mass.is_finite() || !self.center_of_mass.vector().iter().all(|v| v.is_finite())
        {
            return Err(MassPropertiesErrors::NonFinite);
        }
        if self.mass <= f64::EPSILON {
            return Err(MassPropertiesErrors::MassLessThanOrEqualToZero);
        }
        self.inertia.validate()
    }

    /// Adds a point of mass with its own central inertia to this body.
    ///
    /// Both inertia tensors are shifted to the combined center of mass with
    /// the parallel axis theorem, `I + m * (|d|^2 E - d d^T)`.
    ///
    /// # Arguments
    ///
    /// * `mass` - Mass of the added part, zero is allowed.
    /// * `center_of_mass` - Center of mass of the added part.
    /// * `inertia` - Inertia tensor of the added part about its own center of mass.
    ///
    /// # Returns
    ///
    /// The combined `MassProperties`.
    pub fn with_added(
        &self,
        mass: f64,
        center_of_mass: &Vector3<f64>,
        inertia: &Matrix3<f64>,
    ) -> Result<Self, MassPropertiesErrors> {
        if !mass.is_finite() {
            return Err(MassPropertiesErrors::NonFinite);
        }
        if mass < 0.0 {
            return Err(MassPropertiesErrors::NegativeAddedMass);
        }

        let total = self.mass + mass;
        let own_cg = self.center_of_mass.vector();
        let cg = (own_cg * self.mass + center_of_mass * mass) / total;

        let shift = |m: f64, d: Vector3<f64>| -> Matrix3<f64> {
            (Matrix3::identity() * d.norm_squared() - d * d.transpose()) * m
        };

        let combined = self.inertia.matrix()
            + shift(self.mass, own_cg - cg)
            + inertia
            + shift(mass, center_of_mass - cg);

        MassProperties::new(total, CenterOfMass::from(cg), Inertia::try_from(combined)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    const TOL: f64 = 1e-12;

    fn unit_body() -> MassProperties {
        MassProperties::new(
            1.0,
            CenterOfMass::new(0.0, 0.0, 0.0),
            Inertia::new(1.0, 1.0, 1.0, 0.0, 0.0, 0.0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_inertia_validation() {
        assert_eq!(
            Inertia::new(0.0, 1.0, 1.0, 0.0, 0.0, 0.0),
            Err(MassPropertiesErrors::IxxLessThanOrEqualToZero)
        );
        assert_eq!(
            Inertia::new(1.0, 1.0, f64::NAN, 0.0, 0.0, 0.0),
            Err(MassPropertiesErrors::NonFinite)
        );
    }

    #[test]
    fn test_mass_validation() {
        let inertia = Inertia::new(1.0, 1.0, 1.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(
            MassProperties::new(0.0, CenterOfMass::default(), inertia),
            Err(MassPropertiesErrors::MassLessThanOrEqualToZero)
        );
    }

    #[test]
    fn test_add_nothing() {
        let body = unit_body();
        let out = body
            .with_added(0.0, &Vector3::new(5.0, 0.0, 0.0), &Matrix3::zeros())
            .unwrap();
        assert_eq!(out, body);
    }

    #[test]
    fn test_two_equal_masses() {
        let body = unit_body();
        let out = body
            .with_added(1.0, &Vector3::new(2.0, 0.0, 0.0), &Matrix3::identity())
            .unwrap();

        assert_abs_diff_eq!(out.mass, 2.0, epsilon = TOL);
        assert_abs_diff_eq!(out.center_of_mass.x, 1.0, epsilon = TOL);
        // each part sits 1 m from the combined center along x
        assert_abs_diff_eq!(out.inertia.ixx, 2.0, epsilon = TOL);
        assert_abs_diff_eq!(out.inertia.iyy, 4.0, epsilon = TOL);
        assert_abs_diff_eq!(out.inertia.izz, 4.0, epsilon = TOL);
        assert_abs_diff_eq!(out.inertia.ixy, 0.0, epsilon = TOL);
    }

    #[test]
    fn test_off_axis_products() {
        let body = unit_body();
        let out = body
            .with_added(1.0, &Vector3::new(2.0, 2.0, 0.0), &Matrix3::zeros())
            .unwrap();
        // d = +/-(1, 1, 0), m (|d|^2 E - d d^T) gives -1 per part off diagonal
        assert_abs_diff_eq!(out.inertia.ixy, -2.0, epsilon = TOL);
        assert_abs_diff_eq!(out.inertia.izz, 1.0 + 4.0, epsilon = TOL);
    }

    #[test]
    fn test_negative_added_mass() {
        assert_eq!(
            unit_body().with_added(-1.0, &Vector3::zeros(), &Matrix3::zeros()),
            Err(MassPropertiesErrors::NegativeAddedMass)
        );
    }
}
