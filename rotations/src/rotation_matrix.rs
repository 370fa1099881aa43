use super::*;
use nalgebra::{Matrix3, Vector3};
use quaternion::UnitQuaternion;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A struct representing a 3x3 direction cosine matrix.
///
/// The matrix transforms vector components from a source frame to a target
/// frame, `v_target = M * v_source`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationMatrix(pub Matrix3<f64>);

impl RotationMatrix {
    /// Frame rotation about the x axis.
    ///
    /// # Arguments
    ///
    /// * `angle` - Rotation of the target frame relative to the source frame in radians.
    pub fn rotx(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self(Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c))
    }

    /// Frame rotation about the y axis.
    ///
    /// # Arguments
    ///
    /// * `angle` - Rotation of the target frame relative to the source frame in radians.
    pub fn roty(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self(Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c))
    }

    /// Frame rotation about the z axis.
    ///
    /// # Arguments
    ///
    /// * `angle` - Rotation of the target frame relative to the source frame in radians.
    pub fn rotz(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self(Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0))
    }

    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    pub fn get_value(&self) -> Matrix3<f64> {
        self.0
    }
}

impl From<Matrix3<f64>> for RotationMatrix {
    fn from(value: Matrix3<f64>) -> Self {
        Self(value)
    }
}

impl From<&UnitQuaternion> for RotationMatrix {
    /// Converts a `UnitQuaternion` into a `RotationMatrix`.
    ///
    /// # Arguments
    ///
    /// * `q` - The quaternion to be converted.
    ///
    /// # Returns
    ///
    /// The direction cosine matrix that performs the same transformation as
    /// `q.transform()`.
    fn from(q: &UnitQuaternion) -> Self {
        let (s, x, y, z) = (q.0.w, q.0.x, q.0.y, q.0.z);

        let e11 = s * s + x * x - y * y - z * z;
        let e12 = 2.0 * (x * y + s * z);
        let e13 = 2.0 * (x * z - s * y);
        let e21 = 2.0 * (x * y - s * z);
        let e22 = s * s - x * x + y * y - z * z;
        let e23 = 2.0 * (y * z + s * x);
        let e31 = 2.0 * (x * z + s * y);
        let e32 = 2.0 * (y * z - s * x);
        let e33 = s * s - x * x - y * y + z * z;

        Self(Matrix3::new(e11, e12, e13, e21, e22, e23, e31, e32, e33))
    }
}

impl RotationTrait for RotationMatrix {
    /// Rotates a vector by the rotation matrix.
    ///
    /// # Arguments
    ///
    /// * `v` - The vector to be rotated.
    ///
    /// # Returns
    ///
    /// The rotated vector.
    fn rotate(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.0.transpose() * v
    }

    /// Transforms a vector by the rotation matrix.
    ///
    /// # Arguments
    ///
    /// * `v` - The vector to be transformed.
    ///
    /// # Returns
    ///
    /// The transformed vector.
    fn transform(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.0 * v
    }

    fn inv(&self) -> Self {
        self.transpose()
    }

    fn identity() -> Self {
        Self(Matrix3::identity())
    }
}

impl Mul<RotationMatrix> for RotationMatrix {
    type Output = RotationMatrix;

    /// Chains two transformations, `c_a2c = c_b2c * c_a2b`.
    fn mul(self, rhs: RotationMatrix) -> RotationMatrix {
        RotationMatrix(self.0 * rhs.0)
    }
}

impl Mul<Vector3<f64>> for RotationMatrix {
    type Output = Vector3<f64>;

    fn mul(self, rhs: Vector3<f64>) -> Vector3<f64> {
        self.0 * rhs
    }
}
