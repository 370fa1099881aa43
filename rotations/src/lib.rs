pub mod euler_angles;
pub mod quaternion;
pub mod rotation_matrix;

use nalgebra::Vector3;

pub mod prelude {
    pub use crate::RotationTrait;
    pub use crate::euler_angles::*;
    pub use crate::quaternion::*;
    pub use crate::rotation_matrix::*;
}

/// Trait defining rotation and transformation operations.
///
/// Every attitude in this crate is stored as a frame transformation, so
/// `transform` expresses a vector given in the source frame in the target
/// frame, and `rotate` is the inverse (active) operation.
pub trait RotationTrait {
    /// Rotates a vector by the rotation.
    ///
    /// # Arguments
    ///
    /// * `v` - The vector to be rotated.
    ///
    /// # Returns
    ///
    /// The rotated vector.
    fn rotate(&self, v: &Vector3<f64>) -> Vector3<f64>;

    /// Transforms a vector by the rotation.
    ///
    /// # Arguments
    ///
    /// * `v` - The vector to be transformed.
    ///
    /// # Returns
    ///
    /// The transformed vector.
    fn transform(&self, v: &Vector3<f64>) -> Vector3<f64>;

    fn inv(&self) -> Self;

    fn identity() -> Self;
}
