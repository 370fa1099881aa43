use super::*;
use euler_angles::EulerAngles;
use nalgebra::{Vector3, Vector4};
use serde::{Deserialize, Serialize};
use std::ops::{Mul, Neg};
use thiserror::Error;

/// A struct representing a quaternion for 3D rotations.
///
/// Components are stored by name, so the vector layout is only decided at the
/// boundaries. Flight states use the scalar-first layout `[w, x, y, z]`, see
/// [`Quaternion::from_scalar_first`] and [`Quaternion::to_scalar_first`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

/// Errors that can occur when creating a `Quaternion`.
#[derive(Debug, Clone, Error, Copy, PartialEq)]
pub enum QuaternionErrors {
    #[error("got zero magnitude quaternion")]
    ZeroMagnitude,
    #[error("got non-finite quaternion component")]
    NonFinite,
}

impl Quaternion {
    /// Creates an identity quaternion.
    ///
    /// # Returns
    ///
    /// A `Quaternion` representing no rotation.
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Creates a new `Quaternion`. No normalization is performed.
    ///
    /// # Arguments
    ///
    /// * `x` - The x component of the quaternion.
    /// * `y` - The y component of the quaternion.
    /// * `z` - The z component of the quaternion.
    /// * `w` - The scalar component of the quaternion.
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Builds a quaternion from a scalar-first vector `[w, x, y, z]`.
    pub fn from_scalar_first(q: &Vector4<f64>) -> Self {
        Self { w: q[0], x: q[1], y: q[2], z: q[3] }
    }

    /// Returns the scalar-first vector `[w, x, y, z]`.
    pub fn to_scalar_first(&self) -> Vector4<f64> {
        Vector4::new(self.w, self.x, self.y, self.z)
    }

    // Dot product of two quaternions
    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Conjugate of the quaternion.
    pub fn inv(&self) -> Quaternion {
        Quaternion::new(-self.x, -self.y, -self.z, self.w)
    }

    pub fn mag(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Returns the quaternion scaled to unit magnitude.
    ///
    /// # Returns
    ///
    /// `Err(QuaternionErrors::ZeroMagnitude)` when the magnitude is below
    /// machine epsilon, `Err(QuaternionErrors::NonFinite)` when any component
    /// is NaN or infinite.
    pub fn normalize(&self) -> Result<Self, QuaternionErrors> {
        let mag = self.mag();
        if !mag.is_finite() {
            return Err(QuaternionErrors::NonFinite);
        }
        if mag < f64::EPSILON {
            return Err(QuaternionErrors::ZeroMagnitude);
        }
        Ok(Quaternion::new(
            self.x / mag,
            self.y / mag,
            self.z / mag,
            self.w / mag,
        ))
    }
}

impl Default for Quaternion {
    /// Provides the default value for a quaternion.
    ///
    /// # Returns
    ///
    /// The identity quaternion.
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A quaternion known to have unit magnitude.
///
/// Interpreted as the transformation from a reference frame to a target frame,
/// for flight states the NED frame to the body frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct UnitQuaternion(pub Quaternion);

impl UnitQuaternion {
    pub const IDENTITY: Self = Self(Quaternion::IDENTITY);

    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Result<Self, QuaternionErrors> {
        Ok(Self(Quaternion::new(x, y, z, w).normalize()?))
    }

    /// Time derivative of the quaternion for a body angular velocity.
    ///
    /// Evaluates `q_dot = 0.5 * Omega(omega) * q` with `omega` the angular
    /// velocity of the target frame relative to the reference frame, expressed
    /// in the target frame.
    ///
    /// # Arguments
    ///
    /// * `omega` - Body angular rates `(p, q, r)` in rad/s.
    ///
    /// # Returns
    ///
    /// The quaternion rate. It is not a rotation, so a plain `Quaternion`.
    pub fn rate(&self, omega: &Vector3<f64>) -> Quaternion {
        let (q0, q1, q2, q3) = (self.0.w, self.0.x, self.0.y, self.0.z);
        let (p, q, r) = (omega[0], omega[1], omega[2]);

        Quaternion {
            w: 0.5 * (-p * q1 - q * q2 - r * q3),
            x: 0.5 * (p * q0 + r * q2 - q * q3),
            y: 0.5 * (q * q0 - r * q1 + p * q3),
            z: 0.5 * (r * q0 + q * q1 - p * q2),
        }
    }
}

impl TryFrom<&Quaternion> for UnitQuaternion {
    type Error = QuaternionErrors;
    fn try_from(value: &Quaternion) -> Result<Self, QuaternionErrors> {
        Ok(Self(value.normalize()?))
    }
}

impl From<&UnitQuaternion> for Quaternion {
    fn from(value: &UnitQuaternion) -> Self {
        value.0
    }
}

impl RotationTrait for UnitQuaternion {
    /// Rotates a vector by the quaternion.
    /// Follows the logic from Markley/Crassidis
    /// aka Active Rotation or "Alibi"
    ///
    /// # Arguments
    ///
    /// * `v` - The vector to be rotated.
    ///
    /// # Returns
    ///
    /// The rotated vector.
    fn rotate(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let (q1, q2, q3, q4) = (self.0.x, self.0.y, self.0.z, self.0.w);

        let out1 = (q1 * q1 - q2 * q2 - q3 * q3 + q4 * q4) * v[0]
            + 2.0 * (q1 * q2 - q3 * q4) * v[1]
            + 2.0 * (q1 * q3 + q2 * q4) * v[2];

        let out2 = 2.0 * (q2 * q1 + q3 * q4) * v[0]
            + (-q1 * q1 + q2 * q2 - q3 * q3 + q4 * q4) * v[1]
            + 2.0 * (q2 * q3 - q1 * q4) * v[2];

        let out3 = 2.0 * (q3 * q1 - q2 * q4) * v[0]
            + 2.0 * (q3 * q2 + q1 * q4) * v[1]
            + (-q1 * q1 - q2 * q2 + q3 * q3 + q4 * q4) * v[2];

        Vector3::new(out1, out2, out3)
    }

    /// Transforms a vector by the quaternion.
    /// Follows the logic from Markley/Crassidis
    /// Section 2.9.3, equations 2.125 and 2.130
    /// aka Passive Rotation or "Alias"
    ///
    /// # Arguments
    ///
    /// * `v` - The vector to be transformed.
    ///
    /// # Returns
    ///
    /// The transformed vector.
    fn transform(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let (q1, q2, q3, q4) = (self.0.x, self.0.y, self.0.z, self.0.w);

        let out1 = (q1 * q1 - q2 * q2 - q3 * q3 + q4 * q4) * v[0]
            + 2.0 * (q1 * q2 + q3 * q4) * v[1]
            + 2.0 * (q1 * q3 - q2 * q4) * v[2];

        let out2 = 2.0 * (q2 * q1 - q3 * q4) * v[0]
            + (-q1 * q1 + q2 * q2 - q3 * q3 + q4 * q4) * v[1]
            + 2.0 * (q2 * q3 + q1 * q4) * v[2];

        let out3 = 2.0 * (q3 * q1 + q2 * q4) * v[0]
            + 2.0 * (q3 * q2 - q1 * q4) * v[1]
            + (-q1 * q1 - q2 * q2 + q3 * q3 + q4 * q4) * v[2];

        Vector3::new(out1, out2, out3)
    }

    fn identity() -> Self {
        Self::IDENTITY
    }

    fn inv(&self) -> Self {
        // conjugate of a unit quaternion is still unit
        UnitQuaternion(self.0.inv())
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;

    /// Multiplies two quaternions.
    /// Successive multiplications act like DCMs so that a rotation from a2c is
    /// q_a2c = q_c2b * q_b2a
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w - self.y * rhs.z + self.z * rhs.y,
            self.w * rhs.y + self.y * rhs.w - self.z * rhs.x + self.x * rhs.z,
            self.w * rhs.z + self.z * rhs.w - self.x * rhs.y + self.y * rhs.x,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl Mul<UnitQuaternion> for UnitQuaternion {
    type Output = Self;
    fn mul(self, rhs: UnitQuaternion) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl From<&EulerAngles> for UnitQuaternion {
    /// Converts 3-2-1 (yaw, pitch, roll) `EulerAngles` to a `UnitQuaternion`.
    /// Reference: Markley & Crassidis, Fundamentals of Spacecraft Attitude Determination & Control
    ///
    /// # Arguments
    ///
    /// * `euler_angles` - The Euler angles to be converted.
    ///
    /// # Returns
    ///
    /// The corresponding `UnitQuaternion`.
    fn from(euler_angles: &EulerAngles) -> Self {
        let s = |v: f64| (v / 2.0).sin();
        let c = |v: f64| (v / 2.0).cos();

        let (phi, theta, psi) = (euler_angles.roll, euler_angles.pitch, euler_angles.yaw);

        // product of half angle sines and cosines is already unit magnitude
        UnitQuaternion(Quaternion {
            w: c(phi) * c(theta) * c(psi) + s(phi) * s(theta) * s(psi),
            x: s(phi) * c(theta) * c(psi) - c(phi) * s(theta) * s(psi),
            y: c(phi) * s(theta) * c(psi) + s(phi) * c(theta) * s(psi),
            z: c(phi) * c(theta) * s(psi) - s(phi) * s(theta) * c(psi),
        })
    }
}
