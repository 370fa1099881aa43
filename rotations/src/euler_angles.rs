use super::quaternion::UnitQuaternion;
use super::rotation_matrix::RotationMatrix;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Threshold on |sin(pitch)| beyond which yaw and roll are no longer separable.
pub const GIMBAL_LOCK_THRESHOLD: f64 = 1.0 - 1e-9;

/// 3-2-1 (yaw, pitch, roll) Euler angles in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl EulerAngles {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// True when the pitch sits on the +/-90 degree singularity.
    pub fn is_gimbal_locked(&self) -> bool {
        self.pitch.sin().abs() > GIMBAL_LOCK_THRESHOLD
    }
}

impl From<&RotationMatrix> for EulerAngles {
    /// Extracts 3-2-1 Euler angles from a direction cosine matrix.
    ///
    /// At gimbal lock yaw is fixed to zero, pitch is set to exactly +/-90
    /// degrees and the whole heading is carried by roll.
    ///
    /// # Arguments
    ///
    /// * `m` - Transformation from the reference frame to the body frame.
    ///
    /// # Returns
    ///
    /// The `EulerAngles` that rebuild `m`.
    fn from(m: &RotationMatrix) -> Self {
        let c = &m.0;
        let sin_pitch = -c[(0, 2)];

        if sin_pitch.abs() > GIMBAL_LOCK_THRESHOLD {
            return Self {
                roll: (-c[(2, 1)]).atan2(c[(1, 1)]),
                pitch: FRAC_PI_2.copysign(sin_pitch),
                yaw: 0.0,
            };
        }

        Self {
            roll: c[(1, 2)].atan2(c[(2, 2)]),
            pitch: sin_pitch.clamp(-1.0, 1.0).asin(),
            yaw: c[(0, 1)].atan2(c[(0, 0)]),
        }
    }
}

impl From<&UnitQuaternion> for EulerAngles {
    fn from(q: &UnitQuaternion) -> Self {
        EulerAngles::from(&RotationMatrix::from(q))
    }
}
