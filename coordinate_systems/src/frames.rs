use crate::wgs84::Geodetic;
use nalgebra::{Matrix3, Vector3};
use rotations::prelude::*;

/// Earth rotation rate (rad/s)
pub const EARTH_ROTATION_RATE: f64 = 7.292115e-5;

/// Earth angular velocity in ECI, about the polar axis.
pub fn earth_angular_velocity() -> Vector3<f64> {
    Vector3::new(0.0, 0.0, EARTH_ROTATION_RATE)
}

/// ECI to ECEF transformation at time `t` seconds.
///
/// The two frames coincide at t = 0.
pub fn eci_to_ecef(t: f64) -> RotationMatrix {
    RotationMatrix::rotz(EARTH_ROTATION_RATE * t)
}

/// ECEF to local north-east-down transformation at a geodetic position.
pub fn ecef_to_ned(geodetic: &Geodetic) -> RotationMatrix {
    let (sin_lat, cos_lat) = geodetic.latitude.sin_cos();
    let (sin_lon, cos_lon) = geodetic.longitude.sin_cos();

    RotationMatrix(Matrix3::new(
        -sin_lat * cos_lon,
        -sin_lat * sin_lon,
        cos_lat,
        -sin_lon,
        cos_lon,
        0.0,
        -cos_lat * cos_lon,
        -cos_lat * sin_lon,
        -sin_lat,
    ))
}

/// NED to body transformation for an attitude quaternion.
pub fn ned_to_body(attitude: &UnitQuaternion) -> RotationMatrix {
    RotationMatrix::from(attitude)
}

/// Velocity relative to the rotating earth, expressed in ECEF.
///
/// `v_ecef = C_eci2ecef * (v_eci - w_earth x r_eci)`
///
/// # Arguments
///
/// * `eci_to_ecef` - ECI to ECEF transformation at the current time.
/// * `position` - ECI position in meters.
/// * `velocity` - ECI velocity in m/s.
pub fn velocity_eci_to_ecef(
    eci_to_ecef: &RotationMatrix,
    position: &Vector3<f64>,
    velocity: &Vector3<f64>,
) -> Vector3<f64> {
    let transport = earth_angular_velocity().cross(position);
    eci_to_ecef.transform(&(velocity - transport))
}

/// Direction cosine matrices between every frame used by the flight model,
/// built for a single instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSet {
    pub eci_to_ecef: RotationMatrix,
    pub ecef_to_eci: RotationMatrix,
    pub ecef_to_ned: RotationMatrix,
    pub ned_to_ecef: RotationMatrix,
    pub ned_to_body: RotationMatrix,
    pub body_to_ned: RotationMatrix,
}

impl FrameSet {
    /// Builds every transformation for a time, position and attitude.
    ///
    /// # Arguments
    ///
    /// * `t` - Simulation time in seconds.
    /// * `geodetic` - Current geodetic position.
    /// * `attitude` - NED to body quaternion.
    pub fn new(t: f64, geodetic: &Geodetic, attitude: &UnitQuaternion) -> Self {
        Self::with_eci_to_ecef(eci_to_ecef(t), geodetic, attitude)
    }

    /// Same as [`FrameSet::new`] with an already built ECI to ECEF matrix.
    pub fn with_eci_to_ecef(
        eci_to_ecef: RotationMatrix,
        geodetic: &Geodetic,
        attitude: &UnitQuaternion,
    ) -> Self {
        let ecef_to_ned = ecef_to_ned(geodetic);
        let ned_to_body = ned_to_body(attitude);
        Self {
            eci_to_ecef,
            ecef_to_eci: eci_to_ecef.transpose(),
            ecef_to_ned,
            ned_to_ecef: ecef_to_ned.transpose(),
            ned_to_body,
            body_to_ned: ned_to_body.transpose(),
        }
    }

    /// `C_ecef2eci * C_ned2ecef * C_body2ned`
    pub fn body_to_eci(&self) -> RotationMatrix {
        self.ecef_to_eci * self.ned_to_ecef * self.body_to_ned
    }

    pub fn ned_to_eci(&self) -> RotationMatrix {
        self.ecef_to_eci * self.ned_to_ecef
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;
    const TOL: f64 = 1e-12;

    #[test]
    fn test_frames_coincide_at_epoch() {
        assert_abs_diff_eq!(eci_to_ecef(0.0).0, Matrix3::identity(), epsilon = TOL);
    }

    #[test]
    fn test_eci_to_ecef_quarter_turn() {
        let t = FRAC_PI_2 / EARTH_ROTATION_RATE;
        let r = eci_to_ecef(t).transform(&Vector3::new(1.0, 0.0, 0.0));
        // fixed inertial direction drifts west as the earth turns east
        assert_abs_diff_eq!(r, Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_ned_at_origin() {
        let llh = Geodetic::new(0.0, 0.0, 0.0).unwrap();
        let c = ecef_to_ned(&llh);
        assert_abs_diff_eq!(
            c.transform(&Vector3::new(0.0, 0.0, 1.0)),
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = TOL
        );
        assert_abs_diff_eq!(
            c.transform(&Vector3::new(0.0, 1.0, 0.0)),
            Vector3::new(0.0, 1.0, 0.0),
            epsilon = TOL
        );
        assert_abs_diff_eq!(
            c.transform(&Vector3::new(1.0, 0.0, 0.0)),
            Vector3::new(0.0, 0.0, -1.0),
            epsilon = TOL
        );
    }

    #[test]
    fn test_down_is_geodetic_normal() {
        let llh = Geodetic::from_degrees(35.0, 139.0, 0.0).unwrap();
        let down_ecef = ecef_to_ned(&llh).rotate(&Vector3::new(0.0, 0.0, 1.0));
        let normal = Vector3::new(
            llh.latitude.cos() * llh.longitude.cos(),
            llh.latitude.cos() * llh.longitude.sin(),
            llh.latitude.sin(),
        );
        assert_abs_diff_eq!(down_ecef, -normal, epsilon = TOL);
    }

    #[test]
    fn test_cross_product_matches_skew_operator() {
        let position = Vector3::new(4.1e6, -2.3e6, 3.9e6);
        let velocity = Vector3::new(120.0, 340.0, -80.0);
        let c = eci_to_ecef(1234.5);

        let skew = Matrix3::new(
            0.0,
            -EARTH_ROTATION_RATE,
            0.0,
            EARTH_ROTATION_RATE,
            0.0,
            0.0,
            0.0,
            0.0,
            0.0,
        );
        let expected = c.0 * (velocity - skew * position);
        let v = velocity_eci_to_ecef(&c, &position, &velocity);
        assert_abs_diff_eq!(v, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_earth_fixed_point_has_no_relative_velocity() {
        let t = 500.0;
        let c = eci_to_ecef(t);
        let r_ecef = Vector3::new(3.0e6, 4.0e6, 3.5e6);
        let r_eci = c.rotate(&r_ecef);
        let v_eci = earth_angular_velocity().cross(&r_eci);
        let v = velocity_eci_to_ecef(&c, &r_eci, &v_eci);
        assert_abs_diff_eq!(v, Vector3::zeros(), epsilon = 1e-9);
    }

    #[test]
    fn test_prebuilt_eci_to_ecef() {
        let llh = Geodetic::from_degrees(12.0, -40.0, 300.0).unwrap();
        let q = UnitQuaternion::from(&EulerAngles::new(0.4, -0.2, 2.1));
        let t = 815.0;
        assert_eq!(
            FrameSet::with_eci_to_ecef(eci_to_ecef(t), &llh, &q),
            FrameSet::new(t, &llh, &q)
        );
    }

    #[test]
    fn test_body_to_eci_chain() {
        let llh = Geodetic::from_degrees(-20.0, 75.0, 1000.0).unwrap();
        let q = UnitQuaternion::from(&EulerAngles::new(0.1, 0.8, -1.3));
        let frames = FrameSet::new(42.0, &llh, &q);

        let v_body = Vector3::new(1.0, 2.0, -3.0);
        let v_ned = frames.body_to_ned.transform(&v_body);
        let v_ecef = frames.ned_to_ecef.transform(&v_ned);
        let v_eci = frames.ecef_to_eci.transform(&v_ecef);

        assert_abs_diff_eq!(frames.body_to_eci().transform(&v_body), v_eci, epsilon = TOL);
        let m = frames.body_to_eci().0;
        assert_abs_diff_eq!(m * m.transpose(), Matrix3::identity(), epsilon = TOL);
    }
}
