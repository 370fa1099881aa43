use crate::CoordinateSystemErrors;
use crate::frames::ecef_to_ned;
use nalgebra::Vector3;
use rotations::RotationTrait;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// WGS84 semi-major axis (m)
pub const SEMI_MAJOR_AXIS: f64 = 6378137.0;
/// WGS84 flattening
pub const FLATTENING: f64 = 1.0 / 298.257223563;
/// WGS84 semi-minor axis (m)
pub const SEMI_MINOR_AXIS: f64 = SEMI_MAJOR_AXIS * (1.0 - FLATTENING);
/// First eccentricity squared
pub const ECCENTRICITY_SQ: f64 = FLATTENING * (2.0 - FLATTENING);
/// Second eccentricity squared
pub const SECOND_ECCENTRICITY_SQ: f64 =
    ECCENTRICITY_SQ / ((1.0 - FLATTENING) * (1.0 - FLATTENING));

const MAX_LATITUDE_ITERATIONS: usize = 5;
const LATITUDE_CONVERGENCE: f64 = 1e-15;

/// Geodetic position on the WGS84 ellipsoid.
///
/// Latitude and longitude are in radians, altitude is the height above the
/// ellipsoid in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Geodetic {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Geodetic {
    /// Creates a new `Geodetic` position.
    ///
    /// # Arguments
    ///
    /// * `latitude` - Geodetic latitude in radians, within [-pi/2, pi/2].
    /// * `longitude` - Longitude in radians.
    /// * `altitude` - Height above the ellipsoid in meters.
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Result<Self, CoordinateSystemErrors> {
        if !(latitude.is_finite() && longitude.is_finite() && altitude.is_finite()) {
            return Err(CoordinateSystemErrors::NonFinite);
        }
        if latitude.abs() > FRAC_PI_2 {
            return Err(CoordinateSystemErrors::LatitudeOutOfRange(latitude));
        }
        Ok(Self {
            latitude,
            longitude,
            altitude,
        })
    }

    /// Same as [`Geodetic::new`] with the angles given in degrees.
    pub fn from_degrees(
        latitude: f64,
        longitude: f64,
        altitude: f64,
    ) -> Result<Self, CoordinateSystemErrors> {
        Self::new(latitude.to_radians(), longitude.to_radians(), altitude)
    }

    /// Radius of curvature in the prime vertical at this latitude.
    pub fn prime_vertical_radius(&self) -> f64 {
        prime_vertical_radius(self.latitude)
    }

    /// Converts the geodetic position to ECEF coordinates.
    ///
    /// # Returns
    ///
    /// ECEF position in meters.
    pub fn to_ecef(&self) -> Vector3<f64> {
        let n = self.prime_vertical_radius();
        let (sin_lat, cos_lat) = self.latitude.sin_cos();
        let (sin_lon, cos_lon) = self.longitude.sin_cos();

        Vector3::new(
            (n + self.altitude) * cos_lat * cos_lon,
            (n + self.altitude) * cos_lat * sin_lon,
            (n * (1.0 - ECCENTRICITY_SQ) + self.altitude) * sin_lat,
        )
    }

    /// Converts an ECEF position to geodetic coordinates.
    ///
    /// Bowring's closed form provides the starting latitude, which is then
    /// refined by fixed point iteration. Valid at the poles and from below
    /// sea level to well beyond low earth orbit.
    ///
    /// # Arguments
    ///
    /// * `r` - ECEF position in meters.
    ///
    /// # Returns
    ///
    /// The geodetic position. Longitude is in (-pi, pi].
    pub fn from_ecef(r: &Vector3<f64>) -> Self {
        let (x, y, z) = (r[0], r[1], r[2]);
        let p = x.hypot(y);
        let longitude = y.atan2(x);

        // Bowring
        let theta = (z * SEMI_MAJOR_AXIS).atan2(p * SEMI_MINOR_AXIS);
        let (sin_theta, cos_theta) = theta.sin_cos();
        let mut latitude = (z + SECOND_ECCENTRICITY_SQ * SEMI_MINOR_AXIS * sin_theta.powi(3))
            .atan2(p - ECCENTRICITY_SQ * SEMI_MAJOR_AXIS * cos_theta.powi(3));

        for _ in 0..MAX_LATITUDE_ITERATIONS {
            let sin_lat = latitude.sin();
            let n = prime_vertical_radius(latitude);
            let next = (z + ECCENTRICITY_SQ * n * sin_lat).atan2(p);
            let delta = (next - latitude).abs();
            latitude = next;
            if delta < LATITUDE_CONVERGENCE {
                break;
            }
        }

        let (sin_lat, cos_lat) = latitude.sin_cos();
        let altitude = p * cos_lat + z * sin_lat
            - SEMI_MAJOR_AXIS * (1.0 - ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt();

        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// East-north-up offset of `point` from this position, in meters.
    pub fn enu_offset(&self, point: &Geodetic) -> Vector3<f64> {
        let delta = point.to_ecef() - self.to_ecef();
        let ned = ecef_to_ned(self).transform(&delta);
        Vector3::new(ned[1], ned[0], -ned[2])
    }

    /// Geodetic position of an east-north-up offset from this position.
    pub fn from_enu(&self, enu: &Vector3<f64>) -> Geodetic {
        let ned = Vector3::new(enu[1], enu[0], -enu[2]);
        let delta = ecef_to_ned(self).rotate(&ned);
        Geodetic::from_ecef(&(self.to_ecef() + delta))
    }
}

/// Radius of curvature in the prime vertical.
pub fn prime_vertical_radius(latitude: f64) -> f64 {
    let sin_lat = latitude.sin();
    SEMI_MAJOR_AXIS / (1.0 - ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt()
}
