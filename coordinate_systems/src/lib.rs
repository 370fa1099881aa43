pub mod frames;
pub mod wgs84;

use thiserror::Error;

pub mod prelude {
    pub use crate::CoordinateSystemErrors;
    pub use crate::frames::*;
    pub use crate::wgs84::*;
}

#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum CoordinateSystemErrors {
    #[error("latitude {0} rad is outside [-pi/2, pi/2]")]
    LatitudeOutOfRange(f64),
    #[error("geodetic coordinates must be finite")]
    NonFinite,
}
