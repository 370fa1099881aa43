use serde::{Deserialize, Serialize};
use utilities::Table1d;

use crate::{VehicleErrors, finite};

/// Aerodynamic coefficients at a single flight condition.
///
/// Damping derivatives are per unit nondimensional rate, so they are
/// normally negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AeroCoefficients {
    /// axial force coefficient
    pub ca: f64,
    /// normal force slope (1/rad)
    pub cna: f64,
    /// roll moment coefficient from fin cant
    #[serde(default)]
    pub cld: f64,
    /// roll damping
    #[serde(default)]
    pub clp: f64,
    /// pitch damping
    #[serde(default)]
    pub cmq: f64,
    /// yaw damping
    #[serde(default)]
    pub cnr: f64,
    /// center of pressure, aft of the nose (m)
    pub length_cp: f64,
}

impl AeroCoefficients {
    pub fn validate(&self) -> Result<(), VehicleErrors> {
        finite("ca", self.ca)?;
        finite("cna", self.cna)?;
        finite("cld", self.cld)?;
        finite("clp", self.clp)?;
        finite("cmq", self.cmq)?;
        finite("cnr", self.cnr)?;
        finite("length_cp", self.length_cp)?;
        Ok(())
    }
}

pub trait AerodynamicModel {
    fn coefficients(&self, mach: f64) -> AeroCoefficients;
}

/// Coefficients tabulated against Mach number. Each table clamps to its
/// end values outside its breakpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabulatedAerodynamics {
    pub ca: Table1d,
    pub cna: Table1d,
    pub cld: Table1d,
    pub clp: Table1d,
    pub cmq: Table1d,
    pub cnr: Table1d,
    pub length_cp: Table1d,
}

impl AerodynamicModel for TabulatedAerodynamics {
    fn coefficients(&self, mach: f64) -> AeroCoefficients {
        AeroCoefficients {
            ca: self.ca.eval(mach),
            cna: self.cna.eval(mach),
            cld: self.cld.eval(mach),
            clp: self.clp.eval(mach),
            cmq: self.cmq.eval(mach),
            cnr: self.cnr.eval(mach),
            length_cp: self.length_cp.eval(mach),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Aerodynamics {
    Constant(AeroCoefficients),
    Tabulated(TabulatedAerodynamics),
}

impl Aerodynamics {
    pub fn validate(&self) -> Result<(), VehicleErrors> {
        match self {
            Aerodynamics::Constant(c) => c.validate(),
            // tables are validated on construction
            Aerodynamics::Tabulated(_) => Ok(()),
        }
    }
}

impl AerodynamicModel for Aerodynamics {
    fn coefficients(&self, mach: f64) -> AeroCoefficients {
        match self {
            Aerodynamics::Constant(c) => *c,
            Aerodynamics::Tabulated(t) => t.coefficients(mach),
        }
    }
}
