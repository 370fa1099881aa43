use gravity::STANDARD_GRAVITY;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use utilities::Table1d;

use crate::{VehicleErrors, finite, non_negative, positive};

/// Sea level pressure the thrust curve is measured at (Pa)
pub const REFERENCE_PRESSURE: f64 = 101325.0;

fn reference_pressure() -> f64 {
    REFERENCE_PRESSURE
}

/// Thrust line misalignment and nozzle offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThrustAlignment {
    /// rad, positive tilts the thrust toward body -z
    #[serde(default)]
    pub pitch: f64,
    /// rad, positive tilts the thrust toward body +y
    #[serde(default)]
    pub yaw: f64,
    /// lateral nozzle offset along body y (m)
    #[serde(default)]
    pub offset_y: f64,
    /// lateral nozzle offset along body z (m)
    #[serde(default)]
    pub offset_z: f64,
}

impl ThrustAlignment {
    /// Unit thrust direction in body axes.
    pub fn direction(&self) -> Vector3<f64> {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        Vector3::new(cp * cy, cp * sy, -sp)
    }

    fn validate(&self) -> Result<(), VehicleErrors> {
        finite("misalignment pitch", self.pitch)?;
        finite("misalignment yaw", self.yaw)?;
        finite("offset_y", self.offset_y)?;
        finite("offset_z", self.offset_z)?;
        Ok(())
    }
}

pub trait PropulsionModel {
    fn thrust(&self, burn_time: f64, ambient_pressure: f64) -> f64;
    fn mass_flow_rate(&self, burn_time: f64) -> f64;
}

/// Engine driven by a sea level thrust curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engine {
    /// sea level thrust (N) against burn time (s)
    pub thrust_curve: Table1d,
    /// sea level specific impulse (s)
    pub isp: f64,
    /// m
    pub nozzle_exit_diameter: f64,
    /// Pa
    #[serde(default = "reference_pressure")]
    pub reference_pressure: f64,
    #[serde(default)]
    pub alignment: ThrustAlignment,
}

impl Engine {
    pub fn new(thrust_curve: Table1d, isp: f64, nozzle_exit_diameter: f64) -> Result<Self, VehicleErrors> {
        let engine = Self {
            thrust_curve,
            isp,
            nozzle_exit_diameter,
            reference_pressure: REFERENCE_PRESSURE,
            alignment: ThrustAlignment::default(),
        };
        engine.validate()?;
        Ok(engine)
    }

    pub fn with_alignment(mut self, alignment: ThrustAlignment) -> Result<Self, VehicleErrors> {
        alignment.validate()?;
        self.alignment = alignment;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), VehicleErrors> {
        positive("isp", self.isp)?;
        non_negative("nozzle_exit_diameter", self.nozzle_exit_diameter)?;
        non_negative("reference_pressure", self.reference_pressure)?;
        self.alignment.validate()
    }

    pub fn nozzle_exit_area(&self) -> f64 {
        std::f64::consts::PI * self.nozzle_exit_diameter * self.nozzle_exit_diameter / 4.0
    }

    /// Sea level thrust, zero outside the curve.
    pub fn sea_level_thrust(&self, burn_time: f64) -> f64 {
        if !self.thrust_curve.contains(burn_time) {
            return 0.0;
        }
        self.thrust_curve.eval(burn_time).max(0.0)
    }
}

impl PropulsionModel for Engine {
    /// `T = T_sl + (P_ref - P_a) * A_e` while the sea level curve is positive.
    fn thrust(&self, burn_time: f64, ambient_pressure: f64) -> f64 {
        let sea_level = self.sea_level_thrust(burn_time);
        if sea_level <= 0.0 {
            return 0.0;
        }
        let pressure_thrust = (self.reference_pressure - ambient_pressure) * self.nozzle_exit_area();
        (sea_level + pressure_thrust).max(0.0)
    }

    /// `mdot = T_sl / (Isp * g0)`
    fn mass_flow_rate(&self, burn_time: f64) -> f64 {
        self.sea_level_thrust(burn_time) / (self.isp * STANDARD_GRAVITY)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub enum Propulsion {
    #[default]
    Unpowered,
    Engine(Engine),
}

impl Propulsion {
    pub fn validate(&self) -> Result<(), VehicleErrors> {
        match self {
            Propulsion::Unpowered => Ok(()),
            Propulsion::Engine(e) => e.validate(),
        }
    }

    pub fn alignment(&self) -> ThrustAlignment {
        match self {
            Propulsion::Unpowered => ThrustAlignment::default(),
            Propulsion::Engine(e) => e.alignment,
        }
    }

    pub fn nozzle_exit_radius(&self) -> f64 {
        match self {
            Propulsion::Unpowered => 0.0,
            Propulsion::Engine(e) => e.nozzle_exit_diameter / 2.0,
        }
    }
}

impl PropulsionModel for Propulsion {
    fn thrust(&self, burn_time: f64, ambient_pressure: f64) -> f64 {
        match self {
            Propulsion::Unpowered => 0.0,
            Propulsion::Engine(e) => e.thrust(burn_time, ambient_pressure),
        }
    }

    fn mass_flow_rate(&self, burn_time: f64) -> f64 {
        match self {
            Propulsion::Unpowered => 0.0,
            Propulsion::Engine(e) => e.mass_flow_rate(burn_time),
        }
    }
}
