//! Six degree of freedom rocket flight dynamics.
//!
//! The entry point is [`dynamics::Dynamics6dofAero::derivative`], which maps a
//! 14 element flight state and a time to the state derivative consumed by an
//! ODE integrator. The state layout is
//!
//! `[position_eci(3), velocity_eci(3), quaternion(4), angular_velocity_body(3), propellant_mass]`
//!
//! with the quaternion scalar first and describing the NED to body attitude.

pub mod air_data;
pub mod clock;
pub mod config;
pub mod dynamics;
pub mod environment;
pub mod eom;
pub mod forces;
pub mod moments;
pub mod rocket;
pub mod sample;
pub mod state;

use atmosphere::AtmosphereErrors;
use coordinate_systems::CoordinateSystemErrors;
use gravity::GravityErrors;
use rotations::prelude::QuaternionErrors;
use thiserror::Error;
use vehicle::VehicleErrors;

pub mod prelude {
    pub use crate::FlightErrors;
    pub use crate::clock::{BurnClock, Clock};
    pub use crate::config::{ConfigErrors, LaunchConfig, SimulationConfig};
    pub use crate::dynamics::Dynamics6dofAero;
    pub use crate::environment::{Environment, EnvironmentModel, EnvironmentSample};
    pub use crate::rocket::Rocket;
    pub use crate::sample::FlightSample;
    pub use crate::state::{FlightState, STATE_SIZE};
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FlightErrors {
    #[error("state has {0} elements, expected 14")]
    StateLength(usize),
    #[error("derivative buffer has {0} elements, expected 14")]
    DerivativeLength(usize),
    #[error("state element {0} is not finite")]
    NonFiniteState(&'static str),
    #[error("time must be finite, got {0}")]
    NonFiniteTime(f64),
    #[error("attitude quaternion: {0}")]
    Quaternion(#[from] QuaternionErrors),
    #[error("inertia tensor is singular or near singular")]
    SingularInertia,
    #[error("model returned a non-finite {0}")]
    NonFiniteModelOutput(&'static str),
    #[error("{0}")]
    AtmosphereErrors(#[from] AtmosphereErrors),
    #[error("{0}")]
    CoordinateSystemErrors(#[from] CoordinateSystemErrors),
    #[error("{0}")]
    GravityErrors(#[from] GravityErrors),
    #[error("{0}")]
    VehicleErrors(#[from] VehicleErrors),
}
