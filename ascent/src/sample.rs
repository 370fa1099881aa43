use coordinate_systems::prelude::*;
use mass_properties::MassProperties;
use nalgebra::Vector3;
use rotations::prelude::*;
use vehicle::prelude::{AeroCoefficients, VehicleModel};

use crate::{
    FlightErrors,
    air_data::AirData,
    environment::{EnvironmentModel, EnvironmentSample},
    eom,
    forces::{self, Forces},
    moments::{self, Moments},
    state::{FlightState, STATE_SIZE},
};

/// Every quantity derived while evaluating one flight state.
///
/// Built fresh for each derivative call, so nothing here leaks between
/// integrator stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSample {
    pub time: f64,
    pub burn_time: f64,

    pub position_eci: Vector3<f64>,
    pub position_ecef: Vector3<f64>,
    pub geodetic: Geodetic,
    pub velocity_eci: Vector3<f64>,
    pub velocity_ecef: Vector3<f64>,
    pub velocity_ned: Vector3<f64>,

    /// normalized NED to body attitude
    pub attitude: UnitQuaternion,
    pub euler_angles: EulerAngles,
    pub angular_velocity: Vector3<f64>,

    pub environment: EnvironmentSample,
    pub air_data: AirData,

    /// propellant on board, never negative
    pub propellant_mass: f64,
    pub burned_out: bool,
    pub mass_properties: MassProperties,
    /// center of mass aft of the nose (m)
    pub length_cg: f64,
    pub coefficients: AeroCoefficients,
    /// N
    pub thrust: f64,
    /// kg/s
    pub mass_flow_rate: f64,

    pub forces: Forces,
    pub moments: Moments,

    /// body (m/s^2)
    pub acceleration_body: Vector3<f64>,
    /// ECI (m/s^2)
    pub acceleration_eci: Vector3<f64>,
    /// body (rad/s^2)
    pub angular_acceleration: Vector3<f64>,
    pub quaternion_rate: Quaternion,
}

impl FlightSample {
    /// Evaluates the flight dynamics for one state.
    ///
    /// # Arguments
    ///
    /// * `vehicle` - Mass, aerodynamic and propulsion models.
    /// * `environment` - Atmosphere, wind and gravity models.
    /// * `state` - Finite flight state.
    /// * `t` - Simulation time (s).
    /// * `burn_time` - Time since ignition (s).
    pub fn evaluate<V, E>(
        vehicle: &V,
        environment: &E,
        state: &FlightState,
        t: f64,
        burn_time: f64,
    ) -> Result<Self, FlightErrors>
    where
        V: VehicleModel + ?Sized,
        E: EnvironmentModel + ?Sized,
    {
        // kinematics
        let attitude = UnitQuaternion::try_from(&state.attitude)?;
        let eci_to_ecef = eci_to_ecef(t);
        let position_ecef = eci_to_ecef.transform(&state.position);
        let geodetic = Geodetic::from_ecef(&position_ecef);
        let frames = FrameSet::with_eci_to_ecef(eci_to_ecef, &geodetic, &attitude);
        let velocity_ecef = velocity_eci_to_ecef(&frames.eci_to_ecef, &state.position, &state.velocity);
        let velocity_ned = frames.ecef_to_ned.transform(&velocity_ecef);
        let euler_angles = EulerAngles::from(&frames.ned_to_body);
        let omega = state.angular_velocity;

        let env = environment.sample(geodetic.altitude)?;
        let air_data = AirData::new(&velocity_ned, &env.wind, &frames.ned_to_body, &env.air);

        // vehicle
        let burned_out = state.propellant_mass <= 0.0;
        let propellant_mass = state.propellant_mass.max(0.0);
        let mass_properties = vehicle.mass_properties(propellant_mass)?;
        let mass = mass_properties.mass;
        let length_cg = -mass_properties.center_of_mass.x;
        let geometry = vehicle.geometry();
        let reference_area = geometry.reference_area();

        let coefficients = vehicle.aero_coefficients(air_data.mach);
        let c = &coefficients;
        if ![c.ca, c.cna, c.cld, c.clp, c.cmq, c.cnr, c.length_cp]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(FlightErrors::NonFiniteModelOutput("aerodynamic coefficient"));
        }

        let (thrust, mass_flow_rate) = if burned_out {
            (0.0, 0.0)
        } else {
            (
                vehicle.thrust(burn_time, env.air.pressure),
                vehicle.mass_flow_rate(burn_time),
            )
        };
        if !thrust.is_finite() {
            return Err(FlightErrors::NonFiniteModelOutput("thrust"));
        }
        if !(mass_flow_rate.is_finite() && mass_flow_rate >= 0.0) {
            return Err(FlightErrors::NonFiniteModelOutput("mass flow rate"));
        }
        let alignment = vehicle.thrust_alignment();

        // forces
        let forces = Forces {
            thrust: forces::thrust_force(thrust, &alignment),
            aero: forces::aero_force(&air_data, reference_area, &coefficients),
            gravity: forces::gravity_force(mass, env.gravity, &frames.ned_to_body),
        };

        // moments
        let inertia = mass_properties.inertia.matrix();
        let moments = Moments {
            gyro: moments::gyro_moment(&inertia, &omega),
            thrust: moments::thrust_moment(&forces.thrust, &alignment, length_cg, geometry.length),
            aero_force: moments::aero_force_moment(
                &forces.aero,
                &air_data,
                reference_area,
                geometry.diameter,
                &coefficients,
                length_cg,
            ),
            aero_damping: moments::aero_damping_moment(
                &air_data,
                reference_area,
                geometry.diameter,
                geometry.length,
                &coefficients,
                &omega,
            ),
            jet_damping: moments::jet_damping_moment(
                mass_flow_rate,
                vehicle.nozzle_exit_radius(),
                geometry.length,
                length_cg,
                &omega,
            ),
        };

        // equations of motion
        let acceleration_body = eom::body_acceleration(&forces.total(), mass);
        let acceleration_eci = eom::inertial_acceleration(&frames, &acceleration_body);
        let angular_acceleration = eom::angular_acceleration(&inertia, &moments.total())?;
        let quaternion_rate = eom::quaternion_rate(&attitude, &omega);

        Ok(Self {
            time: t,
            burn_time,
            position_eci: state.position,
            position_ecef,
            geodetic,
            velocity_eci: state.velocity,
            velocity_ecef,
            velocity_ned,
            attitude,
            euler_angles,
            angular_velocity: omega,
            environment: env,
            air_data,
            propellant_mass,
            burned_out,
            mass_properties,
            length_cg,
            coefficients,
            thrust,
            mass_flow_rate,
            forces,
            moments,
            acceleration_body,
            acceleration_eci,
            angular_acceleration,
            quaternion_rate,
        })
    }

    /// State derivative in the layout of the flight state.
    pub fn derivative(&self) -> [f64; STATE_SIZE] {
        let q = self.quaternion_rate.to_scalar_first();
        let mass_rate = if self.burned_out {
            0.0
        } else {
            -self.mass_flow_rate
        };
        [
            self.velocity_eci[0],
            self.velocity_eci[1],
            self.velocity_eci[2],
            self.acceleration_eci[0],
            self.acceleration_eci[1],
            self.acceleration_eci[2],
            q[0],
            q[1],
            q[2],
            q[3],
            self.angular_acceleration[0],
            self.angular_acceleration[1],
            self.angular_acceleration[2],
            mass_rate,
        ]
    }
}
