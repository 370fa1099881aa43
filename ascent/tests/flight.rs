use approx::{assert_abs_diff_eq, assert_relative_eq};
use ascent::prelude::*;
use ascent_diffeq::{OdeProblem, state_array::StateArray};
use coordinate_systems::prelude::*;
use gravity::{Gravity, STANDARD_GRAVITY, constant::ConstantGravity};
use mass_properties::Inertia;
use nalgebra::Vector3;
use rayon::prelude::*;
use rotations::prelude::*;
use vehicle::prelude::*;

const TOL: f64 = 1e-9;

const FLIGHT: &str = r#"(
    vehicle: (
        name: "sounder",
        geometry: (length: 2.0, diameter: 0.1),
        structure: (
            dry: (mass: 8.0, length_cg: 1.1, inertia: (ixx: 0.01, iyy: 2.5, izz: 2.5)),
            propellant: Some((mass: 1.5, length_cg: 1.5, inertia: (ixx: 0.002, iyy: 0.1, izz: 0.1))),
        ),
        aerodynamics: Constant((ca: 0.5, cna: 9.0, clp: -0.05, cmq: -3.0, cnr: -3.0, length_cp: 1.4)),
        propulsion: Engine((
            thrust_curve: (x: [0.0, 0.05, 2.0, 2.1], y: [0.0, 600.0, 600.0, 0.0]),
            isp: 180.0,
            nozzle_exit_diameter: 0.03,
        )),
    ),
    environment: (wind: PowerLaw((reference_speed: 4.0, reference_altitude: 10.0, exponent: 7.0, direction_from: 0.5))),
    launch: (latitude: 40.138633, longitude: 139.98485, altitude: 0.0, azimuth: 270.0, elevation: 85.0),
)"#;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sounder() -> (Dynamics6dofAero, FlightState) {
    init_logger();
    SimulationConfig::from_ron_str(FLIGHT)
        .unwrap()
        .build()
        .unwrap()
}

/// Unpowered vehicle with every aerodynamic coefficient zero.
fn ballistic(gravity: Gravity) -> Dynamics6dofAero {
    let vehicle = VehicleBuilder::new(
        "ballast",
        Geometry::new(2.0, 0.1).unwrap(),
        Component {
            mass: 10.0,
            length_cg: 1.0,
            inertia: Inertia::new(0.02, 3.0, 3.0, 0.0, 0.0, 0.0).unwrap(),
        },
        Aerodynamics::Constant(AeroCoefficients::default()),
    )
    .unwrap()
    .build()
    .unwrap();

    let environment = Environment {
        gravity,
        ..Default::default()
    };
    Dynamics6dofAero::new(Rocket::new(vehicle, 0.0), environment)
}

fn derivative(dynamics: &mut Dynamics6dofAero, x: &[f64], t: f64) -> [f64; STATE_SIZE] {
    let mut dx = [0.0; STATE_SIZE];
    dynamics.derivative(x, &mut dx, t).unwrap();
    dx
}

#[test]
fn test_launch_derivative_is_finite() {
    let (mut dynamics, state) = sounder();
    for t in [0.0, 0.02, 1.0, 2.05, 3.0] {
        let dx = derivative(&mut dynamics, &state.to_array(), t);
        assert!(dx.iter().all(|v| v.is_finite()), "t = {t}: {dx:?}");
    }
}

#[test]
fn test_clocks_follow_time() {
    let (mut dynamics, state) = sounder();
    derivative(&mut dynamics, &state.to_array(), 1.25);
    derivative(&mut dynamics, &state.to_array(), 0.5);
    assert_eq!(dynamics.clock.time(), 0.5);
    assert_eq!(dynamics.rocket.burn_clock.burn_time(), 0.5);
}

#[test]
fn test_zero_airspeed_flow_angles() {
    let mut dynamics = ballistic(Gravity::default());
    let site = Geodetic::from_degrees(0.0, 0.0, 0.0).unwrap();
    let state = FlightState::at_launch(&site, &EulerAngles::default(), 0.0, 0.0);
    // at t = 0 on the equator prime meridian every term is exact
    derivative(&mut dynamics, &state.to_array(), 0.0);

    let air_data = dynamics.rocket.last_sample().unwrap().air_data;
    assert_eq!(air_data.angle_of_attack, 0.0);
    assert_eq!(air_data.sideslip, 0.0);
}

#[test]
fn test_quaternion_rate_orthogonal_to_attitude() {
    let (mut dynamics, state) = sounder();
    let mut x = state.to_array();
    x[10] = 0.3;
    x[11] = -1.2;
    x[12] = 0.7;
    // scale the quaternion away from unit length
    for q in &mut x[6..10] {
        *q *= 1.7;
    }
    let dx = derivative(&mut dynamics, &x, 0.5);

    let q = Quaternion::from_scalar_first(&nalgebra::Vector4::new(x[6], x[7], x[8], x[9]))
        .normalize()
        .unwrap();
    let q_dot = Quaternion::from_scalar_first(&nalgebra::Vector4::new(dx[6], dx[7], dx[8], dx[9]));
    assert_abs_diff_eq!(q.dot(&q_dot), 0.0, epsilon = 1e-12);
}

#[test]
fn test_free_fall_independent_of_attitude() {
    let g = 9.8;
    let mut dynamics = ballistic(Gravity::Constant(ConstantGravity { g }));
    let site = Geodetic::from_degrees(35.0, 139.0, 10_000.0).unwrap();
    let t = 42.0;

    // local down carried to ECI
    let frames = FrameSet::new(t, &site, &UnitQuaternion::IDENTITY);
    let expected = frames.ned_to_eci().transform(&Vector3::new(0.0, 0.0, g));

    let attitudes = [
        EulerAngles::new(0.0, 0.0, 0.0),
        EulerAngles::new(0.3, 1.2, -2.0),
        EulerAngles::new(-1.0, -0.4, 3.0),
        EulerAngles::new(0.0, std::f64::consts::FRAC_PI_2, 0.7),
    ];
    for attitude in attitudes {
        let state = FlightState::at_launch(&site, &attitude, 0.0, t);
        let dx = derivative(&mut dynamics, &state.to_array(), t);
        let a = Vector3::new(dx[3], dx[4], dx[5]);
        assert_abs_diff_eq!(a, expected, epsilon = TOL);
        assert_abs_diff_eq!(Vector3::new(dx[10], dx[11], dx[12]), Vector3::zeros(), epsilon = TOL);
    }
}

#[test]
fn test_orbital_state() {
    let mut dynamics = ballistic(Gravity::default());
    let x = [
        6378137.0, 0.0, 0.0, 0.0, 0.0, 7800.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.0,
    ];
    let dx = derivative(&mut dynamics, &x, 0.0);

    assert_eq!(&dx[0..3], &[0.0, 0.0, 7800.0]);
    let a = Vector3::new(dx[3], dx[4], dx[5]);
    assert_relative_eq!(a.norm(), STANDARD_GRAVITY, max_relative = 0.01);
    assert!(dx[3] < 0.0);
    assert_abs_diff_eq!(dx[4], 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(dx[5], 0.0, epsilon = 1e-6);
    assert_eq!(dx[13], 0.0);
}

#[test]
fn test_mass_rate_and_burnout() {
    let (mut dynamics, state) = sounder();
    let mut x = state.to_array();

    let dx = derivative(&mut dynamics, &x, 1.0);
    assert_relative_eq!(dx[13], -600.0 / (180.0 * STANDARD_GRAVITY), max_relative = 1e-12);
    assert!(!dynamics.rocket.is_burned_out());

    x[13] = 0.0;
    let dx = derivative(&mut dynamics, &x, 1.0);
    assert_eq!(dx[13], 0.0);
    assert!(dynamics.rocket.is_burned_out());
    assert_eq!(dynamics.rocket.last_sample().unwrap().thrust, 0.0);

    // overshoot past empty is clamped and stays put
    x[13] = -0.01;
    let first = derivative(&mut dynamics, &x, 1.0);
    let second = derivative(&mut dynamics, &x, 1.0);
    assert_eq!(first[13], 0.0);
    assert_eq!(first, second);
    let sample = dynamics.rocket.last_sample().unwrap();
    assert_eq!(sample.propellant_mass, 0.0);
    assert_abs_diff_eq!(sample.mass_properties.mass, 8.0, epsilon = 1e-12);
}

#[test]
fn test_no_thrust_before_ignition() {
    let (mut dynamics, state) = sounder();
    dynamics.rocket.burn_clock = BurnClock::new(5.0);
    let dx = derivative(&mut dynamics, &state.to_array(), 1.0);
    assert_eq!(dx[13], 0.0);
    assert_eq!(dynamics.rocket.last_sample().unwrap().thrust, 0.0);
}

#[test]
fn test_invalid_inputs() {
    let (mut dynamics, state) = sounder();
    let mut x = state.to_array();
    let mut dx = [7.0; STATE_SIZE];

    assert_eq!(
        dynamics.derivative(&x[..12], &mut dx, 0.0),
        Err(FlightErrors::StateLength(12))
    );
    assert_eq!(
        dynamics.derivative(&x, &mut dx[..3], 0.0),
        Err(FlightErrors::DerivativeLength(3))
    );
    assert_eq!(
        dynamics.derivative(&x, &mut dx, f64::NAN).err().map(|e| e.to_string()),
        Some(FlightErrors::NonFiniteTime(f64::NAN).to_string())
    );

    x[4] = f64::INFINITY;
    assert_eq!(
        dynamics.derivative(&x, &mut dx, 0.0),
        Err(FlightErrors::NonFiniteState("velocity_eci[1]"))
    );

    x[4] = 0.0;
    for q in &mut x[6..10] {
        *q = 0.0;
    }
    assert_eq!(
        dynamics.derivative(&x, &mut dx, 0.0),
        Err(FlightErrors::Quaternion(QuaternionErrors::ZeroMagnitude))
    );

    // failed calls never touch the output
    assert_eq!(dx, [7.0; STATE_SIZE]);
}

#[test]
fn test_refuelled_state_is_not_burned_out() {
    let (mut dynamics, state) = sounder();
    let mut x = state.to_array();

    // an integrator stage that overshoots past empty
    x[13] = -1e-4;
    derivative(&mut dynamics, &x, 1.0);
    assert!(dynamics.rocket.is_burned_out());

    // the accepted state still has propellant
    x[13] = 0.5;
    let dx = derivative(&mut dynamics, &x, 1.0);
    assert!(dx[13] < 0.0);
    assert!(!dynamics.rocket.is_burned_out());
    assert!(!dynamics.rocket.last_sample().unwrap().burned_out);
}

#[derive(Debug, Clone, Copy)]
enum Fault {
    Coefficient,
    Thrust,
    MassFlow(f64),
}

/// The sounder with one model output corrupted.
#[derive(Debug)]
struct FaultyVehicle {
    inner: Vehicle,
    fault: Fault,
}

impl VehicleModel for FaultyVehicle {
    fn geometry(&self) -> &Geometry {
        self.inner.geometry()
    }

    fn mass_properties(
        &self,
        propellant_mass: f64,
    ) -> Result<mass_properties::MassProperties, VehicleErrors> {
        self.inner.mass_properties(propellant_mass)
    }

    fn aero_coefficients(&self, mach: f64) -> AeroCoefficients {
        let mut coefficients = self.inner.aero_coefficients(mach);
        if let Fault::Coefficient = self.fault {
            coefficients.cmq = f64::NAN;
        }
        coefficients
    }

    fn thrust(&self, burn_time: f64, ambient_pressure: f64) -> f64 {
        match self.fault {
            Fault::Thrust => f64::INFINITY,
            _ => self.inner.thrust(burn_time, ambient_pressure),
        }
    }

    fn mass_flow_rate(&self, burn_time: f64) -> f64 {
        match self.fault {
            Fault::MassFlow(rate) => rate,
            _ => self.inner.mass_flow_rate(burn_time),
        }
    }

    fn thrust_alignment(&self) -> ThrustAlignment {
        self.inner.thrust_alignment()
    }

    fn nozzle_exit_radius(&self) -> f64 {
        self.inner.nozzle_exit_radius()
    }
}

#[test]
fn test_rejects_bad_vehicle_output() {
    init_logger();
    let config = SimulationConfig::from_ron_str(FLIGHT).unwrap();
    let (_, state) = config.build().unwrap();
    let x = state.to_array();

    let cases = [
        (Fault::Coefficient, "aerodynamic coefficient"),
        (Fault::Thrust, "thrust"),
        (Fault::MassFlow(f64::NAN), "mass flow rate"),
        (Fault::MassFlow(-0.3), "mass flow rate"),
    ];
    for (fault, field) in cases {
        let vehicle = FaultyVehicle {
            inner: config.vehicle.build().unwrap(),
            fault,
        };
        let mut dynamics =
            Dynamics6dofAero::new(Rocket::new(vehicle, 0.0), config.environment.clone());
        let mut dx = [7.0; STATE_SIZE];

        assert_eq!(
            dynamics.derivative(&x, &mut dx, 1.0),
            Err(FlightErrors::NonFiniteModelOutput(field)),
            "{fault:?}"
        );
        assert_eq!(dx, [7.0; STATE_SIZE]);
        assert!(dynamics.rocket.last_sample().is_none());
    }
}

#[test]
fn test_powered_ascent() {
    let (dynamics, state) = sounder();
    let x0 = StateArray::from(state.to_array());
    let mut problem = OdeProblem::new(dynamics);
    let result = problem.solve_fixed(&x0, (0.0, 1.0), 0.01).unwrap();

    let x1 = result.y.last().unwrap();
    let final_state = FlightState::from_slice(&x1[..]).unwrap();

    // 585 N s of impulse in the first second
    let used = 585.0 / (180.0 * STANDARD_GRAVITY);
    assert_abs_diff_eq!(final_state.propellant_mass, 1.5 - used, epsilon = 1e-3);
    assert_abs_diff_eq!(final_state.attitude.mag(), 1.0, epsilon = 1e-6);

    let c = eci_to_ecef(1.0);
    let llh = Geodetic::from_ecef(&c.transform(&final_state.position));
    assert!(llh.altitude > 10.0, "altitude {}", llh.altitude);
    assert!(llh.altitude < 100.0, "altitude {}", llh.altitude);
}

#[test]
fn test_burnout_during_flight() {
    init_logger();
    let mut config = SimulationConfig::from_ron_str(FLIGHT).unwrap();
    config.launch.propellant_mass = Some(0.2);
    let (dynamics, state) = config.build().unwrap();

    let x0 = StateArray::from(state.to_array());
    let mut problem = OdeProblem::new(dynamics);
    let result = problem.solve_fixed(&x0, (0.0, 1.5), 0.01).unwrap();

    let x1 = result.y.last().unwrap();
    assert!(x1[13] <= 0.0);
    assert!(x1[13] > -0.01);

    let mut dynamics = problem.into_model();
    let dx = derivative(&mut dynamics, &x1[..], 1.5);
    assert_eq!(dx[13], 0.0);
    assert!(dynamics.rocket.is_burned_out());
}

#[test]
fn test_parallel_launch_angles() {
    init_logger();
    let elevations = [70.0, 75.0, 80.0, 85.0, 89.0];

    let altitudes: Vec<f64> = elevations
        .par_iter()
        .map(|&elevation| {
            let mut config = SimulationConfig::from_ron_str(FLIGHT).unwrap();
            config.launch.elevation = elevation;
            let (model, state) = config.build().unwrap();

            let mut problem = OdeProblem::new(model);
            let result = problem
                .solve_fixed(&StateArray::from(state.to_array()), (0.0, 0.5), 0.01)
                .unwrap();
            let x = result.y.last().unwrap();
            let position = Vector3::new(x[0], x[1], x[2]);
            Geodetic::from_ecef(&eci_to_ecef(0.5).transform(&position)).altitude
        })
        .collect();

    assert!(altitudes.iter().all(|h| h.is_finite() && *h > 0.0));
    assert!(altitudes[4] > altitudes[0]);
}
