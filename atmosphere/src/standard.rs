use crate::{AirProperties, AtmosphereErrors, AtmosphereModel};

/// Effective earth radius for geopotential altitude (m)
const GEOPOTENTIAL_RADIUS: f64 = 6356766.0;
/// g0 * M / R* (K/m)
const HYDROSTATIC_CONSTANT: f64 = 0.0341631947;
const SEA_LEVEL_TEMPERATURE: f64 = 288.15;
const SEA_LEVEL_PRESSURE: f64 = 101325.0;

/// Layer base geopotential altitudes (m) and temperature lapse rates (K/m).
const LAYER_BASES: [f64; 8] = [
    0.0, 11000.0, 20000.0, 32000.0, 47000.0, 51000.0, 71000.0, 84852.0,
];
const LAPSE_RATES: [f64; 8] = [-6.5e-3, 0.0, 1.0e-3, 2.8e-3, 0.0, -2.8e-3, -2.0e-3, 0.0];

/// U.S. Standard Atmosphere 1976.
///
/// Layers are defined up to 84.852 km geopotential, above which the top
/// layer continues isothermally. Below sea level the first layer is
/// extrapolated.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAtmosphere;

impl StandardAtmosphere {
    /// Geopotential altitude for a geometric altitude.
    pub fn geopotential_altitude(altitude: f64) -> f64 {
        GEOPOTENTIAL_RADIUS * altitude / (GEOPOTENTIAL_RADIUS + altitude)
    }

    fn temperature_pressure(altitude: f64) -> (f64, f64) {
        let h = Self::geopotential_altitude(altitude);

        let mut base_temperature = SEA_LEVEL_TEMPERATURE;
        let mut base_pressure = SEA_LEVEL_PRESSURE;
        let mut state = (base_temperature, base_pressure);

        for i in 0..LAYER_BASES.len() {
            let top = LAYER_BASES.get(i + 1).copied().unwrap_or(f64::INFINITY);
            let dh = h.min(top) - LAYER_BASES[i];
            let lapse = LAPSE_RATES[i];

            state = if lapse == 0.0 {
                (
                    base_temperature,
                    base_pressure * (-HYDROSTATIC_CONSTANT * dh / base_temperature).exp(),
                )
            } else {
                let temperature = base_temperature + lapse * dh;
                (
                    temperature,
                    base_pressure
                        * (base_temperature / temperature).powf(HYDROSTATIC_CONSTANT / lapse),
                )
            };

            if h <= top {
                break;
            }
            (base_temperature, base_pressure) = state;
        }
        state
    }
}

impl AtmosphereModel for StandardAtmosphere {
    fn properties(&self, altitude: f64) -> Result<AirProperties, AtmosphereErrors> {
        let (temperature, pressure) = Self::temperature_pressure(altitude);
        Ok(AirProperties::from_pressure_temperature(pressure, temperature))
    }
}
