use log::debug;
use vehicle::prelude::{Vehicle, VehicleModel};

use crate::{clock::BurnClock, sample::FlightSample};

/// A vehicle together with its burn clock and the quantities derived at the
/// most recent derivative evaluation.
#[derive(Debug, Clone)]
pub struct Rocket<V: VehicleModel = Vehicle> {
    vehicle: V,
    pub burn_clock: BurnClock,
    sample: Option<FlightSample>,
    burnout_reported: bool,
}

impl<V: VehicleModel> Rocket<V> {
    pub fn new(vehicle: V, ignition_time: f64) -> Self {
        Self {
            vehicle,
            burn_clock: BurnClock::new(ignition_time),
            sample: None,
            burnout_reported: false,
        }
    }

    pub fn vehicle(&self) -> &V {
        &self.vehicle
    }

    /// Quantities from the last successful evaluation.
    pub fn last_sample(&self) -> Option<&FlightSample> {
        self.sample.as_ref()
    }

    /// Whether the last evaluated state had no propellant left.
    pub fn is_burned_out(&self) -> bool {
        self.sample.is_some_and(|s| s.burned_out)
    }

    pub(crate) fn record(&mut self, sample: FlightSample) {
        if sample.burned_out && !self.burnout_reported {
            debug!(
                "propellant exhausted at t = {:.3} s, burn time {:.3} s",
                sample.time, sample.burn_time
            );
            self.burnout_reported = true;
        }
        self.sample = Some(sample);
    }
}
