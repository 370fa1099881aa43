/// Simulation time as last seen by the derivative function.
///
/// The clock is set, never accumulated, so integrator stages that step
/// back and forth in time leave it consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clock {
    time: f64,
}

impl Clock {
    pub fn sync(&mut self, t: f64) {
        self.time = t;
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}

/// Time since engine ignition, negative before ignition.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BurnClock {
    ignition_time: f64,
    burn_time: f64,
}

impl BurnClock {
    pub fn new(ignition_time: f64) -> Self {
        Self {
            ignition_time,
            burn_time: -ignition_time,
        }
    }

    pub fn sync(&mut self, t: f64) {
        self.burn_time = t - self.ignition_time;
    }

    pub fn ignition_time(&self) -> f64 {
        self.ignition_time
    }

    pub fn burn_time(&self) -> f64 {
        self.burn_time
    }
}
