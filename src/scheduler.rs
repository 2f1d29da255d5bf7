/// Simulation tick length in seconds.
pub const TICK_RATE: f64 = 1.0 / 60.0;
/// Max accumulated time before we clamp (prevents spiral of death).
pub const MAX_ACCUMULATOR: f64 = 0.25;
/// Round clock advance per tick, in milliseconds.
pub const TICK_MS: f64 = TICK_RATE * 1000.0;

/// Fixed-timestep accumulator fed with wall-clock frame deltas.
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f64,
    step: f64,
    max_accumulator: f64,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(TICK_RATE, MAX_ACCUMULATOR)
    }
}

impl FixedStep {
    pub fn new(step: f64, max_accumulator: f64) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_accumulator,
        }
    }

    /// Add a frame delta (seconds) and return how many whole ticks are now due.
    pub fn advance(&mut self, dt: f64) -> u32 {
        self.accumulator = (self.accumulator + dt.max(0.0)).min(self.max_accumulator);

        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
