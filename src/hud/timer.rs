use instant::Instant;

/// Which phase of a frame is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    Simulation = 0,
    BuildScene = 1,
    GpuUpload = 2,
    RenderSubmit = 3,
}

pub const PHASE_COUNT: usize = 4;

impl Phase {
    pub const ALL: [Phase; PHASE_COUNT] = [
        Self::Simulation,
        Self::BuildScene,
        Self::GpuUpload,
        Self::RenderSubmit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Simulation => "Simulation",
            Self::BuildScene => "Build Scene",
            Self::GpuUpload => "GPU Upload",
            Self::RenderSubmit => "Render",
        }
    }
}

/// Per-phase timing with exponential moving average smoothing.
pub struct PhaseTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; PHASE_COUNT],
    /// Timestamp when `begin()` was called.
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl Default for PhaseTimers {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; PHASE_COUNT],
            start: Instant::now(),
        }
    }

    /// Call before a phase runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a phase finishes. Records elapsed time for `phase`.
    pub fn end(&mut self, phase: Phase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        self.record(phase, elapsed_us);
    }

    pub fn record(&mut self, phase: Phase, elapsed_us: f64) {
        let idx = phase as usize;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }

    /// Sum of all phase durations (microseconds).
    pub fn total_us(&self) -> f64 {
        self.durations_us.iter().sum()
    }
}
