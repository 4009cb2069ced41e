use std::time::Instant;

/// Timing measurements for a single pipeline run, in microseconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StageTiming {
    pub decode_us: f64,
    pub preprocess_us: f64,
    pub ocr_us: f64,
    pub parse_us: f64,
    pub total_us: f64,
}

impl StageTiming {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> f64 {
        self.total_us / 1000.0
    }

    /// Name of the slowest stage
    pub fn bottleneck(&self) -> &'static str {
        let stages = [
            ("Decode", self.decode_us),
            ("Preprocess", self.preprocess_us),
            ("OCR", self.ocr_us),
            ("Parse", self.parse_us),
        ];

        stages
            .iter()
            .fold(("Decode", f64::MIN), |best, &stage| {
                if stage.1 > best.1 {
                    stage
                } else {
                    best
                }
            })
            .0
    }

    /// Log the timing breakdown at debug level
    pub fn log(&self) {
        tracing::debug!(
            "Timing: decode {:.0} µs | preprocess {:.0} µs | ocr {:.0} µs | parse {:.0} µs | total {:.2} ms (bottleneck: {})",
            self.decode_us,
            self.preprocess_us,
            self.ocr_us,
            self.parse_us,
            self.total_ms(),
            self.bottleneck()
        );
    }
}

/// Stopwatch measuring elapsed microseconds since the last lap
pub struct Timer {
    start: Instant,
    lap: Instant,
}

impl Timer {
    pub fn start() -> Self {
        let now = Instant::now();
        Self { start: now, lap: now }
    }

    /// Microseconds since the previous lap (or start), then reset the lap
    pub fn lap_us(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.lap).as_secs_f64() * 1_000_000.0;
        self.lap = now;
        elapsed
    }

    /// Microseconds since the timer was started
    pub fn total_us(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1_000_000.0
    }
}
