/// Process-wide simulation clock: pause flag plus a bounded speed multiplier.
/// Pausing is a flag check in the tick, never a thread suspend.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    paused: bool,
    speed: f32,
    min_speed: f32,
    max_speed: f32,
    /// Sanity ceiling applied to every frame delta.
    max_frame_dt: f32,
}

impl SimulationClock {
    /// Bounds must already be validated (finite, 0 < min <= max).
    pub fn new(min_speed: f32, max_speed: f32, max_frame_dt: f32) -> Self {
        Self {
            paused: false,
            speed: 1.0_f32.clamp(min_speed, max_speed),
            min_speed,
            max_speed,
            max_frame_dt,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn speed_bounds(&self) -> (f32, f32) {
        (self.min_speed, self.max_speed)
    }

    /// Clamp and store a new speed multiplier. Returns the stored value.
    /// Non-finite input is ignored and the current value returned.
    pub fn set_speed(&mut self, speed: f32) -> f32 {
        if !speed.is_finite() {
            log::warn!("ignoring non-finite speed multiplier {speed}");
            return self.speed;
        }
        let clamped = speed.clamp(self.min_speed, self.max_speed);
        if clamped != speed {
            log::warn!("speed multiplier {speed} clamped to {clamped}");
        }
        self.speed = clamped;
        clamped
    }

    /// Sanitize a raw frame delta: negative or non-finite becomes 0,
    /// anything above the ceiling (dropped frame, resumed tab) is capped.
    pub fn clamp_delta(&self, frame_dt: f32) -> f32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0.0;
        }
        if frame_dt > self.max_frame_dt {
            log::debug!("frame delta {frame_dt}s clamped to {}s", self.max_frame_dt);
            return self.max_frame_dt;
        }
        frame_dt
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(0.1, 10.0, 0.1)
    }
}
