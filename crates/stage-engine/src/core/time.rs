/// Fixed timestep accumulator.
/// Decouples the host's variable frame time from the fixed update rate the
/// scene stack is driven at.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per step.
    dt: f32,
    /// Most steps a single frame may produce.
    max_steps: u32,
    /// Frame time not yet consumed by a step.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    ///
    /// Time beyond `max_steps` worth of steps is dropped so a long stall
    /// does not turn into a burst of catch-up updates.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let steps = (self.accumulator / self.dt) as u32;
        if steps > self.max_steps {
            log::debug!("frame time {frame_dt:.4}s exceeds step cap, dropping backlog");
            self.accumulator = 0.0;
            return self.max_steps;
        }
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between steps (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Drop any pending partial step.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
