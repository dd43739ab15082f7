use stage_engine::{FixedTimestep, RenderBuffer, Stage, StageConfig, StageError};

/// Drives a [`Stage`] from a variable-rate host clock.
///
/// Each host frame is split into fixed update steps, followed by one draw
/// into an owned [`RenderBuffer`] that the host hands to its graphics
/// device.
pub struct StageRunner {
    stage: Stage,
    timestep: FixedTimestep,
    render_buffer: RenderBuffer,
    frames: u64,
}

impl StageRunner {
    pub fn new(config: StageConfig) -> Self {
        Self::from_stage(Stage::new(config))
    }

    pub fn from_stage(stage: Stage) -> Self {
        let config = stage.config();
        let timestep = FixedTimestep::new(config.fixed_dt, config.max_steps_per_frame);
        Self {
            stage,
            timestep,
            render_buffer: RenderBuffer::with_capacity(256),
            frames: 0,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// Run one host frame. Returns whether the stage wants more frames.
    pub fn tick(&mut self, frame_dt: f32) -> Result<bool, StageError> {
        if !self.stage.is_running() {
            return Ok(false);
        }

        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            self.stage.update(self.timestep.dt())?;
            if !self.stage.is_running() {
                break;
            }
        }

        self.render_buffer.clear();
        self.stage.draw(&mut self.render_buffer);
        self.frames += 1;
        Ok(self.stage.is_running())
    }

    /// Tick at a constant frame time until the stage stops or `max_frames`
    /// frames have run. Returns the number of frames run.
    pub fn run(&mut self, frame_dt: f32, max_frames: u64) -> Result<u64, StageError> {
        let start = self.frames;
        while self.frames - start < max_frames {
            if !self.tick(frame_dt)? {
                break;
            }
        }
        let ran = self.frames - start;
        if self.stage.is_running() {
            log::warn!("stage still running after {ran} frames");
        }
        Ok(ran)
    }

    /// Output of the most recent draw.
    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
