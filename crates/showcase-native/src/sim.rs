use showcase_core::{
    FixedRateScheduler, FrameSink, FrameSnapshot, ManualClock, RenderLoop, Viewer,
};
use std::convert::Infallible;
use std::time::Duration;

pub const SIM_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Headless sink: logs a line every `every` frames and keeps the last one.
pub struct LogSink {
    every: u64,
    pub last: Option<FrameSnapshot>,
}

impl LogSink {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            last: None,
        }
    }
}

impl FrameSink for LogSink {
    type Error = Infallible;

    fn present(&mut self, frame: &FrameSnapshot) -> Result<(), Self::Error> {
        if frame.index % self.every == 0 {
            log::info!(
                "[sim] frame {} eye=({:.2}, {:.2}, {:.2}) controlled={} product={}",
                frame.index,
                frame.eye.x,
                frame.eye.y,
                frame.eye.z,
                frame.controlled,
                frame.product.is_some()
            );
        }
        self.last = Some(frame.clone());
        Ok(())
    }
}

/// Runs `frames` frames at 60 Hz on a manual clock starting at `start`.
pub fn simulate(viewer: &mut Viewer, start: Duration, frames: u64) -> LogSink {
    let clock = ManualClock::new(start);
    let mut scheduler = FixedRateScheduler::new(&clock, SIM_FRAME_INTERVAL, frames);
    let mut sink = LogSink::new(60);
    let count = match RenderLoop::run(viewer, &mut scheduler, &mut sink) {
        Ok(count) => count,
        Err(never) => match never {},
    };
    log::info!("[sim] presented {count} frame(s)");
    sink
}
