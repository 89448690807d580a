use super::display::FrameBuffer;
use super::machine::Status;

/// Represents an output device that presents frames.
pub trait EmulatorOutput {
    /// Paint a frame. `status` carries the values for an overlay.
    fn draw(&mut self, frame: &FrameBuffer, status: &Status);

    /// Called every frame with the current beep condition.
    fn beep(&mut self, _on: bool) {}
}

/// A simple output device that keeps the last frame it was given.
#[derive(Default)]
pub struct DummyOutput {
    pub frame: FrameBuffer,
    pub status: Option<Status>,
    pub frames_drawn: usize,
    pub beeping_frames: usize,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput::default()
    }
}

impl EmulatorOutput for DummyOutput {
    fn draw(&mut self, frame: &FrameBuffer, status: &Status) {
        self.frame = frame.clone();
        self.status = Some(*status);
        self.frames_drawn += 1;
    }

    fn beep(&mut self, on: bool) {
        if on {
            self.beeping_frames += 1;
        }
    }
}
