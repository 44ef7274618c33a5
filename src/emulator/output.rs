use crate::emulator::framebuffer::Framebuffer;

/// Represents a screen, and optionally a speaker.
pub trait EmulatorOutput {
    /// Show the framebuffer. Only called when something changed.
    fn present(&mut self, framebuffer: &Framebuffer);

    /// Start or stop the tone. Only called when that changes.
    fn set_tone(&mut self, _on: bool) {}
}

/// A simple output device that keeps track of what it was given.
#[derive(Debug, Default)]
pub struct DummyOutput {
    screen: Option<Framebuffer>,
    frames: usize,
    tone: bool,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput::default()
    }

    /// The last presented framebuffer.
    pub fn screen(&self) -> Option<&Framebuffer> {
        self.screen.as_ref()
    }

    /// How many times something was presented.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn tone(&self) -> bool {
        self.tone
    }
}

impl EmulatorOutput for DummyOutput {
    fn present(&mut self, framebuffer: &Framebuffer) {
        self.screen = Some(framebuffer.clone());
        self.frames += 1;
    }

    fn set_tone(&mut self, on: bool) {
        self.tone = on;
    }
}
