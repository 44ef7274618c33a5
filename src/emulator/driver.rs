//! Paces instruction cycles against timer ticks, and connects the machine to its input and output.

use std::thread;
use std::time::{Duration, Instant};

use crate::emulator::emulator::{Emulator, RunState};
use crate::emulator::error::EmulatorError;
use crate::emulator::input::{Control, EmulatorInput};
use crate::emulator::output::EmulatorOutput;

/// How fast the machine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Instruction cycles per second.
    pub cycles_per_second: u32,
    /// Timer ticks per second. Input, sound and the screen are refreshed at the same rate.
    pub timer_hz: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            cycles_per_second: 540,
            timer_hz: 60,
        }
    }
}

impl DriverConfig {
    /// Instruction cycles between two timer ticks, at least one.
    pub fn cycles_per_frame(&self) -> u32 {
        (self.cycles_per_second / self.timer_hz.max(1)).max(1)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.timer_hz.max(1)
    }
}

/// Runs an [`Emulator`] one frame at a time.
///
/// A frame polls the input, runs a batch of cycles, ticks the timers once
/// and then forwards sound and screen changes to the output.
pub struct Driver<I: EmulatorInput, O: EmulatorOutput> {
    emulator: Emulator,
    input: I,
    output: O,
    config: DriverConfig,
    tone: bool,
}

impl<I: EmulatorInput, O: EmulatorOutput> Driver<I, O> {

    pub fn new(emulator: Emulator, input: I, output: O, config: DriverConfig) -> Driver<I, O> {
        Driver {
            emulator,
            input,
            output,
            config,
            tone: false,
        }
    }

    /// Run a single frame, returning the run state afterwards.
    ///
    /// Non-fatal errors were already logged by the emulator and are skipped here.
    /// A fatal error ends the frame early, but the screen is still presented before it is returned.
    pub fn run_frame(&mut self) -> Result<RunState, EmulatorError> {
        while let Some(control) = self.input.poll_control() {
            self.apply(control);
        }
        self.input.update_keypad(self.emulator.keypad_mut());

        let mut result = Ok(());
        if self.emulator.run_state() == RunState::Running {
            for _ in 0..self.config.cycles_per_frame() {
                match self.emulator.step() {
                    Err(e) if e.is_fatal() => {
                        result = Err(e);
                        break;
                    }
                    _ => {}
                }
            }
            if result.is_ok() {
                self.emulator.tick_timers();
            }
        }

        let tone = self.emulator.sound_timer() > 0;
        if tone != self.tone {
            self.tone = tone;
            self.output.set_tone(tone);
        }

        if self.emulator.framebuffer().is_dirty() {
            self.output.present(self.emulator.framebuffer());
            self.emulator.framebuffer_mut().mark_clean();
        }

        result.map(|_| self.emulator.run_state())
    }

    /// Run at most `frames` frames as fast as possible, stopping early if the machine halts.
    pub fn run_frames(&mut self, frames: usize) -> Result<RunState, EmulatorError> {
        for _ in 0..frames {
            if self.run_frame()? == RunState::Halted {
                break;
            }
        }
        Ok(self.emulator.run_state())
    }

    /// Run frames in real time until the machine halts.
    pub fn run(&mut self) -> Result<(), EmulatorError> {
        let frame = self.config.frame_duration();
        log::info!(
            "Running at {} cycles per frame, {} frames per second",
            self.config.cycles_per_frame(),
            self.config.timer_hz
        );

        loop {
            let started = Instant::now();
            if self.run_frame()? == RunState::Halted {
                return Ok(());
            }
            if let Some(rest) = frame.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    fn apply(&mut self, control: Control) {
        match control {
            Control::Quit => self.emulator.halt(),
            Control::TogglePause => match self.emulator.run_state() {
                RunState::Running => self.emulator.pause(),
                RunState::Paused => self.emulator.resume(),
                RunState::Halted => {}
            },
        }
    }

    pub fn emulator(&self) -> &Emulator {
        &self.emulator
    }

    pub fn emulator_mut(&mut self) -> &mut Emulator {
        &mut self.emulator
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
