use chip_8_vm::emulator::framebuffer::{Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use chip_8_vm::emulator::input::{Control, EmulatorInput};
use chip_8_vm::emulator::keypad::Keypad;
use chip_8_vm::emulator::output::EmulatorOutput;

use super::key_buffer::KeyBuffer;

use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Stdout, Write};
use std::sync::Arc;

/// Each pixel is two terminal cells wide, to look roughly square.
const PIXEL_WIDTH: usize = 2;

pub struct CrosstermInput {
    key_buffer: Arc<KeyBuffer>,
}

impl CrosstermInput {
    pub fn new(key_buffer: Arc<KeyBuffer>) -> CrosstermInput {
        CrosstermInput { key_buffer }
    }
}

impl EmulatorInput for CrosstermInput {
    fn update_keypad(&mut self, keypad: &mut Keypad) {
        *keypad = self.key_buffer.held();
    }

    fn poll_control(&mut self) -> Option<Control> {
        self.key_buffer.pop_control()
    }
}

pub struct CrosstermOutput {
    stdout: Stdout,
}

impl CrosstermOutput {
    /// Switch the terminal to an alternate screen in raw mode, and draw a frame around the display.
    pub fn new() -> crossterm::Result<CrosstermOutput> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        terminal::enable_raw_mode()?;

        let inner = "━".repeat(PIXEL_WIDTH * SCREEN_WIDTH);
        let right = (PIXEL_WIDTH * SCREEN_WIDTH + 1) as u16;
        let bottom = (SCREEN_HEIGHT + 1) as u16;
        queue!(stdout, cursor::MoveTo(0, 0), Print(format!("┏{}┓", inner)))?;
        for y in 1..bottom {
            queue!(stdout, cursor::MoveTo(0, y), Print('┃'), cursor::MoveTo(right, y), Print('┃'))?;
        }
        queue!(stdout, cursor::MoveTo(0, bottom), Print(format!("┗{}┛", inner)))?;
        stdout.flush()?;

        Ok(CrosstermOutput { stdout })
    }

    fn draw(&mut self, framebuffer: &Framebuffer) -> crossterm::Result<()> {
        for (y, row) in framebuffer.rows().enumerate() {
            let line: String = row.iter().map(|&on| if on { "██" } else { "  " }).collect();
            queue!(self.stdout, cursor::MoveTo(1, y as u16 + 1), Print(line))?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode()
            .and_then(|_| execute!(self.stdout, cursor::Show, LeaveAlternateScreen))
        {
            log::error!("Could not restore the terminal: {}", e);
        }
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn present(&mut self, framebuffer: &Framebuffer) {
        if let Err(e) = self.draw(framebuffer) {
            log::error!("Could not draw the screen: {}", e);
        }
    }

    // The terminal bell is the closest thing to a tone there is
    fn set_tone(&mut self, on: bool) {
        if on {
            if let Err(e) = write!(self.stdout, "\x07").and_then(|_| self.stdout.flush()) {
                log::error!("Could not ring the bell: {}", e);
            }
        }
    }
}
