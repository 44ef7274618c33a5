//! The virtual machine, and the pieces a frontend needs to drive it.

pub mod driver;
pub mod emulator;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod input;
pub mod instruction;
pub mod keypad;
pub mod output;

pub use self::driver::{Driver, DriverConfig};
pub use self::emulator::{Cycle, Emulator, RunState};
pub use self::error::{EmulatorError, LoadError};
