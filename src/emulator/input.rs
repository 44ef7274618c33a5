use crate::emulator::keypad::Keypad;

/// Requests from a frontend that are not meant for the program itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Quit,
    TogglePause,
}

/// Represents an input device that is capable of providing keys in the range 0..0xF.
pub trait EmulatorInput {
    /// Bring `keypad` up to date with the keys that are held right now.
    fn update_keypad(&mut self, keypad: &mut Keypad);

    /// The next pending frontend request, if any.
    fn poll_control(&mut self) -> Option<Control> {
        None
    }
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn update_keypad(&mut self, _: &mut Keypad) {}
}
