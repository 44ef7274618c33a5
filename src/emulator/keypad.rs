/// Number of keys on the hexadecimal keypad.
pub const NUM_KEYS: usize = 16;

/// The 16 key-down flags of the hex keypad.
///
/// Written by whatever feeds input to the machine, only read by instructions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Mark a key as held down. Keys outside 0..=0xF are ignored.
    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    /// Mark a key as released. Keys outside 0..=0xF are ignored.
    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    pub fn set(&mut self, key: u8, down: bool) {
        if let Some(slot) = self.keys.get_mut(key as usize) {
            *slot = down;
        }
    }

    pub fn release_all(&mut self) {
        self.keys = [false; NUM_KEYS];
    }

    /// Whether `key` is held. Keys outside 0..=0xF are never held.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest-numbered key currently held, if any.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|key| key as u8)
    }
}
