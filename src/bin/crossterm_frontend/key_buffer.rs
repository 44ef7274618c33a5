use chip_8_vm::emulator::input::Control;
use chip_8_vm::emulator::keypad::{Keypad, NUM_KEYS};
use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard},
    time::{Duration, Instant},
};

/// A thread-safe record of keypresses, for one producer and one consumer.
/// Wrap it in an `std::sync::Arc` and you are good to go.
///
/// Terminals only report presses, never releases, so a key is
/// considered held until `timeout` has passed since it was last pressed.
pub struct KeyBuffer {
    timeout: Duration,
    pressed: Mutex<[Option<Instant>; NUM_KEYS]>,
    controls: Mutex<VecDeque<Control>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl KeyBuffer {

    /// Create a new `KeyBuffer` where a press is held for `timeout`.
    pub fn new(timeout: Duration) -> KeyBuffer {
        KeyBuffer {
            timeout,
            pressed: Mutex::new([None; NUM_KEYS]),
            controls: Mutex::new(VecDeque::new()),
        }
    }

    /// Record a press of a keypad key.
    pub fn press(&self, key: u8) {
        self.press_at(key, Instant::now());
    }

    fn press_at(&self, key: u8, at: Instant) {
        if let Some(slot) = lock(&self.pressed).get_mut(key as usize) {
            *slot = Some(at);
        }
    }

    /// The keys that count as held right now.
    pub fn held(&self) -> Keypad {
        self.held_at(Instant::now())
    }

    fn held_at(&self, now: Instant) -> Keypad {
        let mut keypad = Keypad::new();
        for (key, pressed) in lock(&self.pressed).iter().enumerate() {
            if let Some(at) = pressed {
                keypad.set(key as u8, now.saturating_duration_since(*at) < self.timeout);
            }
        }
        keypad
    }

    pub fn push_control(&self, control: Control) {
        lock(&self.controls).push_back(control);
    }

    pub fn pop_control(&self) -> Option<Control> {
        lock(&self.controls).pop_front()
    }
}
