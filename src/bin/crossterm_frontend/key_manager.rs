use super::key_buffer::KeyBuffer;
use chip_8_vm::emulator::input::Control;
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const HOLD_TIMEOUT: Duration = Duration::from_millis(250);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A struct for managing keypresses that will automatically
/// start a thread that grabs keypresses.
pub struct KeyManager {
    stop: Arc<AtomicBool>,
    key_buffer: Arc<KeyBuffer>,
    event_listener: Option<JoinHandle<()>>,
}

impl KeyManager {
    // Start event listener thread
    pub fn new() -> KeyManager {
        let stop = Arc::new(AtomicBool::new(false));
        let key_buffer = Arc::new(KeyBuffer::new(HOLD_TIMEOUT));
        let event_listener = event_listener(stop.clone(), key_buffer.clone());
        KeyManager {
            stop,
            key_buffer,
            event_listener: Some(event_listener),
        }
    }

    /// The buffer that the listener thread writes to
    pub fn key_buffer(&self) -> Arc<KeyBuffer> {
        self.key_buffer.clone()
    }
}

impl Drop for KeyManager {
    fn drop(&mut self) {
        // Tell the event listener to stop, and wait for it
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.event_listener.take() {
            if handle.join().is_err() {
                log::error!("Key listener thread panicked");
            }
        }
    }
}

/// Starts a thread that listens for key events and pushes them to the key buffer.
fn event_listener(stop: Arc<AtomicBool>, key_buffer: Arc<KeyBuffer>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::SeqCst) {
            // Wake up regularly to check whether we should stop
            match poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    log::error!("Could not poll for events: {}", e);
                    break;
                }
            }

            match read() {
                Ok(Event::Key(key_event)) => {
                    log::debug!("Got key {:?}", key_event);
                    handle_key(key_event, &key_buffer);
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("Could not read event: {}", e);
                    break;
                }
            }
        }
    })
}

fn handle_key(key_event: KeyEvent, key_buffer: &KeyBuffer) {
    match key_event.code {
        KeyCode::Esc => key_buffer.push_control(Control::Quit),
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            key_buffer.push_control(Control::Quit)
        }
        KeyCode::Char(' ') => key_buffer.push_control(Control::TogglePause),
        KeyCode::Char(c) => {
            if let Some(key) = key_to_u8(c) {
                key_buffer.press(key);
            }
        }
        _ => {}
    }
}

/// Keys 0-9 and a-f map to the keypad key with the same hex value.
fn key_to_u8(c: char) -> Option<u8> {
    c.to_digit(16).map(|digit| digit as u8)
}
