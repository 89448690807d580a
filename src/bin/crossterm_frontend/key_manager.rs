use super::key_buffer::KeyBuffer;
use crossterm::event::{poll, read, Event, KeyCode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

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
        let key_buffer = Arc::new(KeyBuffer::new());
        let event_listener = event_listener(stop.clone(), key_buffer.clone());
        KeyManager {
            stop,
            key_buffer,
            event_listener: Some(event_listener),
        }
    }

    /// Keys pressed since the last call
    pub fn pressed_keys(&self) -> Vec<(KeyCode, Instant)> {
        self.key_buffer.drain()
    }
}

impl Drop for KeyManager {
    fn drop(&mut self) {
        // Tell the event listener to stop, then wait for it
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.event_listener.take() {
            join_listener(handle);
        }
    }
}

/// Wait for the listener to finish. Returns false if it panicked.
fn join_listener(handle: JoinHandle<()>) -> bool {
    match handle.join() {
        Ok(()) => true,
        Err(_) => {
            log::error!("Key listener thread panicked");
            false
        }
    }
}

/// Starts a thread that listens for key events and pushes them to the key buffer.
fn event_listener(stop: Arc<AtomicBool>, key_buffer: Arc<KeyBuffer>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            match poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    log::error!("Polling terminal events failed: {}", e);
                    break;
                }
            }

            match read() {
                Ok(Event::Key(key_event)) => {
                    log::trace!("Got key {:?}", key_event);
                    key_buffer.push(key_event.code);
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("Reading terminal event failed: {}", e);
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_panic_is_reported() {
        let panicking = thread::spawn(|| panic!("terminal went away"));
        assert!(!join_listener(panicking));
        assert!(join_listener(thread::spawn(|| {})));
    }
}
