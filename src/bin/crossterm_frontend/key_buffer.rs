use crossterm::event::KeyCode;
use std::{collections::VecDeque, sync::Mutex, time::Instant};

/// A thread-safe buffer for storing keys and the time they arrived.
/// For use with a producer thread and a consumer on the frame loop.
/// Wrap it in an `std::sync::Arc` and you are good to go.
pub struct KeyBuffer {
    buffer: Mutex<VecDeque<(KeyCode, Instant)>>,
}

impl KeyBuffer {
    pub fn new() -> KeyBuffer {
        KeyBuffer {
            buffer: Mutex::new(VecDeque::new()),
        }
    }

    /// Push a new keypress to the buffer.
    pub fn push(&self, key_code: KeyCode) {
        if let Ok(mut guard) = self.buffer.lock() {
            guard.push_back((key_code, Instant::now()));
        }
    }

    /// Take every buffered keypress, oldest first.
    pub fn drain(&self) -> Vec<(KeyCode, Instant)> {
        match self.buffer.lock() {
            Ok(mut guard) => guard.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn push_then_drain() {
        let kb = Arc::new(KeyBuffer::new());

        let producer_kb = kb.clone();
        let producer = thread::spawn(move || {
            producer_kb.push(KeyCode::Char('1'));
            producer_kb.push(KeyCode::Char('a'));
        });
        producer.join().unwrap();

        let keys: Vec<KeyCode> = kb.drain().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![KeyCode::Char('1'), KeyCode::Char('a')]);
        assert!(kb.drain().is_empty());
    }
}
