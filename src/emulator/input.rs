/// A change in the state of one keypad key, `0x0..=0xF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(u8),
    Released(u8),
}

/// Represents an input device that reports keypad presses and releases.
pub trait EmulatorInput {
    /// Key events since the last poll, oldest first.
    fn poll(&mut self) -> Vec<KeyEvent>;

    /// True once the user has asked to stop.
    fn quit_requested(&self) -> bool {
        false
    }
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self) -> Vec<KeyEvent> {
        Vec::new()
    }
}

/// Replays a fixed list of events, one batch per poll.
#[derive(Default)]
pub struct ScriptedInput {
    batches: std::collections::VecDeque<Vec<KeyEvent>>,
}

impl ScriptedInput {
    pub fn new<I: IntoIterator<Item = Vec<KeyEvent>>>(batches: I) -> ScriptedInput {
        ScriptedInput {
            batches: batches.into_iter().collect(),
        }
    }
}

impl EmulatorInput for ScriptedInput {
    fn poll(&mut self) -> Vec<KeyEvent> {
        self.batches.pop_front().unwrap_or_default()
    }

    /// Done once every batch has been handed out.
    fn quit_requested(&self) -> bool {
        self.batches.is_empty()
    }
}
