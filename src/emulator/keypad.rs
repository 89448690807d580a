use std::convert::TryInto;

pub const NUM_KEYS: usize = 16;

/// Pressed/released state of the 16-key hexadecimal keypad.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Mark `key` pressed. Anything outside `0x0..=0xF` is ignored.
    pub fn press<K: TryInto<u8>>(&mut self, key: K) -> bool {
        self.set(key, true)
    }

    /// Mark `key` released. Anything outside `0x0..=0xF` is ignored.
    pub fn release<K: TryInto<u8>>(&mut self, key: K) -> bool {
        self.set(key, false)
    }

    fn set<K: TryInto<u8>>(&mut self, key: K, state: bool) -> bool {
        match Self::index(key) {
            Some(idx) => {
                self.pressed[idx] = state;
                true
            }
            None => false,
        }
    }

    fn index<K: TryInto<u8>>(key: K) -> Option<usize> {
        key.try_into()
            .ok()
            .map(usize::from)
            .filter(|idx| *idx < NUM_KEYS)
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed[key as usize & 0x0F]
    }

    /// Lowest-numbered key currently down.
    pub fn first_pressed(&self) -> Option<u8> {
        self.pressed.iter().position(|p| *p).map(|idx| idx as u8)
    }
}

/// Hint for frontends: the host key that stands for each hex digit.
/// Index with the keypad digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap(pub [char; NUM_KEYS]);

impl Default for KeyMap {
    /// `0..9` on the digit keys, `A..F` on the letter keys `a..f`.
    fn default() -> Self {
        KeyMap([
            '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
        ])
    }
}

impl KeyMap {
    /// The keypad digit a host key maps to, if any.
    pub fn lookup(&self, host_key: char) -> Option<u8> {
        let host_key = host_key.to_ascii_lowercase();
        self.0
            .iter()
            .position(|k| *k == host_key)
            .map(|idx| idx as u8)
    }
}
