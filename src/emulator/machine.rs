//! The CHIP-8 machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use std::convert::TryInto;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::Config;
use super::display::FrameBuffer;
use super::error::RomError;
use super::keypad::{KeyMap, Keypad};
use super::memory::{Memory, MAX_ROM_SIZE, PROGRAM_START};
use super::timers::Timers;

pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;

pub struct Machine {
    pub(crate) memory: Memory,
    pub(crate) screen: FrameBuffer,
    pub(crate) registers: [u8; NUM_REGISTERS],
    pub(crate) i: u16,
    pub(crate) program_counter: u16,
    pub(crate) stack: [u16; STACK_SIZE],
    pub(crate) stack_pointer: usize,
    pub(crate) timers: Timers,
    pub(crate) keypad: Keypad,
    pub(crate) opcode: u16,
    pub(crate) waiting_for_key: bool,
    pub(crate) rng: StdRng,
    key_map: KeyMap,
    config: Config,
}

impl Machine {
    /// A cold machine with the default configuration.
    pub fn new() -> Machine {
        Machine::with_config(Config::default())
    }

    /// A cold machine. A zero `clock_hz` is raised to one.
    pub fn with_config(mut config: Config) -> Machine {
        config.clock_hz = config.clock_hz.max(1);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Machine {
            memory: Memory::new(),
            screen: FrameBuffer::new(),
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PROGRAM_START,
            stack: [0; STACK_SIZE],
            stack_pointer: 0,
            timers: Timers::new(),
            keypad: Keypad::new(),
            opcode: 0,
            waiting_for_key: false,
            rng,
            key_map: KeyMap::default(),
            config,
        }
    }

    /// Read a program image from disk into memory at 0x200.
    /// Returns the number of bytes loaded.
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, RomError> {
        let path = path.as_ref();
        let loaded = self.load_from(File::open(path)?)?;

        log::info!("Loaded {} bytes from {:?}", loaded, path);
        Ok(loaded)
    }

    /// Read a program image from any reader. At most one byte past the
    /// limit is read, so endless sources fail with `TooLarge`.
    pub fn load_from<R: Read>(&mut self, reader: R) -> Result<usize, RomError> {
        let mut program = Vec::with_capacity(MAX_ROM_SIZE);
        reader
            .take(MAX_ROM_SIZE as u64 + 1)
            .read_to_end(&mut program)?;
        self.load(&program)
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<usize, RomError> {
        if program.len() > MAX_ROM_SIZE {
            return Err(RomError::TooLarge {
                size: program.len() as u64,
                max: MAX_ROM_SIZE,
            });
        }
        self.memory.load_program(program);
        Ok(program.len())
    }

    /// Keys outside `0x0..=0xF` are ignored.
    pub fn press_key<K: TryInto<u8>>(&mut self, key: K) {
        self.set_key(key, true)
    }

    /// Keys outside `0x0..=0xF` are ignored.
    pub fn release_key<K: TryInto<u8>>(&mut self, key: K) {
        self.set_key(key, false)
    }

    fn set_key<K: TryInto<u8>>(&mut self, key: K, pressed: bool) {
        let key = match key.try_into() {
            Ok(key) => key,
            Err(_) => return,
        };
        let changed = if pressed {
            self.keypad.press(key)
        } else {
            self.keypad.release(key)
        };
        if changed {
            log::debug!("Key {:X} {}", key, if pressed { "pressed" } else { "released" });
        }
    }

    /// The opcode word fetched by the last `cycle()`.
    pub fn op(&self) -> u16 {
        self.opcode
    }

    pub fn pc(&self) -> u16 {
        self.program_counter
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.screen
    }

    pub fn clock_hz(&self) -> u32 {
        self.config.clock_hz
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn stack(&self) -> &[u16; STACK_SIZE] {
        &self.stack
    }

    pub fn sp(&self) -> usize {
        self.stack_pointer
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound
    }

    /// The host should sound a tone while this holds.
    pub fn is_beeping(&self) -> bool {
        self.timers.is_beeping()
    }

    /// True while an `FX0A` is parked waiting for a key.
    pub fn is_waiting_for_key(&self) -> bool {
        self.waiting_for_key
    }

    pub fn key_pressed(&self, key: u8) -> bool {
        key < 16 && self.keypad.is_pressed(key)
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    pub fn status(&self) -> Status {
        Status {
            op: self.opcode,
            pc: self.program_counter,
            i: self.i,
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

/// The few registers a frontend overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub op: u16,
    pub pc: u16,
    pub i: u16,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OP [{:#06X}] PC [{:#X}] I [{:#X}]", self.op, self.pc, self.i)
    }
}
