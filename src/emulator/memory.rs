//! The 4 KiB address space. Every access is taken modulo 4096, so a
//! runaway `I` or `PC` reads garbage instead of panicking.

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
/// Largest program image that fits between `PROGRAM_START` and the end of memory.
pub const MAX_ROM_SIZE: usize = MEM_SIZE - PROGRAM_START as usize;
pub const FONT_GLYPH_SIZE: u16 = 5;

pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    /// Zeroed memory with the font at `0x000..0x050`.
    pub fn new() -> Memory {
        let mut bytes = [0; MEM_SIZE];
        bytes[..FONT.len()].copy_from_slice(&FONT);
        Memory { bytes }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize % MEM_SIZE]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize % MEM_SIZE] = value;
    }

    /// Big-endian opcode word at `addr`.
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from_be_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    /// Copy a program to `PROGRAM_START`. The caller has checked the size.
    pub(crate) fn load_program(&mut self, program: &[u8]) {
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_is_loaded_verbatim() {
        let memory = Memory::new();
        assert_eq!(&memory.as_slice()[..80], &FONT[..]);
        assert!(memory.as_slice()[80..].iter().all(|b| *b == 0));
    }

    #[test]
    fn glyph_for_digit_starts_at_five_times_digit() {
        let memory = Memory::new();
        assert_eq!(memory.read(5 * FONT_GLYPH_SIZE), 0x20);
        assert_eq!(memory.read(0xF * FONT_GLYPH_SIZE + 4), 0x80);
    }

    #[test]
    fn accesses_wrap_at_4096() {
        let mut memory = Memory::new();
        memory.write(0x1000, 0xAB);
        assert_eq!(memory.read(0x0000), 0xAB);
        memory.write(0x0FFF, 0xCD);
        assert_eq!(memory.read_word(0x0FFF), 0xCDAB);
    }

    #[test]
    fn program_lands_at_0x200() {
        let mut memory = Memory::new();
        memory.load_program(&[0x6A, 0xFF]);
        assert_eq!(memory.read_word(PROGRAM_START), 0x6AFF);
    }
}
