use crate::util::bit_splitter::BitSplitter;
use std::fmt;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,                 // 00E0
    Return,                      // 00EE
    Jump(Addr),                  // 1NNN
    Call(Addr),                  // 2NNN
    SkipIfEqConst(Reg, Const),   // 3XNN
    SkipIfNeqConst(Reg, Const),  // 4XNN
    SkipIfEqReg(Reg, Reg),       // 5XY0
    LoadConst(Reg, Const),       // 6XNN
    AddConst(Reg, Const),        // 7XNN
    LoadReg(Reg, Reg),           // 8XY0
    Or(Reg, Reg),                // 8XY1
    And(Reg, Reg),               // 8XY2
    Xor(Reg, Reg),               // 8XY3
    AddReg(Reg, Reg),            // 8XY4
    Sub(Reg, Reg),               // 8XY5
    ShiftRight(Reg, Reg),        // 8XY6
    SubN(Reg, Reg),              // 8XY7
    ShiftLeft(Reg, Reg),         // 8XYE
    SkipIfNeqReg(Reg, Reg),      // 9XY0
    LoadI(Addr),                 // ANNN
    JumpOffset(Addr),            // BNNN
    Random(Reg, Const),          // CXNN
    Draw(Reg, Reg, Const),       // DXYN
    SkipIfKey(Reg),              // EX9E
    SkipIfNotKey(Reg),           // EXA1
    LoadDelay(Reg),              // FX07
    WaitKey(Reg),                // FX0A
    SetDelay(Reg),               // FX15
    SetSound(Reg),               // FX18
    AddI(Reg),                   // FX1E
    LoadFont(Reg),               // FX29
    StoreBcd(Reg),               // FX33
    StoreRegs(Reg),              // FX55
    LoadRegs(Reg),               // FX65
}

impl Instruction {
    /// Decode an opcode word. Returns `None` for patterns outside the instruction set.
    pub fn decode(value: u16) -> Option<Instruction> {
        let opcode = BitSplitter::from_u16(value);
        Self::decode_split(&opcode)
    }

    fn decode_split(opcode: &BitSplitter) -> Option<Instruction> {
        let addr = Addr(opcode.addr());
        let nn = Const(opcode.byte());
        let (x, y) = (Reg(opcode.x()), Reg(opcode.y()));

        let instruction = match opcode.nibbles() {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (1, _, _, _) => Instruction::Jump(addr),
            (2, _, _, _) => Instruction::Call(addr),
            (3, _, _, _) => Instruction::SkipIfEqConst(x, nn),
            (4, _, _, _) => Instruction::SkipIfNeqConst(x, nn),
            (5, _, _, 0) => Instruction::SkipIfEqReg(x, y),
            (6, _, _, _) => Instruction::LoadConst(x, nn),
            (7, _, _, _) => Instruction::AddConst(x, nn),
            (8, _, _, 0) => Instruction::LoadReg(x, y),
            (8, _, _, 1) => Instruction::Or(x, y),
            (8, _, _, 2) => Instruction::And(x, y),
            (8, _, _, 3) => Instruction::Xor(x, y),
            (8, _, _, 4) => Instruction::AddReg(x, y),
            (8, _, _, 5) => Instruction::Sub(x, y),
            (8, _, _, 6) => Instruction::ShiftRight(x, y),
            (8, _, _, 7) => Instruction::SubN(x, y),
            (8, _, _, 0xE) => Instruction::ShiftLeft(x, y),
            (9, _, _, 0) => Instruction::SkipIfNeqReg(x, y),
            (0xA, _, _, _) => Instruction::LoadI(addr),
            (0xB, _, _, _) => Instruction::JumpOffset(addr),
            (0xC, _, _, _) => Instruction::Random(x, nn),
            (0xD, _, _, _) => Instruction::Draw(x, y, Const(opcode.low_nibble())),
            (0xE, _, 9, 0xE) => Instruction::SkipIfKey(x),
            (0xE, _, 0xA, 1) => Instruction::SkipIfNotKey(x),
            (0xF, _, 0, 7) => Instruction::LoadDelay(x),
            (0xF, _, 0, 0xA) => Instruction::WaitKey(x),
            (0xF, _, 1, 5) => Instruction::SetDelay(x),
            (0xF, _, 1, 8) => Instruction::SetSound(x),
            (0xF, _, 1, 0xE) => Instruction::AddI(x),
            (0xF, _, 2, 9) => Instruction::LoadFont(x),
            (0xF, _, 3, 3) => Instruction::StoreBcd(x),
            (0xF, _, 5, 5) => Instruction::StoreRegs(x),
            (0xF, _, 6, 5) => Instruction::LoadRegs(x),
            _ => return None,
        };

        Some(instruction)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{:X}", self.0)
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#05X}", self.0)
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04X}", self.0)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(a) => write!(f, "JP {}", a),
            Call(a) => write!(f, "CALL {}", a),
            SkipIfEqConst(x, n) => write!(f, "SE {}, {}", x, n),
            SkipIfNeqConst(x, n) => write!(f, "SNE {}, {}", x, n),
            SkipIfEqReg(x, y) => write!(f, "SE {}, {}", x, y),
            LoadConst(x, n) => write!(f, "LD {}, {}", x, n),
            AddConst(x, n) => write!(f, "ADD {}, {}", x, n),
            LoadReg(x, y) => write!(f, "LD {}, {}", x, y),
            Or(x, y) => write!(f, "OR {}, {}", x, y),
            And(x, y) => write!(f, "AND {}, {}", x, y),
            Xor(x, y) => write!(f, "XOR {}, {}", x, y),
            AddReg(x, y) => write!(f, "ADD {}, {}", x, y),
            Sub(x, y) => write!(f, "SUB {}, {}", x, y),
            ShiftRight(x, _) => write!(f, "SHR {}", x),
            SubN(x, y) => write!(f, "SUBN {}, {}", x, y),
            ShiftLeft(x, _) => write!(f, "SHL {}", x),
            SkipIfNeqReg(x, y) => write!(f, "SNE {}, {}", x, y),
            LoadI(a) => write!(f, "LD I, {}", a),
            JumpOffset(a) => write!(f, "JP V0, {}", a),
            Random(x, n) => write!(f, "RND {}, {}", x, n),
            Draw(x, y, n) => write!(f, "DRW {}, {}, {}", x, y, n),
            SkipIfKey(x) => write!(f, "SKP {}", x),
            SkipIfNotKey(x) => write!(f, "SKNP {}", x),
            LoadDelay(x) => write!(f, "LD {}, DT", x),
            WaitKey(x) => write!(f, "LD {}, K", x),
            SetDelay(x) => write!(f, "LD DT, {}", x),
            SetSound(x) => write!(f, "LD ST, {}", x),
            AddI(x) => write!(f, "ADD I, {}", x),
            LoadFont(x) => write!(f, "LD F, {}", x),
            StoreBcd(x) => write!(f, "LD B, {}", x),
            StoreRegs(x) => write!(f, "LD [I], {}", x),
            LoadRegs(x) => write!(f, "LD {}, [I]", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    // pretty_assertions::assert_eq omitted: it is ambiguous with the prelude inside test_case-generated modules (E0659).
    // Call sites use the std assert_eq!, which has identical pass/fail semantics.
    use test_case::test_case;

    #[test]
    fn opcodes_are_parsed_correctly() {
        use Instruction::*;
        let expected = [
            (0x00E0, ClearScreen),
            (0x00EE, Return),
            (0x1025, Jump(Addr(0x25))),
            (0x2037, Call(Addr(0x37))),
            (0x3A08, SkipIfEqConst(Reg(0xA), Const(8))),
            (0x4A08, SkipIfNeqConst(Reg(0xA), Const(8))),
            (0x5AB0, SkipIfEqReg(Reg(0xA), Reg(0xB))),
            (0x6B23, LoadConst(Reg(0xB), Const(0x23))),
            (0x7CA1, AddConst(Reg(0xC), Const(0xA1))),
            (0x8AB0, LoadReg(Reg(0xA), Reg(0xB))),
            (0x8DE1, Or(Reg(0xD), Reg(0xE))),
            (0x8DE2, And(Reg(0xD), Reg(0xE))),
            (0x8DE3, Xor(Reg(0xD), Reg(0xE))),
            (0x8AB4, AddReg(Reg(0xA), Reg(0xB))),
            (0x8AB5, Sub(Reg(0xA), Reg(0xB))),
            (0x8AB6, ShiftRight(Reg(0xA), Reg(0xB))),
            (0x8AB7, SubN(Reg(0xA), Reg(0xB))),
            (0x8A0E, ShiftLeft(Reg(0xA), Reg(0x0))),
            (0x9AB0, SkipIfNeqReg(Reg(0xA), Reg(0xB))),
            (0xA025, LoadI(Addr(0x25))),
            (0xB025, JumpOffset(Addr(0x25))),
            (0xCA23, Random(Reg(0xA), Const(0x23))),
            (0xDABC, Draw(Reg(0xA), Reg(0xB), Const(0xC))),
            (0xEA9E, SkipIfKey(Reg(0xA))),
            (0xEAA1, SkipIfNotKey(Reg(0xA))),
            (0xFA07, LoadDelay(Reg(0xA))),
            (0xFA0A, WaitKey(Reg(0xA))),
            (0xFA15, SetDelay(Reg(0xA))),
            (0xFA18, SetSound(Reg(0xA))),
            (0xFA1E, AddI(Reg(0xA))),
            (0xFA29, LoadFont(Reg(0xA))),
            (0xFA33, StoreBcd(Reg(0xA))),
            (0xFA55, StoreRegs(Reg(0xA))),
            (0xFA65, LoadRegs(Reg(0xA))),
        ];
        for (opcode, instruction) in expected.iter() {
            assert_eq!(Some(*instruction), Instruction::decode(*opcode), "{:#06X}", opcode);
        }
    }

    #[test_case(0x0000 ; "machine code call")]
    #[test_case(0x0123 ; "sys address")]
    #[test_case(0x5AB1 ; "5xy with non-zero tail")]
    #[test_case(0x8AB8 ; "unused alu op")]
    #[test_case(0x9AB1 ; "9xy with non-zero tail")]
    #[test_case(0xEA9F ; "unused key op")]
    #[test_case(0xFA99 ; "unused misc op")]
    #[test_case(0xFFFF ; "all ones")]
    fn unknown_opcodes_do_not_decode(opcode: u16) {
        assert_eq!(None, Instruction::decode(opcode));
    }

    #[test_case(0x6AFF => "LD VA, 0xFF")]
    #[test_case(0x00E0 => "CLS")]
    #[test_case(0xD012 => "DRW V0, V1, 0x02")]
    #[test_case(0xA300 => "LD I, 0x300")]
    #[test_case(0xF30A => "LD V3, K")]
    #[test_case(0x8AB6 => "SHR VA")]
    fn mnemonics(opcode: u16) -> String {
        Instruction::decode(opcode).map(|i| i.to_string()).unwrap_or_default()
    }

    #[test]
    fn draw_height_is_the_low_nibble() {
        assert_eq!(
            Instruction::decode(0xD12F),
            Some(Instruction::Draw(Reg(1), Reg(2), Const(0xF)))
        );
    }
}
