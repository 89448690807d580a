//! Fetch, decode and execute.

use rand::Rng;

use super::error::{Fault, StackFault};
use super::instruction::*;
use super::machine::{Machine, STACK_SIZE};
use super::memory::FONT_GLYPH_SIZE;

const VF: usize = 0xF;

impl Machine {
    /// Perform a single step: fetch the opcode at `PC`, execute it,
    /// then let the timers catch up with the instruction clock.
    ///
    /// Returns the executed instruction. On a `Fault` nothing but the
    /// timers has changed and `PC` still points at the culprit.
    pub fn cycle(&mut self) -> Result<Instruction, Fault> {
        let pc = self.program_counter;
        let opcode = self.memory.read_word(pc);
        self.opcode = opcode;

        let result = match Instruction::decode(opcode) {
            Some(instruction) => {
                log::trace!("{:#05X}  {:04X}  {}", pc, opcode, instruction);
                self.execute(instruction).map(|_| instruction)
            }
            None => Err(Fault::UnknownOpcode { opcode, pc }),
        };

        if let Err(fault) = &result {
            log::warn!("{}", fault);
        }

        let clock_hz = self.clock_hz();
        self.timers.step(clock_hz);

        result
    }

    /// Execute a single instruction as if it had been fetched from `PC`.
    /// Timers are not touched.
    pub fn execute(&mut self, instruction: Instruction) -> Result<(), Fault> {
        let pc = self.program_counter;
        let quirks = self.config().quirks;
        let skip = pc.wrapping_add(4);
        let mut next_pc = pc.wrapping_add(2);

        self.waiting_for_key = false;

        match instruction {
            Instruction::ClearScreen => self.screen.clear(),

            // Return to the previous call site via the stack
            Instruction::Return => {
                if self.stack_pointer == 0 {
                    return Err(Fault::Stack { kind: StackFault::Underflow, pc });
                }
                self.stack_pointer -= 1;
                next_pc = self.stack[self.stack_pointer].wrapping_add(2);
            }

            Instruction::Jump(Addr(addr)) => next_pc = addr,

            // Store the current address on the stack, then jump
            Instruction::Call(Addr(addr)) => {
                if self.stack_pointer == STACK_SIZE {
                    return Err(Fault::Stack { kind: StackFault::Overflow, pc });
                }
                self.stack[self.stack_pointer] = pc;
                self.stack_pointer += 1;
                next_pc = addr;
            }

            Instruction::SkipIfEqConst(Reg(x), Const(n)) => {
                if self.v(x) == n {
                    next_pc = skip;
                }
            }

            Instruction::SkipIfNeqConst(Reg(x), Const(n)) => {
                if self.v(x) != n {
                    next_pc = skip;
                }
            }

            Instruction::SkipIfEqReg(Reg(x), Reg(y)) => {
                if self.v(x) == self.v(y) {
                    next_pc = skip;
                }
            }

            Instruction::LoadConst(Reg(x), Const(n)) => self.set_v(x, n),

            // No carry flag for the immediate form
            Instruction::AddConst(Reg(x), Const(n)) => self.set_v(x, self.v(x).wrapping_add(n)),

            Instruction::LoadReg(Reg(x), Reg(y)) => self.set_v(x, self.v(y)),

            Instruction::Or(Reg(x), Reg(y)) => self.set_v(x, self.v(x) | self.v(y)),

            Instruction::And(Reg(x), Reg(y)) => self.set_v(x, self.v(x) & self.v(y)),

            Instruction::Xor(Reg(x), Reg(y)) => self.set_v(x, self.v(x) ^ self.v(y)),

            Instruction::AddReg(Reg(x), Reg(y)) => {
                let (sum, carry) = self.v(x).overflowing_add(self.v(y));
                self.set_v_with_flag(x, sum, carry);
            }

            // VF is 1 only on a strict "no borrow"; equal operands give 0
            Instruction::Sub(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.v(x), self.v(y));
                self.set_v_with_flag(x, vx.wrapping_sub(vy), vx > vy);
            }

            Instruction::ShiftRight(Reg(x), Reg(y)) => {
                let value = if quirks.shift_uses_vy { self.v(y) } else { self.v(x) };
                self.set_v_with_flag(x, value >> 1, value & 1 == 1);
            }

            Instruction::SubN(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.v(x), self.v(y));
                self.set_v_with_flag(x, vy.wrapping_sub(vx), vx <= vy);
            }

            Instruction::ShiftLeft(Reg(x), Reg(y)) => {
                let value = if quirks.shift_uses_vy { self.v(y) } else { self.v(x) };
                self.set_v_with_flag(x, value << 1, value >> 7 == 1);
            }

            Instruction::SkipIfNeqReg(Reg(x), Reg(y)) => {
                if self.v(x) != self.v(y) {
                    next_pc = skip;
                }
            }

            Instruction::LoadI(Addr(addr)) => self.i = addr,

            Instruction::JumpOffset(Addr(addr)) => {
                let offset_reg = if quirks.jump_uses_vx { (addr >> 8) as u8 } else { 0 };
                next_pc = addr.wrapping_add(self.v(offset_reg) as u16);
            }

            Instruction::Random(Reg(x), Const(n)) => {
                let value = self.rng.gen::<u8>() & n;
                self.set_v(x, value);
            }

            Instruction::Draw(Reg(x), Reg(y), Const(height)) => {
                let sprite: Vec<u8> = (0..height as u16)
                    .map(|r| self.memory.read(self.i.wrapping_add(r)))
                    .collect();
                let (vx, vy) = (self.v(x), self.v(y));
                let collision = self.screen.draw_sprite(vx, vy, &sprite, quirks.wrap_sprites);
                self.registers[VF] = collision as u8;
            }

            Instruction::SkipIfKey(Reg(x)) => {
                if self.keypad.is_pressed(self.v(x)) {
                    next_pc = skip;
                }
            }

            Instruction::SkipIfNotKey(Reg(x)) => {
                if !self.keypad.is_pressed(self.v(x)) {
                    next_pc = skip;
                }
            }

            Instruction::LoadDelay(Reg(x)) => self.set_v(x, self.timers.delay),

            // Park on this instruction until some key is down
            Instruction::WaitKey(Reg(x)) => match self.keypad.first_pressed() {
                Some(key) => self.set_v(x, key),
                None => {
                    self.waiting_for_key = true;
                    next_pc = pc;
                }
            },

            Instruction::SetDelay(Reg(x)) => self.timers.delay = self.v(x),

            Instruction::SetSound(Reg(x)) => self.timers.sound = self.v(x),

            // VF flags a result past 0xFFF (Amiga behaviour, needed by Spacefight 2091!)
            Instruction::AddI(Reg(x)) => {
                let sum = self.i as u32 + self.v(x) as u32;
                self.registers[VF] = (sum > 0xFFF) as u8;
                self.i = (sum & 0xFFFF) as u16;
            }

            Instruction::LoadFont(Reg(x)) => {
                self.i = (self.v(x) & 0x0F) as u16 * FONT_GLYPH_SIZE;
            }

            Instruction::StoreBcd(Reg(x)) => {
                let value = self.v(x);
                let digits = [value / 100, (value / 10) % 10, value % 10];
                for (offset, digit) in digits.iter().enumerate() {
                    self.memory.write(self.i.wrapping_add(offset as u16), *digit);
                }
            }

            Instruction::StoreRegs(Reg(x)) => {
                for reg_no in 0..=x {
                    let addr = self.i.wrapping_add(reg_no as u16);
                    self.memory.write(addr, self.v(reg_no));
                }
                if quirks.load_store_increments_i {
                    self.i = self.i.wrapping_add(x as u16 + 1);
                }
            }

            Instruction::LoadRegs(Reg(x)) => {
                for reg_no in 0..=x {
                    let value = self.memory.read(self.i.wrapping_add(reg_no as u16));
                    self.set_v(reg_no, value);
                }
                if quirks.load_store_increments_i {
                    self.i = self.i.wrapping_add(x as u16 + 1);
                }
            }
        };

        self.program_counter = next_pc;
        Ok(())
    }

    /// Execute instructions in order, stopping at the first fault.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), Fault> {
        instructions.iter().try_for_each(|i| self.execute(*i))
    }

    fn v(&self, reg: u8) -> u8 {
        self.registers[reg as usize]
    }

    fn set_v(&mut self, reg: u8, value: u8) {
        self.registers[reg as usize] = value;
    }

    /// Write the result, then the flag. With `X == F` the flag wins.
    fn set_v_with_flag(&mut self, reg: u8, value: u8, flag: bool) {
        self.set_v(reg, value);
        self.registers[VF] = flag as u8;
    }
}
