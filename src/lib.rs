/*!

A CHIP-8 interpreter as described at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the interpreter on some programs, there is a ready-to-use frontend
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
Use the keys 0-9 and a-f to give input, and `q` to quit.

# Library

The core is `Machine`. Create one, load a program at address 0x200, and cycle it.

```rust
use vip8::emulator::Machine;

let mut machine = Machine::new();

// LD VA, 0xFF ; LD VB, 0x01 ; ADD VA, VB
machine.load(&[0x6A, 0xFF, 0x6B, 0x01, 0x8A, 0xB4]).unwrap();
for _ in 0..3 {
    machine.cycle().unwrap();
}
assert_eq!(machine.registers()[0xF], 1);
assert_eq!(machine.pc(), 0x206);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use vip8::emulator::Machine;
use vip8::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut machine = Machine::new();

// Execute instructions manually
machine.execute(Instruction::ClearScreen).unwrap();

// Or many sequentially
machine.execute_many(&[
    Instruction::Jump(Addr(0x250)),
    Instruction::LoadConst(Reg(0xA), Const(35)),
    Instruction::LoadReg(Reg(0xB), Reg(0xA)),
]).unwrap();
assert_eq!(machine.registers()[0xB], 35);
```

## Custom input and output

To drive a machine from a real frontend, implement `EmulatorInput` and `EmulatorOutput`,
which represent somewhere to get key events from and a screen respectively.
Take a look at `src/emulator/input.rs` and `src/emulator/output.rs`, then do the following.

```ignore
use vip8::emulator::Emulator;

let mut emulator = Emulator::with_io(MyInput::new(), MyOutput::new());
emulator.machine_mut().load_rom("games/PONG")?;
emulator.run()?;
```

The crossterm frontend in `src/bin/crossterm_frontend` does exactly this.
*/

pub mod cli;
pub mod emulator;
pub mod util;
