use pretty_assertions::assert_eq;
use std::io::Write;

use vip8::emulator::instruction::{Addr, Instruction};
use vip8::emulator::{Config, Fault, FrameBuffer, Machine, StackFault};

fn run(program: &[u8], cycles: usize) -> Machine {
    let mut machine = Machine::new();
    machine.load(program).unwrap();
    for _ in 0..cycles {
        machine.cycle().unwrap();
    }
    machine
}

#[test]
fn cold_start() {
    let machine = Machine::new();
    assert_eq!(machine.pc(), 0x200);
    assert_eq!(machine.i(), 0);
    assert_eq!(machine.sp(), 0);
    assert_eq!(machine.registers(), &[0; 16]);
    assert_eq!(machine.frame_buffer(), &FrameBuffer::new());
    assert_eq!(&machine.memory()[0..6], &[0xF0, 0x90, 0x90, 0x90, 0xF0, 0x20]);
}

#[test]
fn arithmetic_carry() {
    let machine = run(&[0x6A, 0xFF, 0x6B, 0x01, 0x8A, 0xB4], 3);
    assert_eq!(machine.registers()[0xA], 0x00);
    assert_eq!(machine.registers()[0xB], 0x01);
    assert_eq!(machine.registers()[0xF], 1);
    assert_eq!(machine.pc(), 0x206);
}

#[test]
fn call_and_return() {
    let mut program = vec![0; 10];
    program[0..2].copy_from_slice(&[0x22, 0x08]);
    program[8..10].copy_from_slice(&[0x00, 0xEE]);

    let mut machine = Machine::new();
    machine.load(&program).unwrap();

    assert_eq!(machine.cycle().unwrap(), Instruction::Call(Addr(0x208)));
    assert_eq!(machine.pc(), 0x208);
    assert_eq!(machine.sp(), 1);
    assert_eq!(machine.stack()[0], 0x200);

    assert_eq!(machine.cycle().unwrap(), Instruction::Return);
    assert_eq!(machine.pc(), 0x202);
    assert_eq!(machine.sp(), 0);
}

#[test]
fn draw_and_collide() {
    // LD I, 0x208 ; DRW V0, V1, 2 ; DRW V0, V1, 2 ; JP 0x206 ; sprite
    let program = [0xA2, 0x08, 0xD0, 0x12, 0xD0, 0x12, 0x12, 0x06, 0xFF, 0x81];
    let mut machine = run(&program, 2);

    let rows = machine.frame_buffer().rows();
    assert_eq!(&rows[0][0..8], &[1; 8]);
    assert_eq!(&rows[1][0..8], &[1, 0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(machine.registers()[0xF], 0);

    machine.cycle().unwrap();
    assert_eq!(machine.frame_buffer(), &FrameBuffer::new());
    assert_eq!(machine.registers()[0xF], 1);
}

#[test]
fn binary_coded_decimal() {
    let machine = run(&[0x65, 0x7B, 0xA3, 0x00, 0xF5, 0x33], 3);
    assert_eq!(&machine.memory()[0x300..0x303], &[1, 2, 3]);
}

#[test]
fn wait_for_key() {
    let mut machine = Machine::new();
    machine.load(&[0xF3, 0x0A]).unwrap();

    machine.cycle().unwrap();
    assert_eq!(machine.pc(), 0x200);
    assert!(machine.is_waiting_for_key());

    machine.press_key(7);
    machine.cycle().unwrap();
    assert_eq!(machine.registers()[3], 7);
    assert_eq!(machine.pc(), 0x202);
}

#[test]
fn return_with_empty_stack_faults() {
    let mut machine = Machine::new();
    machine.load(&[0x00, 0xEE]).unwrap();
    assert_eq!(
        machine.cycle(),
        Err(Fault::Stack {
            kind: StackFault::Underflow,
            pc: 0x200
        })
    );
    assert_eq!(machine.pc(), 0x200);
}

#[test]
fn same_seed_same_random_numbers() {
    // RND V0, 0xFF ; RND V1, 0xFF ; RND V2, 0xFF
    let program = [0xC0, 0xFF, 0xC1, 0xFF, 0xC2, 0xFF];
    let registers = || {
        let mut machine = Machine::with_config(Config::default().with_seed(0xC8));
        machine.load(&program).unwrap();
        for _ in 0..3 {
            machine.cycle().unwrap();
        }
        *machine.registers()
    };
    assert_eq!(registers(), registers());
}

#[test]
fn rom_file_round_trip() {
    let path = std::env::temp_dir().join(format!("vip8-scenario-{}.ch8", std::process::id()));
    std::fs::File::create(&path)
        .unwrap()
        .write_all(&[0x6A, 0xFF, 0x6B, 0x01, 0x8A, 0xB4])
        .unwrap();

    let mut machine = Machine::new();
    assert_eq!(machine.load_rom(&path).unwrap(), 6);
    for _ in 0..3 {
        machine.cycle().unwrap();
    }
    assert_eq!(machine.registers()[0xF], 1);

    std::fs::remove_file(path).unwrap();
}
