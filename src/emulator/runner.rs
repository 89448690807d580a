//! The driver loop between a `Machine` and a host frontend.

use std::thread;
use std::time::{Duration, Instant};

use super::error::Fault;
use super::input::{DummyInput, EmulatorInput, KeyEvent};
use super::machine::Machine;
use super::output::{DummyOutput, EmulatorOutput};

pub const FRAME_HZ: u32 = 60;

/// Owns a machine and paces it: key events in, `clock_hz / 60` cycles,
/// one frame out, sixty times a second.
pub struct Emulator<I: EmulatorInput, O: EmulatorOutput> {
    machine: Machine,
    input: I,
    output: O,
    stop_on_fault: bool,
    cycle_remainder: u32,
}

impl Emulator<DummyInput, DummyOutput> {
    /// Create a new emulator with dummy input and output
    pub fn new() -> Emulator<DummyInput, DummyOutput> {
        Emulator::with_io(DummyInput, DummyOutput::new())
    }
}

impl Default for Emulator<DummyInput, DummyOutput> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: EmulatorInput, O: EmulatorOutput> Emulator<I, O> {
    /// Create a new emulator with input and output
    pub fn with_io(input: I, output: O) -> Emulator<I, O> {
        Emulator::with_machine(Machine::new(), input, output)
    }

    pub fn with_machine(machine: Machine, input: I, output: O) -> Emulator<I, O> {
        Emulator {
            machine,
            input,
            output,
            stop_on_fault: false,
            cycle_remainder: 0,
        }
    }

    /// End `run` on the first fault instead of logging it and carrying on.
    pub fn stop_on_fault(mut self, stop: bool) -> Self {
        self.stop_on_fault = stop;
        self
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Advance one 60 Hz frame. Returns the number of cycles executed.
    pub fn run_frame(&mut self) -> Result<u32, Fault> {
        for event in self.input.poll() {
            match event {
                KeyEvent::Pressed(key) => self.machine.press_key(key),
                KeyEvent::Released(key) => self.machine.release_key(key),
            }
        }

        let (cycles, remainder) = frame_cycles(self.cycle_remainder, self.machine.clock_hz());
        self.cycle_remainder = remainder;

        let mut result = Ok(cycles);
        for executed in 0..cycles {
            if let Err(fault) = self.machine.cycle() {
                if self.stop_on_fault {
                    log::info!(
                        "Stopping at {:#05X} after {} cycles this frame",
                        fault.pc(),
                        executed
                    );
                    result = Err(fault);
                    break;
                }
            }
        }

        self.output
            .draw(self.machine.frame_buffer(), &self.machine.status());
        self.output.beep(self.machine.is_beeping());

        result
    }

    /// Run frames at 60 Hz until the input asks to quit.
    pub fn run(&mut self) -> Result<(), Fault> {
        let frame_time = Duration::from_secs(1) / FRAME_HZ;
        log::info!("Running at {} Hz", self.machine.clock_hz());

        while !self.input.quit_requested() {
            let started = Instant::now();
            self.run_frame()?;
            if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }

        log::info!("Quit requested at PC {:#05X}", self.machine.pc());
        Ok(())
    }
}

/// Cycles due this frame and the new remainder. The remainder is carried
/// so the long-run rate is exactly `clock_hz`.
fn frame_cycles(remainder: u32, clock_hz: u32) -> (u32, u32) {
    let due = u64::from(remainder) + u64::from(clock_hz);
    let frame_hz = u64::from(FRAME_HZ);
    ((due / frame_hz) as u32, (due % frame_hz) as u32)
}
