use std::path::PathBuf;

use structopt::StructOpt;

use vip8::cli::MachineOpt;
use vip8::emulator::{Emulator, Machine};

mod crossterm_io;
mod key_buffer;
mod key_manager;

use crossterm_io::{CrosstermInput, CrosstermOutput};
use key_manager::KeyManager;

/// The program options.
#[derive(StructOpt)]
struct Opt {
    #[structopt(flatten)]
    machine: MachineOpt,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);

    let mut machine = Machine::with_config(opt.machine.config());
    machine.load_rom(&opt.input)?;
    let key_map = *machine.key_map();

    let input = CrosstermInput::new(KeyManager::new(), key_map);
    let output = CrosstermOutput::new()?;
    let mut emulator =
        Emulator::with_machine(machine, input, output).stop_on_fault(opt.machine.stop_on_fault);

    // Start execution
    emulator.run()?;

    Ok(())
}
