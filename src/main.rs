use std::path::PathBuf;

use structopt::StructOpt;

use vip8::cli::MachineOpt;
use vip8::emulator::Machine;

/// Run a CHIP-8 program without a window and print the screen afterwards.
#[derive(StructOpt, Debug)]
#[structopt(name = "vip8")]
struct Opt {
    #[structopt(flatten)]
    machine: MachineOpt,

    /// Number of cycles to run
    #[structopt(long, default_value = "600")]
    cycles: u64,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);

    let mut machine = Machine::with_config(opt.machine.config());
    machine.load_rom(&opt.input)?;

    for _ in 0..opt.cycles {
        if let Err(fault) = machine.cycle() {
            if opt.machine.stop_on_fault {
                print!("{}", machine.frame_buffer());
                return Err(fault.into());
            }
        }
    }

    print!("{}", machine.frame_buffer());
    println!("{}", machine.status());
    Ok(())
}
