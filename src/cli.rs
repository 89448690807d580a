//! Command-line options shared by the frontends.

use structopt::StructOpt;

use crate::emulator::config::{Config, Quirks, DEFAULT_CLOCK_HZ};

/// Options that shape the machine. Flatten into a frontend's own options.
#[derive(StructOpt, Debug, Clone, PartialEq)]
pub struct MachineOpt {
    /// Instructions per second
    #[structopt(long, default_value = "500")]
    pub clock_hz: u32,

    /// Seed for the random number generator
    #[structopt(long)]
    pub seed: Option<u64>,

    /// Stop at the first unknown opcode or stack fault
    #[structopt(long)]
    pub stop_on_fault: bool,

    /// 8XY6/8XYE shift VY instead of VX
    #[structopt(long)]
    pub shift_uses_vy: bool,

    /// FX55/FX65 advance I past the registers they touch
    #[structopt(long)]
    pub load_store_increments_i: bool,

    /// BXNN jumps to XNN + VX instead of NNN + V0
    #[structopt(long)]
    pub jump_uses_vx: bool,

    /// Wrap sprites around the screen edges instead of clipping
    #[structopt(long)]
    pub wrap_sprites: bool,
}

impl MachineOpt {
    pub fn config(&self) -> Config {
        let config = Config::default()
            .with_clock_hz(self.clock_hz)
            .with_quirks(Quirks {
                shift_uses_vy: self.shift_uses_vy,
                load_store_increments_i: self.load_store_increments_i,
                jump_uses_vx: self.jump_uses_vx,
                wrap_sprites: self.wrap_sprites,
            });
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}
