//! Settings a `Machine` is constructed with.

pub const DEFAULT_CLOCK_HZ: u32 = 500;

/// Switches between historical variants of a few instructions.
/// The defaults are the forms contemporary test ROMs expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY6`/`8XYE` copy `Vy` into `Vx` before shifting (COSMAC VIP).
    pub shift_uses_vy: bool,
    /// `FX55`/`FX65` leave `I` at `I + X + 1` (COSMAC VIP).
    pub load_store_increments_i: bool,
    /// `BXNN` jumps to `XNN + VX` instead of `NNN + V0` (CHIP-48, SUPER-CHIP).
    pub jump_uses_vx: bool,
    /// Sprite pixels past an edge wrap to the opposite side instead of being clipped.
    pub wrap_sprites: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instructions per second. Timers run at 60 Hz regardless.
    pub clock_hz: u32,
    /// Seed for `CXNN`. Taken from OS entropy when absent.
    pub seed: Option<u64>,
    pub quirks: Quirks,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_hz: DEFAULT_CLOCK_HZ,
            seed: None,
            quirks: Quirks::default(),
        }
    }
}

impl Config {
    /// Set the instruction rate. Zero is raised to one.
    pub fn with_clock_hz(mut self, clock_hz: u32) -> Self {
        self.clock_hz = clock_hz.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_modern() {
        let config = Config::default();
        assert_eq!(config.clock_hz, 500);
        assert_eq!(config.seed, None);
        assert_eq!(config.quirks, Quirks::default());
        assert!(!config.quirks.shift_uses_vy);
        assert!(!config.quirks.wrap_sprites);
    }

    #[test]
    fn clock_rate_stays_positive() {
        assert_eq!(Config::default().with_clock_hz(0).clock_hz, 1);
        assert_eq!(Config::default().with_clock_hz(700).clock_hz, 700);
    }
}
