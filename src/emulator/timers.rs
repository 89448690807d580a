pub const TIMER_HZ: u32 = 60;

/// Delay and sound timers. They count down at 60 Hz measured against the
/// instruction clock: every cycle adds `TIMER_HZ` to an accumulator and
/// each full `clock_hz` drained from it is one timer tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
    accumulator: u64,
}

impl Timers {
    pub fn new() -> Timers {
        Timers::default()
    }

    /// Account for one executed instruction, applying any 60 Hz ticks now due.
    pub fn step(&mut self, clock_hz: u32) {
        let clock_hz = u64::from(clock_hz.max(1));
        self.accumulator += u64::from(TIMER_HZ);

        while self.accumulator >= clock_hz {
            self.accumulator -= clock_hz;
            self.tick();
        }
    }

    /// One 60 Hz decrement of both timers.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn is_beeping(&self) -> bool {
        self.sound > 0
    }
}
