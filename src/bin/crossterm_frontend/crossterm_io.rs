use vip8::emulator::display::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use vip8::emulator::input::{EmulatorInput, KeyEvent};
use vip8::emulator::keypad::{KeyMap, NUM_KEYS};
use vip8::emulator::machine::Status;
use vip8::emulator::output::EmulatorOutput;

use super::key_manager::KeyManager;

use crossterm::event::KeyCode;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

/// Terminals only report presses, so a key counts as held this long after its last one.
const HOLD_TIME: Duration = Duration::from_millis(250);

/// Turns a stream of presses into press/release pairs.
#[derive(Default)]
pub struct HeldKeys {
    last_press: [Option<Instant>; NUM_KEYS],
}

impl HeldKeys {
    /// Record a press. Yields an event only if the key was not already held.
    pub fn press(&mut self, key: u8, at: Instant) -> Option<KeyEvent> {
        let slot = self.last_press.get_mut(key as usize)?;
        let was_held = slot.is_some();
        *slot = Some(at);
        if was_held {
            None
        } else {
            Some(KeyEvent::Pressed(key))
        }
    }

    /// Release every key whose last press is older than `HOLD_TIME`.
    pub fn expire(&mut self, now: Instant) -> Vec<KeyEvent> {
        let mut released = Vec::new();
        for (key, slot) in self.last_press.iter_mut().enumerate() {
            if let Some(at) = *slot {
                if now.duration_since(at) >= HOLD_TIME {
                    *slot = None;
                    released.push(KeyEvent::Released(key as u8));
                }
            }
        }
        released
    }
}

pub struct CrosstermInput {
    key_manager: KeyManager,
    key_map: KeyMap,
    held: HeldKeys,
    quit: bool,
}

impl CrosstermInput {
    pub fn new(key_manager: KeyManager, key_map: KeyMap) -> CrosstermInput {
        CrosstermInput {
            key_manager,
            key_map,
            held: HeldKeys::default(),
            quit: false,
        }
    }
}

impl EmulatorInput for CrosstermInput {
    fn poll(&mut self) -> Vec<KeyEvent> {
        let mut events = Vec::new();
        for (code, at) in self.key_manager.pressed_keys() {
            match code {
                KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
                KeyCode::Char(c) => {
                    if let Some(event) = self.key_map.lookup(c).and_then(|k| self.held.press(k, at)) {
                        events.push(event);
                    }
                }
                _ => {}
            }
        }
        events.extend(self.held.expire(Instant::now()));
        events
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

pub struct CrosstermOutput {
    shown: Option<FrameBuffer>,
    beeping: bool,
}

impl CrosstermOutput {
    pub fn new() -> crossterm::Result<CrosstermOutput> {
        execute!(stdout(), EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        terminal::enable_raw_mode()?;

        let mut out = stdout();
        let bottom = SCREEN_HEIGHT as u16 + 1;
        let right = 2 * SCREEN_WIDTH as u16 + 1;
        for y in 0..=bottom {
            for x in 0..=right {
                let c = match (x, y) {
                    (0, 0) => '┏',
                    (x, 0) if x == right => '┓',
                    (0, y) if y == bottom => '┗',
                    (x, y) if x == right && y == bottom => '┛',
                    (_, y) if y == 0 || y == bottom => '━',
                    (x, _) if x == 0 || x == right => '┃',
                    _ => continue,
                };
                queue!(out, cursor::MoveTo(x, y), Print(c))?;
            }
        }
        out.flush()?;

        Ok(CrosstermOutput {
            shown: None,
            beeping: false,
        })
    }

    /// Repaint the cells that differ from the last frame, then the status line.
    fn paint(&mut self, frame: &FrameBuffer, status: &Status) -> crossterm::Result<()> {
        let mut out = stdout();
        for row in 0..SCREEN_HEIGHT {
            for col in 0..SCREEN_WIDTH {
                let on = frame.is_on(row, col);
                let changed = match &self.shown {
                    Some(shown) => shown.is_on(row, col) != on,
                    None => true,
                };
                if changed {
                    let cell = if on { "██" } else { "  " };
                    queue!(out, cursor::MoveTo(2 * col as u16 + 1, row as u16 + 1), Print(cell))?;
                }
            }
        }

        queue!(
            out,
            cursor::MoveTo(0, SCREEN_HEIGHT as u16 + 2),
            Print(status),
            Clear(ClearType::UntilNewLine)
        )?;
        out.flush()?;

        self.shown = Some(frame.clone());
        Ok(())
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, cursor::Show);
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn draw(&mut self, frame: &FrameBuffer, status: &Status) {
        if let Err(e) = self.paint(frame, status) {
            log::error!("Could not draw frame: {}", e);
        }
    }

    // Ring the terminal bell when the tone starts
    fn beep(&mut self, on: bool) {
        if on && !self.beeping {
            let _ = execute!(stdout(), Print('\x07'));
        }
        self.beeping = on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_presses_hold_the_key() {
        let start = Instant::now();
        let mut held = HeldKeys::default();
        assert_eq!(held.press(5, start), Some(KeyEvent::Pressed(5)));
        assert_eq!(held.press(5, start + Duration::from_millis(100)), None);

        assert!(held.expire(start + Duration::from_millis(300)).is_empty());
        assert_eq!(
            held.expire(start + Duration::from_millis(400)),
            vec![KeyEvent::Released(5)]
        );
    }

    #[test]
    fn out_of_range_keys_are_dropped() {
        let mut held = HeldKeys::default();
        assert_eq!(held.press(0x10, Instant::now()), None);
    }
}
