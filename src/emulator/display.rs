use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub type Screen = [[u8; SCREEN_WIDTH]; SCREEN_HEIGHT];
const EMPTY_SCREEN: Screen = [[0; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// The 64x32 monochrome frame buffer, top-left origin.
/// Cells only ever hold 0 or 1.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    cells: Screen,
}

impl FrameBuffer {
    pub fn new() -> FrameBuffer {
        FrameBuffer { cells: EMPTY_SCREEN }
    }

    pub fn clear(&mut self) {
        self.cells = EMPTY_SCREEN;
    }

    /// Pixel at `(row, col)`, 0 or 1. Out of range reads as 0.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_on(&self, row: usize, col: usize) -> bool {
        self.get(row, col) != 0
    }

    pub fn rows(&self) -> &Screen {
        &self.cells
    }

    /// XOR a sprite onto the screen with its top-left corner at
    /// `(x mod 64, y mod 32)`. Each byte of `sprite` is one 8-pixel row,
    /// most significant bit leftmost. Pixels past the right or bottom edge
    /// are clipped, or wrapped when `wrap` is set.
    ///
    /// Returns true if any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8], wrap: bool) -> bool {
        let origin_x = x as usize % SCREEN_WIDTH;
        let origin_y = y as usize % SCREEN_HEIGHT;
        let mut collision = false;

        for (r, row) in sprite.iter().enumerate() {
            let mut py = origin_y + r;
            if py >= SCREEN_HEIGHT {
                if !wrap {
                    break;
                }
                py %= SCREEN_HEIGHT;
            }

            for c in 0..8 {
                if (row >> (7 - c)) & 1 == 0 {
                    continue;
                }
                let mut px = origin_x + c;
                if px >= SCREEN_WIDTH {
                    if !wrap {
                        break;
                    }
                    px %= SCREEN_WIDTH;
                }

                let cell = &mut self.cells[py][px];
                if *cell == 1 {
                    collision = true;
                }
                *cell ^= 1;
            }
        }

        collision
    }

    pub fn lit_pixels(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|c| **c != 0).count())
            .sum()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for c in row.iter() {
                write!(f, "{}", if *c == 1 { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FrameBuffer {{")?;
        write!(f, "{}", self)?;
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sprite_rows_map_to_pixels() {
        let mut fb = FrameBuffer::new();
        let collision = fb.draw_sprite(0, 0, &[0xFF, 0x81], false);
        assert!(!collision);
        assert!((0..8).all(|c| fb.is_on(0, c)));
        assert!(fb.is_on(1, 0) && fb.is_on(1, 7));
        assert!((1..7).all(|c| !fb.is_on(1, c)));
        assert_eq!(fb.lit_pixels(), 10);
    }

    #[test]
    fn drawing_twice_erases_and_collides() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(3, 4, &[0xF0, 0x0F], false);
        assert!(fb.draw_sprite(3, 4, &[0xF0, 0x0F], false));
        assert_eq!(fb, FrameBuffer::new());
    }

    #[test]
    fn coordinates_are_taken_modulo_screen_size() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(64 + 2, 32 + 1, &[0x80], false);
        assert!(fb.is_on(1, 2));
    }

    #[test]
    fn bottom_edge_clips() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(0, 31, &[0x80, 0x80, 0x80, 0x80], false);
        assert_eq!(fb.lit_pixels(), 1);
        assert!(fb.is_on(31, 0));
        assert!(!fb.is_on(0, 0));
    }

    #[test]
    fn right_edge_clips() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(60, 0, &[0xFF], false);
        assert_eq!(fb.lit_pixels(), 4);
        assert!(!fb.is_on(0, 0));
    }

    #[test]
    fn wrapping_draws_on_opposite_edges() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(62, 31, &[0xC0 | 0x30, 0x80], true);
        assert!(fb.is_on(31, 62) && fb.is_on(31, 63));
        assert!(fb.is_on(31, 0) && fb.is_on(31, 1));
        assert!(fb.is_on(0, 62));
    }

    #[test]
    fn display_renders_hashes() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(0, 0, &[0xA0], false);
        let text = fb.to_string();
        assert!(text.starts_with("# #  "));
        assert_eq!(text.lines().count(), SCREEN_HEIGHT);
    }

    #[test]
    fn out_of_range_reads_zero() {
        assert_eq!(FrameBuffer::new().get(40, 70), 0);
    }
}
