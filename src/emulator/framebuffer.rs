//! The monochrome display model.

use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
type Cells = [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT];
const EMPTY_SCREEN: Cells = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// A grid of on/off pixels, together with a flag telling
/// a presenter that something changed since it last looked.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    cells: Cells,
    dirty: bool,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for c in row.iter() {
                write!(f, "{}", if *c { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Framebuffer (dirty: {})", self.dirty)?;
        write!(f, "{}", self)
    }
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer {
            cells: EMPTY_SCREEN,
            dirty: false,
        }
    }

    /// Whether the pixel at `(x, y)` is on. Off-screen pixels are always off.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; SCREEN_WIDTH]> {
        self.cells.iter()
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.cells = EMPTY_SCREEN;
        self.dirty = true;
    }

    /// XOR an 8-pixel-wide sprite onto the screen with its top left corner at `(x, y)`.
    ///
    /// The origin wraps around the screen, while the pixels that then fall past
    /// the right or bottom edge are clipped. Returns whether any pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let x_coord = x % SCREEN_WIDTH;
        let y_coord = y % SCREEN_HEIGHT;

        let mut any_collisions = false;
        for (dy, row) in sprite.iter().enumerate() {
            let y = y_coord + dy;
            if y >= SCREEN_HEIGHT {
                break;
            }
            for dx in 0..8 {
                let x = x_coord + dx;
                if x >= SCREEN_WIDTH {
                    break;
                }
                if (*row >> (7 - dx)) & 1 == 0 {
                    continue;
                }
                let pixel = &mut self.cells[y][x];
                if *pixel {
                    any_collisions = true;
                }
                *pixel = !*pixel;
                self.dirty = true;
            }
        }

        any_collisions
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by a presenter once it has shown the current contents.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
