/// width of the canonical CHIP-8 display in pixels
pub const CHIP8_DISPLAY_WIDTH: usize = 64;
/// height of the canonical CHIP-8 display in pixels
pub const CHIP8_DISPLAY_HEIGHT: usize = 32;

/// sprites are always one byte wide
const SPRITE_WIDTH: usize = 8;

/// Monochrome pixel grid, row-major. Only the interpreter writes it; renderers
/// read it through `get` / `rows`.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new(CHIP8_DISPLAY_WIDTH, CHIP8_DISPLAY_HEIGHT)
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&p| if p { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl Framebuffer {
    /// panics if either dimension is zero
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "framebuffer must be at least 1x1, got {}x{}",
            width,
            height
        );
        Framebuffer {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// pixel state; coordinates wrap
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[self.offset(x, y)]
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.pixels.chunks(self.width)
    }

    /// how many pixels are lit
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// XOR a sprite onto the grid with its top-left corner at (x, y). each
    /// byte of `sprite` is one row, msb leftmost. pixels past an edge wrap to
    /// the opposite side. returns true if any lit pixel was turned off
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            for col in 0..SPRITE_WIDTH {
                if byte & (0x80 >> col) == 0 {
                    continue;
                }
                let i = self.offset(x + col, y + row);
                collision |= self.pixels[i];
                self.pixels[i] ^= true;
            }
        }
        collision
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        (y % self.height) * self.width + (x % self.width)
    }
}
