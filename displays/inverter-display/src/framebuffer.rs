//! 1-bit framebuffer
//!
//! Page-organized like the SH1106/SSD1306 controllers: each byte holds a
//! vertical run of 8 pixels, least significant bit on top. A page can be
//! sent to the panel as-is.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use inverter_hal::Rect;

/// Width in pixels
pub const WIDTH: usize = 128;

/// Height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-pixel pages
pub const PAGES: usize = HEIGHT / 8;

/// Monochrome framebuffer
#[derive(Clone)]
pub struct Framebuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Create a framebuffer with every pixel off
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    /// Screen bounds as a host rectangle
    pub const fn bounds() -> Rect {
        Rect::screen(WIDTH as u16, HEIGHT as u16)
    }

    /// Set every pixel
    pub fn fill(&mut self, on: bool) {
        let byte = if on { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(byte);
        }
    }

    /// Get a pixel (`false` outside the screen)
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match Self::locate(x, y) {
            Some((page, col, mask)) => self.pages[page][col] & mask != 0,
            None => false,
        }
    }

    /// Set a pixel, ignoring coordinates outside the screen
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((page, col, mask)) = Self::locate(x, y) {
            if on {
                self.pages[page][col] |= mask;
            } else {
                self.pages[page][col] &= !mask;
            }
        }
    }

    /// Flip every pixel inside `area` (clipped to the screen)
    pub fn invert_area(&mut self, area: &Rect) {
        let Some(area) = area.intersection(&Self::bounds()) else {
            return;
        };

        let x0 = area.x as usize;
        let x1 = area.right() as usize;
        for y in area.y as usize..area.bottom() as usize {
            let mask = 1u8 << (y % 8);
            for byte in &mut self.pages[y / 8][x0..x1] {
                *byte ^= mask;
            }
        }
    }

    /// Get one page (8 rows) of pixel data
    pub fn page(&self, index: usize) -> &[u8; WIDTH] {
        &self.pages[index]
    }

    /// Get every page
    pub fn pages(&self) -> &[[u8; WIDTH]; PAGES] {
        &self.pages
    }

    /// Count pixels that are on (mostly useful in tests)
    pub fn lit_pixels(&self) -> u32 {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .map(|byte| byte.count_ones())
            .sum()
    }

    fn locate(x: i32, y: i32) -> Option<(usize, usize, u8)> {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((y / 8, x, 1 << (y % 8)))
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}
