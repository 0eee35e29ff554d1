//! Screen geometry and colors

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rectangle in screen coordinates
///
/// The origin may lie off-screen (negative or past the edge); hosts clip
/// when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge
    pub x: i16,
    /// Top edge
    pub y: i16,
    /// Width in pixels
    pub w: u16,
    /// Height in pixels
    pub h: u16,
}

impl Rect {
    /// Create a rectangle from origin and size
    pub const fn new(x: i16, y: i16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle at the origin covering `w` x `h`
    pub const fn screen(w: u16, h: u16) -> Self {
        Self::new(0, 0, w, h)
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.x as i32 + self.w as i32
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.y as i32 + self.h as i32
    }

    /// Check if the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Intersection of two rectangles, or `None` if they do not overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = (self.x as i32).max(other.x as i32);
        let top = (self.y as i32).max(other.y as i32);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return None;
        }

        Some(Rect::new(
            left as i16,
            top as i16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }

    /// Translate by an offset (used to map child frames to screen space)
    pub fn offset(&self, dx: i16, dy: i16) -> Rect {
        Rect::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.w,
            self.h,
        )
    }
}

/// Two-tone palette of the watch display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    /// Pixel off
    #[default]
    Black,
    /// Pixel on
    White,
    /// Transparent - nothing is drawn
    Clear,
}
