//! Rectangle type for tile and band geometry.
//!
//! Tiles in the lens blur start at negative offsets (they are padded by the
//! blur radius on every side), so the origin is signed while the extent is
//! unsigned.
//!
//! # Coordinate System
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │  Region  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use tilt_core::Rect;
//!
//! let tile = Rect::new(-10, -10, 128, 128);
//! let image = Rect::from_size(100, 60);
//! let clipped = tile.intersect(&image).unwrap();
//! assert_eq!(clipped, Rect::new(0, 0, 100, 60));
//! ```

/// A rectangle defined by a signed origin and unsigned dimensions.
///
/// Right and bottom edges are exclusive. A rectangle with zero width or
/// height is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: i64,
    /// Y coordinate of the top edge (inclusive)
    pub y: i64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin, covering a whole image.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    /// Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }

    /// Area in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the point lies inside the rectangle.
    ///
    /// ```rust
    /// use tilt_core::Rect;
    ///
    /// let rect = Rect::new(-2, 0, 4, 4);
    /// assert!(rect.contains(-2, 0));
    /// assert!(!rect.contains(2, 0));
    /// ```
    #[inline]
    pub const fn contains(&self, px: i64, py: i64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Returns `true` if this rectangle fully contains another.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns the overlapping region, or `None` when the rectangles are disjoint.
    #[inline]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, (right - x) as u32, (bottom - y) as u32))
        } else {
            None
        }
    }

    /// Shrinks every edge by `amount`.
    ///
    /// Returns `None` if nothing would be left.
    ///
    /// ```rust
    /// use tilt_core::Rect;
    ///
    /// let tile = Rect::new(-8, -8, 64, 64);
    /// assert_eq!(tile.inset(8), Some(Rect::new(0, 0, 48, 48)));
    /// assert_eq!(tile.inset(32), None);
    /// ```
    #[inline]
    pub fn inset(&self, amount: u32) -> Option<Rect> {
        let twice = amount.checked_mul(2)?;
        if twice >= self.width || twice >= self.height {
            return None;
        }
        Some(Rect::new(
            self.x + amount as i64,
            self.y + amount as i64,
            self.width - twice,
            self.height - twice,
        ))
    }
}
