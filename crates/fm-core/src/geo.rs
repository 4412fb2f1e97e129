//! Grid coordinates and distance helpers.
//!
//! The market lives on a bounded, non-wrapping `width × height` grid.  All
//! travel is measured in Chebyshev distance: a carrier moves one cell in any
//! of the eight directions per unit of speed.

use std::fmt;

/// A grid cell, `(x, y)` with `0 <= x < width` and `0 <= y < height`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance to `other`.
    #[inline]
    pub fn distance(self, other: Cell) -> u32 {
        chebyshev(self, other)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Max of the absolute per-axis differences.
#[inline]
pub fn chebyshev(a: Cell, b: Cell) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

/// Integer division rounding up.
///
/// # Panics
/// Panics if `b == 0`.  Config validation guarantees a non-zero speed.
#[inline]
pub fn ceil_div(a: u64, b: u64) -> u64 {
    a.div_ceil(b)
}

// ── GridBounds ────────────────────────────────────────────────────────────────

/// Dimensions of the market grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    pub width:  u32,
    pub height: u32,
}

impl GridBounds {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Number of cells in the grid.
    #[inline]
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of `cell`.  Caller must check `contains` first.
    #[inline]
    pub fn flat_index(self, cell: Cell) -> usize {
        cell.y as usize * self.width as usize + cell.x as usize
    }

    /// Clamp `(x, y)` given as signed offsets onto the grid.
    #[inline]
    pub fn clamp(self, x: i64, y: i64) -> Cell {
        let max_x = i64::from(self.width.saturating_sub(1));
        let max_y = i64::from(self.height.saturating_sub(1));
        Cell::new(x.clamp(0, max_x) as u32, y.clamp(0, max_y) as u32)
    }

    /// Inclusive `(min, max)` corners of the radius-`r` block around
    /// `center`, cut at the grid border.
    pub fn block(self, center: Cell, radius: u32) -> (Cell, Cell) {
        let min = Cell::new(center.x.saturating_sub(radius), center.y.saturating_sub(radius));
        let max = Cell::new(
            center.x.saturating_add(radius).min(self.width.saturating_sub(1)),
            center.y.saturating_add(radius).min(self.height.saturating_sub(1)),
        );
        (min, max)
    }
}

impl fmt::Display for GridBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
