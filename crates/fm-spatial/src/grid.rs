//! Bounded multi-occupancy grid index.
//!
//! # Data layout
//!
//! Occupants are stored per cell in a row-major `Vec<Vec<E>>`:
//!
//! ```text
//! cells[ y * width + x ]  →  occupants in insertion order
//! ```
//!
//! A reverse map `E → Cell` makes `remove` and `location` O(1) lookups
//! followed by a short scan of one cell.  Iteration never touches the hash
//! map, so query results are deterministic for a given placement history.

use std::fmt::Display;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use fm_core::{Cell, GridBounds};

use crate::{SpatialError, SpatialResult};

/// Entity → cell occupancy over a bounded, non-wrapping grid.
///
/// Any number of entities may share a cell.  Each entity occupies at most
/// one cell; placing it twice without a `remove` in between is an error.
#[derive(Clone, Debug)]
pub struct GridIndex<E> {
    bounds:   GridBounds,
    cells:    Vec<Vec<E>>,
    location: FxHashMap<E, Cell>,
}

impl<E> GridIndex<E>
where
    E: Copy + Eq + Hash + Display,
{
    /// An empty index over `bounds`.
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            cells:    vec![Vec::new(); bounds.area()],
            location: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Number of placed entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.location.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.location.is_empty()
    }

    #[inline]
    pub fn contains(&self, entity: E) -> bool {
        self.location.contains_key(&entity)
    }

    /// The cell `entity` occupies, if placed.
    #[inline]
    pub fn location(&self, entity: E) -> Option<Cell> {
        self.location.get(&entity).copied()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Add `entity` to `cell`'s occupants.
    pub fn place(&mut self, entity: E, cell: Cell) -> SpatialResult<()> {
        if !self.bounds.contains(cell) {
            return Err(SpatialError::OutOfBounds { cell, bounds: self.bounds });
        }
        if let Some(&at) = self.location.get(&entity) {
            return Err(SpatialError::AlreadyPlaced { entity: entity.to_string(), cell: at });
        }
        self.cells[self.bounds.flat_index(cell)].push(entity);
        self.location.insert(entity, cell);
        Ok(())
    }

    /// Remove `entity` from whichever cell holds it; returns that cell.
    pub fn remove(&mut self, entity: E) -> SpatialResult<Cell> {
        let cell = self
            .location
            .remove(&entity)
            .ok_or_else(|| SpatialError::NotPlaced(entity.to_string()))?;
        let occupants = &mut self.cells[self.bounds.flat_index(cell)];
        if let Some(pos) = occupants.iter().position(|&e| e == entity) {
            // `remove`, not `swap_remove`: occupancy order is insertion order.
            occupants.remove(pos);
        }
        Ok(cell)
    }

    /// Move `entity` to `cell`.  Equivalent to `remove` then `place`.
    pub fn relocate(&mut self, entity: E, cell: Cell) -> SpatialResult<()> {
        if !self.bounds.contains(cell) {
            return Err(SpatialError::OutOfBounds { cell, bounds: self.bounds });
        }
        self.remove(entity)?;
        self.place(entity, cell)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Occupants of a single cell, in insertion order.  Empty outside the grid.
    pub fn cell_contents(&self, cell: Cell) -> &[E] {
        if !self.bounds.contains(cell) {
            return &[];
        }
        &self.cells[self.bounds.flat_index(cell)]
    }

    /// All entities within Chebyshev distance `radius` of `center`.
    ///
    /// Cells are visited row-major (y, then x); within a cell, entities come
    /// back in insertion order.  The block is cut at the grid border, and a
    /// center outside the grid yields whatever part of its block overlaps.
    pub fn neighbors(&self, center: Cell, radius: u32, include_center: bool) -> Vec<E> {
        let mut out = Vec::new();
        if self.bounds.area() == 0 {
            return out;
        }
        let (min, max) = self.bounds.block(center, radius);
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                let cell = Cell::new(x, y);
                if !include_center && cell == center {
                    continue;
                }
                out.extend_from_slice(self.cell_contents(cell));
            }
        }
        out
    }

    /// Every placed entity with its cell, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, E)> + '_ {
        let width = self.bounds.width;
        self.cells.iter().enumerate().flat_map(move |(i, occupants)| {
            let cell = Cell::new(i as u32 % width, i as u32 / width);
            occupants.iter().map(move |&e| (cell, e))
        })
    }
}
