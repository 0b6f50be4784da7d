use bitvec::vec::BitVec;
use tracing::info;

use crate::errors::GridError;
use crate::models::{Cell, Point};

/// Immutable traversability grid. Built once from a collision predicate and
/// never mutated afterwards, so it can be read from any thread without locking.
#[derive(Clone, Debug)]
pub struct GridModel {
    width: usize,
    height: usize,
    cell_size: f32,
    collidable: BitVec,
}

impl GridModel {
    /// Samples `collision_test` once at the centre of every cell, in world
    /// coordinates, and freezes the result.
    pub fn build<F>(width: usize, height: usize, cell_size: f32, collision_test: F) -> Result<Self, GridError>
    where
        F: Fn(f32, f32) -> bool,
    {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimensions { width, height });
        }
        let cells = width.checked_mul(height).filter(|&n| n < u32::MAX as usize && width <= i32::MAX as usize && height <= i32::MAX as usize);
        let Some(cells) = cells else {
            return Err(GridError::TooLarge { width, height });
        };
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(GridError::InvalidCellSize(cell_size));
        }

        let half = cell_size / 2.0;
        let mut collidable = BitVec::repeat(false, cells);
        for y in 0..height {
            for x in 0..width {
                let wx = x as f32 * cell_size + half;
                let wy = y as f32 * cell_size + half;
                if collision_test(wx, wy) {
                    collidable.set(x + width * y, true);
                }
            }
        }
        let grid = Self { width, height, cell_size, collidable };
        info!(width, height, cell_size, blocked = grid.collidable.count_ones(), "built traversability grid");
        Ok(grid)
    }

    /// Builds a grid from row-major collidable flags, one per cell.
    pub fn from_flags(width: usize, height: usize, cell_size: f32, flags: &[bool]) -> Result<Self, GridError> {
        let cs = cell_size;
        Self::build(width, height, cell_size, |wx, wy| {
            let x = (wx / cs) as usize;
            let y = (wy / cs) as usize;
            flags.get(x + width * y).copied().unwrap_or(true)
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.collidable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collidable.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// `x + width * y`, or `None` when the cell lies outside the grid.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some(cell.x as usize + self.width * cell.y as usize)
    }

    pub fn cell_of(&self, index: usize) -> Cell {
        Cell::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub fn is_collidable(&self, index: usize) -> bool {
        self.collidable.get(index).map(|b| *b).unwrap_or(true)
    }

    /// Maps a world point onto the grid, truncating towards zero and clamping
    /// into `[0, W-1] x [0, H-1]`.
    pub fn clamp_world(&self, p: Point) -> Cell {
        let x = ((p.x / self.cell_size) as i32).clamp(0, self.width as i32 - 1);
        let y = ((p.y / self.cell_size) as i32).clamp(0, self.height as i32 - 1);
        Cell::new(x, y)
    }

    pub fn cell_center(&self, cell: Cell) -> Point {
        let half = self.cell_size / 2.0;
        Point::new(cell.x as f32 * self.cell_size + half, cell.y as f32 * self.cell_size + half)
    }

    pub fn cell_origin(&self, cell: Cell) -> Point {
        Point::new(cell.x as f32 * self.cell_size, cell.y as f32 * self.cell_size)
    }

    /// Indices of all non-collidable cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.collidable.iter_zeros()
    }

    pub fn open_count(&self) -> usize {
        self.collidable.count_zeros()
    }
}
