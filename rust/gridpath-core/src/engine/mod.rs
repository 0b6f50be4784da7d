pub mod neighbors;
pub mod open_set;
pub mod search;

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::Rng;
use tracing::{debug, info};

use crate::errors::GridError;
use crate::grid::GridModel;
use crate::models::{Cell, Point};
use crate::nodes::SearchScratch;
use crate::options::EngineOptions;
use crate::sampler::{self, SampleArea};

pub use neighbors::neighbors4;
pub use open_set::OpenSet;
pub use search::{find_path, SearchOutcome, SearchStatus};

/// One traversability grid plus the single set of search buffers that every
/// query against it shares.
///
/// The buffers sit behind one mutex, so searches against the same engine run
/// strictly one at a time in lock-acquisition order. The grid itself is
/// immutable and read without locking.
#[derive(Debug)]
pub struct PathEngine {
    grid: GridModel,
    search_cap: usize,
    scratch: Mutex<SearchScratch>,
}

impl PathEngine {
    pub fn new(grid: GridModel, options: &EngineOptions) -> Result<Self, GridError> {
        options.validate()?;
        info!(width = grid.width(), height = grid.height(), search_cap = options.search_cap, "path engine ready");
        Ok(Self {
            grid,
            search_cap: options.search_cap,
            scratch: Mutex::new(SearchScratch::new(options.open_set_capacity())),
        })
    }

    /// Builds the grid with `options.cell_size` and wraps it in an engine.
    pub fn build<F>(width: usize, height: usize, options: &EngineOptions, collision_test: F) -> Result<Self, GridError>
    where
        F: Fn(f32, f32) -> bool,
    {
        options.validate()?;
        let grid = GridModel::build(width, height, options.cell_size, collision_test)?;
        Self::new(grid, options)
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn search_cap(&self) -> usize {
        self.search_cap
    }

    // Scratch is fully reinitialized before every use, so a panic in an
    // earlier holder leaves nothing behind that matters.
    fn lock_scratch(&self) -> MutexGuard<'_, SearchScratch> {
        self.scratch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs A* between two world points, both clamped onto the grid.
    pub fn find_path(&self, start: Point, goal: Point) -> SearchOutcome {
        let start = self.grid.clamp_world(start);
        let goal = self.grid.clamp_world(goal);
        let mut scratch = self.lock_scratch();
        let mut store = scratch.init(&self.grid);
        search::find_path(&mut store, start, goal, self.search_cap)
    }

    /// Cell-centred world points of `outcome`'s path. Empty when no path exists.
    pub fn path_points(&self, outcome: &SearchOutcome) -> Vec<Point> {
        outcome.path.iter().map(|&c| self.grid.cell_center(c)).collect()
    }

    /// Uniformly chosen walkable cell anywhere on the grid.
    pub fn sample_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        let _guard = self.lock_scratch();
        sampler::sample_cell(&self.grid, None, rng)
    }

    /// Uniformly chosen walkable cell inside the radius box around `center`.
    pub fn sample_cell_radius<R: Rng + ?Sized>(&self, center: Point, radius: f32, rng: &mut R) -> Option<Cell> {
        let area = SampleArea::around(&self.grid, center, radius);
        let _guard = self.lock_scratch();
        let cell = sampler::sample_cell(&self.grid, Some(area), rng);
        debug!(?center, radius, ?area, ?cell, "sampled waypoint");
        cell
    }

    /// World origin of a random walkable cell, or [`Point::ZERO`] if there is none.
    pub fn random_waypoint(&self) -> Point {
        self.sample_cell(&mut rand::thread_rng()).map(|c| self.grid.cell_origin(c)).unwrap_or(Point::ZERO)
    }

    /// As [`PathEngine::random_waypoint`], restricted to the radius box around `center`.
    pub fn random_waypoint_radius(&self, center: Point, radius: f32) -> Point {
        self.sample_cell_radius(center, radius, &mut rand::thread_rng())
            .map(|c| self.grid.cell_origin(c))
            .unwrap_or(Point::ZERO)
    }
}
