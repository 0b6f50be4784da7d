use serde::{Deserialize, Serialize};

use crate::errors::GridError;

pub const DEFAULT_CELL_SIZE: f32 = 32.0;
pub const DEFAULT_SEARCH_CAP: usize = 50_000;
/// Open set capacity per unit of search cap. Every closed node pushes at most
/// four neighbours, so `4 * search_cap` insertions can never overflow.
pub const OPEN_SET_FACTOR: usize = 4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// World units per grid cell.
    pub cell_size: f32,
    /// Maximum number of closed nodes per search.
    pub search_cap: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { cell_size: DEFAULT_CELL_SIZE, search_cap: DEFAULT_SEARCH_CAP }
    }
}

impl EngineOptions {
    pub fn validate(&self) -> Result<(), GridError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(GridError::InvalidCellSize(self.cell_size));
        }
        if self.search_cap == 0 {
            return Err(GridError::InvalidSearchCap);
        }
        Ok(())
    }

    pub fn open_set_capacity(&self) -> usize {
        self.search_cap.saturating_mul(OPEN_SET_FACTOR)
    }
}
