use gridpath_core::{EngineOptions, GridModel, PathEngine};

use crate::errors::HandlerError;

/// Character map used by the `gridpath` binary: `#` is collidable, any other
/// character is walkable. Short rows are padded with walkable cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiMap {
    pub width: usize,
    pub height: usize,
    pub blocked: Vec<bool>,
}

impl AsciiMap {
    pub fn parse(text: &str) -> Result<Self, HandlerError> {
        let rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        let height = rows.iter().rposition(|r| !r.is_empty()).map(|i| i + 1).ok_or(HandlerError::EmptyMap)?;
        let rows = &rows[..height];
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        if width == 0 {
            return Err(HandlerError::EmptyMap);
        }

        let mut blocked = vec![false; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                blocked[x + width * y] = ch == '#';
            }
        }
        Ok(Self { width, height, blocked })
    }

    pub fn to_grid(&self, cell_size: f32) -> Result<GridModel, HandlerError> {
        Ok(GridModel::from_flags(self.width, self.height, cell_size, &self.blocked)?)
    }

    pub fn to_engine(&self, options: &EngineOptions) -> Result<PathEngine, HandlerError> {
        let grid = self.to_grid(options.cell_size)?;
        Ok(PathEngine::new(grid, options)?)
    }
}
