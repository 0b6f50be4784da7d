use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimensions { width: usize, height: usize },
    #[error("grid of {width}x{height} cells does not fit 32-bit node indices")]
    TooLarge { width: usize, height: usize },
    #[error("cell size must be a positive finite number (got {0})")]
    InvalidCellSize(f32),
    #[error("search cap must be at least 1")]
    InvalidSearchCap,
}
