use gridpath_core::GridError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("failed to start worker pool: {0}")]
    Runtime(#[source] std::io::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("map contains no rows")]
    EmptyMap,
}
