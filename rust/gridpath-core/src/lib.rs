pub mod models;
pub mod errors;
pub mod options;
pub mod grid;
pub mod nodes;
pub mod engine;
pub mod sampler;

pub use models::{Cell, Point};
pub use errors::GridError;
pub use options::EngineOptions;
pub use grid::GridModel;
pub use nodes::{NodeStore, Parent, SearchNode, SearchScratch};
pub use engine::{OpenSet, PathEngine, SearchOutcome, SearchStatus};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
