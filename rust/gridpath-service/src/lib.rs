pub mod ascii_map;
pub mod config;
pub mod errors;
pub mod handler;
pub mod prepared;
pub mod request;

pub use config::Config;
pub use errors::HandlerError;
pub use handler::{execute, AsyncRequestHandler, PathRequestHandle};
pub use prepared::{PreparedResult, ResultKind, TargetTracking};
pub use request::{OwnerToken, SearchRequest, Target};
