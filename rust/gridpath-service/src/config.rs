use std::env;

use gridpath_core::options::{DEFAULT_CELL_SIZE, DEFAULT_SEARCH_CAP};
use gridpath_core::EngineOptions;

pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_TICK_MS: u64 = 20;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Blocking threads available to search tasks.
    pub workers: usize,
    /// Poll interval used by tick-driven callers.
    pub tick_ms: u64,
    pub engine: EngineOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self { workers: DEFAULT_WORKERS, tick_ms: DEFAULT_TICK_MS, engine: EngineOptions::default() }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`; missing or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let workers = lookup("GRIDPATH_WORKERS")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_WORKERS);
        let tick_ms = lookup("GRIDPATH_TICK_MS").and_then(|s| s.parse::<u64>().ok()).unwrap_or(DEFAULT_TICK_MS);
        let cell_size = lookup("GRIDPATH_CELL_SIZE")
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(DEFAULT_CELL_SIZE);
        let search_cap = lookup("GRIDPATH_SEARCH_CAP")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_SEARCH_CAP);

        Self { workers, tick_ms, engine: EngineOptions { cell_size, search_cap } }
    }
}
