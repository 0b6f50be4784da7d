use serde::Serialize;
use tracing::debug;

use crate::models::Cell;
use crate::nodes::NodeStore;
use crate::options::OPEN_SET_FACTOR;

use super::neighbors::neighbors4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// The goal cell was closed.
    Reached,
    /// The open set ran dry; the goal cannot be reached from the start.
    NoPath,
    /// The closed-node cap stopped the search. The path is a best-effort
    /// prefix towards wherever the frontier stalled.
    CapReached,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    /// Start cell excluded; ends at the terminal closed cell.
    pub path: Vec<Cell>,
    /// Closed nodes at termination, start included.
    pub closed: usize,
}

impl SearchOutcome {
    pub fn no_path(closed: usize) -> Self {
        Self { status: SearchStatus::NoPath, path: Vec::new(), closed }
    }

    pub fn found(&self) -> bool {
        self.status == SearchStatus::Reached
    }
}

/// Uniform-cost 4-connected A* with a Manhattan heuristic.
///
/// `start` and `goal` must already lie on the grid. The search stops once
/// `search_cap` nodes are closed; the cap is lowered if needed so the open set
/// of `store` can never overflow.
pub fn find_path(store: &mut NodeStore<'_>, start: Cell, goal: Cell, search_cap: usize) -> SearchOutcome {
    let grid = store.grid();
    let (Some(start_idx), Some(goal_idx)) = (grid.index(start), grid.index(goal)) else {
        return SearchOutcome::no_path(0);
    };
    let cap = search_cap.min(store.open_capacity() / OPEN_SET_FACTOR).max(1);

    store.close_root(start_idx);
    let mut current = start_idx;

    while store.closed_count() < cap && current != goal_idx {
        let g_next = store.node(current).g + 1;
        for next in neighbors4(grid, current) {
            let node = *store.node(next);
            if !node.is_candidate() {
                continue;
            }
            if !node.open {
                store.open_node(next, current, g_next, node.cell.manhattan(goal));
            } else if g_next < node.g {
                store.improve(next, current, g_next);
            }
        }

        match store.close_min() {
            Some(index) => current = index,
            None => {
                debug!(closed = store.closed_count(), ?start, ?goal, "open set exhausted");
                return SearchOutcome::no_path(store.closed_count());
            }
        }
    }

    let status = if current == goal_idx { SearchStatus::Reached } else { SearchStatus::CapReached };
    let path = store.backtrack(current);
    debug!(closed = store.closed_count(), path_len = path.len(), ?status, "search finished");
    SearchOutcome { status, path, closed: store.closed_count() }
}
