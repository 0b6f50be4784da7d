use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gridpath_core::Point;
use serde::{Deserialize, Serialize};

use crate::prepared::ResultKind;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Search a path to this world point.
    Point(Point),
    /// Sample a random walkable waypoint within this radius of the start.
    Radius(f32),
}

/// Shared liveness flag for whoever issued a request. Once revoked, queued
/// work for that owner is skipped.
#[derive(Clone, Debug)]
pub struct OwnerToken(Arc<AtomicBool>);

impl OwnerToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for OwnerToken {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct SearchRequest {
    pub start: Point,
    pub target: Target,
    pub owner: Option<OwnerToken>,
}

impl SearchRequest {
    pub fn path(start: Point, goal: Point) -> Self {
        Self { start, target: Target::Point(goal), owner: None }
    }

    pub fn random_around(start: Point, radius: f32) -> Self {
        Self { start, target: Target::Radius(radius), owner: None }
    }

    pub fn with_owner(mut self, owner: OwnerToken) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn kind(&self) -> ResultKind {
        match self.target {
            Target::Point(_) => ResultKind::Path,
            Target::Radius(_) => ResultKind::RandomPoint,
        }
    }

    pub fn owner_alive(&self) -> bool {
        self.owner.as_ref().map_or(true, OwnerToken::is_alive)
    }

    /// Start (and goal, for path searches) must be non-zero vectors and the
    /// owner, if any, must still be alive.
    pub fn is_valid(&self) -> bool {
        let target_ok = match self.target {
            Target::Point(goal) => goal.length() > 0.0,
            Target::Radius(_) => true,
        };
        self.start.length() > 0.0 && target_ok && self.owner_alive()
    }
}
