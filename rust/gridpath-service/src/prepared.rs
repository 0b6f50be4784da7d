use gridpath_core::Point;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// Cell-centred steps from the start towards the goal, start excluded.
    Path,
    /// At most one point: the origin of the sampled cell.
    RandomPoint,
}

/// Finished request output. Handed out once by
/// [`PathRequestHandle::poll_ready`](crate::PathRequestHandle::poll_ready) and
/// owned by the caller from then on.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PreparedResult {
    kind: ResultKind,
    points: Vec<Point>,
}

impl PreparedResult {
    pub fn new(kind: ResultKind, points: Vec<Point>) -> Self {
        Self { kind, points }
    }

    pub fn empty(kind: ResultKind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// One-time adjustment of the caller's target bookkeeping on delivery.
    pub(crate) fn prepare(&self, tracking: &mut TargetTracking) {
        match self.kind {
            ResultKind::RandomPoint => {
                if let Some(&p) = self.points.first() {
                    tracking.target = p;
                    tracking.old_target = p;
                }
            }
            ResultKind::Path => tracking.old_target = tracking.target,
        }
    }
}

/// Target a consumer is moving towards and the target its current path was
/// computed for. They differ once the consumer retargets, which marks the
/// held path as stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TargetTracking {
    pub target: Point,
    pub old_target: Point,
}

impl TargetTracking {
    pub fn new(target: Point) -> Self {
        Self { target, old_target: Point::ZERO }
    }

    pub fn retarget(&mut self, target: Point) {
        self.target = target;
    }

    pub fn is_stale(&self) -> bool {
        self.target != self.old_target
    }
}
