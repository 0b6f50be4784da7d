use std::sync::Arc;

use gridpath_core::PathEngine;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::HandlerError;
use crate::prepared::{PreparedResult, ResultKind, TargetTracking};
use crate::request::{SearchRequest, Target};

/// Runs path searches and waypoint sampling for one engine on a worker pool
/// and hands results back through pollable handles.
///
/// Tasks execute on blocking worker threads. All of them funnel through the
/// engine's single scratch lock, so work for one engine is serialized no
/// matter how many workers are available.
pub struct AsyncRequestHandler {
    engine: Arc<PathEngine>,
    handle: Handle,
    /// Present only when the handler started its own pool.
    runtime: Option<Runtime>,
}

impl AsyncRequestHandler {
    /// Starts a private pool with `workers` blocking threads.
    pub fn new(engine: Arc<PathEngine>, workers: usize) -> Result<Self, HandlerError> {
        let workers = workers.max(1);
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(workers)
            .thread_name("gridpath-worker")
            .build()
            .map_err(HandlerError::Runtime)?;
        info!(workers, "started path worker pool");
        Ok(Self { engine, handle: runtime.handle().clone(), runtime: Some(runtime) })
    }

    pub fn from_config(engine: Arc<PathEngine>, config: &Config) -> Result<Self, HandlerError> {
        Self::new(engine, config.workers)
    }

    /// Submits work onto a runtime owned by the caller.
    pub fn with_runtime(engine: Arc<PathEngine>, handle: Handle) -> Self {
        Self { engine, handle, runtime: None }
    }

    /// Never blocks. Invalid requests come back already resolved with an
    /// empty result and schedule no work.
    pub fn submit(&self, request: SearchRequest) -> PathRequestHandle {
        let kind = request.kind();
        if !request.is_valid() {
            warn!(start = ?request.start, target = ?request.target, "rejected invalid path request");
            return PathRequestHandle::resolved(PreparedResult::empty(kind));
        }

        let (tx, rx) = oneshot::channel();
        let engine = Arc::clone(&self.engine);
        let _task = self.handle.spawn_blocking(move || {
            let result = execute(&engine, &request);
            // Receiver gone means the caller abandoned the handle.
            let _ = tx.send(result);
        });
        PathRequestHandle { kind, state: HandleState::Pending(rx) }
    }
}

impl Drop for AsyncRequestHandler {
    // Never waits on workers. Queued tasks are dropped, so their handles
    // resolve empty; tasks already running finish on detached threads.
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
            debug!("path worker pool shut down");
        }
    }
}

/// Synchronous body of a submitted task. Takes the engine lock for the
/// duration of the search or sample.
pub fn execute(engine: &PathEngine, request: &SearchRequest) -> PreparedResult {
    let kind = request.kind();
    if !request.is_valid() {
        debug!("owner gone before request ran");
        return PreparedResult::empty(kind);
    }
    match request.target {
        Target::Point(goal) => {
            let outcome = engine.find_path(request.start, goal);
            let points = engine.path_points(&outcome);
            debug!(status = ?outcome.status, closed = outcome.closed, points = points.len(), "path request done");
            PreparedResult::new(kind, points)
        }
        Target::Radius(radius) => {
            let cell = engine.sample_cell_radius(request.start, radius, &mut rand::thread_rng());
            PreparedResult::new(kind, cell.map(|c| engine.grid().cell_origin(c)).into_iter().collect())
        }
    }
}

enum HandleState {
    Ready(PreparedResult),
    Pending(oneshot::Receiver<PreparedResult>),
    Consumed,
}

/// Caller-side end of a submitted request. Poll it once per tick; the result
/// is delivered exactly once.
pub struct PathRequestHandle {
    kind: ResultKind,
    state: HandleState,
}

impl PathRequestHandle {
    fn resolved(result: PreparedResult) -> Self {
        Self { kind: result.kind(), state: HandleState::Ready(result) }
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, HandleState::Pending(_))
    }

    pub fn is_consumed(&self) -> bool {
        matches!(self.state, HandleState::Consumed)
    }

    /// Zero-wait check. On the first call that finds the result ready, applies
    /// the prepare step to `tracking` and moves the result out; every later
    /// call returns `None`.
    pub fn poll_ready(&mut self, tracking: Option<&mut TargetTracking>) -> Option<PreparedResult> {
        let result = match std::mem::replace(&mut self.state, HandleState::Consumed) {
            HandleState::Ready(result) => result,
            HandleState::Pending(mut rx) => match rx.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => {
                    self.state = HandleState::Pending(rx);
                    return None;
                }
                Err(TryRecvError::Closed) => {
                    warn!(kind = ?self.kind, "path worker dropped without a result");
                    PreparedResult::empty(self.kind)
                }
            },
            HandleState::Consumed => return None,
        };
        if let Some(tracking) = tracking {
            result.prepare(tracking);
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::{EngineOptions, Point};
    use std::sync::Mutex;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct LevelCapture(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for LevelCapture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    #[test]
    fn invalid_request_is_logged_as_warning() {
        let levels = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(LevelCapture(Arc::clone(&levels)));
        let engine = Arc::new(PathEngine::build(2, 2, &EngineOptions::default(), |_, _| false).unwrap());
        let handler = AsyncRequestHandler::new(engine, 1).unwrap();

        let mut handle = tracing::subscriber::with_default(subscriber, || {
            handler.submit(SearchRequest::path(Point::ZERO, Point::new(16.0, 16.0)))
        });
        assert!(handle.poll_ready(None).unwrap().is_empty());
        assert_eq!(*levels.lock().unwrap(), vec![Level::WARN]);
    }

    #[test]
    fn execute_path_emits_cell_centres() {
        let engine = PathEngine::build(4, 1, &EngineOptions::default(), |_, _| false).unwrap();
        let r = execute(&engine, &SearchRequest::path(Point::new(16.0, 16.0), Point::new(112.0, 16.0)));
        assert_eq!(r.kind(), ResultKind::Path);
        assert_eq!(r.points(), &[Point::new(48.0, 16.0), Point::new(80.0, 16.0), Point::new(112.0, 16.0)]);
    }

    #[test]
    fn execute_radius_emits_cell_origin() {
        let engine = PathEngine::build(2, 1, &EngineOptions::default(), |x, _| x < 32.0).unwrap();
        let r = execute(&engine, &SearchRequest::random_around(Point::new(48.0, 16.0), 100.0));
        assert_eq!(r.kind(), ResultKind::RandomPoint);
        assert_eq!(r.points(), &[Point::new(32.0, 0.0)]);
    }

    #[test]
    fn resolved_handle_delivers_once() {
        let mut h = PathRequestHandle::resolved(PreparedResult::empty(ResultKind::Path));
        assert!(!h.is_pending());
        assert!(h.poll_ready(None).is_some());
        assert!(h.is_consumed());
        assert!(h.poll_ready(None).is_none());
    }

    #[test]
    fn dropped_sender_resolves_empty() {
        let (tx, rx) = oneshot::channel::<PreparedResult>();
        drop(tx);
        let mut h = PathRequestHandle { kind: ResultKind::RandomPoint, state: HandleState::Pending(rx) };
        let r = h.poll_ready(None).unwrap();
        assert_eq!(r, PreparedResult::empty(ResultKind::RandomPoint));
        assert!(h.poll_ready(None).is_none());
    }
}
