use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use futures::task::{LocalSpawn, LocalSpawnExt};
use tracing::{debug, error};

use crate::error::{CanvasError, CanvasResult};

/// Error caught at the guard boundary, tagged with the guard's context.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFailure {
    pub context: String,
    pub error: CanvasError,
}

impl RenderFailure {
    /// Inline message suitable for showing inside the widget.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{}: {}", self.context, self.error)
    }
}

type FailureSink = Rc<dyn Fn(&RenderFailure)>;

/// Allows at most one async render body in flight.
///
/// Triggers that arrive while a body is running are dropped, not queued. The
/// busy flag is held by a token owned by the returned future, so it is reset
/// when the body completes, fails, or the future is dropped unpolled.
///
/// Clones share the busy flag; separate guards never do.
#[derive(Clone)]
pub struct AsyncRenderGuard {
    busy: Rc<Cell<bool>>,
    context: Rc<str>,
    failure_sink: Option<FailureSink>,
}

impl fmt::Debug for AsyncRenderGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncRenderGuard")
            .field("busy", &self.busy.get())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

struct BusyToken {
    busy: Rc<Cell<bool>>,
}

impl Drop for BusyToken {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

impl AsyncRenderGuard {
    #[must_use]
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            busy: Rc::new(Cell::new(false)),
            context: Rc::from(context.into()),
            failure_sink: None,
        }
    }

    /// Receives every failure after it has been logged.
    #[must_use]
    pub fn with_failure_sink(mut self, sink: impl Fn(&RenderFailure) + 'static) -> Self {
        self.failure_sink = Some(Rc::new(sink));
        self
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Starts `body` unless a previous one is still running.
    ///
    /// Returns `None` when the trigger was dropped. Otherwise the returned
    /// future must be driven to run the body; its error, if any, has already
    /// been logged and forwarded to the failure sink.
    pub fn trigger<F, Fut>(
        &self,
        body: F,
    ) -> Option<LocalBoxFuture<'static, Result<(), RenderFailure>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CanvasResult<()>> + 'static,
    {
        if self.busy.get() {
            debug!(context = %self.context, "render trigger dropped while busy");
            return None;
        }
        self.busy.set(true);
        let token = BusyToken {
            busy: Rc::clone(&self.busy),
        };

        let work = body();
        let context = Rc::clone(&self.context);
        let sink = self.failure_sink.clone();
        Some(
            async move {
                let result = work.await;
                drop(token);
                result.map_err(|error| {
                    let failure = RenderFailure {
                        context: context.to_string(),
                        error,
                    };
                    error!(context = %failure.context, error = %failure.error, "render failed");
                    if let Some(sink) = sink {
                        sink(&failure);
                    }
                    failure
                })
            }
            .boxed_local(),
        )
    }

    /// Triggers `body` and spawns it on `spawner`. Returns whether it was
    /// spawned.
    pub fn spawn_local<Sp, F, Fut>(&self, spawner: &Sp, body: F) -> CanvasResult<bool>
    where
        Sp: LocalSpawn + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = CanvasResult<()>> + 'static,
    {
        let Some(work) = self.trigger(body) else {
            return Ok(false);
        };
        spawner
            .spawn_local(work.map(|_| ()))
            .map_err(|err| CanvasError::RenderFailed(format!("spawn failed: {err}")))?;
        Ok(true)
    }
}
