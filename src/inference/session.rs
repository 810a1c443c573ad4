use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use futures::lock::Mutex;
use tracing::{debug, trace, warn};

use crate::error::CanvasResult;

use super::{InferenceOutputs, Tensor};

/// An encoder or decoder call. Implemented for any
/// `Fn(Tensor) -> impl Future<Output = CanvasResult<InferenceOutputs>>`.
pub trait InferenceFn {
    fn infer(&self, input: Tensor) -> LocalBoxFuture<'static, CanvasResult<InferenceOutputs>>;
}

impl<F, Fut> InferenceFn for F
where
    F: Fn(Tensor) -> Fut,
    Fut: Future<Output = CanvasResult<InferenceOutputs>> + 'static,
{
    fn infer(&self, input: Tensor) -> LocalBoxFuture<'static, CanvasResult<InferenceOutputs>> {
        self(input).boxed_local()
    }
}

struct SharedModelInner {
    name: String,
    model: Box<dyn InferenceFn>,
    lock: Mutex<()>,
    calls: Cell<u64>,
}

/// One inference session shared by several widgets.
///
/// Calls are serialized: while one is in flight, later callers wait for the
/// lock instead of failing.
#[derive(Clone)]
pub struct SharedModel {
    inner: Rc<SharedModelInner>,
}

impl fmt::Debug for SharedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedModel")
            .field("name", &self.inner.name)
            .field("calls", &self.inner.calls.get())
            .finish_non_exhaustive()
    }
}

impl SharedModel {
    #[must_use]
    pub fn new(name: impl Into<String>, model: impl InferenceFn + 'static) -> Self {
        Self {
            inner: Rc::new(SharedModelInner {
                name: name.into(),
                model: Box::new(model),
                lock: Mutex::new(()),
                calls: Cell::new(0),
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Number of calls that have started.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.inner.calls.get()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.lock.try_lock().is_none()
    }

    pub async fn run(&self, input: Tensor) -> CanvasResult<InferenceOutputs> {
        let _permit = self.inner.lock.lock().await;
        let call = self.inner.calls.get() + 1;
        self.inner.calls.set(call);
        debug!(model = %self.inner.name, call, dims = ?input.dims(), "inference started");

        let result = self.inner.model.infer(input).await;
        match &result {
            Ok(outputs) => trace!(model = %self.inner.name, call, outputs = outputs.len(), "inference finished"),
            Err(err) => warn!(model = %self.inner.name, call, error = %err, "inference failed"),
        }
        result
    }
}
