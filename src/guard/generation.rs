use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CanvasError, CanvasResult};

#[derive(Debug, Default)]
struct GenerationState {
    current: Cell<u64>,
    pending: RefCell<Option<AbortHandle>>,
}

/// Monotonic request counter for display flows where only the latest request
/// may update the output.
///
/// `begin` supersedes every earlier ticket and aborts the future currently
/// registered through [`DisplayGeneration::guarded`].
#[derive(Debug, Clone, Default)]
pub struct DisplayGeneration {
    state: Rc<GenerationState>,
}

/// Captured generation of one display request.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    generation: u64,
    state: Rc<GenerationState>,
}

impl GenerationTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_current(&self) -> bool {
        self.state.current.get() == self.generation
    }

    pub fn ensure_current(&self) -> CanvasResult<()> {
        if self.is_current() {
            Ok(())
        } else {
            Err(CanvasError::Cancelled)
        }
    }
}

/// How far a preview/actual display request got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayStage {
    /// A newer request took over before anything final was shown.
    Superseded,
    /// The actual image failed; the preview stays visible.
    PreviewOnly,
    Actual,
}

impl DisplayGeneration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> u64 {
        self.state.current.get()
    }

    pub fn begin(&self) -> GenerationTicket {
        let generation = self.state.current.get().wrapping_add(1);
        self.state.current.set(generation);
        if let Some(handle) = self.state.pending.borrow_mut().take() {
            debug!(generation, "aborting superseded display request");
            handle.abort();
        }
        GenerationTicket {
            generation,
            state: Rc::clone(&self.state),
        }
    }

    /// Runs `work` as the abortable step of `ticket`'s request. Resolves to
    /// `Cancelled` if the ticket is stale before or after the step, or if a
    /// newer request aborts it midway.
    pub async fn guarded<T, Fut>(&self, ticket: &GenerationTicket, work: Fut) -> CanvasResult<T>
    where
        Fut: Future<Output = T>,
    {
        ticket.ensure_current()?;
        let (handle, registration) = AbortHandle::new_pair();
        *self.state.pending.borrow_mut() = Some(handle);
        let outcome = Abortable::new(work, registration).await;
        if ticket.is_current() {
            *self.state.pending.borrow_mut() = None;
        }
        let value = outcome.map_err(|_| CanvasError::Cancelled)?;
        ticket.ensure_current()?;
        Ok(value)
    }

    /// Shows a preview immediately, waits `delay`, then shows the actual
    /// image, dropping out as soon as a newer request begins.
    ///
    /// A failed preview is returned as an error (the caller draws its
    /// fallback) unless the request was already superseded. A failed actual
    /// image is logged and leaves the preview in place.
    pub async fn display_with_preview<P, D, A, AFut>(
        &self,
        preview: P,
        delay: D,
        actual: A,
    ) -> CanvasResult<DisplayStage>
    where
        P: Future<Output = CanvasResult<()>>,
        D: Future<Output = ()>,
        A: FnOnce() -> AFut,
        AFut: Future<Output = CanvasResult<()>>,
    {
        let ticket = self.begin();
        if let Err(err) = preview.await {
            return if ticket.is_current() {
                Err(err)
            } else {
                Ok(DisplayStage::Superseded)
            };
        }

        match self.guarded(&ticket, delay).await {
            Ok(()) => {}
            Err(CanvasError::Cancelled) => return Ok(DisplayStage::Superseded),
            Err(err) => return Err(err),
        }

        match self.guarded(&ticket, actual()).await {
            Ok(Ok(())) => Ok(DisplayStage::Actual),
            Ok(Err(err)) => {
                warn!(generation = ticket.generation(), error = %err, "actual image failed, keeping preview");
                Ok(DisplayStage::PreviewOnly)
            }
            Err(CanvasError::Cancelled) => Ok(DisplayStage::Superseded),
            Err(err) => Err(err),
        }
    }
}
