//! Async render deduplication and display cancellation.

mod generation;
mod render_guard;

pub use generation::{DisplayGeneration, DisplayStage, GenerationTicket};
pub use render_guard::{AsyncRenderGuard, RenderFailure};
