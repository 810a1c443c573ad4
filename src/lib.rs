//! latent-canvas: coordinate mapping, interactive selection and guarded async
//! rendering for 2D latent-space exploration widgets.
//!
//! Plots map a data domain onto a pixel rectangle through [`core::ScalePair`],
//! draw through the [`render::Surface`] seam, and take pointer input through
//! the selectors in [`interaction`]. Model calls go through
//! [`inference::SharedModel`] and are deduplicated by
//! [`guard::AsyncRenderGuard`].

pub mod config;
pub mod core;
pub mod error;
pub mod guard;
pub mod inference;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use config::PlotConfig;
pub use error::{CanvasError, CanvasResult};
