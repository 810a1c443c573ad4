//! Model-facing types: tensors, the inference seam, and encoder output
//! interpretation.

mod resample;
mod session;
mod tensor;

pub use resample::{AreaAverageResampler, ImageResampler};
pub use session::{InferenceFn, SharedModel};
pub use tensor::Tensor;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{GridData, Point};
use crate::error::{CanvasError, CanvasResult};

/// Named model outputs in the order the model produced them.
pub type InferenceOutputs = IndexMap<String, Tensor>;

pub const MU_OUTPUT: &str = "mu";
pub const LOGVAR_OUTPUT: &str = "logvar";
pub const RECONSTRUCTION_OUTPUT: &str = "reconstruction";

pub fn output<'a>(outputs: &'a InferenceOutputs, name: &str) -> CanvasResult<&'a Tensor> {
    outputs
        .get(name)
        .ok_or_else(|| CanvasError::Inference(format!("model output `{name}` is missing")))
}

/// Standard deviation from a log-variance: `sqrt(exp(logvar))`.
#[must_use]
pub fn log_var_to_std_dev(log_var: f64) -> f64 {
    log_var.exp().sqrt()
}

/// Posterior estimate of one encoded sample in a 2D latent space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatentEstimate {
    pub mean: Point,
    pub std_dev: Point,
}

impl LatentEstimate {
    /// Reads the first sample's `mu` and `logvar` pairs.
    pub fn from_encoder_outputs(outputs: &InferenceOutputs) -> CanvasResult<Self> {
        let mu = first_pair(output(outputs, MU_OUTPUT)?, MU_OUTPUT)?;
        let log_var = first_pair(output(outputs, LOGVAR_OUTPUT)?, LOGVAR_OUTPUT)?;
        Ok(Self {
            mean: mu,
            std_dev: Point::new(log_var_to_std_dev(log_var.x), log_var_to_std_dev(log_var.y)),
        })
    }
}

/// Arranges the `mu` output of a batch encode (`[rows * cols, 2]`) as a grid.
pub fn grid_from_encoder_outputs(
    outputs: &InferenceOutputs,
    rows: usize,
    cols: usize,
) -> CanvasResult<GridData> {
    let mu = output(outputs, MU_OUTPUT)?;
    if mu.dims() != [rows * cols, 2] {
        return Err(CanvasError::Inference(format!(
            "expected `mu` of shape [{}, 2], got {:?}",
            rows * cols,
            mu.dims()
        )));
    }
    GridData::from_flat_pairs(mu.data(), rows, cols)
}

fn first_pair(tensor: &Tensor, name: &str) -> CanvasResult<Point> {
    match tensor.data() {
        [x, y, ..] => Ok(Point::new(f64::from(*x), f64::from(*y))),
        _ => Err(CanvasError::Inference(format!(
            "model output `{name}` needs at least two values"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn std_dev_of_zero_logvar_is_one() {
        assert_relative_eq!(log_var_to_std_dev(0.0), 1.0);
        assert_relative_eq!(log_var_to_std_dev(2.0_f64.ln() * 2.0), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_output_is_an_inference_error() {
        let outputs = InferenceOutputs::new();
        assert!(matches!(
            LatentEstimate::from_encoder_outputs(&outputs),
            Err(CanvasError::Inference(_))
        ));
    }
}
