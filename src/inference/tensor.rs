use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Point;
use crate::error::{CanvasError, CanvasResult};

type Dims = SmallVec<[usize; 4]>;

/// Dense row-major `f32` tensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TensorParts", into = "TensorParts")]
pub struct Tensor {
    dims: Dims,
    data: Vec<f32>,
}

#[derive(Serialize, Deserialize)]
struct TensorParts {
    dims: Vec<usize>,
    data: Vec<f32>,
}

impl TryFrom<TensorParts> for Tensor {
    type Error = CanvasError;

    fn try_from(parts: TensorParts) -> CanvasResult<Self> {
        Self::new(&parts.dims, parts.data)
    }
}

impl From<Tensor> for TensorParts {
    fn from(tensor: Tensor) -> Self {
        Self {
            dims: tensor.dims.into_vec(),
            data: tensor.data,
        }
    }
}

impl Tensor {
    pub fn new(dims: &[usize], data: Vec<f32>) -> CanvasResult<Self> {
        if dims.is_empty() {
            return Err(CanvasError::InvalidData(
                "tensor needs at least one dimension".to_owned(),
            ));
        }
        let expected = dims
            .iter()
            .try_fold(1usize, |acc, dim| acc.checked_mul(*dim))
            .ok_or_else(|| CanvasError::InvalidData("tensor shape overflows".to_owned()))?;
        if expected != data.len() {
            return Err(CanvasError::InvalidData(format!(
                "tensor of shape {dims:?} needs {expected} values, got {}",
                data.len()
            )));
        }
        Ok(Self {
            dims: SmallVec::from_slice(dims),
            data,
        })
    }

    /// `[1, 2]` decoder input for one latent point.
    #[must_use]
    pub fn latent_point(z: Point) -> Self {
        Self {
            dims: SmallVec::from_slice(&[1, 2]),
            data: vec![z.x as f32, z.y as f32],
        }
    }

    /// `[n, 2]` decoder input for a batch of latent points.
    #[must_use]
    pub fn latent_batch(points: &[Point]) -> Self {
        Self {
            dims: SmallVec::from_slice(&[points.len(), 2]),
            data: points
                .iter()
                .flat_map(|point| [point.x as f32, point.y as f32])
                .collect(),
        }
    }

    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::Tensor;

    #[test]
    fn shape_must_match_data() {
        assert!(Tensor::new(&[2, 2], vec![0.0; 3]).is_err());
        assert!(Tensor::new(&[], vec![]).is_err());
        let tensor = Tensor::new(&[1, 3, 2, 2], vec![0.5; 12]).expect("valid tensor");
        assert_eq!(tensor.dims(), &[1, 3, 2, 2]);
    }

    #[test]
    fn deserialize_rejects_mismatched_shape() {
        let result: Result<Tensor, _> = serde_json::from_str(r#"{"dims":[2],"data":[1.0]}"#);
        assert!(result.is_err());
    }
}
