use super::traits::{Dataset, Sample};
use backprop_core::{BackpropError, Tensor};

/// A classification dataset held in memory: a `[n, features]` matrix and `n` labels.
///
/// The feature buffer is copied out of the tensor once at construction, so `get`
/// does not lock the tensor.
#[derive(Debug, Clone)]
pub struct TensorDataset {
    features: Vec<f32>,
    num_features: usize,
    labels: Vec<usize>,
}

impl TensorDataset {
    /// # Errors
    /// * `ShapeMismatch` if `features` is not 2-D or its row count differs from
    ///   `labels.len()`.
    pub fn new(features: &Tensor, labels: Vec<usize>) -> Result<Self, BackpropError> {
        let shape = features.shape();
        if shape.len() != 2 {
            return Err(BackpropError::ShapeMismatch {
                expected: vec![labels.len(), 0],
                actual: shape,
                operation: "TensorDataset features must be [samples, features]".to_string(),
            });
        }
        if shape[0] != labels.len() {
            return Err(BackpropError::shape_mismatch(
                &[labels.len()],
                &[shape[0]],
                "TensorDataset::new",
            ));
        }
        Ok(TensorDataset {
            features: features.get_f32_data()?,
            num_features: shape[1],
            labels,
        })
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }
}

impl Dataset for TensorDataset {
    type Item = Sample;

    fn get(&self, index: usize) -> Result<Sample, BackpropError> {
        if index >= self.labels.len() {
            return Err(BackpropError::IndexOutOfBounds {
                index,
                size: self.labels.len(),
                operation: "TensorDataset::get".to_string(),
            });
        }
        let start = index * self.num_features;
        Ok(Sample {
            features: self.features[start..start + self.num_features].to_vec(),
            label: self.labels[index],
        })
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
#[path = "tensor_dataset_test.rs"]
mod tests;
