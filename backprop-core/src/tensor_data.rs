// src/tensor_data.rs
use std::fmt::Debug;

use crate::autograd::BackwardOp;
use crate::error::BackpropError;
use crate::tensor::Tensor;

/// Internal storage and metadata for a Tensor.
///
/// This struct holds the element buffer, the shape, and the autograd
/// bookkeeping of one node of the computation graph.
/// It is wrapped in `Arc<RwLock<TensorData>>` by the `Tensor` struct
/// to allow shared ownership and interior mutability.
#[derive(Debug)]
pub struct TensorData {
    /// Row-major element buffer. Never modified after creation, except for
    /// parameters updated in place by an optimizer.
    pub(crate) data: Vec<f32>,
    /// The shape (dimensions) of the tensor. `[]` is a scalar.
    pub(crate) shape: Vec<usize>,

    /// Flag indicating if the tensor requires gradient computation.
    /// If true, operations involving this tensor will be tracked in the computation graph.
    pub(crate) requires_grad: bool,
    /// Accumulated gradient of the final loss with respect to this tensor.
    /// `None` until the first accumulation (reads as the zero array).
    pub(crate) grad: Option<Tensor>,
    /// The backward rule of the operation that produced this tensor.
    /// Leaf tensors (created directly by the user) have `grad_fn = None`.
    pub(crate) grad_fn: Option<BackwardOp>,
}

impl TensorData {
    /// Creates a new leaf `TensorData` from row-major data and a shape.
    ///
    /// # Errors
    /// Returns `BackpropError::TensorCreationError` if the length of `data` does not match
    /// the number of elements specified by `shape`.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, BackpropError> {
        let numel: usize = shape.iter().product();
        let data_len = data.len();
        if data_len != numel {
            return Err(BackpropError::TensorCreationError { data_len, shape });
        }

        Ok(TensorData {
            data,
            shape,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Read-only view of the element buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        let td = TensorData::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
        assert_eq!(td.numel(), 4);
        assert!(!td.requires_grad);
        assert!(td.grad.is_none());
        assert!(td.grad_fn.is_none());

        let err = TensorData::new(vec![1.0, 2.0, 3.0], vec![2, 2]).unwrap_err();
        assert_eq!(
            err,
            BackpropError::TensorCreationError { data_len: 3, shape: vec![2, 2] }
        );
    }

    #[test]
    fn test_scalar_shape_has_one_element() {
        let td = TensorData::new(vec![5.0], vec![]).unwrap();
        assert_eq!(td.numel(), 1);
        assert_eq!(td.shape(), &[] as &[usize]);
    }
}
