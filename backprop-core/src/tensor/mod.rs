// src/tensor/mod.rs

use crate::error::BackpropError;
use crate::tensor_data::TensorData;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod autograd;
mod traits;

pub mod broadcast_utils;
pub mod create;
pub mod utils;

pub use create::{full, ones, ones_like, randn, randn_with_rng, uniform_with_rng, zeros, zeros_like};

/// A node of the computation graph: an `f32` array plus gradient bookkeeping.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** cloning a `Tensor` is cheap and every clone refers to the
///     same node, so a parameter keeps its identity across training steps.
/// 2.  **Interior Mutability:** `grad` (and a parameter's data, through the optimizer)
///     can be updated through a shared reference.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new leaf Tensor from row-major data and a shape.
    ///
    /// The result does not require gradients.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, BackpropError> {
        let tensor_data = TensorData::new(data_vec, shape)?;
        Ok(Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        })
    }

    /// Same as [`Tensor::new`].
    pub fn from_vec_f32(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, BackpropError> {
        Tensor::new(data_vec, shape)
    }

    /// Creates a 0-dimensional tensor holding `value`.
    pub fn scalar(value: f32) -> Self {
        let tensor_data = TensorData {
            data: vec![value],
            shape: Vec::new(),
            requires_grad: false,
            grad: None,
            grad_fn: None,
        };
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    pub fn rank(&self) -> usize {
        self.read_data().shape.len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Acquires a read lock on the tensor's data.
    ///
    /// A poisoned lock is recovered: tensors are only written by single,
    /// non-panicking assignments, so the data is still consistent.
    pub fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires a write lock on the tensor's data.
    pub fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the elements in row-major order.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, BackpropError> {
        Ok(self.read_data().data.clone())
    }

    /// Returns the single element of a scalar-like tensor.
    ///
    /// # Errors
    /// `ShapeMismatch` if the tensor holds more or fewer than one element.
    pub fn item(&self) -> Result<f32, BackpropError> {
        let guard = self.read_data();
        if guard.data.len() != 1 {
            return Err(BackpropError::shape_mismatch(&[], &guard.shape, "item"));
        }
        Ok(guard.data[0])
    }

    /// `true` if every element is finite (no NaN, no infinity).
    pub fn is_finite(&self) -> bool {
        self.read_data().data.iter().all(|v| v.is_finite())
    }

    /// `true` if both handles refer to the same graph node.
    pub fn ptr_eq(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Stable identity of the underlying node, used as a key by the backward engine.
    pub(crate) fn node_id(&self) -> crate::autograd::graph::NodeId {
        Arc::as_ptr(&self.data)
    }
}
