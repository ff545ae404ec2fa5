// src/tensor/traits.rs

use crate::tensor::Tensor;
use std::fmt::{self, Debug};
use std::sync::Arc;

impl Clone for Tensor {
    /// Shallow clone: the new handle refers to the same graph node.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        write!(
            f,
            "Tensor(shape={:?}, requires_grad={}, has_grad={}, grad_fn={}",
            guard.shape,
            guard.requires_grad,
            guard.grad.is_some(),
            guard.grad_fn.as_ref().map_or("None", |op| op.name()),
        )?;
        if guard.data.len() <= 8 {
            write!(f, ", data={:?})", guard.data)
        } else {
            write!(f, ", data=[... {} elements ...])", guard.data.len())
        }
    }
}

impl PartialEq for Tensor {
    /// Two tensors are equal when they have the same shape and the same elements.
    /// Autograd metadata is ignored.
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let self_guard = self.read_data();
        let other_guard = other.read_data();
        self_guard.shape == other_guard.shape && self_guard.data == other_guard.data
    }
}
