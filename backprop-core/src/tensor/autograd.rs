// src/tensor/autograd.rs

use crate::autograd::graph::run_backward;
use crate::autograd::BackwardOp;
use crate::error::BackpropError;
use crate::tensor::create::zeros;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::sync::{Arc, RwLock};

impl Tensor {
    /// Checks if the tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` status of this tensor **in-place**.
    ///
    /// Only allowed on leaf tensors. Turning tracking on gives the tensor a zero
    /// gradient of its own shape, so `grad()` is always readable on parameters.
    ///
    /// # Errors
    /// `RequiresGradOnNonLeaf` if the tensor was produced by a tracked operation.
    pub fn requires_grad_(&self, requires_grad: bool) -> Result<(), BackpropError> {
        let shape = {
            let guard = self.read_data();
            if guard.grad_fn.is_some() {
                return Err(BackpropError::RequiresGradOnNonLeaf);
            }
            guard.shape.clone()
        };
        let zero_grad = if requires_grad { Some(zeros(&shape)?) } else { None };
        let mut guard = self.write_data();
        guard.requires_grad = requires_grad;
        if guard.grad.is_none() {
            guard.grad = zero_grad;
        }
        Ok(())
    }

    /// A tensor is a leaf when no tracked operation produced it.
    pub fn is_leaf(&self) -> bool {
        self.read_data().grad_fn.is_none()
    }

    /// Returns the backward rule of the operation that produced this tensor.
    pub fn grad_fn(&self) -> Option<BackwardOp> {
        self.read_data().grad_fn.clone()
    }

    #[cfg(test)]
    pub(crate) fn set_grad_fn(&self, grad_fn: Option<BackwardOp>) {
        self.write_data().grad_fn = grad_fn;
    }

    /// Returns the accumulated gradient, if any has been accumulated yet.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Returns the accumulated gradient, or a fresh zero array of this tensor's shape.
    pub fn grad_or_zeros(&self) -> Result<Tensor, BackpropError> {
        match self.grad() {
            Some(grad) => Ok(grad),
            None => zeros(&self.shape()),
        }
    }

    pub(crate) fn set_grad(&self, grad: Option<Tensor>) {
        self.write_data().grad = grad;
    }

    /// Adds `contribution` to this tensor's gradient (`grad += contribution`).
    ///
    /// The stored gradient is replaced by a new tensor rather than mutated, so
    /// handles previously returned by [`Tensor::grad`] keep their values.
    ///
    /// # Errors
    /// `ShapeMismatch` if `contribution` is not shaped like this tensor.
    pub fn acc_grad(&self, contribution: &Tensor) -> Result<(), BackpropError> {
        let own_shape = self.shape();
        let contribution_shape = contribution.shape();
        if own_shape != contribution_shape {
            return Err(BackpropError::shape_mismatch(&own_shape, &contribution_shape, "acc_grad"));
        }
        let new_data = match self.grad() {
            Some(existing) => {
                let contribution_data = contribution.get_f32_data()?;
                existing
                    .get_f32_data()?
                    .iter()
                    .zip(contribution_data.iter())
                    .map(|(g, c)| g + c)
                    .collect()
            }
            None => contribution.get_f32_data()?,
        };
        self.set_grad(Some(Tensor::new(new_data, own_shape)?));
        Ok(())
    }

    /// Resets the gradient to the zero array when the tensor is tracked.
    ///
    /// Untracked tensors are left untouched. Calling it twice is the same as once.
    pub fn zero_grad(&self) -> Result<(), BackpropError> {
        if !self.requires_grad() {
            return Ok(());
        }
        let zeroed = zeros(&self.shape())?;
        self.set_grad(Some(zeroed));
        Ok(())
    }

    /// Creates a new tensor holding a copy of this tensor's elements, detached from
    /// the computation graph: no backward rule, no gradient, `requires_grad = false`.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        let detached = TensorData {
            data: guard.data.clone(),
            shape: guard.shape.clone(),
            requires_grad: false,
            grad: None,
            grad_fn: None,
        };
        Tensor {
            data: Arc::new(RwLock::new(detached)),
        }
    }

    /// Back-propagates from this scalar tensor with an implicit seed of 1.
    ///
    /// Gradients are accumulated into every tracked node of the graph.
    ///
    /// # Errors
    /// * `RequiresGradNotMet` if this tensor is not tracked.
    /// * `BackwardNonScalar` if it holds more than one element.
    pub fn backward(&self) -> Result<(), BackpropError> {
        let (requires_grad, shape) = {
            let guard = self.read_data();
            (guard.requires_grad, guard.shape.clone())
        };
        if !requires_grad {
            return Err(BackpropError::RequiresGradNotMet);
        }
        if shape.iter().product::<usize>() != 1 {
            return Err(BackpropError::BackwardNonScalar { shape });
        }
        let seed = Tensor::new(vec![1.0], shape)?;
        run_backward(self, seed)
    }

    /// Back-propagates from this tensor with an explicit seed gradient.
    ///
    /// # Errors
    /// * `RequiresGradNotMet` if this tensor is not tracked.
    /// * `ShapeMismatch` if `seed` is not shaped like this tensor.
    pub fn backward_with_grad(&self, seed: &Tensor) -> Result<(), BackpropError> {
        if !self.requires_grad() {
            return Err(BackpropError::RequiresGradNotMet);
        }
        let own_shape = self.shape();
        let seed_shape = seed.shape();
        if own_shape != seed_shape {
            return Err(BackpropError::shape_mismatch(&own_shape, &seed_shape, "backward_with_grad"));
        }
        run_backward(self, seed.detach())
    }
}
