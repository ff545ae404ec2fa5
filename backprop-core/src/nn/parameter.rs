use crate::error::BackpropError;
use crate::tensor::Tensor;
use std::fmt;
use std::ops::Deref;

/// A wrapper around a leaf Tensor marking it as a learnable parameter of a Module.
///
/// The wrapped tensor always requires gradients. Cloning a `Parameter` shares the
/// underlying node, so the optimizer and the model see the same data.
pub struct Parameter(Tensor);

impl Parameter {
    /// Wraps `tensor` and turns on gradient tracking for it.
    ///
    /// # Errors
    /// `RequiresGradOnNonLeaf` if `tensor` was produced by a tracked operation.
    pub fn new(tensor: Tensor) -> Result<Self, BackpropError> {
        tensor.requires_grad_(true)?;
        Ok(Parameter(tensor))
    }

    /// Returns a handle to the underlying tensor (same node).
    pub fn tensor(&self) -> Tensor {
        self.0.clone()
    }

    /// Consumes the Parameter and returns the underlying Tensor.
    pub fn into_inner(self) -> Tensor {
        self.0
    }
}

impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parameter({:?})", self.0)
    }
}

impl Clone for Parameter {
    /// Shallow clone: both handles refer to the same tensor node.
    fn clone(&self) -> Self {
        Parameter(self.0.clone())
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
