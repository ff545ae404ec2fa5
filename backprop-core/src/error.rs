use thiserror::Error;

/// Coarse classification of a [`BackpropError`].
///
/// Callers decide the recovery policy (skip the batch, lower the learning rate,
/// abort the run); the core only reports which family a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operands or gradient contributions have incompatible shapes.
    ShapeMismatch,
    /// The computation graph cannot be differentiated as requested.
    InvalidGraph,
    /// A loss or gradient contains NaN or infinite values.
    NumericalInstability,
    /// Configuration, data source or internal failures.
    Other,
}

/// Custom error type for the backprop framework.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum BackpropError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Index out of bounds: index {index} for dimension of size {size} during {operation}")]
    IndexOutOfBounds {
        index: usize,
        size: usize,
        operation: String,
    },

    #[error("Backward called on non-scalar tensor of shape {shape:?} without explicit gradient.")]
    BackwardNonScalar { shape: Vec<usize> },

    #[error("Operation requires tensor to require grad, but it doesn't.")]
    RequiresGradNotMet,

    #[error("requires_grad can only be changed on leaf tensors.")]
    RequiresGradOnNonLeaf,

    #[error("Cycle detected in the computation graph during backward pass.")]
    CycleDetected,

    #[error("Invalid computation graph: {0}")]
    InvalidGraph(String),

    #[error("Non-finite value detected in {tensor} during {operation}")]
    NonFinite { operation: String, tensor: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Batch is empty: {0}")]
    EmptyBatch(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl BackpropError {
    /// Returns the error family this variant belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BackpropError::ShapeMismatch { .. }
            | BackpropError::BroadcastError { .. }
            | BackpropError::TensorCreationError { .. }
            | BackpropError::IndexOutOfBounds { .. } => ErrorKind::ShapeMismatch,
            BackpropError::BackwardNonScalar { .. }
            | BackpropError::RequiresGradNotMet
            | BackpropError::RequiresGradOnNonLeaf
            | BackpropError::CycleDetected
            | BackpropError::InvalidGraph(_) => ErrorKind::InvalidGraph,
            BackpropError::NonFinite { .. } => ErrorKind::NumericalInstability,
            BackpropError::InvalidConfig(_)
            | BackpropError::EmptyBatch(_)
            | BackpropError::InternalError(_) => ErrorKind::Other,
        }
    }

    /// Shorthand for [`BackpropError::ShapeMismatch`].
    pub fn shape_mismatch(expected: &[usize], actual: &[usize], operation: &str) -> Self {
        BackpropError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
            operation: operation.to_string(),
        }
    }
}
