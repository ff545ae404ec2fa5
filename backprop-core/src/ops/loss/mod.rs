// src/ops/loss/mod.rs

//! # Loss Functions
//!
//! Scalar objectives the training loop differentiates.
//!
//! - [`softmax_cross_entropy_op`]: mean negative log-likelihood of the target class
//!   under the softmax of the logits.

pub mod softmax_cross_entropy;

pub use softmax_cross_entropy::{log_sum_exp, softmax_cross_entropy_op};
