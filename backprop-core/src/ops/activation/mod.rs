// src/ops/activation/mod.rs

//! # Activation Functions
//!
//! Non-linearities applied elementwise between layers.
//!
//! - [`relu_op`]: Rectified Linear Unit.

pub mod relu;

pub use relu::relu_op;
