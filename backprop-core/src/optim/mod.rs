// src/optim/mod.rs

//! Optimizers for training neural networks.
//!
//! The [`Optimizer`] trait is the seam the training loop drives; [`SgdOptimizer`]
//! is plain stochastic gradient descent with optional momentum and weight decay.

pub mod optimizer_trait;
pub mod sgd;

pub use optimizer_trait::Optimizer;
pub use sgd::SgdOptimizer;
