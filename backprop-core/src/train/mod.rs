//! Supervised training loop for classifiers.
//!
//! A [`Trainer`] owns a model and an optimizer and pulls [`Batch`]es from a
//! [`BatchSource`] once per epoch. Each step runs zero-grad, forward, mean softmax
//! cross-entropy, backward and the optimizer step, in that order.

pub mod batch;
pub mod config;
pub mod metrics;
pub mod trainer;

pub use batch::{Batch, BatchSource};
pub use config::TrainConfig;
pub use metrics::{accuracy, argmax_rows};
pub use trainer::{Evaluation, ProgressRecord, TrainSummary, Trainer};
