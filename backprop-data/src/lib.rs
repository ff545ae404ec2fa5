//! Data sources for `backprop-core` training loops.
//!
//! A [`Dataset`] gives indexed access to `(features, label)` samples, a [`Sampler`]
//! decides the visiting order for each epoch, and a [`DataLoader`] groups samples
//! into [`backprop_core::train::Batch`]es. `DataLoader` implements
//! [`backprop_core::train::BatchSource`], so it can be passed straight to
//! `Trainer::fit`.

pub mod dataloader;
pub mod datasets;
pub mod samplers;

pub use dataloader::DataLoader;
pub use datasets::{Dataset, Sample, TensorDataset};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
