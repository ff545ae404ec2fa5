//! # DataLoader
//!
//! Groups dataset samples into [`Batch`]es in the order chosen by a [`Sampler`].
//!
//! ```rust
//! use backprop_core::Tensor;
//! use backprop_data::{DataLoader, SequentialSampler, TensorDataset};
//!
//! # fn main() -> Result<(), backprop_core::BackpropError> {
//! let features = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2])?;
//! let dataset = TensorDataset::new(&features, vec![0, 1, 0])?;
//! let mut loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false)?;
//! let sizes: Vec<usize> = loader
//!     .epoch()
//!     .map(|batch| batch.map(|b| b.len()))
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(sizes, vec![2, 1]);
//! # Ok(())
//! # }
//! ```

use crate::datasets::{Dataset, Sample};
use crate::samplers::Sampler;
use backprop_core::train::{Batch, BatchSource};
use backprop_core::{BackpropError, Tensor};

/// Batches samples from `dataset` in the order produced by `sampler`.
///
/// Every epoch asks the sampler for a fresh order. With `drop_last`, a final batch
/// smaller than `batch_size` is skipped.
#[derive(Debug)]
pub struct DataLoader<D: Dataset<Item = Sample>, S: Sampler> {
    dataset: D,
    batch_size: usize,
    sampler: S,
    drop_last: bool,
}

impl<D: Dataset<Item = Sample>, S: Sampler> DataLoader<D, S> {
    /// # Errors
    /// `InvalidConfig` if `batch_size` is zero.
    pub fn new(dataset: D, batch_size: usize, sampler: S, drop_last: bool) -> Result<Self, BackpropError> {
        if batch_size == 0 {
            return Err(BackpropError::InvalidConfig(
                "DataLoader batch_size must be at least 1".to_string(),
            ));
        }
        Ok(DataLoader {
            dataset,
            batch_size,
            sampler,
            drop_last,
        })
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn drop_last(&self) -> bool {
        self.drop_last
    }

    /// Number of batches one epoch yields.
    pub fn num_batches(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            samples.div_ceil(self.batch_size)
        }
    }

    /// Starts a new epoch and returns its batches.
    pub fn epoch(&mut self) -> EpochIter<'_, D> {
        let indices = self.sampler.iter(self.dataset.len());
        log::debug!(
            "DataLoader: new epoch over {} samples, batch_size {}, drop_last {}",
            self.dataset.len(),
            self.batch_size,
            self.drop_last
        );
        EpochIter {
            dataset: &self.dataset,
            indices,
            batch_size: self.batch_size,
            drop_last: self.drop_last,
        }
    }
}

/// The batches of one epoch. Created by [`DataLoader::epoch`].
pub struct EpochIter<'a, D: Dataset<Item = Sample>> {
    dataset: &'a D,
    indices: Box<dyn Iterator<Item = usize> + Send + Sync>,
    batch_size: usize,
    drop_last: bool,
}

impl<D: Dataset<Item = Sample>> Iterator for EpochIter<'_, D> {
    type Item = Result<Batch, BackpropError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut samples = Vec::with_capacity(self.batch_size);
        for idx in self.indices.by_ref().take(self.batch_size) {
            match self.dataset.get(idx) {
                Ok(sample) => samples.push(sample),
                Err(e) => return Some(Err(e)),
            }
        }
        if samples.is_empty() || (self.drop_last && samples.len() < self.batch_size) {
            return None;
        }
        Some(collate(samples))
    }
}

/// Stacks feature rows into a `[batch, features]` tensor and gathers the labels.
///
/// # Errors
/// `ShapeMismatch` if the samples do not all have the same number of features.
pub fn collate(samples: Vec<Sample>) -> Result<Batch, BackpropError> {
    let num_features = samples.first().map_or(0, |s| s.features.len());
    let mut inputs = Vec::with_capacity(samples.len() * num_features);
    let mut labels = Vec::with_capacity(samples.len());
    for sample in samples {
        if sample.features.len() != num_features {
            return Err(BackpropError::shape_mismatch(
                &[num_features],
                &[sample.features.len()],
                "collate",
            ));
        }
        inputs.extend(sample.features);
        labels.push(sample.label);
    }
    let rows = labels.len();
    Batch::new(Tensor::new(inputs, vec![rows, num_features])?, labels)
}

impl<D: Dataset<Item = Sample>, S: Sampler> BatchSource for DataLoader<D, S> {
    fn epoch_batches(&mut self, _epoch: usize) -> Box<dyn Iterator<Item = Result<Batch, BackpropError>> + '_> {
        Box::new(self.epoch())
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
