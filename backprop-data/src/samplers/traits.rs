use std::fmt::Debug;

/// Decides the order in which a `DataLoader` visits dataset indices.
///
/// `iter` is called once per epoch. It takes `&mut self` so stateful samplers can
/// advance their random state and produce a different order every epoch.
pub trait Sampler: Debug + Send + Sync {
    /// Returns this epoch's indices, each in `0..dataset_len`.
    fn iter(&mut self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Number of indices `iter` yields for a dataset of `dataset_len` items.
    fn len(&self, dataset_len: usize) -> usize;
}
