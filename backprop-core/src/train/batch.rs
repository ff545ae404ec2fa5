use crate::error::BackpropError;
use crate::tensor::Tensor;

/// One mini-batch: inputs `[batch, features]` and one class label per row.
#[derive(Debug, Clone)]
pub struct Batch {
    pub inputs: Tensor,
    pub labels: Vec<usize>,
}

impl Batch {
    /// # Errors
    /// * `ShapeMismatch` if `inputs` is not 2-D or the label count differs from its
    ///   leading dimension.
    /// * `EmptyBatch` if there are no rows.
    pub fn new(inputs: Tensor, labels: Vec<usize>) -> Result<Self, BackpropError> {
        let shape = inputs.shape();
        if shape.len() != 2 {
            return Err(BackpropError::ShapeMismatch {
                expected: vec![labels.len(), 0],
                actual: shape,
                operation: "Batch inputs must be [batch, features]".to_string(),
            });
        }
        if shape[0] != labels.len() {
            return Err(BackpropError::shape_mismatch(&[shape[0]], &[labels.len()], "Batch labels"));
        }
        if labels.is_empty() {
            return Err(BackpropError::EmptyBatch("batch with zero rows".to_string()));
        }
        Ok(Batch { inputs, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Where the training loop gets its data from.
///
/// `epoch_batches` is called once per epoch and yields that epoch's batches in order.
/// Sources may reshuffle between epochs.
pub trait BatchSource {
    fn epoch_batches(&mut self, epoch: usize) -> Box<dyn Iterator<Item = Result<Batch, BackpropError>> + '_>;
}

/// A fixed list of batches, replayed in the same order every epoch.
impl BatchSource for Vec<Batch> {
    fn epoch_batches(&mut self, _epoch: usize) -> Box<dyn Iterator<Item = Result<Batch, BackpropError>> + '_> {
        Box::new(self.iter().cloned().map(Ok))
    }
}
