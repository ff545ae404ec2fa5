use backprop_core::BackpropError;

/// One labelled example: a feature row and its class index.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub features: Vec<f32>,
    pub label: usize,
}

/// Indexed access to a collection of items.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    ///
    /// `Send + 'static` so items can be handed across threads by a future loader.
    type Item: Send + 'static;

    /// Returns the item at `index`.
    ///
    /// # Errors
    /// `IndexOutOfBounds` if `index >= self.len()`.
    fn get(&self, index: usize) -> Result<Self::Item, BackpropError>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
