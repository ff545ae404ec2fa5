use crate::error::BackpropError;

/// Settings of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Number of passes over the batch source.
    pub epochs: usize,
    /// Emit a progress record every `log_every` batches (and at the end of each epoch).
    pub log_every: usize,
    /// Reset parameter gradients before every step. When off, gradients accumulate
    /// across steps until the caller clears them.
    pub zero_grad_each_step: bool,
    /// Fail the step with `NonFinite` when the loss or a gradient is NaN or infinite.
    pub check_finite: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 1,
            log_every: 10,
            zero_grad_each_step: true,
            check_finite: true,
        }
    }
}

impl TrainConfig {
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    /// # Errors
    /// `InvalidConfig` if `epochs` or `log_every` is zero.
    pub fn validate(&self) -> Result<(), BackpropError> {
        if self.epochs == 0 {
            return Err(BackpropError::InvalidConfig("epochs must be > 0".to_string()));
        }
        if self.log_every == 0 {
            return Err(BackpropError::InvalidConfig("log_every must be > 0".to_string()));
        }
        Ok(())
    }
}
