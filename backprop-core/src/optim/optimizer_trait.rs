use crate::error::BackpropError;
use crate::nn::Parameter;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers update model parameters in place from their accumulated gradients.
/// They never clear gradients on their own: callers decide when to call
/// [`Optimizer::zero_grad`].
pub trait Optimizer {
    /// Performs a single optimization step over every tracked parameter.
    fn step(&mut self) -> Result<(), BackpropError>;

    /// Resets the gradient of every tracked parameter to zero.
    fn zero_grad(&mut self) -> Result<(), BackpropError>;

    /// The parameters this optimizer updates.
    fn params(&self) -> &[Parameter];

    fn learning_rate(&self) -> f32;

    /// Changes the step size for subsequent steps.
    ///
    /// # Errors
    /// `InvalidConfig` unless `lr` is finite and positive.
    fn set_learning_rate(&mut self, lr: f32) -> Result<(), BackpropError>;
}
