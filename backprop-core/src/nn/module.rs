use crate::error::BackpropError;
use crate::nn::Parameter;
use crate::tensor::Tensor;

/// The base trait for network components (layers and whole models).
///
/// A module maps an input tensor to an output tensor and owns the parameters the
/// optimizer updates.
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass, recording the computation graph when any
    /// parameter or the input requires grad.
    fn forward(&self, input: &Tensor) -> Result<Tensor, BackpropError>;

    /// All learnable parameters, including those of sub-modules.
    fn parameters(&self) -> Vec<&Parameter>;

    /// Parameters with hierarchical names such as `"layers.0.weight"`.
    fn named_parameters(&self) -> Vec<(String, &Parameter)>;

    /// Owned handles to every parameter, convenient for building an optimizer.
    fn parameter_handles(&self) -> Vec<Parameter> {
        self.parameters().into_iter().cloned().collect()
    }

    /// Sets the gradient of every parameter to zero.
    fn zero_grad(&self) -> Result<(), BackpropError> {
        for param in self.parameters() {
            param.zero_grad()?;
        }
        Ok(())
    }
}
