use crate::error::BackpropError;
use crate::nn::init::{fan_in_uniform, kaiming_uniform};
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::ops::arithmetic::add_op;
use crate::ops::linalg::matmul_op;
use crate::tensor::Tensor;
use rand::Rng;

/// Applies an affine transformation to the incoming data: `y = x · W + b`.
///
/// `W` is stored as `[in_features, out_features]` so a `[batch, in_features]` input
/// multiplies it directly; `b` has shape `[out_features]` and is broadcast over rows.
#[derive(Debug, Clone)]
pub struct Linear {
    weight: Parameter,
    bias: Parameter,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates a layer with Kaiming-uniform weights and fan-in-uniform bias drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(in_features: usize, out_features: usize, rng: &mut R) -> Result<Self, BackpropError> {
        let weight = kaiming_uniform(vec![in_features, out_features], in_features, rng)?;
        let bias = fan_in_uniform(vec![out_features], in_features, rng)?;
        Linear::from_weights(weight, bias)
    }

    /// Creates a layer from explicit tensors.
    ///
    /// # Errors
    /// `ShapeMismatch` unless `weight` is `[in, out]` and `bias` is `[out]`;
    /// `RequiresGradOnNonLeaf` if either tensor is not a leaf.
    pub fn from_weights(weight: Tensor, bias: Tensor) -> Result<Self, BackpropError> {
        let weight_shape = weight.shape();
        if weight_shape.len() != 2 {
            return Err(BackpropError::ShapeMismatch {
                expected: vec![0, 0],
                actual: weight_shape,
                operation: "Linear weight must be [in_features, out_features]".to_string(),
            });
        }
        let (in_features, out_features) = (weight_shape[0], weight_shape[1]);
        let bias_shape = bias.shape();
        if bias_shape != [out_features] {
            return Err(BackpropError::shape_mismatch(&[out_features], &bias_shape, "Linear bias"));
        }
        Ok(Linear {
            weight: Parameter::new(weight)?,
            bias: Parameter::new(bias)?,
            in_features,
            out_features,
        })
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> &Parameter {
        &self.bias
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    fn forward(&self, input: &Tensor) -> Result<Tensor, BackpropError> {
        let projected = matmul_op(input, &self.weight)?;
        add_op(&projected, &self.bias)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        vec![&self.weight, &self.bias]
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        vec![
            ("weight".to_string(), &self.weight),
            ("bias".to_string(), &self.bias),
        ]
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
