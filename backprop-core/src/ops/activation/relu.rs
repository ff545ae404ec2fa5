// src/ops/activation/relu.rs

use crate::autograd::BackwardOp;
use crate::error::BackpropError;
use crate::ops::attach_grad_fn;
use crate::tensor::Tensor;

/// Applies the Rectified Linear Unit elementwise: `max(0, x)`.
///
/// When `input` requires grad, the sign mask `x > 0` is kept in the backward rule.
pub fn relu_op(input: &Tensor) -> Result<Tensor, BackpropError> {
    let data = input.get_f32_data()?;
    let mask: Vec<bool> = data.iter().map(|&x| x > 0.0).collect();
    let output_data = data
        .iter()
        .zip(mask.iter())
        .map(|(&x, &positive)| if positive { x } else { 0.0 })
        .collect();
    let output = Tensor::new(output_data, input.shape())?;
    if input.requires_grad() {
        attach_grad_fn(
            &output,
            BackwardOp::Relu {
                input: input.clone(),
                mask,
            },
        );
    }
    Ok(output)
}

/// Passes the upstream gradient where the input was positive, 0 elsewhere
/// (the subgradient at 0 is taken to be 0).
pub(crate) fn relu_backward(input: &Tensor, mask: &[bool], grad_output: &Tensor) -> Result<Vec<Tensor>, BackpropError> {
    let shape = input.shape();
    let grad_shape = grad_output.shape();
    if grad_shape != shape || mask.len() != input.numel() {
        return Err(BackpropError::shape_mismatch(&shape, &grad_shape, "relu backward"));
    }
    let grad_input = grad_output
        .get_f32_data()?
        .iter()
        .zip(mask.iter())
        .map(|(&g, &positive)| if positive { g } else { 0.0 })
        .collect();
    Ok(vec![Tensor::new(grad_input, shape)?])
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
