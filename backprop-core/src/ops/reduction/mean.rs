use crate::autograd::BackwardOp;
use crate::error::BackpropError;
use crate::ops::attach_grad_fn;
use crate::tensor::Tensor;

/// Averages all elements into a scalar (shape `[]`).
///
/// # Errors
/// `EmptyBatch` if the input has no elements.
pub fn mean_op(input: &Tensor) -> Result<Tensor, BackpropError> {
    let numel = input.numel();
    if numel == 0 {
        return Err(BackpropError::EmptyBatch("mean of an empty tensor".to_string()));
    }
    let total: f64 = input.read_data().data.iter().map(|&x| x as f64).sum();
    let output = Tensor::scalar((total / numel as f64) as f32);
    if input.requires_grad() {
        attach_grad_fn(&output, BackwardOp::Mean { input: input.clone() });
    }
    Ok(output)
}

/// Every input element receives `grad / numel`.
pub(crate) fn mean_backward(input: &Tensor, grad_output: &Tensor) -> Result<Vec<Tensor>, BackpropError> {
    let shape = input.shape();
    let numel: usize = shape.iter().product();
    let g = grad_output.item()? / numel as f32;
    Ok(vec![Tensor::new(vec![g; numel], shape)?])
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
