use crate::autograd::BackwardOp;
use crate::error::BackpropError;
use crate::ops::attach_grad_fn;
use crate::tensor::Tensor;

/// Sums all elements into a scalar (shape `[]`).
pub fn sum_op(input: &Tensor) -> Result<Tensor, BackpropError> {
    let total: f64 = input.read_data().data.iter().map(|&x| x as f64).sum();
    let output = Tensor::scalar(total as f32);
    if input.requires_grad() {
        attach_grad_fn(&output, BackwardOp::Sum { input: input.clone() });
    }
    Ok(output)
}

/// Every input element receives the (scalar) upstream gradient.
pub(crate) fn sum_backward(input: &Tensor, grad_output: &Tensor) -> Result<Vec<Tensor>, BackpropError> {
    let g = grad_output.item()?;
    let shape = input.shape();
    let numel = shape.iter().product();
    Ok(vec![Tensor::new(vec![g; numel], shape)?])
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
