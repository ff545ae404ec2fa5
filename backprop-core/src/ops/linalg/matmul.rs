// src/ops/linalg/matmul.rs

use crate::autograd::BackwardOp;
use crate::error::BackpropError;
use crate::ops::attach_grad_fn;
use crate::ops::linalg::transpose::transpose_kernel;
use crate::ops::traits::Numeric;
use crate::tensor::Tensor;

/// Row-major `(m x k) · (k x n)` product.
pub(crate) fn matmul_kernel<T: Numeric>(a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Vec<T> {
    let mut result = vec![T::zero(); m * n];
    for i in 0..m {
        for p in 0..k {
            let a_ip = a[i * k + p];
            let row = &mut result[i * n..(i + 1) * n];
            for (j, out) in row.iter_mut().enumerate() {
                *out += a_ip * b[p * n + j];
            }
        }
    }
    result
}

/// Checks that `a` and `b` are 2-D with matching inner dimensions and returns `(m, k, n)`.
fn matmul_dims(a_shape: &[usize], b_shape: &[usize]) -> Result<(usize, usize, usize), BackpropError> {
    if a_shape.len() != 2 {
        return Err(BackpropError::ShapeMismatch {
            expected: vec![0, 0],
            actual: a_shape.to_vec(),
            operation: "matmul (left operand must be 2-D)".to_string(),
        });
    }
    if b_shape.len() != 2 {
        return Err(BackpropError::ShapeMismatch {
            expected: vec![0, 0],
            actual: b_shape.to_vec(),
            operation: "matmul (right operand must be 2-D)".to_string(),
        });
    }
    let (m, k) = (a_shape[0], a_shape[1]);
    let (k2, n) = (b_shape[0], b_shape[1]);
    if k != k2 {
        return Err(BackpropError::ShapeMismatch {
            expected: vec![k, n],
            actual: b_shape.to_vec(),
            operation: "matmul (inner dimensions)".to_string(),
        });
    }
    Ok((m, k, n))
}

/// Performs 2-D matrix multiplication `a · b`.
///
/// `a` is `[m, k]`, `b` is `[k, n]`, the result is `[m, n]`.
///
/// # Errors
/// `ShapeMismatch` if an operand is not 2-D or the inner dimensions differ.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, BackpropError> {
    let (m, k, n) = matmul_dims(&a.shape(), &b.shape())?;
    let output_data = matmul_kernel(&a.get_f32_data()?, &b.get_f32_data()?, m, k, n);
    let output = Tensor::new(output_data, vec![m, n])?;
    if a.requires_grad() || b.requires_grad() {
        attach_grad_fn(
            &output,
            BackwardOp::Matmul {
                a: a.clone(),
                b: b.clone(),
            },
        );
    }
    Ok(output)
}

/// grad_a = grad · bᵀ (`[m, k]`), grad_b = aᵀ · grad (`[k, n]`).
pub(crate) fn matmul_backward(a: &Tensor, b: &Tensor, grad_output: &Tensor) -> Result<Vec<Tensor>, BackpropError> {
    let (m, k, n) = matmul_dims(&a.shape(), &b.shape())?;
    let grad_shape = grad_output.shape();
    if grad_shape != [m, n] {
        return Err(BackpropError::shape_mismatch(&[m, n], &grad_shape, "matmul backward"));
    }
    let grad = grad_output.get_f32_data()?;
    let a_data = a.get_f32_data()?;
    let b_data = b.get_f32_data()?;

    let b_t = transpose_kernel(&b_data, k, n);
    let grad_a = matmul_kernel(&grad, &b_t, m, n, k);
    let a_t = transpose_kernel(&a_data, m, k);
    let grad_b = matmul_kernel(&a_t, &grad, k, m, n);

    Ok(vec![Tensor::new(grad_a, vec![m, k])?, Tensor::new(grad_b, vec![k, n])?])
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
