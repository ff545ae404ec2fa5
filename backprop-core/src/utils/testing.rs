//! Assertion helpers shared by unit tests, integration tests and doc examples.

use crate::tensor::Tensor;
use approx::abs_diff_eq;

/// Asserts that `actual` has `expected_shape` and that every element is within
/// `tolerance` of `expected_data`.
///
/// Panics with the first offending index otherwise.
pub fn check_tensor_near(actual: &Tensor, expected_shape: &[usize], expected_data: &[f32], tolerance: f32) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");

    let guard = actual.read_data();
    assert_eq!(guard.data.len(), expected_data.len(), "Data length mismatch");

    for (i, (a, e)) in guard.data.iter().zip(expected_data.iter()).enumerate() {
        if !abs_diff_eq!(*a, *e, epsilon = tolerance) {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i,
                a,
                e,
                (a - e).abs(),
                tolerance
            );
        }
    }
}

/// Asserts that `tensor` carries a gradient close to `expected_data`.
pub fn check_grad_near(tensor: &Tensor, expected_data: &[f32], tolerance: f32) {
    let grad = tensor.grad().unwrap_or_else(|| panic!("tensor {:?} has no gradient", tensor));
    let shape = tensor.shape();
    check_tensor_near(&grad, &shape, expected_data, tolerance);
}

#[cfg(test)]
pub(crate) fn create_test_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Failed to create test tensor")
}

#[cfg(test)]
pub(crate) fn create_test_tensor_with_grad(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    let tensor = create_test_tensor(data, shape);
    tensor
        .requires_grad_(true)
        .expect("Failed to set requires_grad on test tensor");
    tensor
}
