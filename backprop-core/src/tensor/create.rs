// src/tensor/create.rs

use crate::error::BackpropError;
use crate::tensor::Tensor;
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Tensor, BackpropError> {
    full(shape, 0.0)
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<Tensor, BackpropError> {
    full(shape, 1.0)
}

/// Creates a new tensor filled with a specific value with the specified shape.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, BackpropError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new tensor filled with zeros, having the same shape as the input tensor.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, BackpropError> {
    zeros(&tensor.shape())
}

/// Creates a new tensor filled with ones, having the same shape as the input tensor.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, BackpropError> {
    ones(&tensor.shape())
}

/// Creates a tensor with elements drawn from the standard normal distribution,
/// using the thread-local RNG.
pub fn randn(shape: Vec<usize>) -> Result<Tensor, BackpropError> {
    randn_with_rng(shape, &mut rand::thread_rng())
}

/// Same as [`randn`] but draws from the given generator, so a seeded `StdRng`
/// gives reproducible tensors.
pub fn randn_with_rng<R: Rng + ?Sized>(shape: Vec<usize>, rng: &mut R) -> Result<Tensor, BackpropError> {
    let normal = Normal::new(0.0f32, 1.0f32)
        .map_err(|e| BackpropError::InternalError(format!("Normal distribution: {}", e)))?;
    let numel = shape.iter().product();
    let data: Vec<f32> = (0..numel).map(|_| normal.sample(rng)).collect();
    Tensor::new(data, shape)
}

/// Creates a tensor with elements drawn uniformly from `[low, high)`.
///
/// # Errors
/// `InvalidConfig` if `low >= high`.
pub fn uniform_with_rng<R: Rng + ?Sized>(
    shape: Vec<usize>,
    low: f32,
    high: f32,
    rng: &mut R,
) -> Result<Tensor, BackpropError> {
    if !(low < high) {
        return Err(BackpropError::InvalidConfig(format!(
            "uniform bounds must satisfy low < high, got [{}, {})",
            low, high
        )));
    }
    let uniform = Uniform::new(low, high);
    let numel = shape.iter().product();
    let data: Vec<f32> = (0..numel).map(|_| uniform.sample(rng)).collect();
    Tensor::new(data, shape)
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
