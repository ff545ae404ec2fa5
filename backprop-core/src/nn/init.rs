use crate::error::BackpropError;
use crate::tensor::{uniform_with_rng, Tensor};
use rand::Rng;

/// Kaiming (He) uniform initialisation for layers followed by ReLU.
///
/// Samples from `U(-bound, bound)` with `bound = sqrt(6 / fan_in)`.
///
/// # Errors
/// `InvalidConfig` if `fan_in` is zero.
pub fn kaiming_uniform<R: Rng + ?Sized>(shape: Vec<usize>, fan_in: usize, rng: &mut R) -> Result<Tensor, BackpropError> {
    if fan_in == 0 {
        return Err(BackpropError::InvalidConfig(
            "kaiming_uniform requires fan_in > 0".to_string(),
        ));
    }
    let bound = (6.0 / fan_in as f32).sqrt();
    uniform_with_rng(shape, -bound, bound, rng)
}

/// Uniform `U(-1/sqrt(fan_in), 1/sqrt(fan_in))`, the usual bias initialisation.
pub fn fan_in_uniform<R: Rng + ?Sized>(shape: Vec<usize>, fan_in: usize, rng: &mut R) -> Result<Tensor, BackpropError> {
    if fan_in == 0 {
        return Err(BackpropError::InvalidConfig(
            "fan_in_uniform requires fan_in > 0".to_string(),
        ));
    }
    let bound = 1.0 / (fan_in as f32).sqrt();
    uniform_with_rng(shape, -bound, bound, rng)
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
