use crate::error::BackpropError;
use crate::tensor::Tensor;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical_grad} != numerical {numerical_grad} (difference {difference})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function failed during gradient check: {0}")]
    ForwardPassError(BackpropError),
    #[error("Backward pass failed during gradient check: {0}")]
    BackwardPassError(BackpropError),
    #[error("Tensor error during gradient check: {0}")]
    TensorError(BackpropError),
    #[error("Input {input_index} requires grad but has no gradient after backward.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is not finite for input {input_index}, element {element_index} (loss+ {loss_plus}, loss- {loss_minus})")]
    NumericalGradNotFinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is not finite for input {input_index}, element {element_index}: {value}")]
    AnalyticalGradNotFinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Gradient check input {input_index} must be a leaf tensor.")]
    InputNotLeaf { input_index: usize },
    #[error("Function output does not require grad although an input does.")]
    RequiresGradPropagationError,
}

impl From<BackpropError> for GradCheckError {
    fn from(err: BackpropError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Compares the analytical gradients of `func` with central finite differences.
///
/// The scalar objective is `Σ func(inputs) · output_grad`, evaluated in f64. Every element
/// of every input that requires grad is perturbed by `±epsilon`; an element fails when
/// both the absolute difference and the difference relative to the analytical value
/// exceed `tolerance`.
///
/// Inputs that require grad must be leaves. Their `grad` is overwritten.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Tensor,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, BackpropError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if input.requires_grad() && !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
    }

    for input in inputs.iter().filter(|t| t.requires_grad()) {
        input.set_grad(None);
    }
    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    if inputs.iter().any(|t| t.requires_grad()) && !output.requires_grad() {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    if output.requires_grad() {
        output
            .backward_with_grad(output_grad)
            .map_err(GradCheckError::BackwardPassError)?;
    }

    for (i, original_input) in inputs.iter().enumerate() {
        if !original_input.requires_grad() {
            continue;
        }
        let analytical: Vec<f64> = original_input
            .grad()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })?
            .get_f32_data()?
            .iter()
            .map(|&x| x as f64)
            .collect();
        let original_data = original_input.get_f32_data()?;
        let shape = original_input.shape();

        for elem_idx in 0..original_data.len() {
            let objective_at = |delta: f64| -> Result<(f64, f32), GradCheckError> {
                let mut perturbed_data = original_data.clone();
                let perturbed_value = (original_data[elem_idx] as f64 + delta) as f32;
                perturbed_data[elem_idx] = perturbed_value;
                let perturbed = Tensor::new(perturbed_data, shape.clone())?;
                let mut perturbed_inputs = inputs.to_vec();
                perturbed_inputs[i] = perturbed;
                let out = func(&perturbed_inputs).map_err(GradCheckError::ForwardPassError)?;
                Ok((weighted_sum(&out, output_grad)?, perturbed_value))
            };
            let (loss_plus, x_plus) = objective_at(epsilon)?;
            let (loss_minus, x_minus) = objective_at(-epsilon)?;

            // Divide by the step actually representable in f32.
            let step = x_plus as f64 - x_minus as f64;
            let numerical_grad = (loss_plus - loss_minus) / step;
            let analytical_grad = analytical[elem_idx];

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNotFinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNotFinite {
                    input_index: i,
                    element_index: elem_idx,
                    value: analytical_grad,
                });
            }

            let difference = (analytical_grad - numerical_grad).abs();
            if difference > tolerance && difference / (analytical_grad.abs() + epsilon) > tolerance {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad,
                    difference,
                });
            }
        }
    }
    Ok(())
}

/// `Σ output · output_grad` in f64.
fn weighted_sum(output: &Tensor, output_grad: &Tensor) -> Result<f64, GradCheckError> {
    let output_shape = output.shape();
    let grad_shape = output_grad.shape();
    if output_shape != grad_shape {
        return Err(GradCheckError::TensorError(BackpropError::shape_mismatch(
            &output_shape,
            &grad_shape,
            "check_grad objective",
        )));
    }
    let values = output.get_f32_data()?;
    let weights = output_grad.get_f32_data()?;
    Ok(values
        .iter()
        .zip(weights.iter())
        .map(|(&v, &w)| v as f64 * w as f64)
        .sum())
}
