// src/ops/loss/softmax_cross_entropy.rs

use crate::autograd::BackwardOp;
use crate::error::BackpropError;
use crate::ops::attach_grad_fn;
use crate::ops::traits::Numeric;
use crate::tensor::Tensor;

/// `log(Σ exp(x_i))`, computed as `m + log(Σ exp(x_i - m))` with `m = max(x)` so
/// large logits do not overflow.
///
/// Returns `-inf` for an empty slice.
pub fn log_sum_exp<T: Numeric>(row: &[T]) -> T {
    let max = row.iter().copied().fold(T::neg_infinity(), T::max);
    if !max.is_finite() {
        return max;
    }
    let sum: T = row.iter().map(|&x| (x - max).exp()).sum();
    max + sum.ln()
}

/// Splits `logits_shape` into `(batch, classes)`.
///
/// Accepts `[batch, classes]` with one target per row, or `[classes]` with exactly one
/// target.
fn batch_and_classes(logits_shape: &[usize], num_targets: usize) -> Result<(usize, usize), BackpropError> {
    let (batch, classes) = match logits_shape {
        [classes] => (1, *classes),
        [batch, classes] => (*batch, *classes),
        _ => {
            return Err(BackpropError::ShapeMismatch {
                expected: vec![num_targets, 0],
                actual: logits_shape.to_vec(),
                operation: "softmax_cross_entropy (logits must be [classes] or [batch, classes])".to_string(),
            })
        }
    };
    if batch == 0 {
        return Err(BackpropError::EmptyBatch("softmax_cross_entropy on zero rows".to_string()));
    }
    if classes == 0 {
        return Err(BackpropError::ShapeMismatch {
            expected: vec![batch, 1],
            actual: logits_shape.to_vec(),
            operation: "softmax_cross_entropy (no classes)".to_string(),
        });
    }
    if num_targets != batch {
        return Err(BackpropError::ShapeMismatch {
            expected: vec![batch],
            actual: vec![num_targets],
            operation: "softmax_cross_entropy (one target per row)".to_string(),
        });
    }
    Ok((batch, classes))
}

/// Mean softmax cross-entropy of `logits` against integer class `targets`.
///
/// For each row `i`: `loss_i = log Σ_c exp(logits[i, c]) - logits[i, targets[i]]`, and the
/// result is the scalar `mean_i loss_i`. The row-wise softmax is kept in the backward
/// rule.
///
/// # Errors
/// * `ShapeMismatch` for logits of rank other than 1 or 2, or a target count different
///   from the number of rows.
/// * `IndexOutOfBounds` if a target is not a valid class index.
/// * `EmptyBatch` for zero rows.
pub fn softmax_cross_entropy_op(logits: &Tensor, targets: &[usize]) -> Result<Tensor, BackpropError> {
    let (batch, classes) = batch_and_classes(&logits.shape(), targets.len())?;
    if let Some(&bad) = targets.iter().find(|&&t| t >= classes) {
        return Err(BackpropError::IndexOutOfBounds {
            index: bad,
            size: classes,
            operation: "softmax_cross_entropy target".to_string(),
        });
    }

    let data = logits.get_f32_data()?;
    let mut probs = Vec::with_capacity(batch * classes);
    let mut total_loss = 0.0f64;
    for (row_idx, &target) in targets.iter().enumerate() {
        let row: Vec<f64> = data[row_idx * classes..(row_idx + 1) * classes]
            .iter()
            .map(|&x| f64::from_storage(x))
            .collect();
        let lse = log_sum_exp(&row);
        total_loss += lse - row[target];
        probs.extend(row.iter().map(|&x| (x - lse).exp().to_storage()));
    }
    let output = Tensor::scalar((total_loss / batch as f64) as f32);

    if logits.requires_grad() {
        attach_grad_fn(
            &output,
            BackwardOp::SoftmaxCrossEntropy {
                logits: logits.clone(),
                targets: targets.to_vec(),
                probs,
            },
        );
    }
    Ok(output)
}

/// `dL/dlogits[i, c] = (softmax[i, c] - [c == target_i]) / batch · grad`.
pub(crate) fn softmax_cross_entropy_backward(
    logits: &Tensor,
    targets: &[usize],
    probs: &[f32],
    grad_output: &Tensor,
) -> Result<Vec<Tensor>, BackpropError> {
    let shape = logits.shape();
    let (batch, classes) = batch_and_classes(&shape, targets.len())?;
    if probs.len() != batch * classes {
        return Err(BackpropError::InternalError(format!(
            "softmax_cross_entropy kept {} probabilities for {} logits",
            probs.len(),
            batch * classes
        )));
    }
    let scale = grad_output.item()? / batch as f32;
    let mut grad = probs.to_vec();
    for (row_idx, &target) in targets.iter().enumerate() {
        grad[row_idx * classes + target] -= 1.0;
    }
    grad.iter_mut().for_each(|g| *g *= scale);
    Ok(vec![Tensor::new(grad, shape)?])
}

#[cfg(test)]
#[path = "softmax_cross_entropy_test.rs"]
mod tests;
