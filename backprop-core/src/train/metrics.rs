use crate::error::BackpropError;
use crate::tensor::Tensor;

/// Index of the largest value in each row of a `[rows, classes]` tensor.
///
/// Ties resolve to the lowest index.
pub fn argmax_rows(logits: &Tensor) -> Result<Vec<usize>, BackpropError> {
    let shape = logits.shape();
    if shape.len() != 2 || shape[1] == 0 {
        return Err(BackpropError::ShapeMismatch {
            expected: vec![shape.first().copied().unwrap_or(0), 1],
            actual: shape,
            operation: "argmax_rows expects [rows, classes]".to_string(),
        });
    }
    let classes = shape[1];
    let data = logits.get_f32_data()?;
    Ok(data
        .chunks(classes)
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f32::NEG_INFINITY), |(best_idx, best), (idx, &v)| {
                    if v > best {
                        (idx, v)
                    } else {
                        (best_idx, best)
                    }
                })
                .0
        })
        .collect())
}

/// Fraction of rows whose argmax equals the label.
///
/// # Errors
/// `ShapeMismatch` if the number of labels differs from the number of rows.
pub fn accuracy(logits: &Tensor, labels: &[usize]) -> Result<f32, BackpropError> {
    let predictions = argmax_rows(logits)?;
    if predictions.len() != labels.len() {
        return Err(BackpropError::shape_mismatch(&[predictions.len()], &[labels.len()], "accuracy"));
    }
    if labels.is_empty() {
        return Err(BackpropError::EmptyBatch("accuracy over zero rows".to_string()));
    }
    let correct = predictions.iter().zip(labels).filter(|(p, l)| p == l).count();
    Ok(correct as f32 / labels.len() as f32)
}
