use super::*;
use crate::autograd::grad_check::{check_grad, GradCheckError};
use crate::utils::testing::{check_grad_near, create_test_tensor, create_test_tensor_with_grad};
use approx::assert_relative_eq;

#[test]
fn test_log_sum_exp_matches_naive() {
    let row = [1.0f64, 2.0, 3.0];
    let naive = (1.0f64.exp() + 2.0f64.exp() + 3.0f64.exp()).ln();
    assert_relative_eq!(log_sum_exp(&row), naive, epsilon = 1e-12);
    assert_eq!(log_sum_exp::<f32>(&[]), f32::NEG_INFINITY);
}

#[test]
fn test_uniform_logits_give_log_classes() -> Result<(), BackpropError> {
    let logits = create_test_tensor(vec![0.0; 6], vec![2, 3]);
    let loss = softmax_cross_entropy_op(&logits, &[0, 2])?;
    assert_eq!(loss.shape(), Vec::<usize>::new());
    assert_relative_eq!(loss.item()?, 3.0f32.ln(), epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_single_sample_logits() -> Result<(), BackpropError> {
    let logits = create_test_tensor(vec![2.0, 1.0, 0.1], vec![3]);
    let loss = softmax_cross_entropy_op(&logits, &[0])?;
    let expected = log_sum_exp(&[2.0f64, 1.0, 0.1]) - 2.0;
    assert_relative_eq!(loss.item()?, expected as f32, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_large_logits_stay_finite() -> Result<(), BackpropError> {
    let logits = create_test_tensor_with_grad(vec![1000.0, 0.0, -1000.0], vec![1, 3]);
    let loss = softmax_cross_entropy_op(&logits, &[0])?;
    assert!(loss.item()?.is_finite());
    assert_relative_eq!(loss.item()?, 0.0, epsilon = 1e-6);
    loss.backward()?;
    let grad = logits.grad().ok_or(BackpropError::RequiresGradNotMet)?;
    assert!(grad.is_finite());
    check_grad_near(&logits, &[0.0, 0.0, 0.0], 1e-6);

    let wrong_class = softmax_cross_entropy_op(&logits, &[2])?;
    assert_relative_eq!(wrong_class.item()?, 2000.0, epsilon = 1e-2);
    Ok(())
}

#[test]
fn test_backward_is_softmax_minus_one_hot_over_batch() -> Result<(), BackpropError> {
    let logits = create_test_tensor_with_grad(vec![0.0, 0.0, 0.0, 0.0], vec![2, 2]);
    softmax_cross_entropy_op(&logits, &[0, 1])?.backward()?;
    // softmax = 0.5 everywhere, batch = 2
    check_grad_near(&logits, &[-0.25, 0.25, 0.25, -0.25], 1e-6);
    Ok(())
}

#[test]
fn test_target_out_of_range() {
    let logits = create_test_tensor(vec![0.1, 0.2, 0.3, 0.4], vec![2, 2]);
    let err = softmax_cross_entropy_op(&logits, &[0, 2]).unwrap_err();
    assert_eq!(
        err,
        BackpropError::IndexOutOfBounds {
            index: 2,
            size: 2,
            operation: "softmax_cross_entropy target".to_string(),
        }
    );
}

#[test]
fn test_target_count_must_match_rows() {
    let logits = create_test_tensor(vec![0.1, 0.2, 0.3, 0.4], vec![2, 2]);
    assert!(matches!(
        softmax_cross_entropy_op(&logits, &[0]),
        Err(BackpropError::ShapeMismatch { .. })
    ));
    let vector_logits = create_test_tensor(vec![0.1, 0.2], vec![2]);
    assert!(softmax_cross_entropy_op(&vector_logits, &[0, 1]).is_err());
}

#[test]
fn test_softmax_cross_entropy_grad_check() -> Result<(), GradCheckError> {
    let logits = create_test_tensor_with_grad(vec![0.5, -1.0, 2.0, 0.3, 1.5, -0.2], vec![2, 3]);
    let output_grad = Tensor::scalar(1.0);
    check_grad(
        |inputs| softmax_cross_entropy_op(&inputs[0], &[2, 1]),
        &[logits],
        &output_grad,
        1e-3,
        1e-2,
    )
}
