use super::*;
use crate::autograd::grad_check::{check_grad, GradCheckError};
use crate::utils::testing::{check_grad_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_sum_to_scalar() -> Result<(), BackpropError> {
    let x = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let s = sum_op(&x)?;
    assert_eq!(s.shape(), Vec::<usize>::new());
    assert_eq!(s.item()?, 21.0);
    Ok(())
}

#[test]
fn test_sum_backward_broadcasts_seed() -> Result<(), BackpropError> {
    let x = create_test_tensor_with_grad(vec![1.0, -2.0, 3.0, 0.5], vec![2, 2]);
    sum_op(&x)?.backward()?;
    check_grad_near(&x, &[1.0; 4], 1e-6);
    Ok(())
}

#[test]
fn test_sum_grad_check() -> Result<(), GradCheckError> {
    let x = create_test_tensor_with_grad(vec![0.3, -1.2, 2.0, 0.7], vec![4]);
    let output_grad = Tensor::scalar(-1.5);
    check_grad(|inputs| sum_op(&inputs[0]), &[x], &output_grad, 1e-3, 1e-2)
}
