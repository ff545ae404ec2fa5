use super::*;
use crate::autograd::grad_check::{check_grad, GradCheckError};
use crate::ops::reduction::sum_op;
use crate::utils::testing::{check_grad_near, check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_mul_forward() -> Result<(), BackpropError> {
    let a = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let b = create_test_tensor(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]);
    check_tensor_near(&mul_op(&a, &b)?, &[2, 2], &[5.0, 12.0, 21.0, 32.0], 1e-6);
    Ok(())
}

#[test]
fn test_mul_broadcast_scalar() -> Result<(), BackpropError> {
    let a = create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]);
    let s = Tensor::scalar(2.0);
    check_tensor_near(&mul_op(&a, &s)?, &[3], &[2.0, 4.0, 6.0], 1e-6);
    check_tensor_near(&mul_op(&s, &a)?, &[3], &[2.0, 4.0, 6.0], 1e-6);
    Ok(())
}

#[test]
fn test_mul_backward_simple() -> Result<(), BackpropError> {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0], vec![3]);
    let b = create_test_tensor_with_grad(vec![4.0, 5.0, 6.0], vec![3]);
    sum_op(&mul_op(&a, &b)?)?.backward()?;
    check_grad_near(&a, &[4.0, 5.0, 6.0], 1e-6);
    check_grad_near(&b, &[1.0, 2.0, 3.0], 1e-6);
    Ok(())
}

#[test]
fn test_mul_backward_broadcast_scalar() -> Result<(), BackpropError> {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let s = create_test_tensor_with_grad(vec![3.0], vec![]);
    sum_op(&mul_op(&a, &s)?)?.backward()?;
    check_grad_near(&a, &[3.0; 4], 1e-6);
    check_grad_near(&s, &[10.0], 1e-6);
    Ok(())
}

#[test]
fn test_mul_same_operand_twice() -> Result<(), BackpropError> {
    // d(sum(a*a))/da = 2a
    let a = create_test_tensor_with_grad(vec![1.0, -2.0, 3.0], vec![3]);
    sum_op(&mul_op(&a, &a)?)?.backward()?;
    check_grad_near(&a, &[2.0, -4.0, 6.0], 1e-6);
    Ok(())
}

#[test]
fn test_mul_grad_check_broadcast() -> Result<(), GradCheckError> {
    let a = create_test_tensor_with_grad(vec![0.5, -1.5, 2.0, 1.0, 0.2, -0.7], vec![2, 3]);
    let b = create_test_tensor_with_grad(vec![1.2, -0.3, 0.8], vec![3]);
    let output_grad = create_test_tensor(vec![1.0, 0.5, -1.0, 2.0, -0.5, 0.1], vec![2, 3]);
    check_grad(|inputs| mul_op(&inputs[0], &inputs[1]), &[a, b], &output_grad, 1e-3, 1e-2)
}
