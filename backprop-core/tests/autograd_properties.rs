mod common;

use backprop_core::autograd::{check_grad, GradCheckError};
use backprop_core::ops::activation::relu_op;
use backprop_core::ops::arithmetic::{add_op, mul_op};
use backprop_core::ops::linalg::matmul_op;
use backprop_core::ops::loss::softmax_cross_entropy_op;
use backprop_core::ops::reduction::{mean_op, sum_op};
use backprop_core::utils::testing::check_grad_near;
use backprop_core::tensor::randn_with_rng;
use backprop_core::{BackpropError, ErrorKind, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;
use common::{init_logger, tracked};

#[test]
fn composed_network_matches_finite_differences() -> Result<(), GradCheckError> {
    init_logger();
    let x = Tensor::new(vec![0.5, -1.0, 1.5, 0.2, 0.7, -0.3], vec![3, 2])?;
    let w1 = tracked(vec![0.4, -0.6, 0.9, 0.3, 0.8, -0.5], vec![2, 3])?;
    let b1 = tracked(vec![0.05, -0.1, 0.2], vec![3])?;
    let w2 = tracked(vec![0.7, -0.2, 0.1, 0.5, -0.9, 0.3], vec![3, 2])?;
    let labels = [1usize, 0, 1];

    check_grad(
        |inputs| {
            let hidden = relu_op(&add_op(&matmul_op(&x, &inputs[0])?, &inputs[1])?)?;
            let logits = matmul_op(&hidden, &inputs[2])?;
            softmax_cross_entropy_op(&logits, &labels)
        },
        &[w1, b1, w2],
        &Tensor::scalar(1.0),
        1e-3,
        1e-2,
    )
}

#[test]
fn primitives_match_finite_differences_at_random_points() -> Result<(), GradCheckError> {
    for seed in 0..4u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = randn_with_rng(vec![3, 4], &mut rng)?;
        let b = randn_with_rng(vec![4, 2], &mut rng)?;
        let row = randn_with_rng(vec![2], &mut rng)?;
        for t in [&a, &b, &row] {
            t.requires_grad_(true)?;
        }
        let weights = randn_with_rng(vec![3, 2], &mut rng)?;

        check_grad(
            |inputs| add_op(&matmul_op(&inputs[0], &inputs[1])?, &inputs[2]),
            &[a.clone(), b.clone(), row.clone()],
            &weights,
            1e-3,
            1e-2,
        )?;
        check_grad(
            |inputs| mean_op(&mul_op(&relu_op(&inputs[0])?, &inputs[0])?),
            &[a.clone()],
            &Tensor::scalar(1.0),
            1e-3,
            1e-2,
        )?;
    }
    Ok(())
}

#[test]
fn shared_leaf_collects_every_path() -> Result<(), BackpropError> {
    // y = mean(w * x) + sum(w): dy/dw = x / n + 1
    let w = tracked(vec![1.0, 2.0, 3.0, 4.0], vec![4])?;
    let x = Tensor::new(vec![4.0, 8.0, -4.0, 0.0], vec![4])?;
    let y = add_op(&mean_op(&mul_op(&w, &x)?)?, &sum_op(&w)?)?;
    y.backward()?;
    check_grad_near(&w, &[2.0, 3.0, 0.0, 1.0], 1e-6);
    assert!(x.grad().is_none());
    Ok(())
}

#[test]
fn requires_grad_propagates_as_or() -> Result<(), BackpropError> {
    let a = tracked(vec![1.0], vec![1])?;
    let b = Tensor::new(vec![2.0], vec![1])?;
    let c = Tensor::new(vec![3.0], vec![1])?;
    assert!(mul_op(&a, &b)?.requires_grad());
    assert!(mul_op(&b, &a)?.requires_grad());
    let untracked = mul_op(&b, &c)?;
    assert!(!untracked.requires_grad());
    assert!(untracked.grad_fn().is_none());
    assert_eq!(untracked.backward().unwrap_err().kind(), ErrorKind::InvalidGraph);
    Ok(())
}

#[test]
fn intermediate_keeps_its_rule_after_backward() -> Result<(), BackpropError> {
    let w = tracked(vec![1.0, 2.0], vec![2])?;
    let hidden = mul_op(&w, &w)?;
    sum_op(&hidden)?.backward()?;

    let inputs = hidden.grad_fn().map(|op| op.inputs()).unwrap_or_default();
    assert_eq!(inputs.len(), 2);
    assert!(inputs.iter().all(|t| t.ptr_eq(&w)));
    check_grad_near(&hidden, &[1.0, 1.0], 1e-6);
    check_grad_near(&w, &[2.0, 4.0], 1e-6);
    Ok(())
}
