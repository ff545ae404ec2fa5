use super::*;
use crate::ops::reduction::sum_op;
use crate::utils::testing::{check_grad_near, check_tensor_near};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_linear_forward_known_weights() -> Result<(), BackpropError> {
    let weight = Tensor::new(vec![1.0, 0.0, -1.0, 0.0, 1.0, 2.0], vec![2, 3])?;
    let bias = Tensor::new(vec![0.5, -0.5, 0.0], vec![3])?;
    let layer = Linear::from_weights(weight, bias)?;
    assert_eq!((layer.in_features(), layer.out_features()), (2, 3));

    let x = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?;
    let y = layer.forward(&x)?;
    check_tensor_near(&y, &[2, 3], &[1.5, 1.5, 3.0, 3.5, 3.5, 5.0], 1e-6);
    assert!(y.requires_grad());
    Ok(())
}

#[test]
fn test_linear_backward_reaches_parameters() -> Result<(), BackpropError> {
    let layer = Linear::from_weights(Tensor::new(vec![1.0, 2.0], vec![2, 1])?, Tensor::new(vec![0.0], vec![1])?)?;
    let x = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?;
    sum_op(&layer.forward(&x)?)?.backward()?;
    check_grad_near(layer.weight(), &[4.0, 6.0], 1e-6);
    check_grad_near(layer.bias(), &[2.0], 1e-6);
    assert!(x.grad().is_none());
    Ok(())
}

#[test]
fn test_linear_rejects_bad_bias() -> Result<(), BackpropError> {
    let weight = Tensor::new(vec![0.0; 6], vec![2, 3])?;
    let bias = Tensor::new(vec![0.0; 2], vec![2])?;
    assert!(matches!(
        Linear::from_weights(weight, bias),
        Err(BackpropError::ShapeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_linear_named_parameters() -> Result<(), BackpropError> {
    let layer = Linear::new(3, 2, &mut StdRng::seed_from_u64(1))?;
    let names: Vec<String> = layer.named_parameters().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["weight".to_string(), "bias".to_string()]);
    assert_eq!(layer.weight().shape(), vec![3, 2]);
    Ok(())
}
