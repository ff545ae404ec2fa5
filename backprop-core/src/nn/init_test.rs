use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_kaiming_uniform_bounds() -> Result<(), BackpropError> {
    let mut rng = StdRng::seed_from_u64(3);
    let w = kaiming_uniform(vec![6, 10], 6, &mut rng)?;
    assert_eq!(w.shape(), vec![6, 10]);
    assert!(w.get_f32_data()?.iter().all(|v| v.abs() <= 1.0));
    assert!(!w.requires_grad());
    Ok(())
}

#[test]
fn test_zero_fan_in_is_rejected() {
    let mut rng = StdRng::seed_from_u64(3);
    assert!(matches!(
        kaiming_uniform(vec![0, 2], 0, &mut rng),
        Err(BackpropError::InvalidConfig(_))
    ));
    assert!(fan_in_uniform(vec![2], 0, &mut rng).is_err());
}

#[test]
fn test_same_seed_same_weights() -> Result<(), BackpropError> {
    let a = fan_in_uniform(vec![4], 4, &mut StdRng::seed_from_u64(9))?;
    let b = fan_in_uniform(vec![4], 4, &mut StdRng::seed_from_u64(9))?;
    assert_eq!(a, b);
    Ok(())
}
