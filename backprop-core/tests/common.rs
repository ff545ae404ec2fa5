use backprop_core::{BackpropError, Tensor};

/// Routes `log` output through the test harness. Safe to call from every test.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A leaf tensor that requires grad.
#[allow(dead_code)]
pub fn tracked(data: Vec<f32>, shape: Vec<usize>) -> Result<Tensor, BackpropError> {
    let tensor = Tensor::new(data, shape)?;
    tensor.requires_grad_(true)?;
    Ok(tensor)
}
