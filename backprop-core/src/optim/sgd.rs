use crate::error::BackpropError;
use crate::nn::Parameter;
use crate::optim::optimizer_trait::Optimizer;
use std::collections::HashMap;

fn validate_lr(lr: f32) -> Result<(), BackpropError> {
    if lr.is_finite() && lr > 0.0 {
        Ok(())
    } else {
        Err(BackpropError::InvalidConfig(format!(
            "learning rate must be finite and > 0, got {}",
            lr
        )))
    }
}

/// Implements the Stochastic Gradient Descent (SGD) optimizer.
///
/// With the default settings a step is exactly `p ← p − lr · grad`. Optional momentum
/// keeps one velocity buffer per parameter (`v ← μ·v + d`, first step `v = d`) and
/// weight decay adds `λ·p` to the gradient before the momentum update.
#[derive(Debug)]
pub struct SgdOptimizer {
    params: Vec<Parameter>,
    lr: f32,
    momentum: f32,
    weight_decay: f32,
    // Keyed by the parameter's node address.
    momentum_buffers: HashMap<usize, Vec<f32>>,
}

impl SgdOptimizer {
    /// Creates a new `SgdOptimizer` over `params` with learning rate `lr`.
    ///
    /// # Errors
    /// `InvalidConfig` unless `lr` is finite and positive.
    pub fn new(params: impl IntoIterator<Item = Parameter>, lr: f32) -> Result<Self, BackpropError> {
        validate_lr(lr)?;
        Ok(SgdOptimizer {
            params: params.into_iter().collect(),
            lr,
            momentum: 0.0,
            weight_decay: 0.0,
            momentum_buffers: HashMap::new(),
        })
    }

    /// Enables momentum with factor `momentum` in `[0, 1)`.
    pub fn with_momentum(mut self, momentum: f32) -> Result<Self, BackpropError> {
        if !(0.0..1.0).contains(&momentum) {
            return Err(BackpropError::InvalidConfig(format!(
                "momentum must be in [0, 1), got {}",
                momentum
            )));
        }
        self.momentum = momentum;
        Ok(self)
    }

    /// Enables L2 weight decay with factor `weight_decay >= 0`.
    pub fn with_weight_decay(mut self, weight_decay: f32) -> Result<Self, BackpropError> {
        if !(weight_decay.is_finite() && weight_decay >= 0.0) {
            return Err(BackpropError::InvalidConfig(format!(
                "weight decay must be finite and >= 0, got {}",
                weight_decay
            )));
        }
        self.weight_decay = weight_decay;
        Ok(self)
    }

    pub fn momentum(&self) -> f32 {
        self.momentum
    }

    pub fn weight_decay(&self) -> f32 {
        self.weight_decay
    }
}

impl Optimizer for SgdOptimizer {
    fn step(&mut self) -> Result<(), BackpropError> {
        for param in &self.params {
            let Some(grad) = param.grad() else {
                continue;
            };
            let mut update = grad.get_f32_data()?;
            if update.len() != param.numel() {
                return Err(BackpropError::shape_mismatch(&param.shape(), &grad.shape(), "SGD step"));
            }

            if self.weight_decay != 0.0 {
                let weights = param.get_f32_data()?;
                for (u, w) in update.iter_mut().zip(weights.iter()) {
                    *u += self.weight_decay * w;
                }
            }

            if self.momentum != 0.0 {
                let key = param.node_id() as usize;
                let momentum = self.momentum;
                let buffer = self
                    .momentum_buffers
                    .entry(key)
                    .and_modify(|buf| {
                        for (v, d) in buf.iter_mut().zip(update.iter()) {
                            *v = momentum * *v + d;
                        }
                    })
                    .or_insert_with(|| update.clone());
                update.copy_from_slice(buffer);
            }

            let mut guard = param.write_data();
            for (w, u) in guard.data.iter_mut().zip(update.iter()) {
                *w -= self.lr * u;
            }
        }
        log::trace!("SGD step over {} parameters (lr {})", self.params.len(), self.lr);
        Ok(())
    }

    fn zero_grad(&mut self) -> Result<(), BackpropError> {
        for param in &self.params {
            param.zero_grad()?;
        }
        Ok(())
    }

    fn params(&self) -> &[Parameter] {
        &self.params
    }

    fn learning_rate(&self) -> f32 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f32) -> Result<(), BackpropError> {
        validate_lr(lr)?;
        self.lr = lr;
        Ok(())
    }
}
