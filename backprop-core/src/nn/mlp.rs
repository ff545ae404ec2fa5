use crate::error::BackpropError;
use crate::nn::layers::{Linear, ReLU};
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Multi-layer perceptron: `Linear` layers with a ReLU between consecutive ones.
///
/// The last layer has no activation, so the output is raw logits suited to
/// softmax cross-entropy.
#[derive(Debug, Clone)]
pub struct Mlp {
    layers: Vec<Linear>,
    activation: ReLU,
}

impl Mlp {
    /// Builds an MLP with the given layer sizes (`[input, hidden..., output]`) and
    /// weights drawn from a `StdRng` seeded with `seed`.
    ///
    /// # Errors
    /// `InvalidConfig` if fewer than two sizes are given or a size is zero.
    pub fn new(layer_sizes: &[usize], seed: u64) -> Result<Self, BackpropError> {
        Mlp::with_rng(layer_sizes, &mut StdRng::seed_from_u64(seed))
    }

    /// Same as [`Mlp::new`] but draws the weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Result<Self, BackpropError> {
        if layer_sizes.len() < 2 {
            return Err(BackpropError::InvalidConfig(format!(
                "an MLP needs at least input and output sizes, got {:?}",
                layer_sizes
            )));
        }
        if layer_sizes.contains(&0) {
            return Err(BackpropError::InvalidConfig(format!(
                "layer sizes must be positive, got {:?}",
                layer_sizes
            )));
        }
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Linear::new(pair[0], pair[1], &mut *rng))
            .collect::<Result<Vec<_>, _>>()?;
        Mlp::from_layers(layers)
    }

    /// Builds an MLP from explicit layers.
    ///
    /// # Errors
    /// `InvalidConfig` for an empty list; `ShapeMismatch` when a layer's input size
    /// differs from the previous layer's output size.
    pub fn from_layers(layers: Vec<Linear>) -> Result<Self, BackpropError> {
        if layers.is_empty() {
            return Err(BackpropError::InvalidConfig("an MLP needs at least one layer".to_string()));
        }
        for pair in layers.windows(2) {
            if pair[0].out_features() != pair[1].in_features() {
                return Err(BackpropError::shape_mismatch(
                    &[pair[0].out_features()],
                    &[pair[1].in_features()],
                    "Mlp consecutive layer sizes",
                ));
            }
        }
        Ok(Mlp {
            layers,
            activation: ReLU::new(),
        })
    }

    /// Builds an MLP from `(weight, bias)` pairs, see [`Linear::from_weights`].
    pub fn from_weights(weights: Vec<(Tensor, Tensor)>) -> Result<Self, BackpropError> {
        let layers = weights
            .into_iter()
            .map(|(weight, bias)| Linear::from_weights(weight, bias))
            .collect::<Result<Vec<_>, _>>()?;
        Mlp::from_layers(layers)
    }

    pub fn layers(&self) -> &[Linear] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Linear::in_features)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, Linear::out_features)
    }
}

impl Module for Mlp {
    fn forward(&self, input: &Tensor) -> Result<Tensor, BackpropError> {
        let last = self.layers.len() - 1;
        let mut current = input.clone();
        for (idx, layer) in self.layers.iter().enumerate() {
            current = layer.forward(&current)?;
            if idx != last {
                current = self.activation.forward(&current)?;
            }
        }
        Ok(current)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        self.layers.iter().flat_map(|layer| layer.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(idx, layer)| {
                layer
                    .named_parameters()
                    .into_iter()
                    .map(move |(name, param)| (format!("layers.{}.{}", idx, name), param))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "mlp_test.rs"]
mod tests;
