use crate::error::BackpropError;
use crate::nn::Module;
use crate::ops::loss::softmax_cross_entropy_op;
use crate::optim::Optimizer;
use crate::train::batch::{Batch, BatchSource};
use crate::train::config::TrainConfig;
use crate::train::metrics::accuracy;

/// Progress report emitted during [`Trainer::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    /// Zero-based epoch index.
    pub epoch: usize,
    /// Number of batches processed so far in this epoch.
    pub batch: usize,
    /// Mean loss over the batches since the previous record.
    pub avg_loss: f32,
}

/// Losses collected by [`Trainer::fit`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainSummary {
    /// Loss of every step, in order.
    pub step_losses: Vec<f32>,
    /// Mean step loss of every epoch.
    pub epoch_losses: Vec<f32>,
}

impl TrainSummary {
    pub fn final_loss(&self) -> Option<f32> {
        self.step_losses.last().copied()
    }
}

/// Loss and accuracy of a model on one batch, without touching gradients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub loss: f32,
    pub accuracy: f32,
}

/// Drives a classifier through zero-grad, forward, loss, backward and step.
#[derive(Debug)]
pub struct Trainer<M: Module, O: Optimizer> {
    model: M,
    optimizer: O,
    config: TrainConfig,
    steps_taken: usize,
}

impl<M: Module, O: Optimizer> Trainer<M, O> {
    /// # Errors
    /// `InvalidConfig` if `config` does not validate.
    pub fn new(model: M, optimizer: O, config: TrainConfig) -> Result<Self, BackpropError> {
        config.validate()?;
        Ok(Trainer {
            model,
            optimizer,
            config,
            steps_taken: 0,
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    pub fn optimizer_mut(&mut self) -> &mut O {
        &mut self.optimizer
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn into_parts(self) -> (M, O) {
        (self.model, self.optimizer)
    }

    /// Runs one optimization step on `batch` and returns the loss before the update.
    ///
    /// # Errors
    /// Any error of the forward pass, the loss, the backward pass or the optimizer, and
    /// `NonFinite` when `check_finite` is on and the loss or a parameter gradient is
    /// NaN or infinite. On `NonFinite` the parameters are left unchanged.
    pub fn train_step(&mut self, batch: &Batch) -> Result<f32, BackpropError> {
        if self.config.zero_grad_each_step {
            self.optimizer.zero_grad()?;
        }
        let logits = self.model.forward(&batch.inputs)?;
        let loss = softmax_cross_entropy_op(&logits, &batch.labels)?;
        let loss_value = loss.item()?;
        if self.config.check_finite && !loss_value.is_finite() {
            log::warn!("step {}: loss is {}", self.steps_taken, loss_value);
            return Err(BackpropError::NonFinite {
                operation: "forward".to_string(),
                tensor: "loss".to_string(),
            });
        }

        loss.backward()?;

        if self.config.check_finite {
            for (name, param) in self.model.named_parameters() {
                let finite = param.grad().map_or(true, |g| g.is_finite());
                if !finite {
                    log::warn!("step {}: gradient of {} is not finite", self.steps_taken, name);
                    return Err(BackpropError::NonFinite {
                        operation: "backward".to_string(),
                        tensor: name,
                    });
                }
            }
        }

        self.optimizer.step()?;
        self.steps_taken += 1;
        log::debug!("step {}: loss {:.6}", self.steps_taken, loss_value);
        Ok(loss_value)
    }

    /// Trains for `config.epochs` epochs over `source`.
    ///
    /// `on_progress` receives a [`ProgressRecord`] every `config.log_every` batches and
    /// once more at the end of an epoch if batches remain unreported; the same record
    /// is logged at info level.
    ///
    /// # Errors
    /// The first error of a step or of the source. `EmptyBatch` if an epoch yields no
    /// batches.
    pub fn fit<S, F>(&mut self, source: &mut S, mut on_progress: F) -> Result<TrainSummary, BackpropError>
    where
        S: BatchSource + ?Sized,
        F: FnMut(&ProgressRecord),
    {
        let mut summary = TrainSummary::default();
        for epoch in 0..self.config.epochs {
            let mut epoch_total = 0.0f64;
            let mut epoch_batches = 0usize;
            let mut window_total = 0.0f64;
            let mut window_batches = 0usize;

            for batch in source.epoch_batches(epoch) {
                let batch = batch?;
                let loss = self.train_step(&batch)?;
                summary.step_losses.push(loss);
                epoch_total += loss as f64;
                epoch_batches += 1;
                window_total += loss as f64;
                window_batches += 1;

                if epoch_batches % self.config.log_every == 0 {
                    report(epoch, epoch_batches, window_total / window_batches as f64, &mut on_progress);
                    window_total = 0.0;
                    window_batches = 0;
                }
            }

            if epoch_batches == 0 {
                return Err(BackpropError::EmptyBatch(format!(
                    "data source yielded no batches in epoch {}",
                    epoch
                )));
            }
            if window_batches > 0 {
                report(epoch, epoch_batches, window_total / window_batches as f64, &mut on_progress);
            }
            summary.epoch_losses.push((epoch_total / epoch_batches as f64) as f32);
        }
        Ok(summary)
    }

    /// Computes loss and accuracy on `batch`. Parameter gradients are not modified.
    pub fn evaluate(&self, batch: &Batch) -> Result<Evaluation, BackpropError> {
        let logits = self.model.forward(&batch.inputs)?;
        let loss = softmax_cross_entropy_op(&logits, &batch.labels)?.item()?;
        let accuracy = accuracy(&logits, &batch.labels)?;
        Ok(Evaluation { loss, accuracy })
    }
}

fn report<F: FnMut(&ProgressRecord)>(epoch: usize, batch: usize, avg_loss: f64, on_progress: &mut F) {
    let record = ProgressRecord {
        epoch,
        batch,
        avg_loss: avg_loss as f32,
    };
    log::info!("epoch {} batch {}: avg loss {:.6}", record.epoch, record.batch, record.avg_loss);
    on_progress(&record);
}

#[cfg(test)]
#[path = "trainer_test.rs"]
mod tests;
