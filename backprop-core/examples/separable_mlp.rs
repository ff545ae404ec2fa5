//! Trains a small MLP on two linearly separable point clouds.
//!
//! Run with `RUST_LOG=info cargo run --example separable_mlp` to see progress records.

use backprop_core::nn::{Mlp, Module};
use backprop_core::optim::SgdOptimizer;
use backprop_core::train::{Batch, TrainConfig, Trainer};
use backprop_core::{BackpropError, Tensor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const POINTS_PER_CLASS: usize = 64;
const BATCH_SIZE: usize = 16;

/// Class 0 is centered at (1, 0), class 1 at (0, 1).
fn make_batches(rng: &mut StdRng) -> Result<Vec<Batch>, BackpropError> {
    let mut points: Vec<([f32; 2], usize)> = Vec::with_capacity(2 * POINTS_PER_CLASS);
    for class in 0..2 {
        let center = if class == 0 { [1.0, 0.0] } else { [0.0, 1.0] };
        for _ in 0..POINTS_PER_CLASS {
            let dx: f32 = rng.gen_range(-0.3..0.3);
            let dy: f32 = rng.gen_range(-0.3..0.3);
            points.push(([center[0] + dx, center[1] + dy], class));
        }
    }
    // Interleave the classes so every batch sees both.
    let (class0, class1) = points.split_at(POINTS_PER_CLASS);
    let interleaved: Vec<_> = class0.iter().zip(class1.iter()).flat_map(|(a, b)| [*a, *b]).collect();

    interleaved
        .chunks(BATCH_SIZE)
        .map(|chunk| {
            let inputs: Vec<f32> = chunk.iter().flat_map(|(xy, _)| xy.iter().copied()).collect();
            let labels = chunk.iter().map(|(_, class)| *class).collect();
            Batch::new(Tensor::new(inputs, vec![chunk.len(), 2])?, labels)
        })
        .collect()
}

fn main() -> Result<(), BackpropError> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(7);
    let mut batches = make_batches(&mut rng)?;
    let holdout = batches[0].clone();
    let batches_per_epoch = batches.len();

    let model = Mlp::with_rng(&[2, 8, 2], &mut rng)?;
    let optimizer = SgdOptimizer::new(model.parameter_handles(), 0.1)?.with_momentum(0.9)?;
    let config = TrainConfig::default().with_epochs(20).with_log_every(4);
    let mut trainer = Trainer::new(model, optimizer, config)?;

    let summary = trainer.fit(&mut batches, |record| {
        if record.batch == batches_per_epoch {
            println!("epoch {:>2}: avg loss {:.4}", record.epoch, record.avg_loss);
        }
    })?;

    let evaluation = trainer.evaluate(&holdout)?;
    println!(
        "final step loss {:.4}, first-batch accuracy {:.1}%",
        summary.final_loss().unwrap_or(f32::NAN),
        evaluation.accuracy * 100.0
    );
    Ok(())
}
