//! Batches a small synthetic dataset with a sequential and a seeded random sampler.

use backprop_core::tensor::uniform_with_rng;
use backprop_core::BackpropError;
use backprop_data::{DataLoader, RandomSampler, SequentialSampler, TensorDataset};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), BackpropError> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(0);
    let features = uniform_with_rng(vec![10, 3], -1.0, 1.0, &mut rng)?;
    let labels = (0..10).map(|i| i % 3).collect();
    let dataset = TensorDataset::new(&features, labels)?;

    let mut sequential = DataLoader::new(dataset.clone(), 4, SequentialSampler::new(), false)?;
    println!("--- SequentialSampler, batch_size 4 ---");
    for (i, batch) in sequential.epoch().enumerate() {
        let batch = batch?;
        println!("batch {}: inputs {:?}, labels {:?}", i, batch.inputs.shape(), batch.labels);
    }

    let mut shuffled = DataLoader::new(dataset, 4, RandomSampler::new(Some(42)), true)?;
    for epoch in 0..2 {
        println!("--- RandomSampler, drop_last, epoch {} ---", epoch);
        for (i, batch) in shuffled.epoch().enumerate() {
            println!("batch {}: labels {:?}", i, batch?.labels);
        }
    }
    Ok(())
}
