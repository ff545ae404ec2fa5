pub mod tensor_dataset;
pub mod traits;

pub use tensor_dataset::TensorDataset;
pub use traits::{Dataset, Sample};
