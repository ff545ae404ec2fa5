// src/nn/mod.rs

pub mod init;
pub mod layers;
pub mod mlp;
pub mod module;
pub mod parameter;

pub use layers::{Linear, ReLU};
pub use mlp::Mlp;
pub use module::Module;
pub use parameter::Parameter;
