pub mod backward_op;
pub mod grad_check;
pub mod graph;

pub use backward_op::BackwardOp;
pub use grad_check::{check_grad, GradCheckError};

#[cfg(test)]
#[path = "autograd_test.rs"]
mod tests;
