//! # Tensor Operations Module (`ops`)
//!
//! The closed set of differentiable primitives.
//!
//! - Each primitive has a forward function named `xxx_op` that computes the result
//!   and, when any operand requires grad, records a [`BackwardOp`] variant on it.
//! - The matching `xxx_backward` function (crate-private) turns `dL/dOutput` into one
//!   gradient per operand. [`BackwardOp::backward`] dispatches to it.
//! - Numeric kernels are generic over [`traits::Numeric`].
//!
//! ## Submodules
//!
//! - [`arithmetic`]: broadcasting `add` and `mul`.
//! - [`linalg`]: 2-D `matmul` and the transpose kernel it uses.
//! - [`activation`]: `relu`.
//! - [`loss`]: softmax cross-entropy.
//! - [`reduction`]: `sum` and `mean` over all elements.

use crate::autograd::BackwardOp;
use crate::error::BackpropError;
use crate::tensor::broadcast_utils::{broadcast_shapes, expand_data};
use crate::tensor::Tensor;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod loss;
pub mod reduction;
pub mod traits;

/// Marks `output` as produced by `grad_fn`.
///
/// Only called when at least one operand requires grad, which keeps
/// `output.requires_grad` equal to the OR of the operands' flags.
pub(crate) fn attach_grad_fn(output: &Tensor, grad_fn: BackwardOp) {
    let mut guard = output.write_data();
    guard.requires_grad = true;
    guard.grad_fn = Some(grad_fn);
}

/// Applies `op` elementwise to `a` and `b` broadcast to their common shape.
///
/// Returns the output buffer and shape. No autograd bookkeeping is done here.
pub(crate) fn apply_binary_broadcast<F>(
    a: &Tensor,
    b: &Tensor,
    op: F,
) -> Result<(Vec<f32>, Vec<usize>), BackpropError>
where
    F: Fn(f32, f32) -> f32,
{
    let a_shape = a.shape();
    let b_shape = b.shape();
    let output_shape = broadcast_shapes(&a_shape, &b_shape)?;
    let a_expanded = expand_data(&a.get_f32_data()?, &a_shape, &output_shape)?;
    let b_expanded = expand_data(&b.get_f32_data()?, &b_shape, &output_shape)?;
    let output = a_expanded
        .iter()
        .zip(b_expanded.iter())
        .map(|(&x, &y)| op(x, y))
        .collect();
    Ok((output, output_shape))
}
