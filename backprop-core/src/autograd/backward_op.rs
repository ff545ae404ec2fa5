use crate::error::BackpropError;
use crate::ops::activation::relu::relu_backward;
use crate::ops::arithmetic::add::add_backward;
use crate::ops::arithmetic::mul::mul_backward;
use crate::ops::linalg::matmul::matmul_backward;
use crate::ops::loss::softmax_cross_entropy::softmax_cross_entropy_backward;
use crate::ops::reduction::mean::mean_backward;
use crate::ops::reduction::sum::sum_backward;
use crate::tensor::Tensor;

/// The backward rule of a differentiable primitive.
///
/// Any tracked operation stores one of these in its output's `grad_fn`. The rule keeps
/// the operands (strong handles, in argument order) and whatever forward context the
/// derivative needs, so the graph lives exactly as long as the output node.
///
/// The set of primitives is closed: adding one means adding a variant here and
/// its forward/backward pair under `ops`.
#[derive(Debug, Clone)]
pub enum BackwardOp {
    /// `a + b` with broadcasting.
    Add { a: Tensor, b: Tensor },
    /// `a * b` elementwise with broadcasting.
    Mul { a: Tensor, b: Tensor },
    /// 2-D matrix product `a · b`.
    Matmul { a: Tensor, b: Tensor },
    /// `max(0, x)`. `mask[i]` records whether `x[i] > 0`.
    Relu { input: Tensor, mask: Vec<bool> },
    /// Mean softmax cross-entropy. `probs` are the row-wise softmax of the logits.
    SoftmaxCrossEntropy {
        logits: Tensor,
        targets: Vec<usize>,
        probs: Vec<f32>,
    },
    /// Sum of all elements.
    Sum { input: Tensor },
    /// Mean of all elements.
    Mean { input: Tensor },
}

impl BackwardOp {
    /// Short name of the primitive, used in debug output and logs.
    pub fn name(&self) -> &'static str {
        match self {
            BackwardOp::Add { .. } => "AddBackward",
            BackwardOp::Mul { .. } => "MulBackward",
            BackwardOp::Matmul { .. } => "MatmulBackward",
            BackwardOp::Relu { .. } => "ReluBackward",
            BackwardOp::SoftmaxCrossEntropy { .. } => "SoftmaxCrossEntropyBackward",
            BackwardOp::Sum { .. } => "SumBackward",
            BackwardOp::Mean { .. } => "MeanBackward",
        }
    }

    /// The operands of the forward operation, in argument order.
    ///
    /// The order matches the gradients returned by [`BackwardOp::backward`].
    pub fn inputs(&self) -> Vec<Tensor> {
        match self {
            BackwardOp::Add { a, b } | BackwardOp::Mul { a, b } | BackwardOp::Matmul { a, b } => {
                vec![a.clone(), b.clone()]
            }
            BackwardOp::Relu { input, .. }
            | BackwardOp::Sum { input }
            | BackwardOp::Mean { input } => vec![input.clone()],
            BackwardOp::SoftmaxCrossEntropy { logits, .. } => vec![logits.clone()],
        }
    }

    /// Computes `dL/dInput_i` for every operand from `dL/dOutput`.
    ///
    /// Returns one detached tensor per operand, shaped like that operand.
    pub fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, BackpropError> {
        match self {
            BackwardOp::Add { a, b } => add_backward(a, b, grad_output),
            BackwardOp::Mul { a, b } => mul_backward(a, b, grad_output),
            BackwardOp::Matmul { a, b } => matmul_backward(a, b, grad_output),
            BackwardOp::Relu { input, mask } => relu_backward(input, mask, grad_output),
            BackwardOp::SoftmaxCrossEntropy { logits, targets, probs } => {
                softmax_cross_entropy_backward(logits, targets, probs, grad_output)
            }
            BackwardOp::Sum { input } => sum_backward(input, grad_output),
            BackwardOp::Mean { input } => mean_backward(input, grad_output),
        }
    }
}
