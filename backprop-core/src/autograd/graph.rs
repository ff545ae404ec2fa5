use crate::error::BackpropError;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Identity of a graph node: the address of its shared `TensorData`.
///
/// Stable across `Tensor` clones, so it can key per-pass bookkeeping maps.
pub type NodeId = *const RwLock<TensorData>;

/// Orders the graph reachable from `root` so that every node comes after all of
/// its operands (root last).
///
/// Iterative depth-first search: a node is marked in-progress while its operands are
/// being visited, and meeting an in-progress node again means the graph has a cycle.
///
/// # Errors
/// `CycleDetected` if a node is reachable from itself.
pub(crate) fn topological_sort(root: &Tensor) -> Result<Vec<Tensor>, BackpropError> {
    let mut sorted = Vec::new();
    let mut done: HashSet<NodeId> = HashSet::new();
    let mut in_progress: HashSet<NodeId> = HashSet::new();
    // (node, operands_pushed)
    let mut stack: Vec<(Tensor, bool)> = vec![(root.clone(), false)];

    while let Some((node, operands_pushed)) = stack.pop() {
        let id = node.node_id();
        if operands_pushed {
            in_progress.remove(&id);
            done.insert(id);
            sorted.push(node);
            continue;
        }
        if done.contains(&id) {
            continue;
        }
        if !in_progress.insert(id) {
            return Err(BackpropError::CycleDetected);
        }
        let inputs = node.grad_fn().map(|op| op.inputs()).unwrap_or_default();
        stack.push((node, true));
        for input in inputs.into_iter().rev() {
            let input_id = input.node_id();
            if in_progress.contains(&input_id) {
                return Err(BackpropError::CycleDetected);
            }
            if !done.contains(&input_id) {
                stack.push((input, false));
            }
        }
    }
    log::trace!("topological_sort: {} nodes", sorted.len());
    Ok(sorted)
}

/// Elementwise sum of two equally shaped tensors, detached.
fn sum_contributions(existing: &Tensor, contribution: &Tensor) -> Result<Tensor, BackpropError> {
    let shape = existing.shape();
    let existing_data = existing.get_f32_data()?;
    let contribution_data = contribution.get_f32_data()?;
    let summed = existing_data
        .iter()
        .zip(contribution_data.iter())
        .map(|(a, b)| a + b)
        .collect();
    Tensor::new(summed, shape)
}

/// Propagates `seed` (dL/droot) through the graph of `root`.
///
/// Nodes are visited in reverse topological order, so a node's incoming gradient
/// is complete before its rule runs. Each tracked node gets its total gradient
/// accumulated into `grad`; contributions for untracked operands are dropped.
///
/// # Errors
/// * `CycleDetected` from the sort.
/// * `InvalidGraph` if a rule returns a different number of gradients than it has operands.
/// * `ShapeMismatch` if a contribution is not shaped like its operand.
pub(crate) fn run_backward(root: &Tensor, seed: Tensor) -> Result<(), BackpropError> {
    let sorted = topological_sort(root)?;
    log::debug!(
        "backward: {} nodes reachable from root of shape {:?}",
        sorted.len(),
        root.shape()
    );

    let mut pending: HashMap<NodeId, Tensor> = HashMap::new();
    pending.insert(root.node_id(), seed);

    for node in sorted.iter().rev() {
        let Some(grad) = pending.remove(&node.node_id()) else {
            continue;
        };
        node.acc_grad(&grad)?;

        let Some(op) = node.grad_fn() else {
            continue;
        };
        let inputs = op.inputs();
        let contributions = op.backward(&grad)?;
        if contributions.len() != inputs.len() {
            return Err(BackpropError::InvalidGraph(format!(
                "{} returned {} gradients for {} inputs",
                op.name(),
                contributions.len(),
                inputs.len()
            )));
        }
        log::trace!("backward: {} -> {} inputs", op.name(), inputs.len());

        for (input, contribution) in inputs.iter().zip(contributions) {
            if !input.requires_grad() {
                continue;
            }
            let input_shape = input.shape();
            let contribution_shape = contribution.shape();
            if input_shape != contribution_shape {
                return Err(BackpropError::shape_mismatch(
                    &input_shape,
                    &contribution_shape,
                    op.name(),
                ));
            }
            match pending.entry(input.node_id()) {
                Entry::Occupied(mut entry) => {
                    let summed = sum_contributions(entry.get(), &contribution)?;
                    entry.insert(summed);
                }
                Entry::Vacant(entry) => {
                    entry.insert(contribution);
                }
            }
        }
    }
    Ok(())
}
