use crate::error::BackpropError;
use crate::tensor::utils::{calculate_strides, index_to_coord};
use crate::tensor::Tensor;
use std::cmp::max;

/// Determines the output shape resulting from broadcasting two input shapes.
///
/// Follows NumPy/PyTorch broadcasting rules:
/// 1. If the shapes have different numbers of dimensions, prepend 1s to the shorter shape.
/// 2. Compare dimensions element-wise from right to left.
/// 3. Dimensions are compatible if they are equal, or one of them is 1.
/// 4. The resulting dimension is the larger of the two.
pub fn broadcast_shapes(shape_a: &[usize], shape_b: &[usize]) -> Result<Vec<usize>, BackpropError> {
    let rank_a = shape_a.len();
    let rank_b = shape_b.len();
    let max_rank = max(rank_a, rank_b);
    let mut result_shape = vec![0; max_rank];

    for i in 0..max_rank {
        let dim_a = shape_a.get(rank_a.wrapping_sub(1 + i)).copied().unwrap_or(1);
        let dim_b = shape_b.get(rank_b.wrapping_sub(1 + i)).copied().unwrap_or(1);

        result_shape[max_rank - 1 - i] = if dim_a == dim_b || dim_b == 1 {
            dim_a
        } else if dim_a == 1 {
            dim_b
        } else {
            return Err(BackpropError::BroadcastError {
                shape1: shape_a.to_vec(),
                shape2: shape_b.to_vec(),
            });
        };
    }
    Ok(result_shape)
}

/// For every element of `target_shape` (row-major), the flat index of the element of
/// `source_shape` it is broadcast from.
///
/// # Errors
/// `BroadcastError` if `source_shape` cannot be stretched to `target_shape`.
pub(crate) fn broadcast_source_indices(
    source_shape: &[usize],
    target_shape: &[usize],
) -> Result<Vec<usize>, BackpropError> {
    let broadcast_error = || BackpropError::BroadcastError {
        shape1: source_shape.to_vec(),
        shape2: target_shape.to_vec(),
    };
    if source_shape.len() > target_shape.len() {
        return Err(broadcast_error());
    }
    let rank_diff = target_shape.len() - source_shape.len();
    for (dim_idx, &dim) in source_shape.iter().enumerate() {
        if dim != 1 && dim != target_shape[rank_diff + dim_idx] {
            return Err(broadcast_error());
        }
    }

    let source_strides = calculate_strides(source_shape);
    let target_strides = calculate_strides(target_shape);
    let target_numel: usize = target_shape.iter().product();

    let mut indices = Vec::with_capacity(target_numel);
    for i in 0..target_numel {
        let coord = index_to_coord(i, &target_strides, target_shape);
        let source_index = source_shape
            .iter()
            .zip(source_strides.iter())
            .enumerate()
            .map(|(dim_idx, (&dim, &stride))| {
                if dim == 1 {
                    0
                } else {
                    coord[rank_diff + dim_idx] * stride
                }
            })
            .sum();
        indices.push(source_index);
    }
    Ok(indices)
}

/// Gathers `source` (of `source_shape`) into a buffer of `target_shape`.
pub(crate) fn expand_data(
    source: &[f32],
    source_shape: &[usize],
    target_shape: &[usize],
) -> Result<Vec<f32>, BackpropError> {
    if source_shape == target_shape {
        return Ok(source.to_vec());
    }
    let indices = broadcast_source_indices(source_shape, target_shape)?;
    Ok(indices.into_iter().map(|idx| source[idx]).collect())
}

/// Sums a gradient of `grad_shape` back down to `target_shape`, adding up every element
/// that was broadcast from the same source element.
pub(crate) fn reduce_data(
    grad: &[f32],
    grad_shape: &[usize],
    target_shape: &[usize],
) -> Result<Vec<f32>, BackpropError> {
    if grad_shape == target_shape {
        return Ok(grad.to_vec());
    }
    let indices = broadcast_source_indices(target_shape, grad_shape)?;
    let target_numel: usize = target_shape.iter().product();
    let mut reduced = vec![0.0f32; target_numel];
    for (value, idx) in grad.iter().zip(indices) {
        reduced[idx] += value;
    }
    Ok(reduced)
}

impl Tensor {
    /// Reduces the tensor (gradient) to match a target shape by summing along broadcasted dimensions.
    ///
    /// Used by the backward rules of broadcasting ops. The result is detached.
    pub fn reduce_to_shape(&self, target_shape: &[usize]) -> Result<Tensor, BackpropError> {
        let guard = self.read_data();
        let reduced = reduce_data(&guard.data, &guard.shape, target_shape)?;
        Tensor::new(reduced, target_shape.to_vec())
    }

    /// Materialises the tensor broadcast to `target_shape`. The result is detached.
    pub fn expand_to_shape(&self, target_shape: &[usize]) -> Result<Tensor, BackpropError> {
        let guard = self.read_data();
        let expanded = expand_data(&guard.data, &guard.shape, target_shape)?;
        Tensor::new(expanded, target_shape.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_shapes() {
        assert_eq!(broadcast_shapes(&[2, 3], &[2, 3]).unwrap(), vec![2, 3]);
        assert_eq!(broadcast_shapes(&[2, 3], &[3]).unwrap(), vec![2, 3]);
        assert_eq!(broadcast_shapes(&[2, 1], &[1, 4]).unwrap(), vec![2, 4]);
        assert_eq!(broadcast_shapes(&[], &[4]).unwrap(), vec![4]);
        assert!(matches!(
            broadcast_shapes(&[2], &[3]),
            Err(BackpropError::BroadcastError { .. })
        ));
    }

    #[test]
    fn test_reduce_row_vector() {
        // [[1, 2, 3], [4, 5, 6]] reduced to [3] sums over rows.
        let grad = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let reduced = reduce_data(&grad, &[2, 3], &[3]).unwrap();
        assert_eq!(reduced, vec![5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_reduce_keeps_size_one_dims() {
        let grad = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let reduced = reduce_data(&grad, &[2, 3], &[2, 1]).unwrap();
        assert_eq!(reduced, vec![6.0, 15.0]);
        let to_scalar = reduce_data(&grad, &[2, 3], &[]).unwrap();
        assert_eq!(to_scalar, vec![21.0]);
    }

    #[test]
    fn test_reduce_rejects_incompatible_target() {
        let grad = [1.0, 2.0, 3.0, 4.0];
        assert!(reduce_data(&grad, &[2, 2], &[3]).is_err());
        assert!(reduce_data(&grad, &[4], &[2, 2]).is_err());
    }

    #[test]
    fn test_expand_then_reduce_counts_copies() -> Result<(), BackpropError> {
        let column = Tensor::new(vec![1.0, 2.0], vec![2, 1])?;
        let expanded = column.expand_to_shape(&[2, 3])?;
        assert_eq!(expanded.get_f32_data()?, vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
        let reduced = expanded.reduce_to_shape(&[2, 1])?;
        assert_eq!(reduced.get_f32_data()?, vec![3.0, 6.0]);
        Ok(())
    }
}
