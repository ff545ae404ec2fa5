use crate::ops::traits::Numeric;

/// Transposes a row-major `rows x cols` matrix into a row-major `cols x rows` one.
pub(crate) fn transpose_kernel<T: Numeric>(data: &[T], rows: usize, cols: usize) -> Vec<T> {
    let mut result = vec![T::zero(); rows * cols];
    for i in 0..rows {
        for j in 0..cols {
            result[j * rows + i] = data[i * cols + j];
        }
    }
    result
}
