use super::*;

#[test]
fn test_calculate_strides() {
    assert_eq!(calculate_strides(&[]), Vec::<usize>::new());
    assert_eq!(calculate_strides(&[5]), vec![1]);
    assert_eq!(calculate_strides(&[2, 3]), vec![3, 1]);
    assert_eq!(calculate_strides(&[2, 2, 2]), vec![4, 2, 1]);
}

#[test]
fn test_index_to_coord() {
    let shape = [2, 3];
    let strides = calculate_strides(&shape);
    assert_eq!(index_to_coord(0, &strides, &shape), vec![0, 0]);
    assert_eq!(index_to_coord(2, &strides, &shape), vec![0, 2]);
    assert_eq!(index_to_coord(4, &strides, &shape), vec![1, 1]);
    assert_eq!(index_to_coord(0, &[], &[]), Vec::<usize>::new());
}
