//! Assertion helpers shared by unit and integration tests.

use crate::buffer::Entry;
use crate::tensor::Tensor;

/// Checks if two tensors are approximately equal (shape and data within tolerance).
/// Panics if shapes differ or any entry differs by more than `tolerance`.
pub fn check_tensor_near(
    actual: &Tensor,
    expected_shape: &[usize],
    expected_data: &[Entry],
    tolerance: Entry,
) {
    assert_eq!(actual.dims(), expected_shape, "Shape mismatch");

    let actual_data = actual.to_vec();
    assert_eq!(
        actual_data.len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual_data.iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Like [`check_tensor_near`], with every expected entry equal to `value`.
pub fn check_tensor_filled(actual: &Tensor, expected_shape: &[usize], value: Entry, tolerance: Entry) {
    let expected = vec![value; actual.numel()];
    check_tensor_near(actual, expected_shape, &expected, tolerance);
}
