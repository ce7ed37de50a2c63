// coral-core/src/ops/arithmetic/add.rs

use crate::error::CoralError;
use crate::tensor::broadcast_utils::broadcast_binary;
use crate::tensor::Tensor;

/// Performs element-wise addition of two tensors with broadcasting.
///
/// The result has the broadcast shape of `a` and `b` and fresh storage.
///
/// # Errors
/// `ShapeMismatch` if the shapes are not broadcast-compatible.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, CoralError> {
    broadcast_binary(a, b, "add", |x, y| x + y)
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
