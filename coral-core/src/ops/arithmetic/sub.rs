// coral-core/src/ops/arithmetic/sub.rs

use crate::error::CoralError;
use crate::tensor::broadcast_utils::broadcast_binary;
use crate::tensor::Tensor;

/// Performs element-wise subtraction (`a - b`) with broadcasting.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, CoralError> {
    broadcast_binary(a, b, "sub", |x, y| x - y)
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
