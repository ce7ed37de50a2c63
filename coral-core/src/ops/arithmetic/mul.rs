// coral-core/src/ops/arithmetic/mul.rs

use crate::error::CoralError;
use crate::tensor::broadcast_utils::broadcast_binary;
use crate::tensor::Tensor;

/// Performs element-wise multiplication with broadcasting.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, CoralError> {
    broadcast_binary(a, b, "mul", |x, y| x * y)
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
