// coral-core/src/ops/reduction/sum.rs

use crate::error::CoralError;
use crate::tensor::{ones_like, Tensor};

/// Sums every entry into a scalar tensor of shape `[1]`.
pub fn sum_op(a: &Tensor) -> Result<Tensor, CoralError> {
    let total: f32 = a.buffer.read().iter().sum();
    Tensor::new(vec![total], &[1])
}

/// Local gradient of [`sum_op`] with respect to its input: all ones.
pub fn sum_grad(a: &Tensor) -> Tensor {
    ones_like(a)
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
