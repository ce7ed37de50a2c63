// coral-core/src/ops/reduction/mean.rs

use crate::error::CoralError;
use crate::tensor::create::full_like;
use crate::tensor::Tensor;

/// Arithmetic mean of every entry, as a scalar tensor of shape `[1]`.
pub fn mean_op(a: &Tensor) -> Result<Tensor, CoralError> {
    let n = a.numel() as f32;
    let total: f32 = a.buffer.read().iter().sum();
    Tensor::new(vec![total / n], &[1])
}

/// Local gradient of [`mean_op`]: every entry is `1 / N`.
pub fn mean_grad(a: &Tensor) -> Tensor {
    full_like(a, 1.0 / a.numel() as f32)
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
