// coral-core/src/ops/arithmetic/div.rs

use crate::error::CoralError;
use crate::shape::is_broadcast_compatible;
use crate::tensor::broadcast_utils::broadcast_binary;
use crate::tensor::Tensor;

/// Performs element-wise division (`a / b`) with broadcasting.
///
/// Every entry of `b` is read at least once when it is broadcast against
/// `a`, so a single zero anywhere in `b` is a division by zero.
///
/// # Errors
/// - `ShapeMismatch` if the shapes are not broadcast-compatible.
/// - `DivideByZero` if `b` holds a zero. No output is allocated.
pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, CoralError> {
    if !is_broadcast_compatible(a.shape(), b.shape()) {
        return Err(CoralError::ShapeMismatch {
            expected: a.dims().to_vec(),
            actual: b.dims().to_vec(),
            operation: "div".to_string(),
        });
    }
    if b.buffer.read().iter().any(|&x| x == 0.0) {
        return Err(CoralError::DivideByZero {
            operation: "div".to_string(),
        });
    }
    broadcast_binary(a, b, "div", |x, y| x / y)
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
