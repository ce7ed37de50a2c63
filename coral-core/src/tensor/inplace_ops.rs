use crate::buffer::Entry;
use crate::error::CoralError;
use crate::tensor::broadcast_utils::broadcast_assign;
use crate::tensor::Tensor;

/// `dest += src`, broadcasting `src` to `dest`'s shape.
///
/// # Errors
/// `ShapeMismatch` if `dest`'s shape is not already the broadcast result of
/// `dest` and `src`; `AliasedOperands` if `src` is a reshaped view of `dest`.
pub fn add_into(dest: &Tensor, src: &Tensor) -> Result<(), CoralError> {
    broadcast_assign(dest, src, "add_into", |d, s| d + s)
}

/// `dest -= src`, broadcasting `src` to `dest`'s shape.
pub fn subtract_into(dest: &Tensor, src: &Tensor) -> Result<(), CoralError> {
    broadcast_assign(dest, src, "subtract_into", |d, s| d - s)
}

/// `dest *= src`, broadcasting `src` to `dest`'s shape.
pub fn multiply_into(dest: &Tensor, src: &Tensor) -> Result<(), CoralError> {
    broadcast_assign(dest, src, "multiply_into", |d, s| d * s)
}

/// `dest /= src`. Rejects any zero divisor before touching `dest`.
pub fn divide_into(dest: &Tensor, src: &Tensor) -> Result<(), CoralError> {
    if src.buffer.read().iter().any(|&s| s == 0.0) {
        return Err(CoralError::DivideByZero {
            operation: "divide_into".to_string(),
        });
    }
    broadcast_assign(dest, src, "divide_into", |d, s| d / s)
}

/// `dest *= value` for every entry.
pub fn multiply_by_scalar_into(dest: &Tensor, value: Entry) {
    dest.apply_entry_fn(|d| d * value);
}

/// `dest /= value` for every entry.
pub fn divide_by_scalar_into(dest: &Tensor, value: Entry) -> Result<(), CoralError> {
    if value == 0.0 {
        return Err(CoralError::DivideByZero {
            operation: "divide_by_scalar_into".to_string(),
        });
    }
    dest.apply_entry_fn(|d| d / value);
    Ok(())
}

impl Tensor {
    /// In-place addition (`self += other`). See [`add_into`].
    pub fn add_(&self, other: &Tensor) -> Result<(), CoralError> {
        add_into(self, other)
    }

    /// In-place subtraction (`self -= other`). See [`subtract_into`].
    pub fn sub_(&self, other: &Tensor) -> Result<(), CoralError> {
        subtract_into(self, other)
    }

    /// In-place multiplication (`self *= other`). See [`multiply_into`].
    pub fn mul_(&self, other: &Tensor) -> Result<(), CoralError> {
        multiply_into(self, other)
    }

    /// In-place division (`self /= other`). See [`divide_into`].
    pub fn div_(&self, other: &Tensor) -> Result<(), CoralError> {
        divide_into(self, other)
    }

    pub fn mul_scalar_(&self, value: Entry) {
        multiply_by_scalar_into(self, value)
    }

    pub fn div_scalar_(&self, value: Entry) -> Result<(), CoralError> {
        divide_by_scalar_into(self, value)
    }
}

#[cfg(test)]
#[path = "inplace_ops_test.rs"]
mod tests;
