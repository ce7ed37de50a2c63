use std::cmp::max;
use std::fmt;

use crate::error::CoralError;

/// Maximum number of dimensions a tensor may have.
pub const MAX_RANK: usize = 4;

/// Dimension sizes of a tensor together with their row-major strides.
///
/// `strides` and `size` are derived from `dims` when the shape is built and
/// never change afterwards. A different rank or size always means a new
/// `Shape`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
    strides: Vec<usize>,
    size: usize,
}

/// Calculates the strides for a given list of dimensions.
///
/// Example:
/// dims = [2, 3] -> strides = [3, 1]
/// dims = [2, 2, 2] -> strides = [4, 2, 1]
pub fn calculate_strides(dims: &[usize]) -> Vec<usize> {
    if dims.is_empty() {
        return vec![];
    }
    let rank = dims.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}

impl Shape {
    /// Builds a shape, computing strides and total size.
    ///
    /// # Errors
    /// `InvalidShape` if `dims` is empty, longer than [`MAX_RANK`], or
    /// contains a zero.
    pub fn new(dims: &[usize]) -> Result<Self, CoralError> {
        if dims.is_empty() {
            return Err(CoralError::InvalidShape {
                dims: dims.to_vec(),
                reason: "a shape needs at least one dimension".to_string(),
            });
        }
        if dims.len() > MAX_RANK {
            return Err(CoralError::InvalidShape {
                dims: dims.to_vec(),
                reason: format!("rank {} exceeds the maximum of {}", dims.len(), MAX_RANK),
            });
        }
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(CoralError::InvalidShape {
                dims: dims.to_vec(),
                reason: format!("dimension {} has size zero", axis),
            });
        }
        Ok(Shape {
            dims: dims.to_vec(),
            strides: calculate_strides(dims),
            size: dims.iter().product(),
        })
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Total number of entries.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// True iff the shape holds exactly one entry, whatever its rank.
    pub fn is_scalar(&self) -> bool {
        self.size == 1
    }

    /// Left-pads the shape with size-1 dimensions until it has rank `rank`.
    pub fn extend_to_rank(&self, rank: usize) -> Result<Shape, CoralError> {
        if rank < self.rank() {
            return Err(CoralError::InvalidShape {
                dims: self.dims.clone(),
                reason: format!("cannot reduce rank {} to {}", self.rank(), rank),
            });
        }
        let mut dims = vec![1; rank - self.rank()];
        dims.extend_from_slice(&self.dims);
        Shape::new(&dims)
    }

    /// Reinterprets the same entries under new dimensions.
    ///
    /// This is the only way to obtain a differently-dimensioned shape for an
    /// existing buffer; the total size must be unchanged.
    pub fn reinterpret(&self, dims: &[usize]) -> Result<Shape, CoralError> {
        let shape = Shape::new(dims)?;
        if shape.size != self.size {
            return Err(CoralError::InvalidShape {
                dims: dims.to_vec(),
                reason: format!(
                    "cannot view {} entries as {} entries",
                    self.size, shape.size
                ),
            });
        }
        Ok(shape)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape(")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, ")")
    }
}

/// Size of `shape` at aligned position `i` (counted from the right), or 1 if
/// the shape is too short to reach it.
fn aligned_dim(shape: &Shape, i: usize) -> usize {
    shape
        .dims
        .get(shape.rank().wrapping_sub(1 + i))
        .copied()
        .unwrap_or(1)
}

/// True iff every right-aligned pair of dimensions is equal or contains a 1.
pub fn is_broadcast_compatible(a: &Shape, b: &Shape) -> bool {
    (0..max(a.rank(), b.rank())).all(|i| {
        let (da, db) = (aligned_dim(a, i), aligned_dim(b, i));
        da == db || da == 1 || db == 1
    })
}

/// Determines the shape resulting from broadcasting `a` against `b`.
///
/// Follows NumPy broadcasting rules: dimensions are compared right to left,
/// the shorter shape is padded with 1s on the left, and each result
/// dimension is the larger of the pair.
pub fn broadcast_result(a: &Shape, b: &Shape) -> Result<Shape, CoralError> {
    let rank = max(a.rank(), b.rank());
    let mut dims = vec![0; rank];
    for i in 0..rank {
        let (da, db) = (aligned_dim(a, i), aligned_dim(b, i));
        if da != db && da != 1 && db != 1 {
            return Err(CoralError::ShapeMismatch {
                expected: a.dims.clone(),
                actual: b.dims.clone(),
                operation: "broadcast".to_string(),
            });
        }
        dims[rank - 1 - i] = max(da, db);
    }
    Shape::new(&dims)
}

#[cfg(test)]
#[path = "shape_test.rs"]
mod tests;
