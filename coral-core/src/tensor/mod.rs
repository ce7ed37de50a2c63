// src/tensor/mod.rs

use std::fmt::{Debug, Formatter, Result as FmtResult};

use approx::AbsDiffEq;

use crate::buffer::{Buffer, Entry};
use crate::error::CoralError;
use crate::shape::Shape;

pub mod broadcast_utils;
pub mod create;
pub mod inplace_ops;

pub use create::{full, ones, ones_like, rand, randn, zeros, zeros_like};

/// Absolute tolerance used by [`Tensor::approx_eq`] callers that have no
/// better bound.
pub const DEFAULT_EPSILON: Entry = 1e-6;

/// A dense n-dimensional array of `f32` entries.
///
/// `Tensor` pairs a shared [`Buffer`] with an owned [`Shape`]:
/// 1.  **Views:** several tensors may read the same buffer under different
///     shapes of equal total size. Cloning a `Tensor` is a view as well.
/// 2.  **Copies:** [`Tensor::copy`] is the only way to get fresh storage.
///
/// Operations in [`crate::ops`] return new tensors. The methods in
/// [`inplace_ops`] and the `set_*` mutators are the only writers of an
/// existing buffer.
#[derive(Clone)]
pub struct Tensor {
    pub(crate) buffer: Buffer,
    pub(crate) shape: Shape,
}

impl Tensor {
    /// Creates a new tensor from row-major data.
    ///
    /// # Errors
    /// `InvalidShape` for an invalid `dims`, `TensorCreationError` if
    /// `data.len()` does not match the shape's size.
    pub fn new(data: Vec<Entry>, dims: &[usize]) -> Result<Self, CoralError> {
        let shape = Shape::new(dims)?;
        Self::from_shape_vec(shape, data)
    }

    /// Same as [`Tensor::new`] with an already-built shape.
    pub fn from_shape_vec(shape: Shape, data: Vec<Entry>) -> Result<Self, CoralError> {
        if data.len() != shape.size() {
            return Err(CoralError::TensorCreationError {
                data_len: data.len(),
                shape: shape.dims().to_vec(),
            });
        }
        Ok(Tensor {
            buffer: Buffer::from_vec(data),
            shape,
        })
    }

    /// Zero-filled tensor of `shape`. Infallible since the shape is valid.
    pub(crate) fn zeros_of(shape: &Shape) -> Self {
        Tensor {
            buffer: Buffer::from_vec(vec![0.0; shape.size()]),
            shape: shape.clone(),
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    pub fn numel(&self) -> usize {
        self.shape.size()
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.is_scalar()
    }

    /// Returns a copy of the entries in row-major order.
    pub fn to_vec(&self) -> Vec<Entry> {
        self.buffer.read().clone()
    }

    /// Reads the entry at `index` in the flat row-major layout.
    pub fn get(&self, index: usize) -> Result<Entry, CoralError> {
        self.buffer
            .read()
            .get(index)
            .copied()
            .ok_or(CoralError::IndexOutOfBounds {
                index,
                size: self.numel(),
            })
    }

    /// Writes the entry at `index`. Every view of the buffer observes it.
    pub fn set(&self, index: usize, value: Entry) -> Result<(), CoralError> {
        let size = self.numel();
        match self.buffer.write().get_mut(index) {
            Some(entry) => {
                *entry = value;
                Ok(())
            }
            None => Err(CoralError::IndexOutOfBounds { index, size }),
        }
    }

    /// The single entry of a scalar tensor.
    pub fn item(&self) -> Result<Entry, CoralError> {
        if !self.is_scalar() {
            return Err(CoralError::NotScalar {
                shape: self.dims().to_vec(),
            });
        }
        self.get(0)
    }

    /// Deep copy: same shape and entries, new storage.
    pub fn copy(&self) -> Tensor {
        Tensor {
            buffer: self.buffer.deep_copy(),
            shape: self.shape.clone(),
        }
    }

    /// Returns a view of the same buffer with different dimensions.
    pub fn view_as(&self, dims: &[usize]) -> Result<Tensor, CoralError> {
        Ok(Tensor {
            buffer: self.buffer.clone(),
            shape: self.shape.reinterpret(dims)?,
        })
    }

    /// Reinterprets this tensor's dimensions in place. The entries are
    /// untouched and the total size must stay the same.
    pub fn reinterpret(&mut self, dims: &[usize]) -> Result<(), CoralError> {
        self.shape = self.shape.reinterpret(dims)?;
        Ok(())
    }

    /// True iff both tensors read the same buffer, whatever their shapes.
    pub fn shares_storage(&self, other: &Tensor) -> bool {
        self.buffer.ptr_eq(&other.buffer)
    }

    /// Sets every entry to `value`.
    pub fn set_to_scalar(&self, value: Entry) {
        self.buffer.write().iter_mut().for_each(|e| *e = value);
    }

    /// Sets every entry to `index_fn(flat_index)`.
    pub fn set_to_index_fn<F>(&self, index_fn: F)
    where
        F: Fn(usize) -> Entry,
    {
        self.buffer
            .write()
            .iter_mut()
            .enumerate()
            .for_each(|(i, e)| *e = index_fn(i));
    }

    /// Replaces every entry `e` with `entry_fn(e)`.
    pub fn apply_entry_fn<F>(&self, entry_fn: F)
    where
        F: Fn(Entry) -> Entry,
    {
        self.buffer.write().iter_mut().for_each(|e| *e = entry_fn(*e));
    }

    /// Same shape, and every pair of entries within `epsilon`.
    pub fn approx_eq(&self, other: &Tensor, epsilon: Entry) -> bool {
        if self.shape != other.shape {
            return false;
        }
        let lhs = self.buffer.read();
        let rhs = other.buffer.read();
        lhs.iter()
            .zip(rhs.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

/// Equality compares shape and contents, never storage identity.
impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && *self.buffer.read() == *other.buffer.read()
    }
}

impl Debug for Tensor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Tensor")
            .field("shape", &self.shape.dims())
            .field("data", &*self.buffer.read())
            .finish()
    }
}

/// Shape and contents identical.
pub fn tensors_equal(a: &Tensor, b: &Tensor) -> bool {
    a == b
}

/// True iff `a` and `b` are views of the same buffer.
pub fn shares_storage(a: &Tensor, b: &Tensor) -> bool {
    a.shares_storage(b)
}

#[cfg(test)]
mod tests;
