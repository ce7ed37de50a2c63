use num_traits::Zero;

use crate::buffer::Entry;
use crate::error::CoralError;
use crate::shape::{broadcast_result, Shape, MAX_RANK};
use crate::tensor::Tensor;

/// Per-dimension, per-operand offset increments for one broadcast walk.
type Steps<const N: usize> = [[usize; N]; MAX_RANK];

/// Computes the offset increments of each operand along each dimension of
/// `iter_shape`.
///
/// An operand's step at a dimension is its own stride when its size there is
/// greater than 1 and zero otherwise. The zero step is what broadcasts a
/// size-1 axis: the same entry is read again on every iteration.
fn broadcast_steps<const N: usize>(
    iter_shape: &Shape,
    operands: [&Shape; N],
    operation: &str,
) -> Result<Steps<N>, CoralError> {
    let rank = iter_shape.rank();
    let mut steps = [[0usize; N]; MAX_RANK];
    for (k, operand) in operands.iter().enumerate() {
        if operand.rank() > rank {
            return Err(CoralError::ShapeMismatch {
                expected: iter_shape.dims().to_vec(),
                actual: operand.dims().to_vec(),
                operation: operation.to_string(),
            });
        }
        let extended = operand.extend_to_rank(rank)?;
        for d in 0..rank {
            let size = extended.dims()[d];
            if size != 1 && size != iter_shape.dims()[d] {
                return Err(CoralError::ShapeMismatch {
                    expected: iter_shape.dims().to_vec(),
                    actual: operand.dims().to_vec(),
                    operation: operation.to_string(),
                });
            }
            steps[d][k] = if size > 1 { extended.strides()[d] } else { 0 };
        }
    }
    Ok(steps)
}

/// Recursive step of the walk. `base` holds each operand's accumulated
/// offset for the dimensions outside `dim`.
fn walk_dim<const N: usize, F>(
    dims: &[usize],
    steps: &Steps<N>,
    dim: usize,
    base: [usize; N],
    visit: &mut F,
) where
    F: FnMut([usize; N]),
{
    let step = steps[dim];
    let mut offsets = base;
    if dim + 1 == dims.len() {
        // innermost dimension: iterate its full extent
        for _ in 0..dims[dim] {
            visit(offsets);
            for k in 0..N {
                offsets[k] += step[k];
            }
        }
        return;
    }
    for _ in 0..dims[dim] {
        walk_dim(dims, steps, dim + 1, offsets, visit);
        for k in 0..N {
            offsets[k] += step[k];
        }
    }
}

/// Walks `iter_shape` outermost to innermost and calls `visit` with one
/// buffer offset per operand for every position.
///
/// Each operand must be broadcastable *to* `iter_shape`: no higher rank, and
/// every right-aligned dimension either 1 or equal to the iteration's.
/// Operands are padded on the left with size-1 dimensions first.
pub(crate) fn broadcast_walk<const N: usize, F>(
    iter_shape: &Shape,
    operands: [&Shape; N],
    operation: &str,
    mut visit: F,
) -> Result<(), CoralError>
where
    F: FnMut([usize; N]),
{
    let steps = broadcast_steps(iter_shape, operands, operation)?;
    walk_dim(iter_shape.dims(), &steps, 0, [0; N], &mut visit);
    Ok(())
}

/// Applies `f` entrywise over the broadcast of two flat buffers and returns
/// a new buffer laid out as `out_shape`.
pub(crate) fn binary_kernel<T, F>(
    lhs: &[T],
    lhs_shape: &Shape,
    rhs: &[T],
    rhs_shape: &Shape,
    out_shape: &Shape,
    operation: &str,
    f: F,
) -> Result<Vec<T>, CoralError>
where
    T: Copy + Zero,
    F: Fn(T, T) -> T,
{
    let mut out = vec![T::zero(); out_shape.size()];
    broadcast_walk(
        out_shape,
        [out_shape, lhs_shape, rhs_shape],
        operation,
        |[o, l, r]| out[o] = f(lhs[l], rhs[r]),
    )?;
    Ok(out)
}

/// Broadcasts `a` against `b` and returns a new tensor holding `f(a, b)`
/// entrywise, shaped as the broadcast result.
pub fn broadcast_binary<F>(
    a: &Tensor,
    b: &Tensor,
    operation: &str,
    f: F,
) -> Result<Tensor, CoralError>
where
    F: Fn(Entry, Entry) -> Entry,
{
    let out_shape = broadcast_result(a.shape(), b.shape()).map_err(|_| {
        CoralError::ShapeMismatch {
            expected: a.dims().to_vec(),
            actual: b.dims().to_vec(),
            operation: operation.to_string(),
        }
    })?;
    let data = {
        let lhs = a.buffer.read();
        let rhs = b.buffer.read();
        binary_kernel(&lhs, a.shape(), &rhs, b.shape(), &out_shape, operation, f)?
    };
    Tensor::from_shape_vec(out_shape, data)
}

/// Replaces each entry `d` of `dest` with `f(d, s)` where `s` is the entry of
/// `src` broadcast to `dest`'s shape.
///
/// # Errors
/// - `ShapeMismatch` if `dest`'s shape is not the broadcast result of
///   `dest` and `src` (the destination is never resized).
/// - `AliasedOperands` if `src` is a differently-shaped view of `dest`'s
///   buffer. Same-shaped aliases are read from a snapshot.
pub fn broadcast_assign<F>(
    dest: &Tensor,
    src: &Tensor,
    operation: &str,
    f: F,
) -> Result<(), CoralError>
where
    F: Fn(Entry, Entry) -> Entry,
{
    let mismatch = || CoralError::ShapeMismatch {
        expected: dest.dims().to_vec(),
        actual: src.dims().to_vec(),
        operation: operation.to_string(),
    };
    let result_shape = broadcast_result(dest.shape(), src.shape()).map_err(|_| mismatch())?;
    if &result_shape != dest.shape() {
        return Err(mismatch());
    }

    let snapshot;
    let src = if dest.shares_storage(src) {
        if src.shape() != dest.shape() {
            return Err(CoralError::AliasedOperands {
                operation: operation.to_string(),
            });
        }
        snapshot = src.copy();
        &snapshot
    } else {
        src
    };

    let src_data = src.buffer.read();
    let mut dest_data = dest.buffer.write();
    broadcast_walk(
        dest.shape(),
        [dest.shape(), src.shape()],
        operation,
        |[d, s]| dest_data[d] = f(dest_data[d], src_data[s]),
    )
}

#[cfg(test)]
#[path = "broadcast_utils_test.rs"]
mod tests;
