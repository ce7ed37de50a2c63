use crate::error::CoralError;
use crate::shape::{broadcast_result, Shape};
use crate::tensor::broadcast_utils::broadcast_walk;
use crate::tensor::Tensor;

/// Sums `tensor` down to `target`, the inverse of broadcasting `target` up
/// to `tensor`'s shape.
///
/// Every axis where `target` has size 1 (or is missing on the left) is
/// summed out. The walk runs over `tensor`'s shape and the accumulator gets
/// a zero step on those axes, so repeated positions land on the same entry.
///
/// # Errors
/// `ShapeMismatch` if `target` has a higher rank than `tensor`, or if
/// broadcasting `target` against `tensor` does not give back `tensor`'s
/// shape.
pub fn reduce_to_shape(tensor: &Tensor, target: &Shape) -> Result<Tensor, CoralError> {
    let mismatch = || CoralError::ShapeMismatch {
        expected: target.dims().to_vec(),
        actual: tensor.dims().to_vec(),
        operation: "reduce_to_shape".to_string(),
    };
    if target.rank() > tensor.shape().rank() {
        return Err(mismatch());
    }
    let broadcast = broadcast_result(target, tensor.shape()).map_err(|_| mismatch())?;
    if &broadcast != tensor.shape() {
        return Err(mismatch());
    }
    if target == tensor.shape() {
        return Ok(tensor.copy());
    }

    let extended = target.extend_to_rank(tensor.shape().rank())?;
    let mut reduced = Tensor::zeros_of(&extended);
    {
        let src = tensor.buffer.read();
        let mut dest = reduced.buffer.write();
        broadcast_walk(
            tensor.shape(),
            [&extended, tensor.shape()],
            "reduce_to_shape",
            |[d, s]| dest[d] += src[s],
        )?;
    }
    reduced.reinterpret(target.dims())?;
    Ok(reduced)
}

#[cfg(test)]
#[path = "reduce_test.rs"]
mod tests;
