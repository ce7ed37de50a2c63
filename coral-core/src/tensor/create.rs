// src/tensor/create.rs

use rand::Rng;
use rand_distr::StandardNormal;

use crate::buffer::Entry;
use crate::error::CoralError;
use crate::shape::Shape;
use crate::tensor::Tensor;

/// Creates a new tensor filled with zeros with the specified dimensions.
pub fn zeros(dims: &[usize]) -> Result<Tensor, CoralError> {
    full(dims, 0.0)
}

/// Creates a new tensor filled with ones with the specified dimensions.
pub fn ones(dims: &[usize]) -> Result<Tensor, CoralError> {
    full(dims, 1.0)
}

/// Creates a new tensor filled with `value` with the specified dimensions.
pub fn full(dims: &[usize], value: Entry) -> Result<Tensor, CoralError> {
    let shape = Shape::new(dims)?;
    let data = vec![value; shape.size()];
    Tensor::from_shape_vec(shape, data)
}

/// Zeros with the same shape as `tensor`, in fresh storage.
pub fn zeros_like(tensor: &Tensor) -> Tensor {
    Tensor::zeros_of(tensor.shape())
}

/// Ones with the same shape as `tensor`, in fresh storage.
pub fn ones_like(tensor: &Tensor) -> Tensor {
    full_like(tensor, 1.0)
}

/// `value` repeated with the same shape as `tensor`, in fresh storage.
pub fn full_like(tensor: &Tensor, value: Entry) -> Tensor {
    let out = Tensor::zeros_of(tensor.shape());
    out.set_to_scalar(value);
    out
}

/// Creates a tensor whose entry at flat index `i` is `index_fn(i)`.
pub fn from_fn<F>(dims: &[usize], index_fn: F) -> Result<Tensor, CoralError>
where
    F: Fn(usize) -> Entry,
{
    let shape = Shape::new(dims)?;
    let data = (0..shape.size()).map(index_fn).collect();
    Tensor::from_shape_vec(shape, data)
}

/// Entries drawn uniformly from `[0, 1)`.
pub fn rand(dims: &[usize]) -> Result<Tensor, CoralError> {
    let shape = Shape::new(dims)?;
    let mut rng = rand::thread_rng();
    let data = (0..shape.size()).map(|_| rng.gen::<Entry>()).collect();
    Tensor::from_shape_vec(shape, data)
}

/// Entries drawn from the standard normal distribution.
pub fn randn(dims: &[usize]) -> Result<Tensor, CoralError> {
    let shape = Shape::new(dims)?;
    let mut rng = rand::thread_rng();
    let data = (0..shape.size())
        .map(|_| rng.sample::<Entry, _>(StandardNormal))
        .collect();
    Tensor::from_shape_vec(shape, data)
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
