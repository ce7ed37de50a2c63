//! # Tensor Operations Module (`ops`)
//!
//! Pure tensor operations, grouped by category. Every operation is a free
//! function named `xxx_op` that reads its inputs and returns a new [`Tensor`]
//! (or an error, in which case nothing was written).
//!
//! - [`arithmetic`]: broadcasting binary arithmetic and negation.
//! - [`math_elem`]: element-wise unary math (`abs`, `sign`, `square`, scaling).
//! - [`reduction`]: full reductions (`sum`, `mean`) and [`reduce_to_shape`],
//!   which folds a broadcast gradient back onto an input's shape.
//!
//! Gradient tracking lives one layer up, in [`crate::variable`].
//!
//! [`Tensor`]: crate::tensor::Tensor
//! [`reduce_to_shape`]: reduction::reduce_to_shape

pub mod arithmetic;
pub mod math_elem;
pub mod reduction;

pub use arithmetic::{add_op, div_op, mul_op, neg_op, sub_op};
pub use math_elem::{abs_op, div_scalar_op, mul_scalar_op, sign_op, square_op};
pub use reduction::{mean_grad, mean_op, reduce_to_shape, sum_grad, sum_op};
