//! # coral-core
//!
//! A small dense tensor engine with NumPy-style broadcasting and
//! reverse-mode automatic differentiation.
//!
//! - [`Tensor`]: shaped `f32` storage with views, copies and a recursive
//!   broadcasting kernel.
//! - [`ops`]: pure operations returning new tensors.
//! - [`Variable`]: graph nodes built by differentiable ops; [`backward`]
//!   propagates gradients through them in reverse, gating each node on its
//!   count of pending consumers.

pub mod autograd;
pub mod buffer;
pub mod error;
pub mod ops;
pub mod shape;
pub mod tensor;
pub mod utils;
pub mod variable;

pub use autograd::{backward, check_grad, GradCheckConfig};
pub use buffer::Entry;
pub use error::CoralError;
pub use shape::{Shape, MAX_RANK};
pub use tensor::{shares_storage, tensors_equal, Tensor, DEFAULT_EPSILON};
pub use variable::ops::{mae_loss, mse_loss};
pub use variable::{NodeState, Variable};
