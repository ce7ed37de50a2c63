//! Reverse-mode automatic differentiation.
//!
//! - [`backward_op`]: the gradient function attached to each graph edge.
//! - [`graph`]: the counter-gated reverse traversal ([`backward`]).
//! - [`grad_check`]: finite-difference verification of analytical gradients.

pub mod backward_op;
pub mod grad_check;
pub mod graph;

pub use backward_op::{BinaryGradFn, DiffArg, GradFn, UnaryGradFn};
pub use grad_check::{check_grad, GradCheckConfig};
pub use graph::backward;
