// coral-core/src/autograd/backward_op.rs

use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::error::CoralError;
use crate::ops::{div_op, mean_grad, mul_op, mul_scalar_op, neg_op, sign_op, sum_grad};
use crate::tensor::Tensor;
use crate::variable::Variable;

/// Local gradient of a single-input edge: `(input, output) -> contribution`.
pub type UnaryGradFn = fn(&Variable, &Variable) -> Result<Tensor, CoralError>;

/// Local gradient of one side of a two-input op:
/// `(input, other_input, output) -> contribution`.
pub type BinaryGradFn = fn(&Variable, &Variable, &Variable) -> Result<Tensor, CoralError>;

/// The gradient function attached to one edge of the graph.
///
/// Each function returns the *full* contribution `upstream_grad * d(out)/d(input)`
/// laid out in the output's shape. The traversal folds it back onto the
/// input's shape with [`reduce_to_shape`](crate::ops::reduce_to_shape).
///
/// A binary gradient carries the other operand of its op, so an edge can
/// never be evaluated with the wrong arity.
#[derive(Clone)]
pub enum GradFn {
    Unary(UnaryGradFn),
    Binary(BinaryGradFn, Variable),
}

impl Debug for GradFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            GradFn::Unary(_) => write!(f, "GradFn::Unary"),
            GradFn::Binary(_, other) => write!(f, "GradFn::Binary(other: {:?})", other.dims()),
        }
    }
}

/// One edge from an output node back to one of its inputs.
#[derive(Clone, Debug)]
pub struct DiffArg {
    pub(crate) input: Variable,
    pub(crate) grad_fn: GradFn,
}

impl DiffArg {
    pub(crate) fn unary(input: &Variable, grad_fn: UnaryGradFn) -> Self {
        DiffArg {
            input: input.clone(),
            grad_fn: GradFn::Unary(grad_fn),
        }
    }

    pub(crate) fn binary(input: &Variable, other: &Variable, grad_fn: BinaryGradFn) -> Self {
        DiffArg {
            input: input.clone(),
            grad_fn: GradFn::Binary(grad_fn, other.clone()),
        }
    }

    pub fn input(&self) -> &Variable {
        &self.input
    }

    /// Evaluates this edge's gradient function against `output`, whose
    /// gradient must already be complete.
    pub(crate) fn contribution(&self, output: &Variable) -> Result<Tensor, CoralError> {
        match &self.grad_fn {
            GradFn::Unary(f) => f(&self.input, output),
            GradFn::Binary(f, other) => f(&self.input, other, output),
        }
    }
}

// --- Gradient table ---

/// `add` (either side) and `subtract` (left side): `g`.
pub(crate) fn identity_grad(_input: &Variable, output: &Variable) -> Result<Tensor, CoralError> {
    Ok(output.grad().copy())
}

/// `subtract` (right side) and `neg`: `-g`.
pub(crate) fn negate_grad(_input: &Variable, output: &Variable) -> Result<Tensor, CoralError> {
    Ok(neg_op(&output.grad()))
}

/// `multiply`: `g * other`.
pub(crate) fn multiply_grad(
    _input: &Variable,
    other: &Variable,
    output: &Variable,
) -> Result<Tensor, CoralError> {
    mul_op(&output.grad(), &other.value())
}

/// `divide`, numerator side: `g / r`.
pub(crate) fn divide_lhs_grad(
    _input: &Variable,
    rhs: &Variable,
    output: &Variable,
) -> Result<Tensor, CoralError> {
    div_op(&output.grad(), &rhs.value())
}

/// `divide`, denominator side: `-(g / r) * (l / r)`.
///
/// `r` is divided twice rather than squared; `r * r` underflows to zero for
/// denominators the forward pass accepted.
pub(crate) fn divide_rhs_grad(
    input: &Variable,
    lhs: &Variable,
    output: &Variable,
) -> Result<Tensor, CoralError> {
    let rhs = input.value();
    let grad_over_r = div_op(&output.grad(), &rhs)?;
    let lhs_over_r = div_op(&lhs.value(), &rhs)?;
    Ok(neg_op(&mul_op(&grad_over_r, &lhs_over_r)?))
}

/// `abs`: `g * sign(x)`, with `sign(0) = +1`.
pub(crate) fn abs_grad(input: &Variable, output: &Variable) -> Result<Tensor, CoralError> {
    mul_op(&output.grad(), &sign_op(&input.value()))
}

/// `square`: `g * 2x`.
pub(crate) fn square_grad(input: &Variable, output: &Variable) -> Result<Tensor, CoralError> {
    mul_op(&output.grad(), &mul_scalar_op(&input.value(), 2.0))
}

/// `sum`: the scalar `g` spread over the input's shape.
pub(crate) fn sum_backward(input: &Variable, output: &Variable) -> Result<Tensor, CoralError> {
    mul_op(&sum_grad(&input.value()), &output.grad())
}

/// `mean`: `g / N` spread over the input's shape.
pub(crate) fn mean_backward(input: &Variable, output: &Variable) -> Result<Tensor, CoralError> {
    mul_op(&mean_grad(&input.value()), &output.grad())
}

#[cfg(test)]
#[path = "backward_op_test.rs"]
mod tests;
