// src/variable/ops.rs

use crate::autograd::backward_op::{
    abs_grad, divide_lhs_grad, divide_rhs_grad, identity_grad, mean_backward, multiply_grad,
    negate_grad, square_grad, sum_backward, DiffArg,
};
use crate::buffer::Entry;
use crate::error::CoralError;
use crate::ops;
use crate::variable::Variable;

impl Variable {
    /// `self + other`, broadcasting.
    pub fn add(&self, other: &Variable) -> Result<Variable, CoralError> {
        let value = ops::add_op(&self.value(), &other.value())?;
        Ok(Variable::from_op(
            value,
            vec![
                DiffArg::unary(self, identity_grad),
                DiffArg::unary(other, identity_grad),
            ],
        ))
    }

    /// `self - other`, broadcasting.
    pub fn subtract(&self, other: &Variable) -> Result<Variable, CoralError> {
        let value = ops::sub_op(&self.value(), &other.value())?;
        Ok(Variable::from_op(
            value,
            vec![
                DiffArg::unary(self, identity_grad),
                DiffArg::unary(other, negate_grad),
            ],
        ))
    }

    /// `self * other`, broadcasting.
    pub fn multiply(&self, other: &Variable) -> Result<Variable, CoralError> {
        let value = ops::mul_op(&self.value(), &other.value())?;
        Ok(Variable::from_op(
            value,
            vec![
                DiffArg::binary(self, other, multiply_grad),
                DiffArg::binary(other, self, multiply_grad),
            ],
        ))
    }

    /// `self / other`, broadcasting.
    ///
    /// # Errors
    /// `DivideByZero` if `other` holds a zero; no node is created.
    pub fn divide(&self, other: &Variable) -> Result<Variable, CoralError> {
        let value = ops::div_op(&self.value(), &other.value())?;
        Ok(Variable::from_op(
            value,
            vec![
                DiffArg::binary(self, other, divide_lhs_grad),
                DiffArg::binary(other, self, divide_rhs_grad),
            ],
        ))
    }

    pub fn abs(&self) -> Variable {
        let value = ops::abs_op(&self.value());
        Variable::from_op(value, vec![DiffArg::unary(self, abs_grad)])
    }

    pub fn square(&self) -> Variable {
        let value = ops::square_op(&self.value());
        Variable::from_op(value, vec![DiffArg::unary(self, square_grad)])
    }

    pub fn neg(&self) -> Variable {
        let value = ops::neg_op(&self.value());
        Variable::from_op(value, vec![DiffArg::unary(self, negate_grad)])
    }

    /// Sum of all entries, shape `[1]`.
    pub fn sum(&self) -> Result<Variable, CoralError> {
        let value = ops::sum_op(&self.value())?;
        Ok(Variable::from_op(value, vec![DiffArg::unary(self, sum_backward)]))
    }

    /// Mean of all entries, shape `[1]`.
    pub fn mean(&self) -> Result<Variable, CoralError> {
        let value = ops::mean_op(&self.value())?;
        Ok(Variable::from_op(value, vec![DiffArg::unary(self, mean_backward)]))
    }

    /// `self * factor`. The factor is a constant leaf, so gradients reach
    /// `self` as `g * factor`.
    pub fn scale(&self, factor: Entry) -> Result<Variable, CoralError> {
        let constant = Variable::full(&[1], factor)?;
        self.multiply(&constant)
    }
}

/// Mean absolute error, `mean(|prediction - target|)`.
pub fn mae_loss(prediction: &Variable, target: &Variable) -> Result<Variable, CoralError> {
    prediction.subtract(target)?.abs().mean()
}

/// Mean squared error, `mean((prediction - target)^2)`.
pub fn mse_loss(prediction: &Variable, target: &Variable) -> Result<Variable, CoralError> {
    prediction.subtract(target)?.square().mean()
}

#[cfg(test)]
#[path = "ops_test.rs"]
mod tests;
