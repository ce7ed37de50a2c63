use approx::relative_eq;
use log::debug;

use crate::buffer::Entry;
use crate::error::CoralError;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// Step and acceptance bound for [`check_grad`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheckConfig {
    /// Half-width of the central difference.
    pub epsilon: Entry,
    /// Absolute and relative tolerance between analytical and numerical
    /// gradients.
    pub tolerance: Entry,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        GradCheckConfig {
            epsilon: 1e-3,
            tolerance: 1e-2,
        }
    }
}

/// Checks analytical gradients against numerical gradients using finite differences.
///
/// `func` builds a scalar output from leaf variables holding `inputs`. It is
/// called once for the analytical pass (followed by `backward`) and twice per
/// input entry for the central difference
/// `(f(x + eps) - f(x - eps)) / (2 * eps)`. The caller's tensors are never
/// modified; every pass works on copies.
///
/// # Errors
/// `GradCheckMismatch` for the first entry whose gradients disagree, or any
/// error raised by `func` or `backward` (`NotScalar` for a non-scalar output).
pub fn check_grad<F>(func: F, inputs: &[Tensor], config: &GradCheckConfig) -> Result<(), CoralError>
where
    F: Fn(&[Variable]) -> Result<Variable, CoralError>,
{
    let leaves: Vec<Variable> = inputs
        .iter()
        .map(|t| Variable::from_tensor(t.copy()))
        .collect();
    let output = func(&leaves)?;
    output.backward()?;

    for (input_index, input) in inputs.iter().enumerate() {
        let analytical = leaves[input_index].grad().to_vec();
        for element_index in 0..input.numel() {
            let loss_plus = perturbed_loss(&func, inputs, input_index, element_index, config.epsilon)?;
            let loss_minus =
                perturbed_loss(&func, inputs, input_index, element_index, -config.epsilon)?;
            let numerical = (loss_plus - loss_minus) / (2.0 * config.epsilon);
            let expected = analytical[element_index];
            if !relative_eq!(
                expected,
                numerical,
                epsilon = config.tolerance,
                max_relative = config.tolerance
            ) {
                return Err(CoralError::GradCheckMismatch {
                    input_index,
                    element_index,
                    analytical: expected,
                    numerical,
                });
            }
        }
        debug!("check_grad: input {} matched on {} entries", input_index, input.numel());
    }
    Ok(())
}

/// Forward value of `func` with one entry of one input shifted by `delta`.
fn perturbed_loss<F>(
    func: &F,
    inputs: &[Tensor],
    input_index: usize,
    element_index: usize,
    delta: Entry,
) -> Result<Entry, CoralError>
where
    F: Fn(&[Variable]) -> Result<Variable, CoralError>,
{
    let leaves: Vec<Variable> = inputs.iter().map(|t| Variable::from_tensor(t.copy())).collect();
    let shifted = &leaves[input_index];
    let original = shifted.entry_at(element_index)?;
    shifted.set_entry(element_index, original + delta)?;
    func(&leaves)?.value().item()
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
