use crate::tensor::Tensor;

/// Element-wise absolute value.
pub fn abs_op(a: &Tensor) -> Tensor {
    let out = a.copy();
    out.apply_entry_fn(|x| x.abs());
    out
}

/// Element-wise sign: `1.0` for entries `>= 0`, `-1.0` otherwise.
///
/// Zero maps to `+1`, which makes this the subgradient used for `abs`.
pub fn sign_op(a: &Tensor) -> Tensor {
    let out = a.copy();
    out.apply_entry_fn(|x| if x >= 0.0 { 1.0 } else { -1.0 });
    out
}

#[cfg(test)]
#[path = "abs_test.rs"]
mod tests;
