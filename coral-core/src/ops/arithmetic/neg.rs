// coral-core/src/ops/arithmetic/neg.rs

use crate::tensor::Tensor;

/// Element-wise negation. Returns a new tensor of the same shape.
pub fn neg_op(a: &Tensor) -> Tensor {
    let out = a.copy();
    out.apply_entry_fn(|x| -x);
    out
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
