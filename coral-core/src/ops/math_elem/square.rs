use crate::tensor::Tensor;

/// Element-wise square (`x * x`).
pub fn square_op(a: &Tensor) -> Tensor {
    let out = a.copy();
    out.apply_entry_fn(|x| x * x);
    out
}
