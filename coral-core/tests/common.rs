use coral_core::{Tensor, Variable};

// Shared by several test crates; each one only uses part of it.
#[allow(dead_code)]
pub fn create_test_tensor(data: Vec<f32>, dims: &[usize]) -> Tensor {
    Tensor::new(data, dims).expect("Test tensor creation failed")
}

/// Leaf whose entries are `0, 1, 2, ...` in row-major order.
#[allow(dead_code)]
pub fn iota_variable(dims: &[usize]) -> Variable {
    let v = Variable::new(dims).expect("Test variable creation failed");
    v.set_to_index_fn(|i| i as f32);
    v
}
