pub mod mean;
pub mod reduce;
pub mod sum;

pub use mean::{mean_grad, mean_op};
pub use reduce::reduce_to_shape;
pub use sum::{sum_grad, sum_op};
