//! Element-wise unary math. Each op copies its input and transforms the copy.

pub mod abs;
pub mod scalar;
pub mod square;

pub use abs::{abs_op, sign_op};
pub use scalar::{div_scalar_op, mul_scalar_op};
pub use square::square_op;
