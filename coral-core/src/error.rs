use thiserror::Error;

/// Custom error type for the Coral tensor engine.
///
/// Every failure is local and synchronous: the operation that reports it has
/// not written to any destination buffer.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum CoralError {
    #[error("Invalid shape {dims:?}: {reason}")]
    InvalidShape { dims: Vec<usize>, reason: String },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Backward called on non-scalar variable of shape {shape:?}")]
    NotScalar { shape: Vec<usize> },

    #[error("Division by zero during operation {operation}")]
    DivideByZero { operation: String },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Index out of bounds: flat index {index} for tensor of size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Destination and source share storage with different shapes during operation {operation}")]
    AliasedOperands { operation: String },

    #[error("Backward called through a graph whose pending-consumer counts are already spent")]
    GraphConsumed,

    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical} != numerical {numerical}")]
    GradCheckMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f32,
        numerical: f32,
    },
}
