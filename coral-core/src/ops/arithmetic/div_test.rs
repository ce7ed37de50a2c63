use super::*;
use crate::utils::testing::check_tensor_near;
use approx::assert_relative_eq;

#[test]
fn test_div_tensors_ok() -> Result<(), CoralError> {
    let a = Tensor::new(vec![10.0, 20.0], &[2])?;
    let b = Tensor::new(vec![2.0, 5.0], &[2])?;
    let result = div_op(&a, &b)?;
    assert_eq!(result.dims(), &[2]);
    assert_relative_eq!(result.to_vec().as_slice(), [5.0f32, 4.0].as_slice(), epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_div_by_zero_leaves_inputs_untouched() -> Result<(), CoralError> {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], &[2, 2])?;
    let b = Tensor::new(vec![0.0; 4], &[2, 2])?;
    match div_op(&a, &b) {
        Err(CoralError::DivideByZero { operation }) => assert_eq!(operation, "div"),
        other => panic!("Expected DivideByZero, got {:?}", other),
    }
    assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(b.to_vec(), vec![0.0; 4]);
    Ok(())
}

#[test]
fn test_div_single_zero_in_broadcast_divisor() -> Result<(), CoralError> {
    let a = Tensor::new(vec![1.0; 6], &[2, 3])?;
    let b = Tensor::new(vec![1.0, 0.0, 2.0], &[3])?;
    assert!(matches!(div_op(&a, &b), Err(CoralError::DivideByZero { .. })));
    Ok(())
}

#[test]
fn test_div_shape_mismatch_reported_before_zero() -> Result<(), CoralError> {
    let a = Tensor::new(vec![1.0; 6], &[2, 3])?;
    let b = Tensor::new(vec![0.0; 2], &[2])?;
    assert!(matches!(div_op(&a, &b), Err(CoralError::ShapeMismatch { .. })));
    Ok(())
}

#[test]
fn test_div_broadcasting() -> Result<(), CoralError> {
    let matrix = Tensor::new(vec![10.0, 20.0, 30.0, 40.0], &[2, 2])?;
    let row = Tensor::new(vec![10.0, 4.0], &[1, 2])?;
    check_tensor_near(&div_op(&matrix, &row)?, &[2, 2], &[1.0, 5.0, 3.0, 10.0], 1e-6);
    Ok(())
}
