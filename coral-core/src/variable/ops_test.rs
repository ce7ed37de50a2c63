use super::*;
use crate::tensor::Tensor;
use crate::utils::testing::{check_tensor_filled, check_tensor_near};
use approx::assert_relative_eq;

fn leaf(data: Vec<f32>, dims: &[usize]) -> Variable {
    Variable::from_tensor(Tensor::new(data, dims).expect("Failed to create test tensor"))
}

#[test]
fn test_add_values() -> Result<(), CoralError> {
    let x = Variable::full(&[2, 3, 4], 1.0)?;
    let y = x.new_like_with_value(3.0);
    let z = x.add(&y)?;
    assert!(z.values_equal(&x.new_like_with_value(4.0)));
    Ok(())
}

#[test]
fn test_subtract_after_reinterpret() -> Result<(), CoralError> {
    let x = Variable::full(&[3, 4, 5], 4.0)?;
    let y = Variable::full(&[3, 20], 3.0)?;
    x.reinterpret(&[3, 20])?;
    let z = x.subtract(&y)?;
    check_tensor_filled(&z.value(), &[3, 20], 1.0, 0.0);
    Ok(())
}

#[test]
fn test_broadcast_add_equality() -> Result<(), CoralError> {
    let x1 = Variable::new(&[2, 3, 4])?;
    let x2 = Variable::new(&[2, 3, 4])?;
    let y1 = Variable::new(&[1, 4])?;
    let y2 = Variable::new(&[1, 4])?;
    x1.set_to_scalar(2.0);
    y2.set_to_scalar(2.0);
    let z1 = x1.add(&y1)?;
    let z2 = x2.add(&y2)?;
    assert!(z1.values_equal(&z2));
    Ok(())
}

#[test]
fn test_op_errors_create_no_node() -> Result<(), CoralError> {
    let x = leaf(vec![1.0, 2.0], &[2]);
    let y = leaf(vec![0.0, 1.0], &[2]);
    assert!(matches!(x.divide(&y), Err(CoralError::DivideByZero { .. })));
    let w = leaf(vec![1.0; 3], &[3]);
    assert!(matches!(x.multiply(&w), Err(CoralError::ShapeMismatch { .. })));
    assert_eq!(x.pending_consumers(), 0);
    assert_eq!(y.pending_consumers(), 0);
    Ok(())
}

#[test]
fn test_subtract_gradients() -> Result<(), CoralError> {
    let x = leaf(vec![1.0, 2.0, 3.0], &[3]);
    let y = leaf(vec![5.0], &[1]);
    x.subtract(&y)?.sum()?.backward()?;
    check_tensor_filled(&x.grad(), &[3], 1.0, 1e-6);
    check_tensor_near(&y.grad(), &[1], &[-3.0], 1e-6);
    Ok(())
}

#[test]
fn test_multiply_broadcast_gradients() -> Result<(), CoralError> {
    let x = leaf(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
    let y = leaf(vec![10.0, 20.0, 30.0], &[3]);
    x.multiply(&y)?.sum()?.backward()?;
    check_tensor_near(
        &x.grad(),
        &[2, 3],
        &[10.0, 20.0, 30.0, 10.0, 20.0, 30.0],
        1e-6,
    );
    check_tensor_near(&y.grad(), &[3], &[5.0, 7.0, 9.0], 1e-6);
    Ok(())
}

#[test]
fn test_divide_gradients() -> Result<(), CoralError> {
    let l = leaf(vec![6.0], &[1]);
    let r = leaf(vec![3.0], &[1]);
    l.divide(&r)?.backward()?;
    assert_relative_eq!(l.grad().item()?, 1.0 / 3.0, epsilon = 1e-6);
    assert_relative_eq!(r.grad().item()?, -6.0 / 9.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_abs_gradient_at_zero() -> Result<(), CoralError> {
    let x = leaf(vec![-2.0, 0.0, 5.0], &[3]);
    x.abs().sum()?.backward()?;
    check_tensor_near(&x.grad(), &[3], &[-1.0, 1.0, 1.0], 0.0);
    Ok(())
}

#[test]
fn test_mean_and_neg() -> Result<(), CoralError> {
    let x = leaf(vec![1.0, 2.0, 3.0, 4.0], &[4]);
    let m = x.neg().mean()?;
    assert_relative_eq!(m.value().item()?, -2.5);
    m.backward()?;
    check_tensor_filled(&x.grad(), &[4], -0.25, 1e-6);
    Ok(())
}

#[test]
fn test_scale() -> Result<(), CoralError> {
    let x = leaf(vec![1.0, -1.0], &[2]);
    let s = x.scale(3.0)?;
    check_tensor_near(&s.value(), &[2], &[3.0, -3.0], 0.0);
    s.sum()?.backward()?;
    check_tensor_filled(&x.grad(), &[2], 3.0, 1e-6);
    Ok(())
}

#[test]
fn test_mse_loss() -> Result<(), CoralError> {
    let pred = leaf(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]);
    let target = leaf(vec![0.0, 2.0, 5.0, 4.0], &[2, 2]);
    let loss = mse_loss(&pred, &target)?;
    // (1 + 0 + 4 + 0) / 4
    assert_relative_eq!(loss.value().item()?, 1.25);
    loss.backward()?;
    // 2 * (pred - target) / N
    check_tensor_near(&pred.grad(), &[2, 2], &[0.5, 0.0, -1.0, 0.0], 1e-6);
    check_tensor_near(&target.grad(), &[2, 2], &[-0.5, 0.0, 1.0, 0.0], 1e-6);
    Ok(())
}

#[test]
fn test_mae_loss() -> Result<(), CoralError> {
    let pred = leaf(vec![1.0, 3.0], &[2]);
    let target = leaf(vec![2.0, 1.0], &[2]);
    let loss = mae_loss(&pred, &target)?;
    assert_relative_eq!(loss.value().item()?, 1.5);
    loss.backward()?;
    check_tensor_near(&pred.grad(), &[2], &[-0.5, 0.5], 1e-6);
    Ok(())
}
