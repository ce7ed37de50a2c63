use crate::buffer::Entry;
use crate::error::CoralError;
use crate::tensor::Tensor;

/// Multiplies every entry by `value`.
pub fn mul_scalar_op(a: &Tensor, value: Entry) -> Tensor {
    let out = a.copy();
    out.mul_scalar_(value);
    out
}

/// Divides every entry by `value`.
///
/// # Errors
/// `DivideByZero` if `value` is zero.
pub fn div_scalar_op(a: &Tensor, value: Entry) -> Result<Tensor, CoralError> {
    if value == 0.0 {
        return Err(CoralError::DivideByZero {
            operation: "div_scalar".to_string(),
        });
    }
    let out = a.copy();
    out.div_scalar_(value)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_scalar() {
        let t = Tensor::new(vec![1.0, -2.0], &[2]).unwrap();
        assert_eq!(mul_scalar_op(&t, 2.5).to_vec(), vec![2.5, -5.0]);
        assert_eq!(t.to_vec(), vec![1.0, -2.0]);
    }

    #[test]
    fn test_div_scalar() {
        let t = Tensor::new(vec![3.0, 6.0], &[2]).unwrap();
        assert_eq!(div_scalar_op(&t, 3.0).unwrap().to_vec(), vec![1.0, 2.0]);
        assert!(matches!(
            div_scalar_op(&t, 0.0),
            Err(CoralError::DivideByZero { .. })
        ));
    }
}
