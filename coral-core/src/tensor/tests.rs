use super::*;

fn create_test_tensor(data: Vec<f32>, dims: &[usize]) -> Tensor {
    Tensor::new(data, dims).expect("Failed to create test tensor")
}

#[test]
fn test_new_checks_length() {
    match Tensor::new(vec![1.0, 2.0, 3.0], &[2, 2]) {
        Err(CoralError::TensorCreationError { data_len, shape }) => {
            assert_eq!(data_len, 3);
            assert_eq!(shape, vec![2, 2]);
        }
        other => panic!("Expected TensorCreationError, got {:?}", other),
    }
}

#[test]
fn test_equality_compares_shape_and_contents() {
    let t1 = create_test_tensor(vec![1.0, 2.0], &[2]);
    let t2 = create_test_tensor(vec![1.0, 2.0], &[2]);
    let t3 = create_test_tensor(vec![1.0, 2.5], &[2]);
    let t4 = create_test_tensor(vec![1.0, 2.0], &[1, 2]);
    assert!(tensors_equal(&t1, &t2));
    assert_ne!(t1, t3);
    assert_ne!(t1, t4, "Same data under a different shape is not equal");
}

#[test]
fn test_copy_is_idempotent_and_unshared() {
    let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
    let c = t.copy().copy();
    assert!(tensors_equal(&c, &t));
    assert!(!shares_storage(&c, &t));
    c.set(0, 42.0).unwrap();
    assert_eq!(t.get(0).unwrap(), 1.0);
}

#[test]
fn test_view_shares_storage() {
    let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
    let v = t.view_as(&[3, 2]).unwrap();
    assert!(shares_storage(&t, &v));
    assert_ne!(t, v);
    v.set(5, -1.0).unwrap();
    assert_eq!(t.get(5).unwrap(), -1.0);
    assert!(t.view_as(&[4]).is_err());
}

#[test]
fn test_reinterpret_in_place() {
    let mut t = create_test_tensor(vec![1.0; 12], &[3, 4]);
    t.reinterpret(&[2, 2, 3]).unwrap();
    assert_eq!(t.dims(), &[2, 2, 3]);
    assert_eq!(t.shape().strides(), &[6, 3, 1]);
    assert!(t.reinterpret(&[5]).is_err());
    assert_eq!(t.dims(), &[2, 2, 3]);
}

#[test]
fn test_get_set_bounds() {
    let t = create_test_tensor(vec![1.0, 2.0], &[2]);
    assert!(matches!(
        t.get(2),
        Err(CoralError::IndexOutOfBounds { index: 2, size: 2 })
    ));
    assert!(t.set(7, 0.0).is_err());
}

#[test]
fn test_setters() {
    let t = zeros(&[2, 2]).unwrap();
    t.set_to_scalar(3.0);
    assert_eq!(t.to_vec(), vec![3.0; 4]);
    t.set_to_index_fn(|i| i as f32);
    assert_eq!(t.to_vec(), vec![0.0, 1.0, 2.0, 3.0]);
    t.apply_entry_fn(|e| e * e);
    assert_eq!(t.to_vec(), vec![0.0, 1.0, 4.0, 9.0]);
}

#[test]
fn test_item_requires_scalar() {
    let s = create_test_tensor(vec![4.0], &[1, 1]);
    assert_eq!(s.item().unwrap(), 4.0);
    let v = create_test_tensor(vec![4.0, 5.0], &[2]);
    assert!(matches!(v.item(), Err(CoralError::NotScalar { .. })));
}

#[test]
fn test_approx_eq() {
    let a = create_test_tensor(vec![1.0, 2.0], &[2]);
    let b = create_test_tensor(vec![1.0 + 1e-7, 2.0], &[2]);
    let c = create_test_tensor(vec![1.1, 2.0], &[2]);
    assert!(a.approx_eq(&b, DEFAULT_EPSILON));
    assert!(!a.approx_eq(&c, DEFAULT_EPSILON));
}
