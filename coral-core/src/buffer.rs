use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// Scalar type stored in every tensor buffer.
pub type Entry = f32;

/// Flat entry storage shared between a tensor and its views.
///
/// Cloning a `Buffer` shares the storage and never copies entries. Only the
/// in-place operations write through a shared handle.
#[derive(Debug, Clone)]
pub struct Buffer(Rc<RefCell<Vec<Entry>>>);

impl Buffer {
    pub fn from_vec(data: Vec<Entry>) -> Self {
        Buffer(Rc::new(RefCell::new(data)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Immutable access to the entries. Drop the guard promptly.
    pub fn read(&self) -> Ref<'_, Vec<Entry>> {
        self.0.borrow()
    }

    /// Mutable access to the entries. Drop the guard promptly.
    pub fn write(&self) -> RefMut<'_, Vec<Entry>> {
        self.0.borrow_mut()
    }

    /// Copies the entries into a new, unshared buffer.
    pub fn deep_copy(&self) -> Self {
        Buffer::from_vec(self.read().clone())
    }

    /// True iff both handles point at the same storage.
    pub fn ptr_eq(&self, other: &Buffer) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
