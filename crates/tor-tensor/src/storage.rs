use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::dtype::DType;
use crate::scalar::Scalar;

/// Flat, homogeneous element buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum CpuStorage {
    /// 64-bit integer storage.
    Int(Vec<i64>),
    /// 64-bit floating point storage.
    Float(Vec<f64>),
}

impl CpuStorage {
    /// Number of elements in this storage.
    pub fn len(&self) -> usize {
        match self {
            CpuStorage::Int(v) => v.len(),
            CpuStorage::Float(v) => v.len(),
        }
    }

    /// Returns true if the storage contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the dtype of this storage.
    pub fn dtype(&self) -> DType {
        match self {
            CpuStorage::Int(_) => DType::Int,
            CpuStorage::Float(_) => DType::Float,
        }
    }

    /// Builds storage of `dtype`, casting every value to it.
    pub fn from_scalars(values: &[Scalar], dtype: DType) -> Self {
        match dtype {
            DType::Int => CpuStorage::Int(values.iter().map(Scalar::as_i64).collect()),
            DType::Float => CpuStorage::Float(values.iter().map(Scalar::as_f64).collect()),
        }
    }

    pub fn get(&self, i: usize) -> Option<Scalar> {
        match self {
            CpuStorage::Int(v) => v.get(i).map(|&x| Scalar::Int(x)),
            CpuStorage::Float(v) => v.get(i).map(|&x| Scalar::Float(x)),
        }
    }

    /// Writes `value` at `i`, cast to this storage's dtype.
    ///
    /// Returns false if `i` is out of range.
    pub fn set(&mut self, i: usize, value: Scalar) -> bool {
        match self {
            CpuStorage::Int(v) => match v.get_mut(i) {
                Some(slot) => {
                    *slot = value.as_i64();
                    true
                }
                None => false,
            },
            CpuStorage::Float(v) => match v.get_mut(i) {
                Some(slot) => {
                    *slot = value.as_f64();
                    true
                }
                None => false,
            },
        }
    }
}

/// Reference-counted handle to a [`CpuStorage`] shared by every view
/// derived from one tensor.
///
/// Writes through any handle are visible through all of them. The handle is
/// `!Send`, so aliasing views cannot cross threads.
#[derive(Debug, Clone)]
pub struct SharedStorage(Rc<RefCell<CpuStorage>>);

impl SharedStorage {
    pub fn new(storage: CpuStorage) -> Self {
        SharedStorage(Rc::new(RefCell::new(storage)))
    }

    /// Returns true if both handles refer to the same buffer.
    pub fn ptr_eq(&self, other: &SharedStorage) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Borrows the buffer for reading.
    pub fn borrow(&self) -> Ref<'_, CpuStorage> {
        self.0.borrow()
    }

    /// Writes a single element. Returns false if `i` is out of range.
    pub fn set(&self, i: usize, value: Scalar) -> bool {
        self.0.borrow_mut().set(i, value)
    }

    /// Copies the current buffer contents.
    pub fn snapshot(&self) -> CpuStorage {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DType {
        self.0.borrow().dtype()
    }

    /// Number of live handles to this buffer.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scalars_casts() {
        let values = [Scalar::Int(1), Scalar::Float(2.5)];
        let s = CpuStorage::from_scalars(&values, DType::Int);
        assert_eq!(s, CpuStorage::Int(vec![1, 2]));

        let s = CpuStorage::from_scalars(&values, DType::Float);
        assert_eq!(s, CpuStorage::Float(vec![1.0, 2.5]));
        assert_eq!(s.len(), 2);
        assert!(!s.is_empty());
    }

    #[test]
    fn test_set_casts_to_storage_dtype() {
        let mut s = CpuStorage::Int(vec![0, 0]);
        assert!(s.set(1, Scalar::Float(7.9)));
        assert_eq!(s.get(1), Some(Scalar::Int(7)));
        assert!(!s.set(2, Scalar::Int(1)));
    }

    #[test]
    fn test_dtype() {
        assert_eq!(CpuStorage::Float(vec![]).dtype(), DType::Float);
        assert_eq!(CpuStorage::Int(vec![]).dtype(), DType::Int);
    }

    #[test]
    fn test_shared_handles_alias() {
        let a = SharedStorage::new(CpuStorage::Int(vec![1, 2, 3]));
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.handle_count(), 2);

        b.set(0, Scalar::Int(42));
        assert_eq!(a.borrow().get(0), Some(Scalar::Int(42)));

        let snap = a.snapshot();
        a.set(0, Scalar::Int(0));
        assert_eq!(snap.get(0), Some(Scalar::Int(42)));
    }

    #[test]
    fn test_separate_buffers_are_distinct() {
        let a = SharedStorage::new(CpuStorage::Int(vec![1]));
        let b = SharedStorage::new(CpuStorage::Int(vec![1]));
        assert!(!a.ptr_eq(&b));
    }
}
