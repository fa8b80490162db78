use tracing::{debug, trace};

use crate::dtype::DType;
use crate::error::{Result, TensorError};
use crate::index::TensorIndex;
use crate::nested::NestedData;
use crate::scalar::Scalar;
use crate::shape::{strided_offsets, Shape};
use crate::storage::{CpuStorage, SharedStorage};

/// Builds a contiguous tensor from nested data or a bare scalar.
///
/// The dtype is Float if any element is a float (or the input is empty) and
/// Int otherwise. Ragged input is rejected with [`TensorError::RaggedData`].
pub fn tensor(data: impl Into<NestedData>) -> Result<Tensor> {
    Tensor::from_nested(&data.into())
}

/// A strided view over a shared, flat element buffer.
///
/// Views produced by [`Tensor::get`] and [`Tensor::reshape`] alias the
/// storage of the tensor they came from; writes through [`Tensor::set`] are
/// visible through every alias. Elementwise operations always produce fresh
/// contiguous storage.
#[derive(Clone)]
pub struct Tensor {
    storage: SharedStorage,
    shape: Shape,
    strides: Vec<isize>,
    offset: usize,
    dtype: DType,
}

impl Tensor {
    /// Builds a tensor from nested data. See [`tensor`].
    pub fn from_nested(data: &NestedData) -> Result<Tensor> {
        let dims = data.validate()?;
        let values = data.flatten();
        let dtype = DType::promote(&values);
        Ok(Self::materialize(&values, Shape::new(dims), dtype))
    }

    /// Builds a contiguous tensor of `dims` from row-major `values`.
    pub fn from_scalars(values: &[Scalar], dims: &[usize]) -> Result<Tensor> {
        let shape = Shape::from_slice(dims);
        if values.len() != shape.numel() {
            return Err(TensorError::ShapeMismatch {
                expected: vec![values.len()],
                got: dims.to_vec(),
            });
        }
        let dtype = DType::promote(values);
        Ok(Self::materialize(values, shape, dtype))
    }

    /// Fresh contiguous storage holding `values` cast to `dtype`.
    pub(crate) fn materialize(values: &[Scalar], shape: Shape, dtype: DType) -> Tensor {
        debug!(shape = %shape, dtype = %dtype, "materializing tensor");
        let storage = SharedStorage::new(CpuStorage::from_scalars(values, dtype));
        Tensor {
            storage,
            strides: shape.strides(),
            shape,
            offset: 0,
            dtype,
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.shape.dims()
    }

    /// Alias of [`Tensor::shape`].
    pub fn size(&self) -> &[usize] {
        self.shape.dims()
    }

    /// Size of dimension `dim`; negative values count from the last dimension.
    pub fn size_of(&self, dim: isize) -> Result<usize> {
        let ndim = self.ndim();
        let idx = if dim < 0 { dim + ndim as isize } else { dim };
        if idx < 0 || idx as usize >= ndim {
            return Err(TensorError::InvalidAxis { axis: dim, ndim });
        }
        Ok(self.shape.dims()[idx as usize])
    }

    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Index of this view's first element in the backing storage.
    pub fn storage_offset(&self) -> usize {
        self.offset
    }

    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Handle to the backing storage.
    pub fn storage(&self) -> SharedStorage {
        self.storage.clone()
    }

    /// Returns true if both tensors are views over the same buffer.
    pub fn shares_storage(&self, other: &Tensor) -> bool {
        self.storage.ptr_eq(&other.storage)
    }

    /// Returns true if the strides are the canonical row-major strides of the
    /// shape. The offset may be nonzero.
    pub fn is_contiguous(&self) -> bool {
        self.shape.is_contiguous(&self.strides)
    }

    /// A view over the same storage with a new shape and canonical strides.
    ///
    /// Never copies. A non-contiguous view cannot be re-viewed in its own
    /// reading order and fails with [`TensorError::NotContiguous`]; call
    /// [`Tensor::contiguous`] first.
    pub fn reshape(&self, dims: &[usize]) -> Result<Tensor> {
        let new_shape = Shape::from_slice(dims);
        if new_shape.numel() != self.numel() {
            return Err(TensorError::ShapeMismatch {
                expected: self.shape.dims().to_vec(),
                got: dims.to_vec(),
            });
        }
        if self.numel() > 0 && !self.is_contiguous() {
            return Err(TensorError::NotContiguous {
                shape: self.shape.dims().to_vec(),
                strides: self.strides.clone(),
            });
        }
        trace!(from = %self.shape, to = %new_shape, "reshape");
        Ok(Tensor {
            storage: self.storage.clone(),
            strides: new_shape.strides(),
            shape: new_shape,
            offset: self.offset,
            dtype: self.dtype,
        })
    }

    /// Reshapes to a single dimension.
    pub fn flatten(&self) -> Result<Tensor> {
        self.reshape(&[self.numel()])
    }

    /// Returns a tensor that owns contiguous storage of exactly its elements.
    ///
    /// If this tensor already does, the result is a view of the same storage.
    pub fn contiguous(&self) -> Tensor {
        if self.is_contiguous() && self.offset == 0 && self.storage.len() == self.numel() {
            return self.clone();
        }
        Self::materialize(&self.to_vec(), self.shape.clone(), self.dtype)
    }

    /// Resolves `index` into a view over the same storage.
    ///
    /// Integer terms drop their dimension, slice terms keep it, and
    /// dimensions past the last term pass through unchanged.
    pub fn get(&self, index: &[TensorIndex]) -> Result<Tensor> {
        let (offset, dims, strides) = self.resolve(index)?;
        trace!(from = %self.shape, to = ?dims, offset, "index view");
        Ok(Tensor {
            storage: self.storage.clone(),
            shape: Shape::new(dims),
            strides,
            offset,
            dtype: self.dtype,
        })
    }

    /// Writes `value` into the single element selected by `index`.
    ///
    /// The value is cast to this tensor's dtype. The write goes to the shared
    /// buffer, so every view over it observes the change.
    pub fn set(&self, index: &[TensorIndex], value: impl Into<Scalar>) -> Result<()> {
        let (offset, dims, _) = self.resolve(index)?;
        if !dims.is_empty() {
            return Err(TensorError::ScalarOnlyAssignment { shape: dims });
        }
        let value: Scalar = value.into();
        let written = self.storage.set(offset, value.cast(self.dtype));
        debug_assert!(written, "resolved offset {} outside storage", offset);
        Ok(())
    }

    /// The value of a single-element tensor of any rank.
    pub fn item(&self) -> Result<Scalar> {
        if self.numel() != 1 {
            return Err(TensorError::NotSingleElement {
                shape: self.shape.dims().to_vec(),
            });
        }
        self.to_vec()
            .first()
            .copied()
            .ok_or_else(|| TensorError::NotSingleElement {
                shape: self.shape.dims().to_vec(),
            })
    }

    /// Logical elements in row-major order of the view.
    pub fn to_vec(&self) -> Vec<Scalar> {
        let storage = self.storage.borrow();
        let values = strided_offsets(self.shape.dims(), &self.strides, self.offset)
            .into_iter()
            .filter_map(|off| storage.get(off))
            .collect();
        values
    }

    /// Nested data matching the shape; a bare scalar for rank 0.
    pub fn to_list(&self) -> NestedData {
        nest(&self.to_vec(), self.shape.dims())
    }

    fn resolve(&self, index: &[TensorIndex]) -> Result<(usize, Vec<usize>, Vec<isize>)> {
        let ndim = self.ndim();
        if index.len() > ndim {
            return Err(TensorError::TooManyIndices {
                given: index.len(),
                ndim,
            });
        }

        let dims = self.shape.dims();
        let mut offset = self.offset as isize;
        let mut out_dims = Vec::with_capacity(ndim);
        let mut out_strides = Vec::with_capacity(ndim);

        for (dim, term) in index.iter().enumerate() {
            let size = dims[dim];
            let stride = self.strides[dim];
            match *term {
                TensorIndex::Int(i) => {
                    let pos = if i < 0 { i + size as isize } else { i };
                    if pos < 0 || pos >= size as isize {
                        return Err(TensorError::IndexOutOfBounds { dim, index: i, size });
                    }
                    offset += pos * stride;
                }
                TensorIndex::Slice(spec) => {
                    let r = spec.indices(size)?;
                    // An empty slice may start outside the dimension.
                    if r.len > 0 {
                        offset += r.start * stride;
                    }
                    out_dims.push(r.len);
                    out_strides.push(r.step * stride);
                }
                TensorIndex::Ellipsis => {
                    return Err(TensorError::NotSupported("ellipsis indexing".to_string()));
                }
            }
        }

        out_dims.extend_from_slice(&dims[index.len()..]);
        out_strides.extend_from_slice(&self.strides[index.len()..]);
        Ok((usize::try_from(offset).unwrap_or(0), out_dims, out_strides))
    }
}

fn nest(values: &[Scalar], dims: &[usize]) -> NestedData {
    match dims.split_first() {
        None => values
            .first()
            .map(|&s| NestedData::Scalar(s))
            .unwrap_or_else(NestedData::empty),
        Some((&len, rest)) => {
            let chunk: usize = rest.iter().product();
            let items = (0..len)
                .map(|i| {
                    let part = values.get(i * chunk..(i + 1) * chunk).unwrap_or(&[]);
                    nest(part, rest)
                })
                .collect();
            NestedData::List(items)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s;

    fn list(data: impl Into<NestedData>) -> NestedData {
        data.into()
    }

    #[test]
    fn test_tensor_scalar() {
        let x = tensor(1).unwrap();
        assert_eq!(x.dtype(), DType::Int);
        assert_eq!(x.shape(), &[] as &[usize]);
        assert_eq!(x.strides(), &[] as &[isize]);
        assert_eq!(x.storage().snapshot(), CpuStorage::Int(vec![1]));
    }

    #[test]
    fn test_tensor_1d() {
        let x = tensor(vec![1, 2, 3]).unwrap();
        assert_eq!(x.dtype(), DType::Int);
        assert_eq!(x.shape(), &[3]);
        assert_eq!(x.strides(), &[1]);
        assert_eq!(x.storage_offset(), 0);
        assert_eq!(x.storage().snapshot(), CpuStorage::Int(vec![1, 2, 3]));
    }

    #[test]
    fn test_tensor_2d() {
        let x = tensor(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(x.shape(), &[2, 2]);
        assert_eq!(x.strides(), &[2, 1]);
        assert_eq!(x.storage().snapshot(), CpuStorage::Int(vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_tensor_3d() {
        let x = tensor(vec![vec![vec![1, 2], vec![3, 4]], vec![vec![5, 6], vec![7, 8]]]).unwrap();
        assert_eq!(x.shape(), &[2, 2, 2]);
        assert_eq!(x.strides(), &[4, 2, 1]);
        assert_eq!(
            x.storage().snapshot(),
            CpuStorage::Int(vec![1, 2, 3, 4, 5, 6, 7, 8])
        );
    }

    #[test]
    fn test_type_inference() {
        let x = tensor(vec![Scalar::Int(1), Scalar::Int(2), Scalar::Float(3.0)]).unwrap();
        assert_eq!(x.dtype(), DType::Float);
        assert_eq!(x.storage().snapshot(), CpuStorage::Float(vec![1.0, 2.0, 3.0]));

        let y = tensor(vec![1, 2, 3]).unwrap();
        assert_eq!(y.dtype(), DType::Int);
    }

    #[test]
    fn test_tensor_empty() {
        let x = tensor(NestedData::empty()).unwrap();
        assert_eq!(x.dtype(), DType::Float);
        assert_eq!(x.shape(), &[0]);
        assert_eq!(x.numel(), 0);
        assert_eq!(x.to_list(), NestedData::empty());
    }

    #[test]
    fn test_tensor_ragged_rejected() {
        let err = tensor(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, TensorError::RaggedData { .. }));
    }

    #[test]
    fn test_from_scalars() {
        let x = Tensor::from_scalars(&[Scalar::Int(1), Scalar::Int(2)], &[2, 1]).unwrap();
        assert_eq!(x.to_list(), list(vec![vec![1], vec![2]]));
        assert!(Tensor::from_scalars(&[Scalar::Int(1)], &[2]).is_err());
    }

    #[test]
    fn test_size() {
        let x = tensor(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(x.size(), &[2, 3]);
        assert_eq!(x.size_of(0).unwrap(), 2);
        assert_eq!(x.size_of(1).unwrap(), 3);
        assert_eq!(x.size_of(-1).unwrap(), 3);
        assert_eq!(
            x.size_of(2).unwrap_err(),
            TensorError::InvalidAxis { axis: 2, ndim: 2 }
        );
    }

    #[test]
    fn test_size_scalar() {
        let x = tensor(1).unwrap();
        assert!(x.size().is_empty());
        assert!(x.size_of(0).is_err());
    }

    #[test]
    fn test_to_list() {
        assert_eq!(tensor(vec![1, 2, 3]).unwrap().to_list(), list(vec![1, 2, 3]));
        assert_eq!(
            tensor(vec![vec![1, 2], vec![3, 4]]).unwrap().to_list(),
            list(vec![vec![1, 2], vec![3, 4]])
        );
        assert_eq!(tensor(1).unwrap().to_list(), list(1));
    }

    #[test]
    fn test_to_list_zero_inner_dim() {
        let x = tensor(vec![Vec::<i64>::new(), Vec::new()]).unwrap();
        assert_eq!(x.shape(), &[2, 0]);
        assert_eq!(x.to_list(), list(vec![Vec::<i64>::new(), Vec::new()]));
    }

    #[test]
    fn test_reshape_2d() {
        let x = tensor(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let y = x.reshape(&[4]).unwrap();
        assert_eq!(y.dtype(), DType::Int);
        assert_eq!(y.shape(), &[4]);
        assert_eq!(y.strides(), &[1]);
        assert!(y.shares_storage(&x));
        assert_eq!(y.to_list(), list(vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_reshape_scalar() {
        let x = tensor(1).unwrap();
        let y = x.reshape(&[]).unwrap();
        assert_eq!(y.shape(), &[] as &[usize]);
        assert!(y.shares_storage(&x));

        let z = x.reshape(&[1]).unwrap();
        assert_eq!(z.shape(), &[1]);
        assert_eq!(z.strides(), &[1]);
        assert!(z.shares_storage(&x));

        let back = z.reshape(&[]).unwrap();
        assert_eq!(back.to_list(), list(1));
    }

    #[test]
    fn test_reshape_error() {
        let x = tensor(vec![1, 2, 3]).unwrap();
        assert_eq!(
            x.reshape(&[2, 2]).unwrap_err(),
            TensorError::ShapeMismatch {
                expected: vec![3],
                got: vec![2, 2]
            }
        );
    }

    #[test]
    fn test_reshape_idempotent() {
        let x = tensor(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let y = x.reshape(x.shape()).unwrap();
        assert_eq!(y.shape(), x.shape());
        assert_eq!(y.strides(), x.strides());
        assert_eq!(y.storage_offset(), x.storage_offset());
        assert!(y.shares_storage(&x));
    }

    #[test]
    fn test_reshape_contiguous_view_keeps_offset() {
        let x = tensor(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let row = x.get(&s![1]).unwrap();
        let col = row.reshape(&[2, 1]).unwrap();
        assert!(col.shares_storage(&x));
        assert_eq!(col.storage_offset(), 2);
        assert_eq!(col.to_list(), list(vec![vec![3], vec![4]]));
    }

    #[test]
    fn test_reshape_strided_view_rejected() {
        let x = tensor(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap();
        let col = x.get(&s![.., 1]).unwrap();
        assert_eq!(
            col.reshape(&[3, 1]).unwrap_err(),
            TensorError::NotContiguous {
                shape: vec![3],
                strides: vec![3]
            }
        );

        let r = col.contiguous().reshape(&[3, 1]).unwrap();
        assert!(!r.shares_storage(&x));
        assert_eq!(r.to_list(), list(vec![vec![2], vec![5], vec![8]]));
    }

    #[test]
    fn test_reshape_write_reaches_origin() {
        let x = tensor(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let r = x.get(&s![1]).unwrap().reshape(&[2, 1]).unwrap();
        r.set(&s![0, 0], 100).unwrap();
        assert_eq!(x.get(&s![1, 0]).unwrap().item().unwrap(), Scalar::Int(100));
    }

    #[test]
    fn test_reshape_reversed_view_rejected() {
        let x = tensor(vec![1, 2, 3]).unwrap();
        let rev = x.get(&[TensorIndex::slice(None, None, Some(-1))]).unwrap();
        assert!(matches!(
            rev.reshape(&[3, 1]),
            Err(TensorError::NotContiguous { .. })
        ));
    }

    #[test]
    fn test_simple_indexing() {
        let x = tensor(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let x0 = x.get(&s![0]).unwrap();
        assert_eq!(x0.to_list(), list(vec![1, 2]));
        let x1 = x.get(&s![1]).unwrap();
        assert_eq!(x1.to_list(), list(vec![3, 4]));
        let x11 = x1.get(&s![1]).unwrap();
        assert_eq!(x11.to_list(), list(4));

        x.set(&s![1, 1], 5).unwrap();

        assert_eq!(x.to_list(), list(vec![vec![1, 2], vec![3, 5]]));
        assert_eq!(x1.to_list(), list(vec![3, 5]));
        assert_eq!(x11.to_list(), list(5));
    }

    #[test]
    fn test_write_through_view_visible_in_origin() {
        let x = tensor(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let v = x.get(&s![1]).unwrap();
        v.set(&s![0], 30).unwrap();
        assert_eq!(x.to_list(), list(vec![vec![1, 2], vec![30, 4]]));
    }

    #[test]
    fn test_indexing_negative() {
        let x = tensor(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(x.get(&s![-1]).unwrap().to_list(), list(vec![3, 4]));
        assert_eq!(x.get(&s![-1, -1]).unwrap().to_list(), list(4));
    }

    #[test]
    fn test_indexing_errors() {
        let x = tensor(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(
            x.get(&s![2]).unwrap_err(),
            TensorError::IndexOutOfBounds {
                dim: 0,
                index: 2,
                size: 2
            }
        );
        assert_eq!(
            x.get(&s![1, -3]).unwrap_err(),
            TensorError::IndexOutOfBounds {
                dim: 1,
                index: -3,
                size: 2
            }
        );
        assert_eq!(
            x.get(&s![1, 1, 1]).unwrap_err(),
            TensorError::TooManyIndices { given: 3, ndim: 2 }
        );
    }

    #[test]
    fn test_indexing_scalar_tensor() {
        let x = tensor(7).unwrap();
        assert_eq!(x.get(&[]).unwrap().to_list(), list(7));
        assert!(matches!(
            x.get(&s![0]),
            Err(TensorError::TooManyIndices { given: 1, ndim: 0 })
        ));
    }

    #[test]
    fn test_ellipsis_not_supported() {
        let x = tensor(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let err = x.get(&[TensorIndex::Ellipsis]).unwrap_err();
        assert!(matches!(err, TensorError::NotSupported(_)));
    }

    fn grid() -> Tensor {
        tensor(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap()
    }

    #[test]
    fn test_slicing_all() {
        let x = grid();
        let y = x.get(&s![.., ..]).unwrap();
        assert_eq!(y.to_list(), x.to_list());
        assert!(y.shares_storage(&x));
    }

    #[test]
    fn test_slicing_row_and_column() {
        let x = grid();
        let row = x.get(&s![1, ..]).unwrap();
        assert_eq!(row.to_list(), list(vec![4, 5, 6]));
        assert!(row.shares_storage(&x));

        let col = x.get(&s![.., 1]).unwrap();
        assert_eq!(col.to_list(), list(vec![2, 5, 8]));
        assert_eq!(col.strides(), &[3]);
        assert_eq!(col.storage_offset(), 1);
    }

    #[test]
    fn test_slicing_ranges() {
        let x = grid();
        let y = x.get(&s![1.., 1..]).unwrap();
        assert_eq!(y.to_list(), list(vec![vec![5, 6], vec![8, 9]]));
        assert!(y.shares_storage(&x));

        let z = x.get(&s![-2.., -2..]).unwrap();
        assert_eq!(z.to_list(), list(vec![vec![5, 6], vec![8, 9]]));
    }

    #[test]
    fn test_slicing_negative_step() {
        let x = grid();
        let rev = x.get(&[TensorIndex::slice(None, None, Some(-1))]).unwrap();
        assert_eq!(rev.strides(), &[-3, 1]);
        assert_eq!(rev.storage_offset(), 6);
        assert_eq!(
            rev.to_list(),
            list(vec![vec![7, 8, 9], vec![4, 5, 6], vec![1, 2, 3]])
        );

        let diag_rev = rev.get(&s![.., 2]).unwrap();
        assert_eq!(diag_rev.to_list(), list(vec![9, 6, 3]));
    }

    #[test]
    fn test_slicing_step_two() {
        let x = tensor(vec![0, 1, 2, 3, 4, 5]).unwrap();
        let y = x.get(&[TensorIndex::slice(Some(1), None, Some(2))]).unwrap();
        assert_eq!(y.to_list(), list(vec![1, 3, 5]));
        assert_eq!(y.strides(), &[2]);
    }

    #[test]
    fn test_slicing_empty_result() {
        let x = grid();
        let y = x.get(&s![2..1]).unwrap();
        assert_eq!(y.shape(), &[0, 3]);
        assert_eq!(y.numel(), 0);
    }

    #[test]
    fn test_slicing_too_many() {
        let x = grid();
        assert!(matches!(
            x.get(&s![1, 1, 1]),
            Err(TensorError::TooManyIndices { .. })
        ));
    }

    #[test]
    fn test_set_requires_scalar_target() {
        let x = grid();
        assert_eq!(
            x.set(&s![1], 0).unwrap_err(),
            TensorError::ScalarOnlyAssignment { shape: vec![3] }
        );
        assert_eq!(
            x.set(&s![.., 0], 0).unwrap_err(),
            TensorError::ScalarOnlyAssignment { shape: vec![3] }
        );
        assert_eq!(x.to_list(), grid().to_list());
    }

    #[test]
    fn test_set_casts_to_dtype() {
        let x = tensor(vec![1, 2]).unwrap();
        x.set(&s![0], 2.9).unwrap();
        assert!(matches!(x.get(&s![0]).unwrap().item().unwrap(), Scalar::Int(2)));

        let f = tensor(vec![1.5, 2.5]).unwrap();
        f.set(&s![-1], 4).unwrap();
        assert!(matches!(f.item_at(1), Scalar::Float(v) if v == 4.0));
    }

    #[test]
    fn test_set_through_slice_view() {
        let x = grid();
        let sub = x.get(&s![1.., 1..]).unwrap();
        sub.set(&s![0, 0], 50).unwrap();
        assert_eq!(x.get(&s![1, 1]).unwrap().item().unwrap(), Scalar::Int(50));
    }

    #[test]
    fn test_item() {
        let x = tensor(vec![vec![42]]).unwrap();
        assert_eq!(x.item().unwrap(), Scalar::Int(42));
        assert!(matches!(
            tensor(vec![1, 2]).unwrap().item(),
            Err(TensorError::NotSingleElement { .. })
        ));
    }

    #[test]
    fn test_contiguous() {
        let x = grid();
        assert!(x.contiguous().shares_storage(&x));

        let col = x.get(&s![.., 2]).unwrap();
        assert!(!col.is_contiguous());
        let c = col.contiguous();
        assert!(!c.shares_storage(&x));
        assert_eq!(c.strides(), &[1]);
        assert_eq!(c.storage_offset(), 0);
        assert_eq!(c.to_list(), list(vec![3, 6, 9]));
    }

    #[test]
    fn test_flatten() {
        let x = grid();
        let f = x.get(&s![..2]).unwrap().flatten().unwrap();
        assert_eq!(f.to_list(), list(vec![1, 2, 3, 4, 5, 6]));
        assert!(f.shares_storage(&x));
    }

    impl Tensor {
        fn item_at(&self, i: usize) -> Scalar {
            self.to_vec()[i]
        }
    }
}
