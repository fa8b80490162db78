use crate::error::{Result, TensorError};
use std::fmt;

/// Computes row-major contiguous strides for `dims`.
///
/// For a shape [d0, d1, d2], the strides are [d1*d2, d2, 1]. A rank-0 shape
/// has no strides.
pub fn contiguous_strides(dims: &[usize]) -> Vec<isize> {
    let mut strides = Vec::with_capacity(dims.len());
    let mut running = 1isize;
    for &d in dims.iter().rev() {
        strides.push(running);
        running *= d as isize;
    }
    strides.reverse();
    strides
}

/// Storage offsets of every element of a strided view, in row-major order
/// of `dims`.
pub fn strided_offsets(dims: &[usize], strides: &[isize], base: usize) -> Vec<usize> {
    let numel: usize = dims.iter().product();
    let mut out = Vec::with_capacity(numel);
    if numel == 0 {
        return out;
    }
    let mut index = vec![0usize; dims.len()];
    let mut pos = base as isize;
    loop {
        out.push(pos as usize);
        let mut d = dims.len();
        loop {
            if d == 0 {
                return out;
            }
            d -= 1;
            index[d] += 1;
            pos += strides[d];
            if index[d] < dims[d] {
                break;
            }
            pos -= strides[d] * dims[d] as isize;
            index[d] = 0;
        }
    }
}

/// A tensor shape, wrapping a vector of dimension sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Create a new shape from a vector of dimensions.
    pub fn new(dims: Vec<usize>) -> Self {
        Shape { dims }
    }

    /// Create a shape from a slice of dimensions.
    pub fn from_slice(dims: &[usize]) -> Self {
        Shape {
            dims: dims.to_vec(),
        }
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements (product of all dimension sizes).
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Returns the size of dimension `i`, if it exists.
    pub fn dim(&self, i: usize) -> Option<usize> {
        self.dims.get(i).copied()
    }

    /// Returns a reference to the underlying dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Row-major contiguous strides for this shape.
    pub fn strides(&self) -> Vec<isize> {
        contiguous_strides(&self.dims)
    }

    /// Checks if the given strides correspond to a contiguous (row-major) layout
    /// for this shape.
    ///
    /// Strides of size-1 dimensions never affect addressing, so they are not
    /// compared.
    pub fn is_contiguous(&self, strides: &[isize]) -> bool {
        if strides.len() != self.dims.len() {
            return false;
        }
        let expected = self.strides();
        self.dims
            .iter()
            .zip(strides.iter().zip(expected.iter()))
            .all(|(&d, (s, e))| d == 1 || s == e)
    }

    /// Compute the broadcast shape of `a` and `b` using numpy-style broadcasting rules.
    ///
    /// Rules:
    /// 1. If the shapes have different numbers of dimensions, the shorter shape is
    ///    padded with ones on the left.
    /// 2. For each dimension, sizes must either be equal, or one of them must be 1.
    ///    The output dimension is the other one.
    pub fn broadcast_shape(a: &Shape, b: &Shape) -> Result<Shape> {
        let max_ndim = a.ndim().max(b.ndim());
        let mut result = Vec::with_capacity(max_ndim);

        for i in 0..max_ndim {
            // Index from the right: dim at position (ndim - 1 - i) from the right
            let da = if i < a.ndim() {
                a.dims[a.ndim() - 1 - i]
            } else {
                1
            };
            let db = if i < b.ndim() {
                b.dims[b.ndim() - 1 - i]
            } else {
                1
            };

            if da == db {
                result.push(da);
            } else if da == 1 {
                result.push(db);
            } else if db == 1 {
                result.push(da);
            } else {
                return Err(TensorError::BroadcastIncompatible {
                    a: a.dims.clone(),
                    b: b.dims.clone(),
                });
            }
        }

        result.reverse();
        Ok(Shape::new(result))
    }

    /// Strides for reading a tensor of this shape and `strides` as if it had
    /// shape `target`.
    ///
    /// Padding dimensions and size-1 dimensions get stride 0. `target` must be
    /// a valid broadcast of this shape.
    pub fn broadcast_strides(&self, strides: &[isize], target: &Shape) -> Vec<isize> {
        let pad = target.ndim() - self.ndim();
        let mut out = vec![0isize; pad];
        for (&d, &s) in self.dims.iter().zip(strides.iter()) {
            out.push(if d > 1 { s } else { 0 });
        }
        out
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::from_slice(dims)
    }
}
