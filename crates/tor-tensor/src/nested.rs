use std::fmt;

use crate::error::{Result, TensorError};
use crate::scalar::Scalar;

/// Arbitrarily nested sequence of scalars.
///
/// This is what [`crate::tensor()`] consumes and what [`crate::Tensor::to_list`]
/// produces.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedData {
    Scalar(Scalar),
    List(Vec<NestedData>),
}

impl NestedData {
    /// The empty list.
    pub fn empty() -> Self {
        NestedData::List(Vec::new())
    }

    /// Shape obtained by following the first child at every level.
    ///
    /// An empty list contributes a trailing 0; a bare scalar has rank 0.
    pub fn shape(&self) -> Vec<usize> {
        let mut dims = Vec::new();
        let mut node = self;
        while let NestedData::List(items) = node {
            dims.push(items.len());
            match items.first() {
                Some(first) => node = first,
                None => break,
            }
        }
        dims
    }

    /// Checks that every sibling has the same shape and returns that shape.
    pub fn validate(&self) -> Result<Vec<usize>> {
        let shape = self.shape();
        let mut path = Vec::new();
        check_uniform(self, &shape, &mut path)?;
        Ok(shape)
    }

    /// All scalars in depth-first, left-to-right order.
    pub fn flatten(&self) -> Vec<Scalar> {
        let mut out = Vec::new();
        flatten_into(self, &mut out);
        out
    }
}

fn check_uniform(node: &NestedData, expected: &[usize], path: &mut Vec<usize>) -> Result<()> {
    match (node, expected.split_first()) {
        (NestedData::Scalar(_), None) => Ok(()),
        (NestedData::List(items), Some((&len, rest))) if items.len() == len => {
            for (i, child) in items.iter().enumerate() {
                path.push(i);
                check_uniform(child, rest, path)?;
                path.pop();
            }
            Ok(())
        }
        _ => Err(TensorError::RaggedData {
            path: path.clone(),
            expected: expected.to_vec(),
            got: node.shape(),
        }),
    }
}

fn flatten_into(node: &NestedData, out: &mut Vec<Scalar>) {
    match node {
        NestedData::Scalar(s) => out.push(*s),
        NestedData::List(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
    }
}

impl fmt::Display for NestedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestedData::Scalar(s) => write!(f, "{}", s),
            NestedData::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<Scalar> for NestedData {
    fn from(s: Scalar) -> Self {
        NestedData::Scalar(s)
    }
}

macro_rules! impl_from_scalar_like {
    ($($t:ty),*) => {
        $(impl From<$t> for NestedData {
            fn from(v: $t) -> Self {
                NestedData::Scalar(Scalar::from(v))
            }
        })*
    };
}

impl_from_scalar_like!(i8, i16, i32, i64, u8, u16, u32, usize, isize, f32, f64, bool);

impl<T: Into<NestedData>> From<Vec<T>> for NestedData {
    fn from(items: Vec<T>) -> Self {
        NestedData::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<NestedData>, const N: usize> From<[T; N]> for NestedData {
    fn from(items: [T; N]) -> Self {
        NestedData::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<NestedData>> From<&[T]> for NestedData {
    fn from(items: &[T]) -> Self {
        NestedData::List(items.iter().cloned().map(Into::into).collect())
    }
}
