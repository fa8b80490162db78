//! `tor-tensor` - A minimal strided-view tensor library.
//!
//! This crate provides:
//! - A `Tensor` type: a shape/strides/offset view over shared storage
//! - Construction from nested data with Int/Float dtype promotion
//! - Reshape, integer indexing and slicing as aliasing views
//! - Elementwise unary and broadcasting binary operations
//! - A canonical text representation
//!
//! Tensors share storage through `Rc`, so they are deliberately `!Send`.

pub mod dtype;
pub mod error;
pub mod format;
pub mod index;
pub mod nested;
pub mod ops;
pub mod scalar;
pub mod shape;
pub mod storage;
pub mod tensor;

// Re-export primary types at the crate root for convenience.
pub use dtype::DType;
pub use error::{Result, TensorError};
pub use format::PrintOptions;
pub use index::{ResolvedSlice, SliceSpec, TensorIndex};
pub use nested::NestedData;
pub use ops::Operand;
pub use scalar::Scalar;
pub use shape::{contiguous_strides, Shape};
pub use storage::{CpuStorage, SharedStorage};
pub use tensor::{tensor, Tensor};
