use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    #[error("shape mismatch: cannot view {expected:?} as {got:?}")]
    ShapeMismatch { expected: Vec<usize>, got: Vec<usize> },
    #[error("index {index} is out of bounds for dimension {dim} with size {size}")]
    IndexOutOfBounds { dim: usize, index: isize, size: usize },
    #[error("too many indices: {given} given for tensor with {ndim} dimensions")]
    TooManyIndices { given: usize, ndim: usize },
    #[error("assignment requires a single-element target, index resolved to shape {shape:?}")]
    ScalarOnlyAssignment { shape: Vec<usize> },
    #[error("expected a tensor with exactly one element, got shape {shape:?}")]
    NotSingleElement { shape: Vec<usize> },
    #[error("cannot broadcast shapes {a:?} and {b:?}")]
    BroadcastIncompatible { a: Vec<usize>, b: Vec<usize> },
    #[error("not supported: {0}")]
    NotSupported(String),
    #[error("ragged nested data at {path:?}: expected shape {expected:?}, got {got:?}")]
    RaggedData {
        path: Vec<usize>,
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    #[error("invalid dimension {axis} for tensor with {ndim} dimensions")]
    InvalidAxis { axis: isize, ndim: usize },
    #[error("slice step cannot be zero")]
    SliceStepZero,
    #[error("cannot reshape non-contiguous view of shape {shape:?} with strides {strides:?}; call contiguous() first")]
    NotContiguous { shape: Vec<usize>, strides: Vec<isize> },
}

pub type Result<T> = std::result::Result<T, TensorError>;
