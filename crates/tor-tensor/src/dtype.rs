use std::fmt;

use crate::scalar::Scalar;

/// Element type of a tensor's storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
}

impl DType {
    /// Picks the dtype for freshly materialized storage holding `values`.
    ///
    /// Float if any value is float-tagged, Int otherwise. An empty sequence
    /// gives Float.
    pub fn promote(values: &[Scalar]) -> DType {
        Self::promote_or(values, DType::Float)
    }

    /// Same rule as [`DType::promote`], but an empty sequence gives `fallback`.
    pub fn promote_or(values: &[Scalar], fallback: DType) -> DType {
        if values.is_empty() {
            return fallback;
        }
        if values.iter().any(|v| v.dtype() == DType::Float) {
            DType::Float
        } else {
            DType::Int
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::Int => write!(f, "int"),
            DType::Float => write!(f, "float"),
        }
    }
}
