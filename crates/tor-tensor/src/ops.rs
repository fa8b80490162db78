//! Elementwise operations.
//!
//! Results always own fresh, contiguous storage and never alias an operand.
//! Their dtype is re-derived from the produced values, so an op that yields
//! any float promotes the whole result.

use tracing::debug;

use crate::dtype::DType;
use crate::error::Result;
use crate::nested::NestedData;
use crate::scalar::Scalar;
use crate::shape::{strided_offsets, Shape};
use crate::tensor::Tensor;

/// Right-hand side of [`Tensor::binary_op`]: an existing tensor, or raw data
/// that is turned into one first.
#[derive(Debug, Clone)]
pub enum Operand<'a> {
    Tensor(&'a Tensor),
    Data(NestedData),
}

impl<'a> From<&'a Tensor> for Operand<'a> {
    fn from(t: &'a Tensor) -> Self {
        Operand::Tensor(t)
    }
}

impl<T: Into<NestedData>> From<T> for Operand<'_> {
    fn from(data: T) -> Self {
        Operand::Data(data.into())
    }
}

impl Tensor {
    /// Applies `f` to every element in view order.
    pub fn unary_op<F>(&self, f: F) -> Tensor
    where
        F: Fn(Scalar) -> Scalar,
    {
        let values: Vec<Scalar> = self.to_vec().into_iter().map(f).collect();
        let dtype = DType::promote(&values);
        debug!(shape = ?self.shape(), dtype = %dtype, "unary_op");
        Tensor::materialize(&values, Shape::from_slice(self.shape()), dtype)
    }

    /// Applies `f` pairwise after broadcasting both operands to a common shape.
    ///
    /// Shapes are right-aligned and size-1 dimensions stretch to match;
    /// anything else fails with
    /// [`crate::TensorError::BroadcastIncompatible`].
    pub fn binary_op<'a, F>(&self, other: impl Into<Operand<'a>>, f: F) -> Result<Tensor>
    where
        F: Fn(Scalar, Scalar) -> Scalar,
    {
        let owned;
        let rhs = match other.into() {
            Operand::Tensor(t) => t,
            Operand::Data(data) => {
                owned = Tensor::from_nested(&data)?;
                &owned
            }
        };

        let lhs_shape = Shape::from_slice(self.shape());
        let rhs_shape = Shape::from_slice(rhs.shape());
        let out_shape = Shape::broadcast_shape(&lhs_shape, &rhs_shape)?;

        let lhs_strides = lhs_shape.broadcast_strides(self.strides(), &out_shape);
        let rhs_strides = rhs_shape.broadcast_strides(rhs.strides(), &out_shape);
        let lhs_offsets = strided_offsets(out_shape.dims(), &lhs_strides, self.storage_offset());
        let rhs_offsets = strided_offsets(out_shape.dims(), &rhs_strides, rhs.storage_offset());

        // Read both sides before calling `f` so it may write to either operand.
        let lhs_values = gather(self, &lhs_offsets);
        let rhs_values = gather(rhs, &rhs_offsets);
        let values: Vec<Scalar> = lhs_values
            .into_iter()
            .zip(rhs_values)
            .map(|(a, b)| f(a, b))
            .collect();

        let dtype = DType::promote_or(&values, self.dtype());
        debug!(
            lhs = %lhs_shape,
            rhs = %rhs_shape,
            out = %out_shape,
            dtype = %dtype,
            "binary_op"
        );
        Ok(Tensor::materialize(&values, out_shape, dtype))
    }

    pub fn add<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Tensor> {
        self.binary_op(other, |a, b| a + b)
    }

    pub fn sub<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Tensor> {
        self.binary_op(other, |a, b| a - b)
    }

    pub fn mul<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Tensor> {
        self.binary_op(other, |a, b| a * b)
    }

    /// True division; the result is always Float.
    pub fn div<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Tensor> {
        self.binary_op(other, |a, b| a / b)
    }

    pub fn neg(&self) -> Tensor {
        self.unary_op(|a| -a)
    }
}

fn gather(t: &Tensor, offsets: &[usize]) -> Vec<Scalar> {
    let storage = t.storage();
    let buf = storage.borrow();
    let values = offsets.iter().filter_map(|&i| buf.get(i)).collect();
    values
}
