use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use crate::dtype::DType;

/// A single tensor element.
///
/// Integer arithmetic stays integral (wrapping on overflow); any float
/// operand makes the result a float. Division is always true division.
#[derive(Debug, Clone, Copy)]
pub enum Scalar {
    Int(i64),
    Float(f64),
}

impl Scalar {
    /// The dtype this value is tagged with.
    pub fn dtype(&self) -> DType {
        match self {
            Scalar::Int(_) => DType::Int,
            Scalar::Float(_) => DType::Float,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Scalar::Int(v) => v as f64,
            Scalar::Float(v) => v,
        }
    }

    /// Truncates toward zero. NaN maps to 0 and infinities saturate.
    pub fn as_i64(&self) -> i64 {
        match *self {
            Scalar::Int(v) => v,
            Scalar::Float(v) => v as i64,
        }
    }

    /// Converts the value to `dtype`.
    pub fn cast(self, dtype: DType) -> Scalar {
        match dtype {
            DType::Int => Scalar::Int(self.as_i64()),
            DType::Float => Scalar::Float(self.as_f64()),
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Scalar {
            fn from(v: $t) -> Self {
                Scalar::Int(v as i64)
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, usize, isize);

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::Float(v as f64)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Int(v as i64)
    }
}

impl Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Scalar) -> Scalar {
        match (self, rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => Scalar::Int(a.wrapping_add(b)),
            (a, b) => Scalar::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl Sub for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: Scalar) -> Scalar {
        match (self, rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => Scalar::Int(a.wrapping_sub(b)),
            (a, b) => Scalar::Float(a.as_f64() - b.as_f64()),
        }
    }
}

impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        match (self, rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => Scalar::Int(a.wrapping_mul(b)),
            (a, b) => Scalar::Float(a.as_f64() * b.as_f64()),
        }
    }
}

impl Div for Scalar {
    type Output = Scalar;

    fn div(self, rhs: Scalar) -> Scalar {
        Scalar::Float(self.as_f64() / rhs.as_f64())
    }
}

impl Rem for Scalar {
    type Output = Scalar;

    fn rem(self, rhs: Scalar) -> Scalar {
        match (self, rhs) {
            (Scalar::Int(_), Scalar::Int(0)) => Scalar::Float(f64::NAN),
            (Scalar::Int(a), Scalar::Int(b)) => Scalar::Int(a.wrapping_rem(b)),
            (a, b) => Scalar::Float(a.as_f64() % b.as_f64()),
        }
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        match self {
            Scalar::Int(v) => Scalar::Int(v.wrapping_neg()),
            Scalar::Float(v) => Scalar::Float(-v),
        }
    }
}
