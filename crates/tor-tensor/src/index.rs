//! Index terms for [`crate::Tensor::get`] and [`crate::Tensor::set`].
//!
//! A term is an integer (drops its dimension), a slice (keeps it), or an
//! ellipsis. Ellipsis is accepted by the type so callers get an explicit
//! [`crate::TensorError::NotSupported`] rather than a silent "select all".

use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use crate::error::{Result, TensorError};

/// `start:stop:step` with Python slice defaults for missing parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceSpec {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

/// A slice normalized against a concrete dimension length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlice {
    pub start: isize,
    pub stop: isize,
    pub step: isize,
    /// Number of elements the slice selects.
    pub len: usize,
}

impl SliceSpec {
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        SliceSpec { start, stop, step }
    }

    /// The whole dimension, `::`.
    pub fn full() -> Self {
        SliceSpec::default()
    }

    pub fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// Normalizes the slice against a dimension of length `len`.
    ///
    /// Negative bounds count from the end and out-of-range bounds are clamped,
    /// so only a zero step can fail.
    pub fn indices(&self, len: usize) -> Result<ResolvedSlice> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(TensorError::SliceStepZero);
        }
        let len = len as isize;
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };

        let clamp = |bound: isize| {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };

        let start = match self.start {
            Some(s) => clamp(s),
            None if step < 0 => upper,
            None => lower,
        };
        let stop = match self.stop {
            Some(s) => clamp(s),
            None if step < 0 => lower,
            None => upper,
        };

        let count = if step < 0 {
            if stop < start {
                (start - stop - 1) / (-step) + 1
            } else {
                0
            }
        } else if start < stop {
            (stop - start - 1) / step + 1
        } else {
            0
        };

        Ok(ResolvedSlice {
            start,
            stop,
            step,
            len: count as usize,
        })
    }
}

/// One term of an index expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorIndex {
    Int(isize),
    Slice(SliceSpec),
    Ellipsis,
}

impl TensorIndex {
    pub fn slice(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        TensorIndex::Slice(SliceSpec::new(start, stop, step))
    }
}

impl From<isize> for TensorIndex {
    fn from(i: isize) -> Self {
        TensorIndex::Int(i)
    }
}

impl From<SliceSpec> for TensorIndex {
    fn from(s: SliceSpec) -> Self {
        TensorIndex::Slice(s)
    }
}

impl From<RangeFull> for TensorIndex {
    fn from(_: RangeFull) -> Self {
        TensorIndex::Slice(SliceSpec::full())
    }
}

impl From<Range<isize>> for TensorIndex {
    fn from(r: Range<isize>) -> Self {
        TensorIndex::slice(Some(r.start), Some(r.end), None)
    }
}

impl From<RangeFrom<isize>> for TensorIndex {
    fn from(r: RangeFrom<isize>) -> Self {
        TensorIndex::slice(Some(r.start), None, None)
    }
}

impl From<RangeTo<isize>> for TensorIndex {
    fn from(r: RangeTo<isize>) -> Self {
        TensorIndex::slice(None, Some(r.end), None)
    }
}

// An inclusive end of -1 means "through the last element", which has no
// exclusive negative spelling. `isize::MAX` has no successor and also runs
// to the end.
fn inclusive_stop(end: isize) -> Option<isize> {
    if end == -1 {
        None
    } else {
        end.checked_add(1)
    }
}

impl From<RangeInclusive<isize>> for TensorIndex {
    fn from(r: RangeInclusive<isize>) -> Self {
        let (start, end) = r.into_inner();
        TensorIndex::slice(Some(start), inclusive_stop(end), None)
    }
}

impl From<RangeToInclusive<isize>> for TensorIndex {
    fn from(r: RangeToInclusive<isize>) -> Self {
        TensorIndex::slice(None, inclusive_stop(r.end), None)
    }
}

/// Builds an array of [`TensorIndex`] terms.
///
/// ```
/// use tor_tensor::{s, tensor, NestedData};
///
/// let x = tensor(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
/// let col = x.get(&s![.., 1]).unwrap();
/// assert_eq!(col.to_list(), NestedData::from(vec![2, 5]));
/// ```
#[macro_export]
macro_rules! s {
    ($($term:expr),* $(,)?) => {
        [$($crate::TensorIndex::from($term)),*]
    };
}
