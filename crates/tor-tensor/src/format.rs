//! Canonical text representation: `Tensor(<nested data>, dtype=<name>)`.

use std::fmt;

use crate::dtype::DType;
use crate::scalar::Scalar;
use crate::tensor::Tensor;

const PREFIX: &str = "Tensor(";

/// Options controlling how float elements are printed.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintOptions {
    /// Fractional digits in fixed and scientific notation.
    pub precision: usize,
    /// Switch to scientific notation when the largest finite magnitude is at
    /// least this.
    pub sci_upper: f64,
    /// Switch to scientific notation when the smallest nonzero finite
    /// magnitude is below this.
    pub sci_lower: f64,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            precision: 4,
            sci_upper: 1e4,
            sci_lower: 1e-4,
        }
    }
}

impl Tensor {
    /// Renders the tensor with explicit print options.
    pub fn repr_with(&self, opts: &PrintOptions) -> String {
        let body = if self.numel() == 0 {
            "[]".to_string()
        } else {
            let values = self.to_vec();
            let cells = match self.dtype() {
                DType::Int => values.iter().map(|v| v.as_i64().to_string()).collect(),
                DType::Float => format_floats(&values, opts),
            };
            if self.ndim() == 0 {
                cells.into_iter().next().unwrap_or_default()
            } else {
                let mut out = String::new();
                write_nested(&mut out, &cells, self.shape(), PREFIX.len());
                out
            }
        };
        format!("{}{}, dtype={})", PREFIX, body, self.dtype())
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr_with(&PrintOptions::default()))
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Writes one bracketed level. `indent` is the column of this level's `[`.
fn write_nested(out: &mut String, cells: &[String], dims: &[usize], indent: usize) {
    let Some((&len, rest)) = dims.split_first() else {
        return;
    };
    let chunk: usize = rest.iter().product();
    out.push('[');
    for i in 0..len {
        if i > 0 {
            if rest.is_empty() {
                out.push_str(", ");
            } else {
                out.push(',');
                out.extend(std::iter::repeat('\n').take(rest.len()));
                out.extend(std::iter::repeat(' ').take(indent + 1));
            }
        }
        if rest.is_empty() {
            out.push_str(&cells[i]);
        } else {
            write_nested(out, &cells[i * chunk..(i + 1) * chunk], rest, indent + 1);
        }
    }
    out.push(']');
}

#[derive(Clone, Copy)]
enum FloatMode {
    Scientific,
    Integral,
    Fixed,
}

fn format_floats(values: &[Scalar], opts: &PrintOptions) -> Vec<String> {
    let values: Vec<f64> = values.iter().map(Scalar::as_f64).collect();
    let finite = values.iter().copied().filter(|v| v.is_finite());

    let max_abs = finite.clone().fold(0.0f64, |m, v| m.max(v.abs()));
    let min_nonzero = finite
        .clone()
        .map(f64::abs)
        .filter(|&v| v > 0.0)
        .fold(f64::INFINITY, f64::min);

    let mode = if max_abs >= opts.sci_upper || min_nonzero < opts.sci_lower {
        FloatMode::Scientific
    } else if finite.clone().all(|v| v.fract() == 0.0) {
        FloatMode::Integral
    } else {
        FloatMode::Fixed
    };

    let cells: Vec<Option<String>> = values
        .iter()
        .map(|&v| v.is_finite().then(|| format_finite(v, mode, opts.precision)))
        .collect();
    let width = cells.iter().flatten().map(String::len).max().unwrap_or(0);

    values
        .iter()
        .zip(cells)
        .map(|(&v, cell)| match cell {
            Some(s) => s,
            None => format!("{:>width$}", non_finite_name(v), width = width),
        })
        .collect()
}

fn format_finite(v: f64, mode: FloatMode, precision: usize) -> String {
    match mode {
        FloatMode::Scientific => format_scientific(v, precision),
        FloatMode::Integral => format!("{:.0}.", v),
        FloatMode::Fixed => format!("{:.*}", precision, v),
    }
}

/// `1.0000e-10` style: signed exponent of at least two digits.
fn format_scientific(v: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, v);
    if let Some((mantissa, exp)) = raw.split_once('e') {
        if let Ok(e) = exp.parse::<i32>() {
            let sign = if e < 0 { '-' } else { '+' };
            return format!("{}e{}{:02}", mantissa, sign, e.unsigned_abs());
        }
    }
    raw
}

fn non_finite_name(v: f64) -> &'static str {
    if v.is_nan() {
        "nan"
    } else if v > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}
