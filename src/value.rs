//! Argument value summarization
//!
//! Converts operation arguments into short display tokens. An array-like
//! value contributes only its element kind and shape and becomes a token
//! such as `f32[2, 3]`; containers are walked structurally with the same
//! rule applied at every leaf; any other leaf passes through unchanged.

use serde::{Deserialize, Serialize};

use crate::dtype::{Dtype, DtypeAbbrevs};
use crate::error::{RastroError, Result};

/// Element kind and shape of an array-like value
///
/// This is everything the tracer consumes from a tensor. The value data
/// itself never enters a trace.
///
/// # Examples
///
/// ```
/// use rastro::{Dtype, TensorMeta};
///
/// let meta = TensorMeta::new(Dtype::F32, vec![2, 3]);
/// assert_eq!(meta.shape, [2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorMeta {
    /// Element kind
    pub dtype: Dtype,
    /// Dimensions; empty for a scalar
    pub shape: Vec<usize>,
}

impl TensorMeta {
    /// Create tensor metadata from an element kind and shape
    #[must_use]
    pub fn new(dtype: Dtype, shape: Vec<usize>) -> Self {
        Self { dtype, shape }
    }
}

/// One operation argument, reduced to what the tracer can display
///
/// A closed set of shapes: an array-like leaf, an ordered sequence, a
/// mapping with insertion order preserved, and an opaque leaf carrying
/// its own display form. Host values outside this set arrive as
/// [`ArgValue::Opaque`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgValue {
    /// Array-like leaf, displayed as `<abbrev><shape>`
    Tensor(TensorMeta),
    /// Ordered sequence, displayed as `[a, b, c]`
    Seq(Vec<ArgValue>),
    /// Mapping, displayed as `{k: v, ...}` in insertion order
    Map(Vec<(String, ArgValue)>),
    /// Any other leaf, shown exactly as carried
    Opaque(String),
}

impl ArgValue {
    /// Summarize this value into its display token
    ///
    /// Tensors become `<abbrev>[d0, d1, ..., dn]`; sequences and mappings
    /// recurse structurally; opaque leaves pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RastroError::UnsupportedDtype`] if an array-like leaf
    /// has an element kind absent from `abbrevs`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rastro::{ArgValue, Dtype, DtypeAbbrevs, TensorMeta};
    ///
    /// let abbrevs = DtypeAbbrevs::default();
    /// let x = ArgValue::Tensor(TensorMeta::new(Dtype::F32, vec![2, 3]));
    /// assert_eq!(x.summarize(&abbrevs).unwrap(), "f32[2, 3]");
    ///
    /// let scalar = ArgValue::Tensor(TensorMeta::new(Dtype::I64, vec![]));
    /// assert_eq!(scalar.summarize(&abbrevs).unwrap(), "i64[]");
    /// ```
    pub fn summarize(&self, abbrevs: &DtypeAbbrevs) -> Result<String> {
        match self {
            Self::Tensor(meta) => {
                let code = abbrevs
                    .abbrev(meta.dtype)
                    .ok_or(RastroError::UnsupportedDtype { dtype: meta.dtype })?;
                Ok(format!("{}{}", code, stringify_shape(&meta.shape)))
            },
            Self::Seq(items) => {
                let parts: Result<Vec<String>> =
                    items.iter().map(|item| item.summarize(abbrevs)).collect();
                Ok(format!("[{}]", parts?.join(", ")))
            },
            Self::Map(entries) => {
                let parts: Result<Vec<String>> = entries
                    .iter()
                    .map(|(key, value)| Ok(format!("{}: {}", key, value.summarize(abbrevs)?)))
                    .collect();
                Ok(format!("{{{}}}", parts?.join(", ")))
            },
            Self::Opaque(text) => Ok(text.clone()),
        }
    }
}

/// Render a shape as `[d0, d1, ..., dn]`
fn stringify_shape(shape: &[usize]) -> String {
    let dims: Vec<String> = shape.iter().map(ToString::to_string).collect();
    format!("[{}]", dims.join(", "))
}

impl From<TensorMeta> for ArgValue {
    fn from(meta: TensorMeta) -> Self {
        Self::Tensor(meta)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Opaque(value.to_string())
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Opaque(value.to_string())
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Opaque(value.to_string())
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Opaque(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Opaque(value)
    }
}
