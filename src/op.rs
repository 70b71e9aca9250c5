//! Operation call formatting
//!
//! Resolves an operation identifier to a display name and renders the
//! full invocation as a single-line call expression. Resolution tries the
//! richest form first: a qualified overload name, then a defining module
//! joined to a short name, then the raw string form. The host's native
//! operator namespace prefix is stripped for brevity.

use serde::{Deserialize, Serialize};

use crate::dtype::DtypeAbbrevs;
use crate::error::Result;
use crate::value::ArgValue;

/// Namespace prefix of the host runtime's native operators
///
/// Stripped once from the front of a resolved name when present, so
/// `ops::add` traces as `add`. Names without the prefix are untouched.
pub const NATIVE_OP_PREFIX: &str = "ops::";

/// Identifier of a primitive operation
///
/// # Examples
///
/// ```
/// use rastro::OpIdent;
///
/// assert_eq!(OpIdent::Qualified("ops::add.Tensor".to_string()).resolve(), "add.Tensor");
/// assert_eq!(
///     OpIdent::Scoped { module: "nn.functional".to_string(), name: "relu".to_string() }.resolve(),
///     "nn.functional.relu",
/// );
/// assert_eq!(OpIdent::Raw("custom_op".to_string()).resolve(), "custom_op");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpIdent {
    /// Qualified overload name, e.g. `ops::add.Tensor`
    Qualified(String),
    /// Defining module plus short name, joined with `.`
    Scoped {
        /// Module that defines the operation
        module: String,
        /// Short operation name
        name: String,
    },
    /// Plain display form with no richer structure
    Raw(String),
}

impl OpIdent {
    /// Resolve the display name, stripping the native operator prefix
    #[must_use]
    pub fn resolve(&self) -> String {
        let name = match self {
            Self::Qualified(qualified) => qualified.clone(),
            Self::Scoped { module, name } => format!("{module}.{name}"),
            Self::Raw(raw) => raw.clone(),
        };
        match name.strip_prefix(NATIVE_OP_PREFIX) {
            Some(stripped) => stripped.to_string(),
            None => name,
        }
    }
}

/// Format one operation invocation as a single-line call expression
///
/// Produces `<name>(<pos1>, <pos2>, ..., <k1>=<v1>, ...)`. Every argument
/// is summarized first; keyword arguments are appended only when present.
/// No side effects.
///
/// # Errors
///
/// Returns [`crate::RastroError::UnsupportedDtype`] if any argument
/// carries an element kind absent from `abbrevs`.
///
/// # Examples
///
/// ```
/// use rastro::{format_call, ArgValue, Dtype, DtypeAbbrevs, OpIdent, TensorMeta};
///
/// let op = OpIdent::Qualified("ops::matmul".to_string());
/// let a = ArgValue::Tensor(TensorMeta::new(Dtype::F32, vec![2, 8]));
/// let b = ArgValue::Tensor(TensorMeta::new(Dtype::F32, vec![8, 4]));
/// let call = format_call(
///     &op,
///     &[a, b],
///     &[("transpose".to_string(), ArgValue::from(true))],
///     &DtypeAbbrevs::default(),
/// )
/// .unwrap();
/// assert_eq!(call, "matmul(f32[2, 8], f32[8, 4], transpose=true)");
/// ```
pub fn format_call(
    op: &OpIdent,
    args: &[ArgValue],
    kwargs: &[(String, ArgValue)],
    abbrevs: &DtypeAbbrevs,
) -> Result<String> {
    let mut parts = Vec::with_capacity(args.len() + kwargs.len());
    for arg in args {
        parts.push(arg.summarize(abbrevs)?);
    }
    for (key, value) in kwargs {
        parts.push(format!("{}={}", key, value.summarize(abbrevs)?));
    }
    Ok(format!("{}({})", op.resolve(), parts.join(", ")))
}
