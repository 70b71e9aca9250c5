//! Element kinds and the dtype abbreviation table
//!
//! [`Dtype`] names every element kind the host runtime can produce.
//! [`DtypeAbbrevs`] maps each kind to the short code used in summarized
//! tensor tokens such as `f32[2, 3]`. The default table covers every
//! kind; a custom table that misses one makes summarization fail with
//! [`crate::RastroError::UnsupportedDtype`] rather than guess a code.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Element kind of an array-like value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dtype {
    /// 64-bit float
    F64,
    /// 32-bit float
    F32,
    /// 16-bit float
    F16,
    /// Brain float 16
    BF16,
    /// 64-bit complex (two f32)
    C64,
    /// 128-bit complex (two f64)
    C128,
    /// 64-bit signed integer
    I64,
    /// 32-bit signed integer
    I32,
    /// 16-bit signed integer
    I16,
    /// 8-bit signed integer
    I8,
    /// 8-bit unsigned integer
    U8,
    /// Boolean
    Bool,
}

impl std::fmt::Display for Dtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::F64 => write!(f, "float64"),
            Self::F32 => write!(f, "float32"),
            Self::F16 => write!(f, "float16"),
            Self::BF16 => write!(f, "bfloat16"),
            Self::C64 => write!(f, "complex64"),
            Self::C128 => write!(f, "complex128"),
            Self::I64 => write!(f, "int64"),
            Self::I32 => write!(f, "int32"),
            Self::I16 => write!(f, "int16"),
            Self::I8 => write!(f, "int8"),
            Self::U8 => write!(f, "uint8"),
            Self::Bool => write!(f, "bool"),
        }
    }
}

/// Lookup table from element kind to short display code
///
/// Supplied by the host runtime and consumed by the value summarizer. The
/// default table covers every [`Dtype`] variant; hosts with extra kinds
/// register their own codes via [`DtypeAbbrevs::insert`].
///
/// # Examples
///
/// ```
/// use rastro::{Dtype, DtypeAbbrevs};
///
/// let abbrevs = DtypeAbbrevs::default();
/// assert_eq!(abbrevs.abbrev(Dtype::F32), Some("f32"));
/// assert_eq!(abbrevs.abbrev(Dtype::Bool), Some("b8"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtypeAbbrevs {
    codes: HashMap<Dtype, String>,
}

impl Default for DtypeAbbrevs {
    fn default() -> Self {
        let mut table = Self::empty();
        for (dtype, code) in [
            (Dtype::F64, "f64"),
            (Dtype::F32, "f32"),
            (Dtype::F16, "f16"),
            (Dtype::BF16, "bf16"),
            (Dtype::C64, "c64"),
            (Dtype::C128, "c128"),
            (Dtype::I64, "i64"),
            (Dtype::I32, "i32"),
            (Dtype::I16, "i16"),
            (Dtype::I8, "i8"),
            (Dtype::U8, "u8"),
            (Dtype::Bool, "b8"),
        ] {
            table.insert(dtype, code);
        }
        table
    }
}

impl DtypeAbbrevs {
    /// Table with no entries; every lookup fails until codes are inserted
    #[must_use]
    pub fn empty() -> Self {
        Self {
            codes: HashMap::new(),
        }
    }

    /// Display code for an element kind, if the table covers it
    #[must_use]
    pub fn abbrev(&self, dtype: Dtype) -> Option<&str> {
        self.codes.get(&dtype).map(String::as_str)
    }

    /// Register or replace the code for an element kind
    pub fn insert(&mut self, dtype: Dtype, code: impl Into<String>) {
        self.codes.insert(dtype, code.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Dtype; 12] = [
        Dtype::F64,
        Dtype::F32,
        Dtype::F16,
        Dtype::BF16,
        Dtype::C64,
        Dtype::C128,
        Dtype::I64,
        Dtype::I32,
        Dtype::I16,
        Dtype::I8,
        Dtype::U8,
        Dtype::Bool,
    ];

    #[test]
    fn test_default_table_covers_every_kind() {
        let abbrevs = DtypeAbbrevs::default();
        for dtype in ALL {
            assert!(abbrevs.abbrev(dtype).is_some(), "missing code for {dtype}");
        }
    }

    #[test]
    fn test_empty_table_misses_everything() {
        let abbrevs = DtypeAbbrevs::empty();
        for dtype in ALL {
            assert_eq!(abbrevs.abbrev(dtype), None);
        }
    }

    #[test]
    fn test_insert_overrides_code() {
        let mut abbrevs = DtypeAbbrevs::default();
        abbrevs.insert(Dtype::F32, "fp32");
        assert_eq!(abbrevs.abbrev(Dtype::F32), Some("fp32"));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Dtype::F32.to_string(), "float32");
        assert_eq!(Dtype::BF16.to_string(), "bfloat16");
        assert_eq!(Dtype::C128.to_string(), "complex128");
        assert_eq!(Dtype::Bool.to_string(), "bool");
    }
}
