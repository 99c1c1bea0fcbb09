//! Column types for DDL generation and CSV type autodetection.
//!
//! Detection mirrors what a warehouse does on an `autodetect` load: a
//! column whose values are all integers is `INT64`, all decimals is a
//! `NUMERIC` wide enough for the largest scale seen, anything else is a
//! string. Empty cells carry no type information and are skipped.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Widest precision used for autodetected decimals.
pub const MAX_DECIMAL_PRECISION: u8 = 38;

/// SQL column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// 64-bit signed integer.
    Int64,

    /// Fixed-precision decimal with precision and scale.
    Decimal(u8, u8),

    /// Variable-length text.
    String,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Int64 => write!(f, "int64"),
            ColumnType::Decimal(p, s) => write!(f, "decimal({}, {})", p, s),
            ColumnType::String => write!(f, "string"),
        }
    }
}

/// Infer a column type from its textual values.
///
/// Returns `ColumnType::String` when no non-empty value is present.
pub fn infer_column_type<'a>(values: impl IntoIterator<Item = &'a str>) -> ColumnType {
    let mut seen_any = false;
    let mut all_int = true;
    let mut max_scale: u32 = 0;

    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        seen_any = true;

        if all_int && value.parse::<i64>().is_ok() {
            continue;
        }
        all_int = false;

        match Decimal::from_str(value) {
            Ok(d) => max_scale = max_scale.max(d.scale()),
            Err(_) => return ColumnType::String,
        }
    }

    if !seen_any {
        ColumnType::String
    } else if all_int {
        ColumnType::Int64
    } else {
        let scale = max_scale.min(u32::from(MAX_DECIMAL_PRECISION)) as u8;
        ColumnType::Decimal(MAX_DECIMAL_PRECISION, scale)
    }
}
