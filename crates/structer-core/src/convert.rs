//! Scalar conversion: CSV cell text → typed field value.

use crate::error::ConversionError;
use crate::reflect::{ScalarKind, ScalarMut};

/// Parse a boolean cell.
///
/// Accepts `1`, `t`, `true`, `0`, `f` and `false`, ignoring ASCII case
/// (mixed-case spellings such as `tRuE` included).
pub fn parse_bool(value: &str) -> Result<bool, ConversionError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        _ => Err(ConversionError::new(
            value,
            ScalarKind::Boolean,
            "invalid boolean value",
        )),
    }
}

pub fn parse_integer(value: &str) -> Result<i64, ConversionError> {
    value
        .parse::<i64>()
        .map_err(|e| ConversionError::new(value, ScalarKind::Integer, e.to_string()))
}

pub fn parse_float32(value: &str) -> Result<f32, ConversionError> {
    let parsed = value
        .parse::<f32>()
        .map_err(|e| ConversionError::new(value, ScalarKind::Float32, e.to_string()))?;
    check_range(value, parsed.is_infinite(), ScalarKind::Float32)?;
    Ok(parsed)
}

pub fn parse_float64(value: &str) -> Result<f64, ConversionError> {
    let parsed = value
        .parse::<f64>()
        .map_err(|e| ConversionError::new(value, ScalarKind::Float64, e.to_string()))?;
    check_range(value, parsed.is_infinite(), ScalarKind::Float64)?;
    Ok(parsed)
}

/// Overflowing literals parse to infinity; only an explicit `inf` or
/// `infinity` token may produce one.
fn check_range(value: &str, infinite: bool, kind: ScalarKind) -> Result<(), ConversionError> {
    if !infinite {
        return Ok(());
    }
    let unsigned = value.trim().trim_start_matches(['+', '-']);
    if unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity") {
        Ok(())
    } else {
        Err(ConversionError::new(value, kind, "value out of range"))
    }
}

/// Convert `value` to the slot's scalar kind and write it.
///
/// The slot is left untouched when conversion fails.
pub fn assign(slot: ScalarMut<'_>, value: &str) -> Result<(), ConversionError> {
    match slot {
        ScalarMut::String(s) => {
            s.clear();
            s.push_str(value);
        }
        ScalarMut::Integer(i) => *i = parse_integer(value)?,
        ScalarMut::Boolean(b) => *b = parse_bool(value)?,
        ScalarMut::Float32(f) => *f = parse_float32(value)?,
        ScalarMut::Float64(f) => *f = parse_float64(value)?,
    }
    Ok(())
}
