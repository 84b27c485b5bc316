//! Validation primitives shared by every component schema.
//!
//! Each primitive takes a raw YAML value and either returns a typed value or
//! a [`ValidationError`] with a user-facing message. Primitives never know
//! which option they are validating; [`crate::ConfigMap`] adds the path.

use serde_yaml::Value;

use crate::error::{Result, ValidationError};
use crate::types::{Dimensions, I2cAddress, Id, Lambda, UpdateInterval};

/// Identifiers that would clash with generated C++ or the runtime.
const RESERVED_IDS: &[&str] = &[
    // C++ keywords
    "alignas", "alignof", "and", "asm", "auto", "bool", "break", "case", "catch", "char",
    "class", "const", "constexpr", "continue", "default", "delete", "do", "double", "else",
    "enum", "explicit", "extern", "false", "float", "for", "friend", "goto", "if", "inline",
    "int", "long", "mutable", "namespace", "new", "noexcept", "not", "nullptr", "operator",
    "or", "private", "protected", "public", "register", "return", "short", "signed",
    "sizeof", "static", "struct", "switch", "template", "this", "throw", "true", "try",
    "typedef", "typename", "union", "unsigned", "using", "virtual", "void", "volatile",
    "while", "xor",
    // runtime globals
    "App", "it", "delay", "millis", "setup", "loop",
];

/// Short rendering of a value for error messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(_) => "a list".to_string(),
        Value::Mapping(_) => "a dictionary".to_string(),
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, describe(&tagged.value)),
    }
}

// ============================================================================
// SCALARS
// ============================================================================

/// Any scalar as a string. Lists and dictionaries are rejected.
///
/// # Errors
///
/// The value is not a scalar.
pub fn string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(ValidationError::new("string value is None")),
        Value::Sequence(_) | Value::Mapping(_) => Err(ValidationError::new(
            "string value cannot be dictionary or list.",
        )),
        Value::Tagged(tagged) => string(&tagged.value),
    }
}

/// Integer from a YAML number, an integral float, or a decimal/`0x` string.
///
/// # Errors
///
/// The value is not integral or does not fit an `i64`.
pub fn integer(value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if n.is_u64() {
                return Err(ValidationError::new(format!("Integer {n} is too large")));
            }
            let f = n.as_f64().unwrap_or(f64::NAN);
            integral_float(f).ok_or_else(|| {
                ValidationError::new(format!(
                    "This option only accepts integers with no fractional part. Please remove the fractional part from {n}"
                ))
            })
        }
        Value::String(s) => parse_integer_str(s),
        other => Err(ValidationError::new(format!(
            "Expected integer, but got {}",
            describe(other)
        ))),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integral_float(f: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; stay strictly inside the range
    const LIMIT: f64 = 9_007_199_254_740_992.0;
    (f.is_finite() && f.fract() == 0.0 && f.abs() <= LIMIT).then(|| f as i64)
}

fn parse_integer_str(raw: &str) -> Result<i64> {
    let s = raw.trim().to_ascii_lowercase();
    let parsed = match s.strip_prefix("0x") {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => s.parse::<i64>(),
    };
    parsed.map_err(|_| {
        ValidationError::new(format!(
            "Expected integer, but cannot parse {raw} as an integer"
        ))
    })
}

/// Integer within `min..=max`.
///
/// # Errors
///
/// The value is not an integer or lies outside the range.
pub fn int_range(value: &Value, min: i64, max: i64) -> Result<i64> {
    let v = integer(value)?;
    if v < min {
        return Err(ValidationError::new(format!(
            "value must be at least {min}"
        )));
    }
    if v > max {
        return Err(ValidationError::new(format!("value must be at most {max}")));
    }
    Ok(v)
}

/// Integer within `min..=max`, narrowed to `u8`.
///
/// # Errors
///
/// The value is not an integer or lies outside the range.
pub fn u8_range(value: &Value, min: u8, max: u8) -> Result<u8> {
    let v = int_range(value, i64::from(min), i64::from(max))?;
    u8::try_from(v).map_err(|_| ValidationError::new(format!("value must be at most {max}")))
}

/// # Errors
///
/// The value is not one of the accepted boolean spellings.
pub fn boolean(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "enable" => Ok(true),
            "false" | "no" | "off" | "disable" => Ok(false),
            _ => Err(not_a_boolean(value)),
        },
        _ => Err(not_a_boolean(value)),
    }
}

fn not_a_boolean(value: &Value) -> ValidationError {
    ValidationError::new(format!(
        "Expected boolean value, but cannot convert {} to a boolean. Please use 'true' or 'false'",
        describe(value)
    ))
}

/// 7-bit I2C address.
///
/// # Errors
///
/// The value is not an integer in `0..=0x7F`.
pub fn i2c_address(value: &Value) -> Result<I2cAddress> {
    let v = u8_range(value, 0, I2cAddress::MAX)?;
    I2cAddress::new(v).ok_or_else(|| ValidationError::new("value must be at most 127"))
}

// ============================================================================
// DIMENSIONS
// ============================================================================

/// `WIDTHxHEIGHT` string or a two-item list, both sides at least 1.
///
/// # Errors
///
/// Malformed input, a non-integer side, or a side below 1.
pub fn dimensions(value: &Value) -> Result<Dimensions> {
    if let Value::Sequence(items) = value {
        let [w, h] = items.as_slice() else {
            return Err(ValidationError::new(format!(
                "Dimensions must have a length of two, not {}",
                items.len()
            )));
        };
        let (Ok(width), Ok(height)) = (integer(w), integer(h)) else {
            return Err(ValidationError::new(
                "Width and height dimensions must be integers",
            ));
        };
        return checked_dimensions(width, height);
    }

    let text = string(value)?;
    let Some((w, h)) = split_dimensions(&text) else {
        return Err(ValidationError::new(format!(
            "Invalid value '{text}' for dimensions. Only WIDTHxHEIGHT is allowed."
        )));
    };
    let (Ok(width), Ok(height)) = (w.parse::<i64>(), h.parse::<i64>()) else {
        return Err(ValidationError::new(
            "Width and height dimensions must be integers",
        ));
    };
    checked_dimensions(width, height)
}

/// `WIDTHxHEIGHT` at the start of the text; anything after the height is
/// ignored.
fn split_dimensions(text: &str) -> Option<(&str, &str)> {
    let (width, rest) = leading_digits(text.trim_start())?;
    let rest = rest.trim_start().strip_prefix(['x', 'X'])?;
    let (height, _) = leading_digits(rest.trim_start())?;
    Some((width, height))
}

fn leading_digits(text: &str) -> Option<(&str, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    (end > 0).then(|| text.split_at(end))
}

fn checked_dimensions(width: i64, height: i64) -> Result<Dimensions> {
    if width <= 0 || height <= 0 {
        return Err(ValidationError::new("Width and height must at least be 1"));
    }
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(width), Ok(height)) => Ok(Dimensions::new(width, height)),
        _ => Err(ValidationError::new("Width and height dimensions are too large")),
    }
}

// ============================================================================
// TIME PERIODS
// ============================================================================

const MICROS_PER_UNIT: &[(&[&str], u128)] = &[
    (&["us", "microseconds"], 1),
    (&["ms", "milliseconds"], 1_000),
    (&["s", "sec", "seconds"], 1_000_000),
    (&["min", "minutes"], 60_000_000),
    (&["h", "hours"], 3_600_000_000),
    (&["d", "days"], 86_400_000_000),
];

/// Time period such as `500ms`, `1.5s` or `2min`, in milliseconds.
///
/// A unit is mandatory and the value must resolve to whole milliseconds.
///
/// # Errors
///
/// A missing or unknown unit, or a value finer than a millisecond.
pub fn time_period_ms(value: &Value) -> Result<u64> {
    let text = match value {
        Value::Number(n) => return Err(missing_unit(&n.to_string())),
        other => string(other)?,
    };
    let text = text.trim();
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    let unit = unit.trim();
    if unit.is_empty() {
        return Err(missing_unit(number));
    }

    let scale = MICROS_PER_UNIT
        .iter()
        .find(|(names, _)| names.contains(&unit))
        .map(|(_, scale)| *scale)
        .ok_or_else(|| ValidationError::new(format!("Invalid time period unit '{unit}'")))?;

    let micros = scaled_decimal(number, scale).ok_or_else(|| {
        ValidationError::new(format!("Invalid time period '{text}'"))
    })?;
    if micros % 1_000 != 0 {
        return Err(ValidationError::new("Maximum precision is milliseconds"));
    }
    u64::try_from(micros / 1_000)
        .map_err(|_| ValidationError::new(format!("Time period '{text}' is too long")))
}

fn missing_unit(number: &str) -> ValidationError {
    ValidationError::new(format!(
        "Don't know what '{number}' means as it has no time *unit*! Did you mean '{number}s'?"
    ))
}

/// `number * scale` computed exactly; `None` unless the result is whole.
fn scaled_decimal(number: &str, scale: u128) -> Option<u128> {
    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let parse = |s: &str| -> Option<u128> {
        if s.is_empty() {
            Some(0)
        } else if s.bytes().all(|b| b.is_ascii_digit()) {
            s.parse().ok()
        } else {
            None
        }
    };
    let whole = parse(int_part)?.checked_mul(scale)?;
    let denominator = 10u128.checked_pow(u32::try_from(frac_part.len()).ok()?)?;
    let fraction = parse(frac_part)?.checked_mul(scale)?;
    if fraction % denominator != 0 {
        return None;
    }
    whole.checked_add(fraction / denominator)
}

/// `never` or a time period that fits the 32-bit scheduler.
///
/// # Errors
///
/// An invalid time period, or one too long for the scheduler.
pub fn update_interval(value: &Value) -> Result<UpdateInterval> {
    if let Value::String(s) = value {
        if s.trim().eq_ignore_ascii_case("never") {
            return Ok(UpdateInterval::Never);
        }
    }
    let ms = time_period_ms(value)?;
    match u32::try_from(ms) {
        Ok(ms) if ms < UpdateInterval::NEVER_MILLIS => Ok(UpdateInterval::Milliseconds(ms)),
        _ => Err(ValidationError::new(format!(
            "Update interval must be less than {}ms, use 'never' to disable updates",
            UpdateInterval::NEVER_MILLIS
        ))),
    }
}

// ============================================================================
// COLLECTIONS
// ============================================================================

/// Wrap a single value in a list; `null` becomes an empty list.
pub fn ensure_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Sequence(items) => items.clone(),
        other => vec![other.clone()],
    }
}

/// Length bounds for a list option.
///
/// # Errors
///
/// `len` is below `min` or above `max`.
pub fn length(len: usize, min: Option<usize>, max: Option<usize>) -> Result<()> {
    if let Some(min) = min {
        if len < min {
            return Err(ValidationError::new(format!(
                "length of value must be at least {min}"
            )));
        }
    }
    if let Some(max) = max {
        if len > max {
            return Err(ValidationError::new(format!(
                "length of value must be at most {max}"
            )));
        }
    }
    Ok(())
}

/// Validate each item of a list, tagging errors with the item index.
///
/// # Errors
///
/// The first item `validate` rejects.
pub fn each<T>(items: &[Value], validate: impl Fn(&Value) -> Result<T>) -> Result<Vec<T>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate(item).map_err(|e| e.at(index.to_string())))
        .collect()
}

// ============================================================================
// IDS AND LAMBDAS
// ============================================================================

/// A user-declared C++ identifier.
///
/// # Errors
///
/// Empty, starts with a digit, has other characters than `[A-Za-z0-9_]`, or is
/// reserved.
pub fn id(value: &Value) -> Result<Id> {
    let name = string(value)?;
    let Some(first) = name.chars().next() else {
        return Err(ValidationError::new("ID must not be empty"));
    };
    if first.is_ascii_digit() {
        return Err(ValidationError::new(
            "First character in ID cannot be a digit.",
        ));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(ValidationError::new(format!(
            "IDs must only consist of upper/lowercase characters, the underscore character and numbers. The character '{bad}' cannot be used"
        )));
    }
    if RESERVED_IDS.contains(&name.as_str()) {
        return Err(ValidationError::new(format!(
            "ID '{name}' is reserved internally and cannot be used"
        )));
    }
    Ok(Id::Declared(name))
}

/// Lambda source, written as a plain or `!lambda`-tagged string.
///
/// # Errors
///
/// The value is not a string.
pub fn lambda(value: &Value) -> Result<Lambda> {
    match value {
        Value::String(source) => Ok(Lambda::new(source.clone())),
        Value::Tagged(tagged) if tagged.tag == "lambda" => match &tagged.value {
            Value::String(source) => Ok(Lambda::new(source.clone())),
            other => Err(ValidationError::new(format!(
                "Lambda must be a string, got {}",
                describe(other)
            ))),
        },
        other => Err(ValidationError::new(format!(
            "Lambda must be a string, got {}",
            describe(other)
        ))),
    }
}
