//! Per-type conversion rules.
//!
//! Every function here is total: any JSON value converts to something, and a
//! null input always yields null. Structured values never collapse into text;
//! the string cast returns null for them instead.

use serde_json::{Number, Value};

use super::types::CastType;

/// Coerce a value according to `ty`.
#[must_use]
pub fn cast_value(ty: CastType, value: Value) -> Value {
    match ty {
        CastType::Array => cast_to_array(value),
        CastType::Boolean => cast_to_bool(value),
        CastType::Int => cast_to_int(value),
        CastType::String => cast_to_string(value),
    }
}

/// Wrap a value into a sequence.
///
/// Sequences pass through, records contribute their values in record order,
/// scalars become a one-element sequence.
#[must_use]
pub fn cast_to_array(value: Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Array(items) => Value::Array(items),
        Value::Object(map) => Value::Array(map.into_iter().map(|(_, v)| v).collect()),
        scalar => Value::Array(vec![scalar]),
    }
}

#[must_use]
pub fn cast_to_int(value: Value) -> Value {
    match value {
        Value::Null => Value::Null,
        other => Value::from(to_int(&other)),
    }
}

#[must_use]
pub fn cast_to_bool(value: Value) -> Value {
    match value {
        Value::Null => Value::Null,
        other => Value::Bool(is_truthy(&other)),
    }
}

#[must_use]
pub fn cast_to_string(value: Value) -> Value {
    match value {
        // prevent array to string conversion
        Value::Array(_) | Value::Object(_) => Value::Null,
        Value::Null => Value::Null,
        Value::String(s) => Value::String(s),
        other => Value::String(scalar_to_string(&other)),
    }
}

/// Loose integer conversion.
///
/// Booleans map to 0/1, floats truncate toward zero (non-finite → 0, out of
/// range saturates), strings parse their leading numeric prefix, and
/// sequences/records map to 0 when empty and 1 otherwise.
#[must_use]
pub fn to_int(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => number_to_int(n),
        Value::String(s) => parse_int_prefix(s),
        Value::Array(items) => i64::from(!items.is_empty()),
        Value::Object(map) => i64::from(!map.is_empty()),
    }
}

/// Truthiness: `""`, `"0"`, `0`, `0.0`, empty sequence/record and null are false.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => match n.as_i64() {
            Some(i) => i != 0,
            None => n.as_f64().map_or(true, |f| f != 0.0),
        },
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn number_to_int(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        i
    } else if n.is_u64() {
        i64::MAX
    } else {
        n.as_f64().map_or(0, float_to_int)
    }
}

fn float_to_int(f: f64) -> i64 {
    if f.is_finite() {
        // `as` truncates toward zero and saturates at the i64 bounds
        f as i64
    } else {
        0
    }
}

fn parse_int_prefix(s: &str) -> i64 {
    let s = s.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    end = digits_from(end);
    let has_int_digits = end > int_start;
    let mut is_float = false;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if has_int_digits || frac_end > end + 1 {
            end = frac_end;
            is_float = true;
        }
    }
    if !has_int_digits && !is_float {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
            is_float = true;
        }
    }

    let numeric = &s[..end];
    if is_float {
        numeric.parse::<f64>().map_or(0, float_to_int)
    } else {
        // only overflow can fail here: the prefix is an optional sign plus digits
        numeric.parse::<i64>().unwrap_or(if numeric.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        })
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                n.to_string()
            } else {
                n.as_f64().map(float_to_string).unwrap_or_else(|| n.to_string())
            }
        }
        Value::String(s) => s.clone(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Significant digits kept when a float is rendered as text
const FLOAT_PRECISION: usize = 14;

/// Canonical float text.
///
/// Rounded to 14 significant digits with trailing zeros dropped; decimal
/// exponents >= 14 or < -4 switch to `M.ME±X` form.
#[must_use]
pub fn float_to_string(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // rounding happens here, so the exponent already reflects any carry
    let sci = format!("{:.*e}", FLOAT_PRECISION - 1, f.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    let sign = if f < 0.0 { "-" } else { "" };

    if !(-4..FLOAT_PRECISION as i32).contains(&exp) {
        let (lead, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        let exp_sign = if exp < 0 { "-" } else { "+" };
        return format!("{}{}.{}E{}{}", sign, lead, rest, exp_sign, exp.abs());
    }

    if exp < 0 {
        let zeros = "0".repeat((-exp - 1) as usize);
        return format!("{}0.{}{}", sign, zeros, digits);
    }
    let int_len = exp as usize + 1;
    if digits.len() <= int_len {
        format!("{}{}{}", sign, digits, "0".repeat(int_len - digits.len()))
    } else {
        let (int_part, frac) = digits.split_at(int_len);
        format!("{}{}.{}", sign, int_part, frac)
    }
}
