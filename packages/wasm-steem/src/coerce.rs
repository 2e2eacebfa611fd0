//! Value coercion
//!
//! Turns one raw field value into its typed, unit-normalized form according
//! to the field's schema entry. Coercion never fails: malformed numbers
//! surface as `NaN` rather than as errors, mirroring the numeric semantics
//! JavaScript hosts expect.

use crate::registry::{FieldSchema, FieldSpec, FieldType};
use crate::types::{ConversionContext, FieldValue};
use serde_json::{Number, Value};

/// Amount units, in the order they are looked for
const AMOUNT_UNITS: [&str; 4] = ["VESTS", "SP", "STEEM", "SBD"];

/// Coerce `raw` for field `key` of `schema`
///
/// A field missing from the schema is treated as opaque.
pub fn coerce(
    schema: &FieldSchema,
    key: &str,
    raw: Option<&Value>,
    ctx: &ConversionContext,
) -> FieldValue {
    match schema.get(key) {
        Some(spec) => coerce_field(spec, raw, ctx),
        None => FieldValue::from_raw(raw),
    }
}

/// Coerce `raw` against a single field spec
pub fn coerce_field(spec: &FieldSpec, raw: Option<&Value>, ctx: &ConversionContext) -> FieldValue {
    let effective = effective_value(spec, raw);

    match &spec.field_type {
        FieldType::Amount => match effective {
            Some(Value::String(amount)) => FieldValue::Value(Value::String(normalize_amount(amount, ctx))),
            other => FieldValue::from_raw(other),
        },
        FieldType::Int => match effective {
            Some(v) => parse_int(&js_string(v)),
            None => FieldValue::NotANumber,
        },
        FieldType::Bool => match raw {
            Some(Value::Bool(false)) => FieldValue::Value(Value::Bool(false)),
            Some(Value::String(s)) if s == "false" => FieldValue::Value(Value::Bool(false)),
            _ => FieldValue::from_raw(effective),
        },
        FieldType::Array | FieldType::Object | FieldType::Opaque(_) => FieldValue::from_raw(effective),
    }
}

/// Raw value if truthy, else the declared default, else the raw value
fn effective_value<'a>(spec: &'a FieldSpec, raw: Option<&'a Value>) -> Option<&'a Value> {
    if is_truthy(raw) {
        return raw;
    }
    spec.default_value.as_ref().or(raw)
}

/// JavaScript truthiness of a JSON value
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn normalize_amount(amount: &str, ctx: &ConversionContext) -> String {
    let unit = AMOUNT_UNITS.iter().find(|unit| amount.contains(*unit));
    match unit {
        Some(&"VESTS") => format!("{} VESTS", to_fixed(parse_float(amount), 6)),
        Some(&"SP") => format!("{} VESTS", to_fixed(parse_float(amount) / ctx.vests_to_sp, 6)),
        Some(unit) => format!("{} {}", to_fixed(parse_float(amount), 3), unit),
        None => amount.to_string(),
    }
}

/// Longest leading decimal literal of `s`, `NaN` if there is none
pub(crate) fn parse_float(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Base-10 integer prefix of `s`
fn parse_int(s: &str) -> FieldValue {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return FieldValue::NotANumber;
    }

    let literal = &s[..sign + digits];
    if let Ok(n) = literal.parse::<i64>() {
        return FieldValue::Value(Value::Number(n.into()));
    }
    // Past i64 range JavaScript keeps going in floating point
    literal
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(|n| FieldValue::Value(Value::Number(n)))
        .unwrap_or(FieldValue::NotANumber)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// `Number.prototype.toFixed`: ties round away from zero
pub(crate) fn to_fixed(x: f64, digits: usize) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // no fixed notation at this size, the number is stringified instead
    if x.abs() >= 1e21 {
        return format!("{:e}", x).replacen('e', "e+", 1);
    }

    let magnitude = x.abs();
    let probe = format!("{:.*}", digits + 25, magnitude);
    let tail = &probe[probe.len() - 25..];
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    let magnitude = if is_tie {
        f64::from_bits(magnitude.to_bits() + 1)
    } else {
        magnitude
    };

    let fixed = format!("{:.*}", digits, magnitude);
    if x < 0.0 {
        format!("-{}", fixed)
    } else {
        fixed
    }
}

/// String conversion the way a JavaScript host would stringify the value
fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
