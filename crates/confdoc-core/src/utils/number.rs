//! Number recognition and rendering shared by the line-oriented formats.
//!
//! Scalar coercion reads the longest leading decimal literal of a token, so
//! `1.20.1` is `1.2` and `8080abc` is `8080`. The YAML serializer decides
//! whether a string needs quoting with the same predicate, so the two stay in
//! lockstep.

/// Largest magnitude at which every integer is exactly representable in f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

const INFINITY: &str = "Infinity";

/// Longest leading decimal literal of `token` after leading whitespace, with
/// the number of bytes it spans.
///
/// Accepts `[+-]?(Infinity|digits[.digits?]|.digits)([eE][+-]?digits)?`; an
/// exponent without digits is not part of the literal.
pub fn leading_number(token: &str) -> Option<(f64, usize)> {
    let start = token.len() - token.trim_start().len();
    let bytes = token.as_bytes();
    let mut pos = start;

    let negative = bytes.get(pos) == Some(&b'-');
    if matches!(bytes.get(pos), Some(b'+') | Some(b'-')) {
        pos += 1;
    }

    if token[pos..].starts_with(INFINITY) {
        let end = pos + INFINITY.len();
        let value = if negative { f64::NEG_INFINITY } else { f64::INFINITY };
        return Some((value, end));
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut frac_digits = 0;
    if pos < bytes.len() && bytes[pos] == b'.' {
        let dot = pos;
        pos += 1;
        let frac_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        frac_digits = pos - frac_start;
        if int_digits == 0 && frac_digits == 0 {
            pos = dot;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_start {
            pos = exp;
        }
    }

    token[start..pos].parse::<f64>().ok().map(|value| (value, pos))
}

/// Numeric value of the leading decimal literal, infinities included
pub fn parse_number(token: &str) -> Option<f64> {
    leading_number(token).map(|(value, _)| value)
}

/// [`parse_number`] restricted to finite values
pub fn parse_finite_number(token: &str) -> Option<f64> {
    parse_number(token).filter(|n| n.is_finite())
}

/// A finite number spanning the whole token, for validating typed input
pub fn parse_decimal(token: &str) -> Option<f64> {
    if token.starts_with(char::is_whitespace) {
        return None;
    }
    leading_number(token)
        .filter(|&(value, end)| end == token.len() && value.is_finite())
        .map(|(value, _)| value)
}

/// The value as an integer when it is integral and exactly representable
pub fn integral_value(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Some(n as i64)
    } else {
        None
    }
}

/// Render a number so that [`parse_number`] reads back the same value
pub fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n < 0.0 { format!("-{INFINITY}") } else { INFINITY.to_string() };
    }
    match integral_value(n) {
        Some(i) => i.to_string(),
        None => n.to_string(),
    }
}
