//! Numeric scalar helpers.
//!
//! EEPROM templates are written by hand, so numeric entries show up either as
//! YAML integers (`80`, `0x50`) or as quoted strings (`"0x50"`, `"80"`). The
//! helpers here accept both forms.

use serde_yaml::Value;

/// Parse an unsigned integer from decimal or `0x`/`0o`/`0b` prefixed text
///
/// # Examples
/// ```
/// use eeprom_batchgen::utils::numeric::parse_unsigned;
///
/// assert_eq!(parse_unsigned("0x50"), Ok(80));
/// assert_eq!(parse_unsigned("80"), Ok(80));
/// assert_eq!(parse_unsigned("0b101"), Ok(5));
/// assert!(parse_unsigned("fifty").is_err());
/// ```
pub fn parse_unsigned(text: &str) -> Result<u64, String> {
    let text = text.trim().replace('_', "");

    let (digits, radix) = match text.get(..2) {
        Some("0x") | Some("0X") => (&text[2..], 16),
        Some("0o") | Some("0O") => (&text[2..], 8),
        Some("0b") | Some("0B") => (&text[2..], 2),
        _ => (text.as_str(), 10),
    };

    if digits.is_empty() {
        return Err(format!("'{}' has no digits", text));
    }

    u64::from_str_radix(digits, radix).map_err(|e| format!("'{}' is not an unsigned integer: {}", text, e))
}

/// Read an unsigned integer out of a YAML scalar
pub fn scalar_to_u64(value: &Value) -> Result<u64, String> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| format!("{} is not an unsigned integer", n)),
        Value::String(s) => parse_unsigned(s),
        Value::Null => Err("value is empty".to_string()),
        other => Err(format!("expected an integer, found {:?}", other)),
    }
}

/// Render a value as lowercase `0x` hexadecimal
pub fn to_hex_string(value: u64) -> String {
    format!("{:#x}", value)
}
