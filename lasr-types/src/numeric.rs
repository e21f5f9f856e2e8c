//! Amount codec
//!
//! Amounts cross the JSON boundary as decimal verse literals on the way in and
//! as `0x`-prefixed hex integers of the smallest sub-unit on the way out. Every
//! builder that carries an amount goes through this module.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub use alloy_primitives::{I256, U256};

use crate::consts::VERSE_DECIMALS;
use crate::error::{LasrError, Result};

/// Exponents beyond this cannot produce a representable 256-bit amount.
const MAX_EXPONENT: i64 = 96;

/// A decimal literal handed to [`parse_amount_to_big_int`].
#[derive(Debug, Clone)]
pub enum DecimalInput<'a> {
    Text(Cow<'a, str>),
    Invalid(&'static str),
}

impl<'a> From<&'a str> for DecimalInput<'a> {
    fn from(value: &'a str) -> Self {
        DecimalInput::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for DecimalInput<'a> {
    fn from(value: &'a String) -> Self {
        DecimalInput::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<f64> for DecimalInput<'static> {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            // f64 Display never uses exponent notation
            DecimalInput::Text(Cow::Owned(value.to_string()))
        } else {
            DecimalInput::Invalid("amount is not a finite number")
        }
    }
}

impl From<u64> for DecimalInput<'static> {
    fn from(value: u64) -> Self {
        DecimalInput::Text(Cow::Owned(value.to_string()))
    }
}

impl From<i64> for DecimalInput<'static> {
    fn from(value: i64) -> Self {
        DecimalInput::Text(Cow::Owned(value.to_string()))
    }
}

impl From<u32> for DecimalInput<'static> {
    fn from(value: u32) -> Self {
        DecimalInput::Text(Cow::Owned(value.to_string()))
    }
}

impl From<i32> for DecimalInput<'static> {
    fn from(value: i32) -> Self {
        DecimalInput::Text(Cow::Owned(value.to_string()))
    }
}

impl<'a> From<&'a Value> for DecimalInput<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(s) => DecimalInput::Text(Cow::Borrowed(s.as_str())),
            Value::Number(n) => DecimalInput::Text(Cow::Owned(n.to_string())),
            _ => DecimalInput::Invalid("amount must be a decimal string or number"),
        }
    }
}

/// Parse a verse amount into an integer count of the smallest sub-unit.
///
/// Rejects negatives, malformed literals, and literals with non-zero digits
/// beyond [`VERSE_DECIMALS`] places. Nothing is rounded or truncated.
pub fn parse_amount_to_big_int<'a>(input: impl Into<DecimalInput<'a>>) -> Result<U256> {
    match input.into() {
        DecimalInput::Text(text) => parse_decimal(&text, VERSE_DECIMALS),
        DecimalInput::Invalid(reason) => Err(LasrError::InvalidAmount(reason.to_string())),
    }
}

/// Encode as `0x`-prefixed minimal lower-case hex; zero is `0x0`.
pub fn big_int_to_hex_string(value: U256) -> String {
    format!("0x{:x}", value)
}

pub fn signed_big_int_to_hex_string(value: I256) -> Result<String> {
    if value.is_negative() {
        return Err(LasrError::InvalidAmount(format!(
            "cannot encode negative value {}",
            value
        )));
    }
    Ok(big_int_to_hex_string(value.into_raw()))
}

pub fn parse_hex_amount(raw: &str) -> Result<U256> {
    let body = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| LasrError::InvalidAmount(format!("'{}' is not 0x-prefixed hex", raw)))?;
    if body.is_empty() || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LasrError::InvalidAmount(format!("'{}' is not valid hex", raw)));
    }
    U256::from_str_radix(body, 16)
        .map_err(|_| LasrError::InvalidAmount(format!("'{}' overflows 256 bits", raw)))
}

/// Parse a transaction's attached value, which is already denominated in the
/// smallest sub-unit. Absent or null means zero.
pub fn parse_base_units(value: Option<&Value>) -> Result<U256> {
    match value {
        None | Some(Value::Null) => Ok(U256::ZERO),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.starts_with("0x") || s.starts_with("0X") {
                parse_hex_amount(s)
            } else {
                parse_decimal(s, 0)
            }
        }
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => Ok(U256::from(v)),
            None => parse_decimal(&n.to_string(), 0),
        },
        Some(other) => Err(LasrError::InvalidAmount(format!(
            "value must be an integer string or number, got {}",
            other
        ))),
    }
}

/// Render a sub-unit integer as a verse decimal with trailing zeros trimmed.
pub fn format_amount(value: U256) -> String {
    let digits = value.to_string();
    let (int_part, frac_part) = if digits.len() > VERSE_DECIMALS {
        let split = digits.len() - VERSE_DECIMALS;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        (
            "0".to_string(),
            format!("{:0>width$}", digits, width = VERSE_DECIMALS),
        )
    };
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

/// Scale a decimal literal by `10^decimals` into an exact integer.
fn parse_decimal(raw: &str, decimals: usize) -> Result<U256> {
    let invalid = |reason: &str| LasrError::InvalidAmount(format!("'{}' {}", raw, reason));

    let text = raw.trim();
    if text.is_empty() {
        return Err(invalid("is empty"));
    }
    if text.starts_with('-') {
        return Err(invalid("is negative"));
    }

    let (mantissa, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => {
            let exponent: i64 = text[idx + 1..]
                .parse()
                .map_err(|_| invalid("has a malformed exponent"))?;
            if exponent.abs() > MAX_EXPONENT {
                return Err(invalid("has an exponent out of range"));
            }
            (&text[..idx], exponent)
        }
        None => (text, 0),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !is_digits(int_part) || !is_digits(frac_part)
    {
        return Err(invalid("is not a decimal number"));
    }

    let mut digits = format!("{}{}", int_part, frac_part);
    let fraction_len = frac_part.len() as i64 - exponent;
    let shift = decimals as i64 - fraction_len;
    if shift >= 0 {
        digits.extend(std::iter::repeat('0').take(shift as usize));
    } else {
        let drop = (-shift) as usize;
        let keep = digits.len().saturating_sub(drop);
        if digits[keep..].chars().any(|c| c != '0') {
            return Err(invalid(&format!(
                "has more than {} fractional digits",
                decimals
            )));
        }
        digits.truncate(keep);
    }

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).map_err(|_| invalid("overflows 256 bits"))
}

/// A non-negative ledger amount in the smallest sub-unit.
///
/// Always serialized as `0x`-prefixed hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(U256);

impl Amount {
    pub const ZERO: Amount = Amount(U256::ZERO);

    pub fn new(value: U256) -> Self {
        Amount(value)
    }

    /// Parse a verse literal, see [`parse_amount_to_big_int`].
    pub fn from_verse<'a>(input: impl Into<DecimalInput<'a>>) -> Result<Self> {
        parse_amount_to_big_int(input).map(Amount)
    }

    pub fn from_hex(raw: &str) -> Result<Self> {
        parse_hex_amount(raw).map(Amount)
    }

    pub fn value(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_hex(&self) -> String {
        big_int_to_hex_string(self.0)
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Amount(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(U256::from(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Amount::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}
