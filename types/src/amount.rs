//! Raw amounts and their decimal representation.
//!
//! Balances are arbitrary-precision integers in "raw", the ledger's smallest
//! indivisible unit. A [`Unit`] fixes how many raw make one whole token
//! (`10^30` for nano) and converts between raw and decimal text.
//!
//! Nothing here forbids a negative result: `apply_send` happily returns a
//! negative balance when the amount exceeds it. Keeping balances non-negative
//! is the caller's job (block hashing rejects a negative balance).

use num_bigint::{BigInt, BigUint, Sign};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::TypesError;

/// An amount in raw. May be negative as the result of arithmetic.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Raw(BigInt);

impl Raw {
    pub fn new(value: BigInt) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(BigInt::default())
    }

    pub fn from_u128(value: u128) -> Self {
        Self(BigInt::from(value))
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.sign() == Sign::NoSign
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    /// The value as `u128`, if it is non-negative and fits.
    pub fn to_u128(&self) -> Option<u128> {
        u128::try_from(&self.0).ok()
    }

    /// The 16-byte big-endian form used in block hashing.
    pub fn to_be_bytes16(&self) -> Option<[u8; 16]> {
        self.to_u128().map(u128::to_be_bytes)
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a base-10 integer with an optional leading `-`.
impl FromStr for Raw {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypesError::InvalidAmount(s.to_string()));
        }
        BigInt::parse_bytes(s.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| TypesError::InvalidAmount(s.to_string()))
    }
}

impl From<u128> for Raw {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl Add for &Raw {
    type Output = Raw;
    fn add(self, rhs: Self) -> Raw {
        Raw(&self.0 + &rhs.0)
    }
}

impl Sub for &Raw {
    type Output = Raw;
    fn sub(self, rhs: Self) -> Raw {
        Raw(&self.0 - &rhs.0)
    }
}

impl Serialize for Raw {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Raw {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Conversion between raw and a decimal token unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    digits: u32,
    scale: BigUint,
}

impl Unit {
    /// Raw per nano is `10^30`.
    pub const NANO_DIGITS: u32 = 30;

    pub fn new(digits: u32) -> Self {
        Self {
            digits,
            scale: BigUint::from(10u32).pow(digits),
        }
    }

    pub fn nano() -> Self {
        Self::new(Self::NANO_DIGITS)
    }

    /// Maximum number of fractional digits (the scale's exponent).
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Raw per whole token.
    pub fn scale(&self) -> Raw {
        Raw(BigInt::from(self.scale.clone()))
    }

    /// Render raw as decimal text: trailing fractional zeros trimmed, no
    /// fractional part at all for whole amounts, `-` for negative values.
    pub fn raw_to_decimal(&self, raw: &Raw) -> String {
        let magnitude = raw.0.magnitude();
        let whole = magnitude / &self.scale;
        let fraction = magnitude % &self.scale;

        let mut out = String::new();
        if raw.is_negative() {
            out.push('-');
        }
        out.push_str(&whole.to_string());
        if fraction.bits() != 0 {
            let padded = format!(
                "{:0>width$}",
                fraction.to_string(),
                width = self.digits as usize
            );
            out.push('.');
            out.push_str(padded.trim_end_matches('0'));
        }
        out
    }

    /// Parse decimal text (`"12"`, `"1.5"`, `".25"`) into raw.
    ///
    /// The fractional part may not be longer than [`Unit::digits`].
    pub fn decimal_to_raw(&self, text: &str) -> Result<Raw, TypesError> {
        let invalid = || TypesError::InvalidAmount(text.to_string());
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };
        let has_point = text.contains('.');
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }
        if has_point && (fraction.is_empty() || fraction.len() > self.digits as usize) {
            return Err(invalid());
        }
        if !has_point && whole.is_empty() {
            return Err(invalid());
        }

        let missing_zeros = self.digits as usize - fraction.len();
        let mut all = String::with_capacity(whole.len() + self.digits as usize);
        all.push_str(whole);
        all.push_str(fraction);
        all.extend(std::iter::repeat('0').take(missing_zeros));

        BigUint::parse_bytes(all.as_bytes(), 10)
            .map(|v| Raw(BigInt::from(v)))
            .ok_or_else(invalid)
    }

    /// `balance - decimal_to_raw(amount)`. The result may be negative.
    pub fn apply_send(&self, balance: &Raw, amount: &str) -> Result<Raw, TypesError> {
        let amount = self.decimal_to_raw(amount)?;
        Ok(balance - &amount)
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::nano()
    }
}

/// `balance + amount`, both in raw.
pub fn apply_receive(balance: &Raw, amount: &Raw) -> Raw {
    balance + amount
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(s: &str) -> Raw {
        s.parse().unwrap()
    }

    #[test]
    fn one_and_a_half_nano() {
        let unit = Unit::nano();
        assert_eq!(
            unit.decimal_to_raw("1.5").unwrap(),
            raw("1500000000000000000000000000000")
        );
    }

    #[test]
    fn integer_without_point() {
        let unit = Unit::nano();
        assert_eq!(unit.decimal_to_raw("2").unwrap(), raw(&format!("2{}", "0".repeat(30))));
    }

    #[test]
    fn leading_point_is_accepted() {
        let unit = Unit::new(3);
        assert_eq!(unit.decimal_to_raw(".25").unwrap(), raw("250"));
    }

    #[test]
    fn smallest_fraction() {
        let unit = Unit::nano();
        let one_raw = format!("0.{}1", "0".repeat(29));
        assert_eq!(unit.decimal_to_raw(&one_raw).unwrap(), raw("1"));
        assert_eq!(unit.raw_to_decimal(&raw("1")), one_raw);
    }

    #[test]
    fn too_many_fraction_digits_rejected() {
        let unit = Unit::nano();
        let text = format!("0.{}", "1".repeat(31));
        assert_eq!(
            unit.decimal_to_raw(&text),
            Err(TypesError::InvalidAmount(text.clone()))
        );
    }

    #[test]
    fn malformed_text_rejected() {
        let unit = Unit::nano();
        for bad in ["", ".", "1.", "abc", "1.2.3", "-1", "+1", "1,5", " 1", "1e5", "1_000"] {
            assert!(unit.decimal_to_raw(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn raw_to_decimal_trims_trailing_zeros() {
        let unit = Unit::nano();
        assert_eq!(unit.raw_to_decimal(&raw("1500000000000000000000000000000")), "1.5");
        assert_eq!(unit.raw_to_decimal(&raw("1000000000000000000000000000000")), "1");
        assert_eq!(unit.raw_to_decimal(&Raw::zero()), "0");
    }

    #[test]
    fn negative_raw_rendered_with_minus() {
        let unit = Unit::new(2);
        assert_eq!(unit.raw_to_decimal(&raw("-150")), "-1.5");
        assert_eq!(unit.raw_to_decimal(&raw("-5")), "-0.05");
    }

    #[test]
    fn apply_send_may_go_negative() {
        let unit = Unit::new(1);
        let balance = raw("10");
        assert_eq!(unit.apply_send(&balance, "0.5").unwrap(), raw("5"));
        let overdrawn = unit.apply_send(&balance, "2").unwrap();
        assert_eq!(overdrawn, raw("-10"));
        assert!(overdrawn.is_negative());
    }

    #[test]
    fn apply_receive_adds() {
        assert_eq!(apply_receive(&raw("7"), &raw("5")), raw("12"));
    }

    #[test]
    fn be_bytes_respect_u128_range() {
        assert_eq!(raw("1").to_be_bytes16().unwrap()[15], 1);
        assert!(raw("-1").to_be_bytes16().is_none());
        let too_big = format!("{}", u128::MAX) + "0";
        assert!(raw(&too_big).to_be_bytes16().is_none());
        assert_eq!(Raw::from(u128::MAX).to_be_bytes16(), Some([0xFF; 16]));
    }

    #[test]
    fn raw_parse_is_strict() {
        assert!("".parse::<Raw>().is_err());
        assert!("-".parse::<Raw>().is_err());
        assert!("1_0".parse::<Raw>().is_err());
        assert!("+1".parse::<Raw>().is_err());
        assert_eq!("-12".parse::<Raw>().unwrap(), Raw::new(BigInt::from(-12)));
    }

    #[test]
    fn raw_serde_is_decimal_string() {
        let value = raw("340282366920938463463374607431768211455");
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"340282366920938463463374607431768211455\"");
        assert_eq!(serde_json::from_str::<Raw>(&json).unwrap(), value);
    }
}
