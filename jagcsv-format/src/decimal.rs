//! Exact decimal field values

use std::fmt;
use std::str::FromStr;

use crate::error::{JagError, Result};

/// Maximum significant digits accepted when parsing
pub const MAX_DECIMAL_DIGITS: usize = 65_536;

/// Decimal number with exact representation
///
/// Stored normalized: no leading or trailing zeros in `digits` (except the
/// single digit of zero), and zero is never negative. Two decimals holding the
/// same value therefore compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    /// Sign: false = non-negative, true = negative
    pub negative: bool,
    /// ASCII digits '0'..'9', MSB-first
    pub digits: Vec<u8>,
    /// Base-10 exponent applied to `digits`
    pub exponent: i32,
}

impl Decimal {
    /// The value zero
    pub fn zero() -> Self {
        Self {
            negative: false,
            digits: vec![b'0'],
            exponent: 0,
        }
    }

    /// Parse decimal text without going through floating point.
    ///
    /// Accepts an optional sign, digits with an optional fraction, and an
    /// optional `e`/`E` exponent: `-12.5`, `+3`, `.25`, `6.02e23`.
    pub fn parse_exact(text: &str) -> Result<Self> {
        let err = || JagError::conversion::<Decimal>(text);

        let (negative, rest) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(e_pos) => {
                let exp: i32 = rest[e_pos + 1..].parse().map_err(|_| err())?;
                (&rest[..e_pos], exp)
            }
            None => (rest, 0),
        };

        let mut digits = Vec::with_capacity(mantissa.len());
        let mut fraction_digits: i64 = 0;
        let mut found_dot = false;
        for byte in mantissa.bytes() {
            match byte {
                b'0'..=b'9' => {
                    digits.push(byte);
                    if found_dot {
                        fraction_digits += 1;
                    }
                }
                b'.' if !found_dot => found_dot = true,
                _ => return Err(err()),
            }
        }
        if digits.is_empty() {
            return Err(err());
        }
        if digits.len() > MAX_DECIMAL_DIGITS {
            return Err(JagError::LimitExceeded(format!(
                "Decimal with {} digits exceeds {}",
                digits.len(),
                MAX_DECIMAL_DIGITS
            )));
        }

        let exponent = i32::try_from(exponent as i64 - fraction_digits).map_err(|_| err())?;
        Self::normalized(negative, digits, exponent).ok_or_else(err)
    }

    /// Normalize raw parts; `None` when trailing-zero removal overflows the exponent.
    fn normalized(negative: bool, mut digits: Vec<u8>, mut exponent: i32) -> Option<Self> {
        let leading = digits.iter().take_while(|&&d| d == b'0').count();
        digits.drain(..leading);
        if digits.is_empty() {
            return Some(Self::zero());
        }
        while digits.last() == Some(&b'0') {
            digits.pop();
            exponent = exponent.checked_add(1)?;
        }
        Some(Self {
            negative,
            digits,
            exponent,
        })
    }

    /// Check if this value is zero
    pub fn is_zero(&self) -> bool {
        self.digits == [b'0']
    }

    /// Nearest `f64`
    pub fn to_f64(&self) -> f64 {
        // Canonical text is always valid float syntax.
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Convert to `f64` only when the conversion is lossless
    pub fn to_f64_if_exact(&self) -> Option<f64> {
        let value = self.to_f64();
        if !value.is_finite() {
            return None;
        }
        let back = Self::from_f64(value)?;
        (back == *self).then_some(value)
    }

    /// Exact decimal expansion of the shortest text that round-trips `value`
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Self::parse_exact(&value.to_string()).ok()
    }

    fn write_digits(f: &mut fmt::Formatter<'_>, digits: &[u8]) -> fmt::Result {
        for &d in digits {
            write!(f, "{}", d as char)?;
        }
        Ok(())
    }
}

impl fmt::Display for Decimal {
    /// Plain notation, switching to scientific when more than six padding zeros would be needed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        if self.negative {
            f.write_str("-")?;
        }

        let len = self.digits.len() as i64;
        let exp = self.exponent as i64;
        let leading_zeros = -exp - len;

        if exp > 6 || leading_zeros > 6 {
            let (first, rest) = self.digits.split_at(1);
            Self::write_digits(f, first)?;
            if !rest.is_empty() {
                f.write_str(".")?;
                Self::write_digits(f, rest)?;
            }
            return write!(f, "e{}", exp + len - 1);
        }

        if exp >= 0 {
            Self::write_digits(f, &self.digits)?;
            for _ in 0..exp {
                f.write_str("0")?;
            }
        } else if -exp < len {
            let (int_part, frac_part) = self.digits.split_at((len + exp) as usize);
            Self::write_digits(f, int_part)?;
            f.write_str(".")?;
            Self::write_digits(f, frac_part)?;
        } else {
            f.write_str("0.")?;
            for _ in 0..leading_zeros {
                f.write_str("0")?;
            }
            Self::write_digits(f, &self.digits)?;
        }
        Ok(())
    }
}

impl FromStr for Decimal {
    type Err = JagError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_exact(s)
    }
}
