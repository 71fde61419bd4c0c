//! Field values and typed conversion
//!
//! A field is either absent (`None`) or text (`Some`, possibly empty). Typed
//! access goes through two traits instead of one accessor pair per type:
//! [`FromField`] reads a value out of field text and [`ToField`] produces the
//! text stored for a value.
//!
//! Conversions are locale-independent. Numbers, booleans, and dates ignore
//! surrounding inline whitespace; strings and chars are taken verbatim.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::constants::trim_inline_whitespace;
use crate::decimal::Decimal;
use crate::error::{JagError, Result};

/// A single cell: absent, or text
pub type Field = Option<String>;

/// Date format used for [`NaiveDate`] fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time format used for [`NaiveDateTime`] fields
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Types readable from field text
///
/// Absent fields are read as the empty string.
pub trait FromField: Sized {
    /// Convert field text into a value
    fn from_field(text: &str) -> Result<Self>;
}

/// Types writable as a field
pub trait ToField {
    /// Text to store, or `None` for an absent field
    fn to_field(&self) -> Field;
}

impl FromField for String {
    fn from_field(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}

impl ToField for String {
    fn to_field(&self) -> Field {
        Some(self.clone())
    }
}

impl ToField for str {
    fn to_field(&self) -> Field {
        Some(self.to_string())
    }
}

impl<T: ToField + ?Sized> ToField for &T {
    fn to_field(&self) -> Field {
        (**self).to_field()
    }
}

impl FromField for bool {
    fn from_field(text: &str) -> Result<Self> {
        let trimmed = trim_inline_whitespace(text);
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(JagError::conversion::<bool>(text))
        }
    }
}

impl FromField for char {
    fn from_field(text: &str) -> Result<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            _ => Err(JagError::conversion::<char>(text)),
        }
    }
}

// Types whose `FromStr`/`Display` pair is already the field format.
macro_rules! impl_field_via_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromField for $ty {
                fn from_field(text: &str) -> Result<Self> {
                    trim_inline_whitespace(text)
                        .parse::<$ty>()
                        .map_err(|_| JagError::conversion::<$ty>(text))
                }
            }

            impl ToField for $ty {
                fn to_field(&self) -> Field {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_field_via_str!(i8, i16, i32, i64, i128, isize);
impl_field_via_str!(u8, u16, u32, u64, u128, usize);
impl_field_via_str!(f32, f64);

impl ToField for bool {
    fn to_field(&self) -> Field {
        Some(if *self { "true" } else { "false" }.to_string())
    }
}

impl ToField for char {
    fn to_field(&self) -> Field {
        Some(self.to_string())
    }
}

impl FromField for Decimal {
    fn from_field(text: &str) -> Result<Self> {
        match Decimal::parse_exact(trim_inline_whitespace(text)) {
            Err(JagError::Conversion { .. }) => Err(JagError::conversion::<Decimal>(text)),
            other => other,
        }
    }
}

impl ToField for Decimal {
    fn to_field(&self) -> Field {
        Some(self.to_string())
    }
}

impl FromField for NaiveDate {
    fn from_field(text: &str) -> Result<Self> {
        NaiveDate::parse_from_str(trim_inline_whitespace(text), DATE_FORMAT)
            .map_err(|_| JagError::conversion::<NaiveDate>(text))
    }
}

impl ToField for NaiveDate {
    fn to_field(&self) -> Field {
        Some(self.format(DATE_FORMAT).to_string())
    }
}

impl FromField for NaiveDateTime {
    fn from_field(text: &str) -> Result<Self> {
        NaiveDateTime::parse_from_str(trim_inline_whitespace(text), DATE_TIME_FORMAT)
            .map_err(|_| JagError::conversion::<NaiveDateTime>(text))
    }
}

impl ToField for NaiveDateTime {
    fn to_field(&self) -> Field {
        Some(self.format(DATE_TIME_FORMAT).to_string())
    }
}

impl FromField for DateTime<FixedOffset> {
    fn from_field(text: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(trim_inline_whitespace(text))
            .map_err(|_| JagError::conversion::<DateTime<FixedOffset>>(text))
    }
}

impl ToField for DateTime<FixedOffset> {
    fn to_field(&self) -> Field {
        Some(self.to_rfc3339())
    }
}

/// Empty text reads as `None`.
impl<T: FromField> FromField for Option<T> {
    fn from_field(text: &str) -> Result<Self> {
        if text.is_empty() {
            Ok(None)
        } else {
            T::from_field(text).map(Some)
        }
    }
}

/// `None` writes an absent field.
impl<T: ToField> ToField for Option<T> {
    fn to_field(&self) -> Field {
        self.as_ref().and_then(|value| value.to_field())
    }
}

/// True when a field is absent or holds the empty string.
#[inline]
pub fn is_blank(field: &Field) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}
