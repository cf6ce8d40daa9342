//! Conversion between typed values and the text of Token/String leaves.
//!
//! The codec is a pair of traits resolved at compile time:
//!
//! - [`Encode`]: `T -> text`, used by the builder methods
//!   ([`Node::append_token`](crate::Node::append_token) and friends)
//! - [`Decode`]: `text -> T`, used by the typed getters
//!   ([`Node::value`](crate::Node::value) and friends)
//!
//! Built-in implementations cover text, `bool`, all fixed-width integers,
//! [`BigInt`], [`Color`], [`Url`] and UTC timestamps. Domain types
//! participate by implementing both traits, or by deriving them from their
//! `Display`/`FromStr` implementations with
//! [`impl_codec_via_str!`](crate::impl_codec_via_str).
//!
//! ## Optional values
//!
//! `Option<T>` is supported for every `T` that implements [`Nullable`]. The
//! empty state is written as `T::NULL`, a sentinel chosen by the type itself,
//! since a single global null representation could collide with legitimate
//! data of some type. Picking a sentinel that never occurs as a real value
//! is the responsibility of the type's author.
//!
//! ```rust
//! use sexpression::{Decode, DecodeError, Encode, Nullable};
//!
//! #[derive(Debug, PartialEq)]
//! struct Layer(String);
//!
//! impl Encode for Layer {
//!     fn encode(&self) -> String {
//!         self.0.clone()
//!     }
//! }
//!
//! impl Decode for Layer {
//!     fn decode(text: &str) -> Result<Self, DecodeError> {
//!         Ok(Layer(text.to_string()))
//!     }
//! }
//!
//! impl Nullable for Layer {
//!     const NULL: &'static str = "none";
//! }
//!
//! assert_eq!(None::<Layer>.encode(), "none");
//! assert_eq!(Option::<Layer>::decode("none"), Ok(None));
//! assert_eq!(Option::<Layer>::decode("top"), Ok(Some(Layer("top".into()))));
//! ```

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use num_bigint::BigInt;
use url::Url;

use crate::{Color, DecodeError};

/// Converts a value to the text of a leaf.
pub trait Encode {
    fn encode(&self) -> String;
}

/// Parses the text of a leaf into a value.
pub trait Decode: Sized {
    fn decode(text: &str) -> Result<Self, DecodeError>;
}

/// Types that can be stored as `Option<Self>`.
pub trait Nullable {
    /// The text representing "no value" for this type.
    const NULL: &'static str;
}

/// Encodes `value` with its [`Encode`] implementation.
pub fn encode<T: Encode + ?Sized>(value: &T) -> String {
    value.encode()
}

/// Decodes `text` with the [`Decode`] implementation of `T`.
///
/// # Examples
///
/// ```rust
/// use sexpression::{codec, DecodeError};
///
/// assert_eq!(codec::decode::<u8>("42"), Ok(42));
/// assert_eq!(codec::decode::<bool>("yes"), Err(DecodeError::InvalidBoolean));
/// ```
pub fn decode<T: Decode>(text: &str) -> Result<T, DecodeError> {
    T::decode(text)
}

impl Encode for str {
    fn encode(&self) -> String {
        self.to_string()
    }
}

impl Encode for String {
    fn encode(&self) -> String {
        self.clone()
    }
}

impl Decode for String {
    fn decode(text: &str) -> Result<Self, DecodeError> {
        Ok(text.to_string())
    }
}

impl Encode for bool {
    fn encode(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }
}

impl Decode for bool {
    fn decode(text: &str) -> Result<Self, DecodeError> {
        match text {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(DecodeError::InvalidBoolean),
        }
    }
}

macro_rules! impl_integer_codec {
    ($($ty:ty),*) => {
        $(
            impl Encode for $ty {
                fn encode(&self) -> String {
                    self.to_string()
                }
            }

            impl Decode for $ty {
                fn decode(text: &str) -> Result<Self, DecodeError> {
                    text.parse::<$ty>().map_err(|_| DecodeError::InvalidInteger)
                }
            }
        )*
    };
}

impl_integer_codec!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Encode for BigInt {
    fn encode(&self) -> String {
        self.to_string()
    }
}

impl Decode for BigInt {
    fn decode(text: &str) -> Result<Self, DecodeError> {
        text.parse::<BigInt>()
            .map_err(|_| DecodeError::InvalidInteger)
    }
}

impl Encode for Color {
    fn encode(&self) -> String {
        self.to_string()
    }
}

impl Decode for Color {
    fn decode(text: &str) -> Result<Self, DecodeError> {
        text.parse()
    }
}

impl Encode for Url {
    fn encode(&self) -> String {
        self.as_str().to_string()
    }
}

impl Decode for Url {
    fn decode(text: &str) -> Result<Self, DecodeError> {
        Url::parse(text).map_err(DecodeError::InvalidUrl)
    }
}

/// Timestamps are written in UTC, ISO-8601, with as many fractional digits
/// as needed to be exact (`2024-01-15T10:30:00Z`).
impl Encode for DateTime<Utc> {
    fn encode(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

/// Accepts any RFC 3339 timestamp (converted to UTC) as well as timestamps
/// without an offset, which are taken to be UTC already.
impl Decode for DateTime<Utc> {
    fn decode(text: &str) -> Result<Self, DecodeError> {
        match DateTime::parse_from_rfc3339(text) {
            Ok(dt) => Ok(dt.with_timezone(&Utc)),
            Err(err) => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| Utc.from_utc_datetime(&naive))
                .map_err(|_| DecodeError::InvalidDateTime(err)),
        }
    }
}

impl<T: Encode + Nullable> Encode for Option<T> {
    fn encode(&self) -> String {
        match self {
            Some(value) => value.encode(),
            None => T::NULL.to_string(),
        }
    }
}

impl<T: Decode + Nullable> Decode for Option<T> {
    fn decode(text: &str) -> Result<Self, DecodeError> {
        if text == T::NULL {
            Ok(None)
        } else {
            T::decode(text).map(Some)
        }
    }
}
