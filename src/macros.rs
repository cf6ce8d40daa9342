/// Implements [`Encode`](crate::Encode) and [`Decode`](crate::Decode) for a
/// type through its `Display` and `FromStr` implementations.
///
/// The optional `null = "..."` argument additionally implements
/// [`Nullable`](crate::Nullable), so `Option<T>` can be stored as well.
///
/// # Examples
///
/// ```rust
/// use sexpression::{impl_codec_via_str, Node};
/// use std::fmt;
/// use std::str::FromStr;
///
/// #[derive(Debug, PartialEq)]
/// struct Uuid(String);
///
/// impl fmt::Display for Uuid {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str(&self.0)
///     }
/// }
///
/// impl FromStr for Uuid {
///     type Err = String;
///
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         if s.len() == 36 {
///             Ok(Uuid(s.to_string()))
///         } else {
///             Err(format!("invalid uuid length {}", s.len()))
///         }
///     }
/// }
///
/// impl_codec_via_str!(Uuid, null = "none");
///
/// let mut root = Node::create_list("package").unwrap();
/// root.append_token(&None::<Uuid>).unwrap();
/// assert_eq!(root.to_string(), "(package none)");
/// assert_eq!(root.value_of_first_child::<Option<Uuid>>(false).unwrap(), None);
/// ```
#[macro_export]
macro_rules! impl_codec_via_str {
    ($ty:ty, null = $null:expr) => {
        $crate::impl_codec_via_str!($ty);

        impl $crate::Nullable for $ty {
            const NULL: &'static str = $null;
        }
    };

    ($ty:ty) => {
        impl $crate::Encode for $ty {
            fn encode(&self) -> ::std::string::String {
                ::std::string::ToString::to_string(self)
            }
        }

        impl $crate::Decode for $ty {
            fn decode(text: &str) -> ::std::result::Result<Self, $crate::DecodeError> {
                <$ty as ::std::str::FromStr>::from_str(text).map_err($crate::DecodeError::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Decode, DecodeError, Encode, Nullable};
    use std::fmt;
    use std::str::FromStr;

    #[derive(Debug, PartialEq)]
    enum Side {
        Top,
        Bottom,
    }

    impl fmt::Display for Side {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Side::Top => f.write_str("top"),
                Side::Bottom => f.write_str("bottom"),
            }
        }
    }

    impl FromStr for Side {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "top" => Ok(Side::Top),
                "bottom" => Ok(Side::Bottom),
                other => Err(format!("unknown side \"{}\"", other)),
            }
        }
    }

    impl_codec_via_str!(Side, null = "both");

    #[test]
    fn test_macro_encode_decode() {
        assert_eq!(Side::Bottom.encode(), "bottom");
        assert_eq!(Side::decode("top"), Ok(Side::Top));
        assert_eq!(
            Side::decode("left"),
            Err(DecodeError::Failure("unknown side \"left\"".to_string()))
        );
    }

    #[test]
    fn test_macro_nullable() {
        assert_eq!(<Side as Nullable>::NULL, "both");
        assert_eq!(None::<Side>.encode(), "both");
        assert_eq!(Option::<Side>::decode("both"), Ok(None));
        assert_eq!(Option::<Side>::decode("top"), Ok(Some(Side::Top)));
    }
}
