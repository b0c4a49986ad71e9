// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Enumerated values.
//!
//! ```text
//! "Blue"  -> from_name("Blue")      exact case only
//! "2"     -> from_value(2)          must be a declared discriminant
//! "red"   -> rejected               (no case folding)
//! "3"     -> rejected               (no variant with that value)
//! ```

/// A closed set of named values that a variable can hold.
///
/// Usually implemented with [`impl_enum_variable!`](crate::impl_enum_variable)
/// on top of `strum`'s `EnumString` and `FromRepr` derives.
pub trait EnumVariable: Sized {
    /// Type name reported when parsing fails.
    const TYPE_NAME: &'static str;

    /// Returns the variant declared with exactly this name.
    fn from_name(name: &str) -> Option<Self>;

    /// Returns the variant whose discriminant equals `value`.
    fn from_value(value: i128) -> Option<Self>;
}

/// Parses a declared variant by name or by discriminant.
pub(crate) fn parse_enum<T: EnumVariable>(raw: &str) -> Option<T> {
    let token = raw.trim_ascii();
    if let Some(variant) = T::from_name(token) {
        return Some(variant);
    }

    let numeric = token.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+');
    if numeric {
        token.parse::<i128>().ok().and_then(T::from_value)
    } else {
        None
    }
}

/// Implements [`EnumVariable`] for enums deriving `strum::EnumString` and
/// `strum::FromRepr`.
///
/// The second argument is the enum's `#[repr]` type.
///
/// # Example
///
/// ```
/// use strum::{EnumString, FromRepr};
///
/// #[derive(Debug, PartialEq, EnumString, FromRepr)]
/// #[repr(i32)]
/// enum Color {
///     Red = 1,
///     Blue = 2,
/// }
///
/// typed_env::impl_enum_variable!(Color => i32);
///
/// use typed_env::parse::EnumVariable;
/// assert_eq!(Color::from_name("Blue"), Some(Color::Blue));
/// assert_eq!(Color::from_value(1), Some(Color::Red));
/// assert_eq!(Color::from_value(3), None);
/// ```
#[macro_export]
macro_rules! impl_enum_variable {
    ($($ty:ident => $repr:ty),+ $(,)?) => {
        $(
            impl $crate::parse::EnumVariable for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_name(name: &str) -> ::core::option::Option<Self> {
                    <Self as ::core::str::FromStr>::from_str(name).ok()
                }

                fn from_value(value: i128) -> ::core::option::Option<Self> {
                    <$repr as ::core::convert::TryFrom<i128>>::try_from(value)
                        .ok()
                        .and_then(Self::from_repr)
                }
            }
        )+
    };
}
