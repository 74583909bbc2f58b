//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Values are displayed and serialized in their `PascalCase` variant form,
/// while parsing is ASCII case-insensitive, so both `used` and `Used` map to
/// the same variant.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Body kind."]
///     enum Body {
///         #[doc = "A sedan"]
///         Sedan = 1,
///
///         #[doc = "A hatchback"]
///         Hatchback = 2,
///     }
/// }
///
/// assert_eq!("sedan".parse::<Body>().unwrap(), Body::Sedan);
/// assert_eq!(Body::Hatchback.to_string(), "Hatchback");
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            $crate::private::strum::IntoStaticStr,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(ascii_case_insensitive)]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// All the variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }

            /// Returns the canonical string representation of this value.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                self.into()
            }
        }

        impl $crate::private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::private::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::private::serde::Deserializer<'de>,
            {
                let raw = <::std::string::String as
                    $crate::private::serde::Deserialize<'de>>::deserialize(
                        deserializer,
                    )?;
                raw.parse().map_err(|_| {
                    <D::Error as $crate::private::serde::de::Error>::custom(
                        ::std::format!(
                            "invalid `{}` value: {raw}",
                            ::core::stringify!($name),
                        ),
                    )
                })
            }
        }
    };
}
