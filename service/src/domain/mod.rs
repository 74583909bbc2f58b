//! Domain definitions.

pub mod cart;
pub mod image;
pub mod korea_order;
pub mod kyc;
pub mod listing;
pub mod order;
pub mod spare_part;
pub mod trade_in;
pub mod user;
pub mod vehicle;

pub use self::{
    cart::Cart, image::ImageUrl, korea_order::KoreaOrder, listing::Listing,
    order::Order, spare_part::SparePart, trade_in::TradeIn, user::User,
    vehicle::Vehicle,
};

/// Macro for defining a free-form text value of a domain entity.
///
/// The defined text is non-empty, has no leading or trailing whitespace, and
/// is at most 512 bytes long.
macro_rules! define_text {
    (
        #[doc = $doc:literal]
        struct $name:ident;
    ) => {
        #[doc = $doc]
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            PartialEq,
            ::serde::Serialize,
        )]
        #[as_ref(str)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Maximal length of this text in bytes.
            pub const MAX_LEN: usize = 512;

            #[doc = ::core::concat!(
                "Creates a new [`", ::core::stringify!($name),
                "`] if the given `text` is valid.",
            )]
            #[must_use]
            pub fn new(text: impl Into<String>) -> Option<Self> {
                let text = text.into();
                Self::check(&text).then_some(Self(text))
            }

            #[doc = ::core::concat!(
                "Checks whether the given `text` is a valid [`",
                ::core::stringify!($name), "`].",
            )]
            fn check(text: impl AsRef<str>) -> bool {
                let text = text.as_ref();
                text.trim() == text
                    && !text.is_empty()
                    && text.len() <= Self::MAX_LEN
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(::core::concat!(
                    "invalid `", ::core::stringify!($name), "`",
                ))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                <String as ::serde::Deserialize<'de>>::deserialize(
                    deserializer,
                )?
                .parse()
                .map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

pub(crate) use define_text;
