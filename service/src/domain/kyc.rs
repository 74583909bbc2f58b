//! [`Verification`] definitions.

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::User;
use crate::domain::{define_text, order, user, ImageUrl};

/// Identity verification submitted by a [`User`] (know your customer).
#[derive(Clone, Debug, PartialEq)]
pub struct Verification {
    /// ID of this [`Verification`].
    pub id: Id,

    /// ID of the verified [`User`].
    pub user_id: user::Id,

    /// Identity [`Document`] of the [`User`].
    pub document: Document,

    /// Scan of the identity [`Document`].
    pub document_url: ImageUrl,

    /// Scan of a proof of the residential [`Address`].
    pub proof_of_address_url: ImageUrl,

    /// Residential [`Address`] of the [`User`].
    pub address: Address,

    /// Phone number of the [`User`].
    pub phone: order::Phone,

    /// Current [`Status`] of this [`Verification`].
    pub status: Status,

    /// [`DateTime`] when this [`Verification`] was submitted.
    pub created_at: CreationDateTime,
}

/// ID of a [`Verification`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Identity document of a [`User`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Document {
    /// [`DocumentType`] of this [`Document`].
    pub kind: DocumentType,

    /// [`DocumentNumber`] of this [`Document`].
    pub number: DocumentNumber,

    /// [`ExpiryDate`] of this [`Document`].
    pub expires_on: ExpiryDate,
}

/// Residential address of a [`User`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Address {
    /// First line of this [`Address`].
    pub line1: order::Address,

    /// Second line of this [`Address`], if any.
    pub line2: Option<order::Address>,

    /// City of this [`Address`].
    pub city: order::City,

    /// State or province of this [`Address`].
    pub state: order::State,

    /// Postal code of this [`Address`].
    pub postal_code: order::ZipCode,

    /// Country of this [`Address`].
    pub country: Country,
}

define_text! {
    #[doc = "Number of an identity [`Document`]."]
    struct DocumentNumber;
}

define_text! {
    #[doc = "Country of a residential [`Address`]."]
    struct Country;
}

/// Expiry date of an identity [`Document`] in `YYYY-MM-DD` format.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct ExpiryDate(String);

impl ExpiryDate {
    /// Creates a new [`ExpiryDate`] if the given `date` is valid.
    #[must_use]
    pub fn new(date: impl Into<String>) -> Option<Self> {
        let date = date.into();
        Self::check(&date).then_some(Self(date))
    }

    /// Checks whether the given `date` is a valid [`ExpiryDate`].
    fn check(date: &str) -> bool {
        /// Regular expression checking `YYYY-MM-DD` format with a month in
        /// `01..=12` and a day in `01..=31`.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$")
                .expect("valid regex")
        });

        REGEX.is_match(date)
    }
}

impl FromStr for ExpiryDate {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ExpiryDate`")
    }
}

define_kind! {
    #[doc = "Type of an identity [`Document`]."]
    enum DocumentType {
        #[doc = "International passport."]
        Passport = 1,

        #[doc = "Driving license."]
        DrivingLicense = 2,

        #[doc = "National identity card."]
        NationalId = 3,
    }
}

define_kind! {
    #[doc = "Status of a [`Verification`]."]
    enum Status {
        #[doc = "[`Verification`] awaits a review."]
        Pending = 1,

        #[doc = "Identity of the [`User`] is confirmed."]
        Verified = 2,

        #[doc = "[`Verification`] is declined."]
        Rejected = 3,
    }
}

/// [`DateTime`] when a [`Verification`] was submitted.
pub type CreationDateTime = DateTimeOf<(Verification, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::ExpiryDate;

    #[test]
    fn expiry_date_format() {
        assert!(ExpiryDate::new("2031-12-31").is_some());
        assert!(ExpiryDate::new("2031-13-01").is_none());
        assert!(ExpiryDate::new("31/12/2031").is_none());
        assert!(ExpiryDate::new("").is_none());
    }
}
