//! [`Order`] definitions.

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{User, Vehicle};
use crate::domain::{define_text, user, vehicle};

/// Order of a [`Vehicle`] placed by a [`User`].
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    /// ID of this [`Order`].
    pub id: Id,

    /// ID of the [`User`] who placed this [`Order`].
    pub user_id: user::Id,

    /// ID of the ordered [`Vehicle`].
    pub vehicle_id: vehicle::Id,

    /// [`Contact`] details of the buyer.
    pub contact: Contact,

    /// How the ordered [`Vehicle`] is handed over.
    pub delivery: DeliveryPreference,

    /// Current [`Status`] of this [`Order`].
    pub status: Status,

    /// Total amount to be paid.
    pub total_amount: Money,

    /// [`DateTime`] when this [`Order`] was placed.
    pub created_at: CreationDateTime,
}

/// ID of an [`Order`].
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

/// Contact details of a buyer placing an [`Order`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contact {
    /// [`FullName`] of the buyer.
    pub full_name: FullName,

    /// [`user::Email`] of the buyer.
    pub email: user::Email,

    /// [`Phone`] of the buyer.
    pub phone: Phone,

    /// Street [`Address`] of the buyer.
    pub address: Address,

    /// [`City`] of the buyer.
    pub city: City,

    /// [`State`] of the buyer.
    pub state: State,

    /// [`ZipCode`] of the buyer.
    pub zip_code: ZipCode,
}

define_text! {
    #[doc = "Full name of a buyer."]
    struct FullName;
}

define_text! {
    #[doc = "Street address of a buyer."]
    struct Address;
}

define_text! {
    #[doc = "City of a buyer."]
    struct City;
}

define_text! {
    #[doc = "State or province of a buyer."]
    struct State;
}

define_text! {
    #[doc = "Postal code of a buyer."]
    struct ZipCode;
}

/// Phone number of a buyer.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format: an optional leading
        /// `+`, then 6 to 20 digits, spaces, dashes or parentheses.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?[\d\s\-()]{6,20}$").expect("valid regex")
        });

        let number = number.as_ref();
        number.trim() == number && REGEX.is_match(number)
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

impl<'de> Deserialize<'de> for Phone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

define_kind! {
    #[doc = "Way an ordered [`Vehicle`] is handed over to its buyer."]
    enum DeliveryPreference {
        #[doc = "Buyer picks the [`Vehicle`] up."]
        Pickup = 1,

        #[doc = "[`Vehicle`] is delivered to the buyer's address."]
        Delivery = 2,
    }
}

define_kind! {
    #[doc = "Status of an [`Order`]."]
    enum Status {
        #[doc = "[`Order`] is placed, but not processed yet."]
        Pending = 1,

        #[doc = "[`Order`] is being processed."]
        Processing = 2,

        #[doc = "Ordered [`Vehicle`] is on its way."]
        Shipped = 3,

        #[doc = "Ordered [`Vehicle`] is handed over."]
        Delivered = 4,

        #[doc = "[`Order`] is cancelled."]
        Cancelled = 5,
    }
}

impl Status {
    /// [`Status`]es an [`Order`] is tracked through, in order.
    pub const TRACKED: [Self; 4] =
        [Self::Pending, Self::Processing, Self::Shipped, Self::Delivered];

    /// Indicates whether an [`Order`] in this [`Status`] is still in
    /// progress.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Processing | Self::Shipped)
    }

    /// Returns [`Progress`] of the provided tracking `step` for an [`Order`]
    /// in this [`Status`].
    ///
    /// A [`Status::Cancelled`] [`Order`] has every step
    /// [`Progress::Upcoming`], since it will never reach any of them.
    #[must_use]
    pub fn progress(self, step: Self) -> Progress {
        let position = |s: Self| Self::TRACKED.iter().position(|t| *t == s);
        match (position(self), position(step)) {
            (Some(current), Some(step)) if step < current => {
                Progress::Completed
            }
            (Some(current), Some(step)) if step == current => Progress::Current,
            _ => Progress::Upcoming,
        }
    }
}

define_kind! {
    #[doc = "Progress of a single tracking step of an [`Order`]."]
    enum Progress {
        #[doc = "Step is already passed."]
        Completed = 1,

        #[doc = "[`Order`] is at this step now."]
        Current = 2,

        #[doc = "Step is not reached yet."]
        Upcoming = 3,
    }
}

/// [`DateTime`] when an [`Order`] was placed.
pub type CreationDateTime = DateTimeOf<(Order, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Phone, Progress, Status};

    #[test]
    fn tracks_progress_through_steps() {
        let progress = Status::TRACKED.map(|s| Status::Shipped.progress(s));
        assert_eq!(
            progress,
            [
                Progress::Completed,
                Progress::Completed,
                Progress::Current,
                Progress::Upcoming,
            ],
        );
    }

    #[test]
    fn cancelled_has_no_progress() {
        for step in Status::TRACKED {
            assert_eq!(Status::Cancelled.progress(step), Progress::Upcoming);
        }
    }

    #[test]
    fn only_unfinished_orders_are_active() {
        assert!(Status::Pending.is_active());
        assert!(Status::Shipped.is_active());
        assert!(!Status::Delivered.is_active());
        assert!(!Status::Cancelled.is_active());
    }

    #[test]
    fn phone_format() {
        assert!(Phone::new("+82 10-1234-5678").is_some());
        assert!(Phone::new("(555) 123 4567").is_some());
        assert!(Phone::new("12345").is_none());
        assert!(Phone::new("call me").is_none());
    }
}
