//! [`TradeIn`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{User, Vehicle};
use crate::domain::{define_text, order, user, vehicle, ImageUrl};

/// Request of a [`User`] to exchange their vehicle as a partial payment for a
/// marketplace [`Vehicle`].
#[derive(Clone, Debug, PartialEq)]
pub struct TradeIn {
    /// ID of this [`TradeIn`].
    pub id: Id,

    /// ID of the [`User`] who requested this [`TradeIn`].
    pub user_id: user::Id,

    /// ID of the marketplace [`Vehicle`] the [`OfferedVehicle`] is traded
    /// for, if any.
    pub vehicle_id: Option<vehicle::Id>,

    /// Vehicle offered by the [`User`].
    pub offered: OfferedVehicle,

    /// Value of the [`OfferedVehicle`] as estimated by the [`User`].
    pub estimated_value: Money,

    /// [`Location`] where the [`OfferedVehicle`] can be inspected.
    pub location: Location,

    /// Name of the registered owner of the [`OfferedVehicle`].
    pub registered_owner: order::FullName,

    /// Phone number to contact the [`User`] by.
    pub contact_number: order::Phone,

    /// Preferred time of an inspection visit, if any.
    pub preferred_visit_time: Option<VisitTime>,

    /// Free-form description of the [`OfferedVehicle`], if any.
    pub description: Option<vehicle::Description>,

    /// Images of the [`OfferedVehicle`].
    pub images: Vec<ImageUrl>,

    /// Current [`Status`] of this [`TradeIn`].
    pub status: Status,

    /// [`DateTime`] when this [`TradeIn`] was requested.
    pub created_at: CreationDateTime,
}

/// Vehicle offered for a [`TradeIn`].
#[derive(Clone, Debug, PartialEq)]
pub struct OfferedVehicle {
    /// [`vehicle::Make`] of this [`OfferedVehicle`].
    pub make: vehicle::Make,

    /// [`vehicle::Model`] of this [`OfferedVehicle`].
    pub model: vehicle::Model,

    /// Production [`vehicle::Year`] of this [`OfferedVehicle`].
    pub year: vehicle::Year,

    /// [`vehicle::Mileage`] of this [`OfferedVehicle`].
    pub mileage: vehicle::Mileage,

    /// [`vehicle::Condition`] of this [`OfferedVehicle`].
    pub condition: vehicle::Condition,
}

/// ID of a [`TradeIn`].
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

define_text! {
    #[doc = "Location where an [`OfferedVehicle`] can be inspected."]
    struct Location;
}

define_text! {
    #[doc = "Preferred time of an inspection visit, as typed by a [`User`]."]
    struct VisitTime;
}

define_kind! {
    #[doc = "Status of a [`TradeIn`]."]
    enum Status {
        #[doc = "[`TradeIn`] awaits a review."]
        Pending = 1,

        #[doc = "[`TradeIn`] is accepted."]
        Approved = 2,

        #[doc = "[`TradeIn`] is declined."]
        Rejected = 3,
    }
}

/// [`DateTime`] when a [`TradeIn`] was requested.
pub type CreationDateTime = DateTimeOf<(TradeIn, unit::Creation)>;
