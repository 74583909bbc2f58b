//! [`Vehicle`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{define_text, ImageUrl};

/// Vehicle offered on the marketplace.
#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    /// ID of this [`Vehicle`].
    pub id: Id,

    /// [`Make`] of this [`Vehicle`].
    pub make: Make,

    /// [`Model`] of this [`Vehicle`].
    pub model: Model,

    /// Production [`Year`] of this [`Vehicle`].
    pub year: Year,

    /// Asking price of this [`Vehicle`].
    pub price: Money,

    /// [`Mileage`] of this [`Vehicle`].
    pub mileage: Mileage,

    /// [`Condition`] of this [`Vehicle`].
    pub condition: Condition,

    /// [`Transmission`] of this [`Vehicle`].
    pub transmission: Transmission,

    /// [`FuelType`] of this [`Vehicle`].
    pub fuel_type: FuelType,

    /// [`BodyType`] of this [`Vehicle`], if known.
    pub body_type: Option<BodyType>,

    /// [`Color`] of this [`Vehicle`], if known.
    pub color: Option<Color>,

    /// [`Description`] of this [`Vehicle`], if any.
    pub description: Option<Description>,

    /// Main [`ImageUrl`] of this [`Vehicle`], if any.
    pub image_url: Option<ImageUrl>,

    /// Additional [`ImageUrl`]s of this [`Vehicle`].
    pub gallery: Vec<ImageUrl>,

    /// [`Feature`]s of this [`Vehicle`].
    pub features: Vec<Feature>,

    /// [`DateTime`] when this [`Vehicle`] was listed.
    pub created_at: CreationDateTime,
}

/// ID of a [`Vehicle`].
///
/// Kept as an opaque string, because the data store owns the identifiers.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(str)]
#[from(String, &str)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        (!s.is_empty())
            .then(|| Self(s.to_owned()))
            .ok_or("empty `vehicle::Id`")
    }
}

define_text! {
    #[doc = "Make (manufacturer) of a [`Vehicle`], e.g. `BMW`."]
    struct Make;
}

define_text! {
    #[doc = "Model of a [`Vehicle`], e.g. `M4 Competition`."]
    struct Model;
}

define_text! {
    #[doc = "Body type of a [`Vehicle`], e.g. `Sedan`."]
    struct BodyType;
}

define_text! {
    #[doc = "Color of a [`Vehicle`]."]
    struct Color;
}

define_text! {
    #[doc = "Free-form description of a [`Vehicle`]."]
    struct Description;
}

define_text! {
    #[doc = "Single feature of a [`Vehicle`], e.g. `Sunroof`."]
    struct Feature;
}

/// Production year of a [`Vehicle`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(try_from = "u16")]
pub struct Year(u16);

impl Year {
    /// Earliest accepted [`Year`].
    pub const MIN: u16 = 1886;

    /// Latest accepted [`Year`].
    pub const MAX: u16 = 2100;

    /// Creates a new [`Year`] if the given `year` is within the accepted
    /// range.
    #[must_use]
    pub fn new(year: u16) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&year).then_some(Self(year))
    }
}

impl TryFrom<u16> for Year {
    type Error = &'static str;

    fn try_from(year: u16) -> Result<Self, Self::Error> {
        Self::new(year).ok_or("`Year` out of range")
    }
}

/// Mileage of a [`Vehicle`] in kilometers.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Mileage(u32);

define_kind! {
    #[doc = "Condition of a [`Vehicle`]."]
    enum Condition {
        #[doc = "Brand new (imported) vehicle."]
        New = 1,

        #[doc = "Previously owned vehicle."]
        Used = 2,
    }
}

define_kind! {
    #[doc = "Transmission of a [`Vehicle`]."]
    enum Transmission {
        #[doc = "Automatic transmission."]
        Automatic = 1,

        #[doc = "Manual transmission."]
        Manual = 2,
    }
}

define_kind! {
    #[doc = "Fuel type of a [`Vehicle`]."]
    enum FuelType {
        #[doc = "Petrol engine."]
        Petrol = 1,

        #[doc = "Diesel engine."]
        Diesel = 2,

        #[doc = "Battery electric vehicle."]
        Electric = 3,

        #[doc = "Hybrid powertrain."]
        Hybrid = 4,
    }
}

/// [`DateTime`] when a [`Vehicle`] was listed.
pub type CreationDateTime = DateTimeOf<(Vehicle, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Condition, FuelType, Year};

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("used".parse::<Condition>().unwrap(), Condition::Used);
        assert_eq!("Used".parse::<Condition>().unwrap(), Condition::Used);
        assert_eq!("ELECTRIC".parse::<FuelType>().unwrap(), FuelType::Electric);
        assert!("import".parse::<Condition>().is_err());
    }

    #[test]
    fn kinds_display_as_authored() {
        assert_eq!(Condition::New.to_string(), "New");
        assert_eq!(FuelType::Hybrid.as_str(), "Hybrid");
    }

    #[test]
    fn year_range() {
        assert!(Year::new(2024).is_some());
        assert!(Year::new(1800).is_none());
        assert!(Year::new(3000).is_none());
    }
}
