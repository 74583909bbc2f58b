//! [`Vehicle`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar,
};
use service::{command, domain, read};

use crate::{
    api::{self, image, scalar},
    Context, Error,
};

/// A vehicle offered on the marketplace.
#[derive(Clone, Debug, From, Into)]
pub struct Vehicle(domain::Vehicle);

/// A vehicle offered on the marketplace.
#[graphql_object(context = Context)]
impl Vehicle {
    /// Unique identifier of this `Vehicle`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Vehicle.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.clone().into()
    }

    /// Make of this `Vehicle`.
    pub fn make(&self) -> Make {
        self.0.make.clone().into()
    }

    /// Model of this `Vehicle`.
    pub fn model(&self) -> Model {
        self.0.model.clone().into()
    }

    /// Production year of this `Vehicle`.
    pub fn year(&self) -> i32 {
        u16::from(self.0.year).into()
    }

    /// Asking price of this `Vehicle`.
    pub fn price(&self) -> Money {
        self.0.price
    }

    /// Mileage of this `Vehicle` in kilometers.
    pub fn mileage(&self) -> i32 {
        i32::try_from(u32::from(self.0.mileage)).unwrap_or(i32::MAX)
    }

    /// Condition of this `Vehicle`.
    pub fn condition(&self) -> Condition {
        self.0.condition.into()
    }

    /// Transmission of this `Vehicle`.
    pub fn transmission(&self) -> Transmission {
        self.0.transmission.into()
    }

    /// Fuel type of this `Vehicle`.
    pub fn fuel_type(&self) -> FuelType {
        self.0.fuel_type.into()
    }

    /// Body type of this `Vehicle`, if known.
    pub fn body_type(&self) -> Option<String> {
        self.0.body_type.as_ref().map(ToString::to_string)
    }

    /// Color of this `Vehicle`, if known.
    pub fn color(&self) -> Option<String> {
        self.0.color.as_ref().map(ToString::to_string)
    }

    /// Description of this `Vehicle`, if any.
    pub fn description(&self) -> Option<String> {
        self.0.description.as_ref().map(ToString::to_string)
    }

    /// Main image of this `Vehicle`, if any.
    pub fn image_url(&self) -> Option<image::Url> {
        self.0.image_url.clone().map(Into::into)
    }

    /// Additional images of this `Vehicle`.
    pub fn gallery(&self) -> Vec<image::Url> {
        self.0.gallery.iter().cloned().map(Into::into).collect()
    }

    /// Features of this `Vehicle`.
    pub fn features(&self) -> Vec<String> {
        self.0.features.iter().map(ToString::to_string).collect()
    }

    /// `DateTime` when this `Vehicle` was listed.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Vehicle`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "VehicleId", with = scalar::Text::<domain::vehicle::Id>)]
pub struct Id(domain::vehicle::Id);

/// Make of a `Vehicle`, e.g. `BMW`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "VehicleMake",
    with = scalar::Text::<domain::vehicle::Make>,
)]
pub struct Make(domain::vehicle::Make);

/// Model of a `Vehicle`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "VehicleModel",
    with = scalar::Text::<domain::vehicle::Model>,
)]
pub struct Model(domain::vehicle::Model);

/// Condition of a `Vehicle`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "VehicleCondition")]
pub enum Condition {
    /// Brand new (imported) vehicle.
    New,

    /// Previously owned vehicle.
    Used,
}

impl From<domain::vehicle::Condition> for Condition {
    fn from(condition: domain::vehicle::Condition) -> Self {
        use domain::vehicle::Condition as C;
        match condition {
            C::New => Self::New,
            C::Used => Self::Used,
        }
    }
}

impl From<Condition> for domain::vehicle::Condition {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::New => Self::New,
            Condition::Used => Self::Used,
        }
    }
}

/// Transmission of a `Vehicle`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "VehicleTransmission")]
pub enum Transmission {
    /// Automatic transmission.
    Automatic,

    /// Manual transmission.
    Manual,
}

impl From<domain::vehicle::Transmission> for Transmission {
    fn from(transmission: domain::vehicle::Transmission) -> Self {
        use domain::vehicle::Transmission as T;
        match transmission {
            T::Automatic => Self::Automatic,
            T::Manual => Self::Manual,
        }
    }
}

impl From<Transmission> for domain::vehicle::Transmission {
    fn from(transmission: Transmission) -> Self {
        match transmission {
            Transmission::Automatic => Self::Automatic,
            Transmission::Manual => Self::Manual,
        }
    }
}

/// Fuel type of a `Vehicle`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "VehicleFuelType")]
pub enum FuelType {
    /// Petrol engine.
    Petrol,

    /// Diesel engine.
    Diesel,

    /// Battery electric vehicle.
    Electric,

    /// Hybrid powertrain.
    Hybrid,
}

impl From<domain::vehicle::FuelType> for FuelType {
    fn from(fuel_type: domain::vehicle::FuelType) -> Self {
        use domain::vehicle::FuelType as F;
        match fuel_type {
            F::Petrol => Self::Petrol,
            F::Diesel => Self::Diesel,
            F::Electric => Self::Electric,
            F::Hybrid => Self::Hybrid,
        }
    }
}

impl From<FuelType> for domain::vehicle::FuelType {
    fn from(fuel_type: FuelType) -> Self {
        match fuel_type {
            FuelType::Petrol => Self::Petrol,
            FuelType::Diesel => Self::Diesel,
            FuelType::Electric => Self::Electric,
            FuelType::Hybrid => Self::Hybrid,
        }
    }
}

/// Criteria narrowing the `Vehicle`s catalogue down.
///
/// Absent criteria, as well as zero prices, match any `Vehicle`.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "VehicleFilter")]
pub struct Filter {
    /// Exact condition of a `Vehicle`.
    pub condition: Option<Condition>,

    /// Minimal price of a `Vehicle`, inclusive.
    pub min_price: Option<Money>,

    /// Maximal price of a `Vehicle`, inclusive.
    pub max_price: Option<Money>,

    /// Exact (case-sensitive) make of a `Vehicle`.
    pub make: Option<String>,

    /// Exact transmission of a `Vehicle`.
    pub transmission: Option<Transmission>,

    /// Exact fuel type of a `Vehicle`.
    pub fuel_type: Option<FuelType>,
}

impl TryFrom<Filter> for read::vehicle::list::Filter {
    type Error = Error;

    fn try_from(filter: Filter) -> Result<Self, Self::Error> {
        let Filter {
            condition,
            min_price,
            max_price,
            make,
            transmission,
            fuel_type,
        } = filter;
        Ok(Self {
            condition: condition.map(Into::into),
            min_price: min_price.unwrap_or_default(),
            max_price: max_price.unwrap_or_default(),
            make: api::parse_opt("VehicleFilter.make", make.as_deref())?,
            transmission: transmission.map(Into::into),
            fuel_type: fuel_type.map(Into::into),
        })
    }
}

/// Details of a `Vehicle` to list for sale.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "VehicleInput")]
pub struct Input {
    /// Make of the `Vehicle`.
    pub make: Make,

    /// Model of the `Vehicle`.
    pub model: Model,

    /// Production year of the `Vehicle`.
    pub year: i32,

    /// Asking price of the `Vehicle`.
    pub price: Money,

    /// Mileage of the `Vehicle` in kilometers.
    pub mileage: i32,

    /// Condition of the `Vehicle`.
    pub condition: Condition,

    /// Transmission of the `Vehicle`.
    pub transmission: Transmission,

    /// Fuel type of the `Vehicle`.
    pub fuel_type: FuelType,

    /// Body type of the `Vehicle`.
    pub body_type: Option<String>,

    /// Color of the `Vehicle`.
    pub color: Option<String>,

    /// Description of the `Vehicle`.
    pub description: Option<String>,

    /// Main image of the `Vehicle`.
    pub image_url: Option<image::Url>,

    /// Additional images of the `Vehicle`.
    pub gallery: Option<Vec<image::Url>>,

    /// Features of the `Vehicle`.
    pub features: Option<Vec<String>>,
}

impl Input {
    /// Converts this [`Input`] into a [`command::CreateVehicleListing`] of
    /// the provided [`domain::User`].
    ///
    /// # Errors
    ///
    /// With `INVALID_INPUT` code, if any of the free-form fields is invalid.
    pub fn into_command(
        self,
        user_id: domain::user::Id,
    ) -> Result<command::CreateVehicleListing, Error> {
        let Self {
            make,
            model,
            year,
            price,
            mileage,
            condition,
            transmission,
            fuel_type,
            body_type,
            color,
            description,
            image_url,
            gallery,
            features,
        } = self;

        Ok(command::CreateVehicleListing {
            user_id,
            make: make.into(),
            model: model.into(),
            year: year_of("VehicleInput.year", year)?,
            price,
            mileage: mileage_of("VehicleInput.mileage", mileage)?,
            condition: condition.into(),
            transmission: transmission.into(),
            fuel_type: fuel_type.into(),
            body_type: api::parse_opt(
                "VehicleInput.bodyType",
                body_type.as_deref(),
            )?,
            color: api::parse_opt("VehicleInput.color", color.as_deref())?,
            description: api::parse_opt(
                "VehicleInput.description",
                description.as_deref(),
            )?,
            image_url: image_url.map(Into::into),
            gallery: gallery
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            features: features
                .unwrap_or_default()
                .iter()
                .map(|f| api::parse("VehicleInput.features", f))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Parses the provided `year` input of the named `field`.
///
/// # Errors
///
/// With `INVALID_INPUT` code, if the `year` is out of range.
pub(crate) fn year_of(
    field: &str,
    year: i32,
) -> Result<domain::vehicle::Year, Error> {
    u16::try_from(year)
        .ok()
        .and_then(domain::vehicle::Year::new)
        .ok_or_else(|| Error::invalid_input(field))
}

/// Parses the provided `mileage` input of the named `field`.
///
/// # Errors
///
/// With `INVALID_INPUT` code, if the `mileage` is negative.
pub(crate) fn mileage_of(
    field: &str,
    mileage: i32,
) -> Result<domain::vehicle::Mileage, Error> {
    u32::try_from(mileage)
        .map(Into::into)
        .map_err(|_| Error::invalid_input(field))
}

#[cfg(test)]
mod spec {
    use common::Money;
    use service::{domain, read};

    use super::{Condition, Filter};

    #[test]
    fn absent_criteria_match_anything() {
        let filter = read::vehicle::list::Filter::try_from(Filter {
            make: Some("   ".to_owned()),
            ..Filter::default()
        })
        .unwrap();

        assert!(filter.is_empty());
    }

    #[test]
    fn converts_set_criteria() {
        let filter = read::vehicle::list::Filter::try_from(Filter {
            condition: Some(Condition::Used),
            max_price: Some(Money::from(50_000)),
            make: Some(" BMW ".to_owned()),
            ..Filter::default()
        })
        .unwrap();

        assert_eq!(filter.condition, Some(domain::vehicle::Condition::Used));
        assert_eq!(filter.min_price, Money::ZERO);
        assert_eq!(filter.max_price, Money::from(50_000));
        assert_eq!(
            filter.make.map(|m| m.to_string()),
            Some("BMW".to_owned()),
        );
    }
}
