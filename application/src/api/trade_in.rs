//! [`TradeIn`]-related definitions.

use common::{DateTime, Money};
use derive_more::{Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar,
};
use service::{command, domain};
use uuid::Uuid;

use crate::{
    api::{self, image, vehicle},
    AsError, Context, Error,
};

/// A vehicle offered by a `User` in a trade-in.
#[derive(Clone, Debug, From, Into)]
pub struct TradeIn(domain::TradeIn);

/// A vehicle offered by a `User` in a trade-in.
#[graphql_object(context = Context)]
impl TradeIn {
    /// Unique identifier of this `TradeIn`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// ID of the marketplace `Vehicle` this `TradeIn` is requested for, if
    /// any.
    pub fn vehicle_id(&self) -> Option<vehicle::Id> {
        self.0.vehicle_id.clone().map(Into::into)
    }

    /// Make of the offered vehicle.
    pub fn make(&self) -> vehicle::Make {
        self.0.offered.make.clone().into()
    }

    /// Model of the offered vehicle.
    pub fn model(&self) -> vehicle::Model {
        self.0.offered.model.clone().into()
    }

    /// Production year of the offered vehicle.
    pub fn year(&self) -> i32 {
        u16::from(self.0.offered.year).into()
    }

    /// Mileage of the offered vehicle in kilometers.
    pub fn mileage(&self) -> i32 {
        i32::try_from(u32::from(self.0.offered.mileage)).unwrap_or(i32::MAX)
    }

    /// Condition of the offered vehicle.
    pub fn condition(&self) -> vehicle::Condition {
        self.0.offered.condition.into()
    }

    /// Value the `User` expects for the offered vehicle.
    pub fn estimated_value(&self) -> Money {
        self.0.estimated_value
    }

    /// Where the offered vehicle can be inspected.
    pub fn location(&self) -> String {
        self.0.location.to_string()
    }

    /// Registered owner of the offered vehicle.
    pub fn registered_owner(&self) -> String {
        self.0.registered_owner.to_string()
    }

    /// Phone number to contact the owner by.
    pub fn contact_number(&self) -> String {
        self.0.contact_number.to_string()
    }

    /// Preferred time of the inspection visit.
    pub fn preferred_visit_time(&self) -> Option<String> {
        self.0.preferred_visit_time.as_ref().map(ToString::to_string)
    }

    /// Description of the offered vehicle.
    pub fn description(&self) -> Option<String> {
        self.0.description.as_ref().map(ToString::to_string)
    }

    /// Photos of the offered vehicle.
    pub fn images(&self) -> Vec<image::Url> {
        self.0.images.iter().cloned().map(Into::into).collect()
    }

    /// Review status of this `TradeIn`.
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// `DateTime` when this `TradeIn` was submitted.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `TradeIn`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::trade_in::Id)]
#[into(domain::trade_in::Id)]
#[graphql(name = "TradeInId", transparent)]
pub struct Id(Uuid);

/// Review status of a `TradeIn`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "TradeInStatus")]
pub enum Status {
    /// `TradeIn` awaits a review.
    Pending,

    /// `TradeIn` is accepted.
    Approved,

    /// `TradeIn` is declined.
    Rejected,
}

impl From<domain::trade_in::Status> for Status {
    fn from(status: domain::trade_in::Status) -> Self {
        use domain::trade_in::Status as S;
        match status {
            S::Pending => Self::Pending,
            S::Approved => Self::Approved,
            S::Rejected => Self::Rejected,
        }
    }
}

/// Details of a vehicle offered in a trade-in.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "TradeInInput")]
pub struct Input {
    /// ID of the marketplace `Vehicle` the trade-in is requested for.
    pub vehicle_id: Option<vehicle::Id>,

    /// Make of the offered vehicle.
    pub make: vehicle::Make,

    /// Model of the offered vehicle.
    pub model: vehicle::Model,

    /// Production year of the offered vehicle.
    pub year: i32,

    /// Mileage of the offered vehicle in kilometers.
    pub mileage: i32,

    /// Condition of the offered vehicle.
    pub condition: vehicle::Condition,

    /// Value expected for the offered vehicle.
    pub estimated_value: Money,

    /// Where the offered vehicle can be inspected.
    pub location: String,

    /// Registered owner of the offered vehicle.
    pub registered_owner: String,

    /// Phone number to contact the owner by.
    pub contact_number: String,

    /// Preferred time of the inspection visit.
    pub preferred_visit_time: Option<String>,

    /// Description of the offered vehicle.
    pub description: Option<String>,

    /// Uploaded photos of the offered vehicle.
    pub images: Option<Vec<image::Url>>,
}

impl Input {
    /// Converts this [`Input`] into a [`command::SubmitTradeIn`] of the
    /// provided [`domain::User`].
    ///
    /// # Errors
    ///
    /// With `INVALID_INPUT` code, if any of the free-form fields is invalid.
    pub fn into_command(
        self,
        user_id: domain::user::Id,
    ) -> Result<command::SubmitTradeIn, Error> {
        let Self {
            vehicle_id,
            make,
            model,
            year,
            mileage,
            condition,
            estimated_value,
            location,
            registered_owner,
            contact_number,
            preferred_visit_time,
            description,
            images,
        } = self;

        Ok(command::SubmitTradeIn {
            user_id,
            vehicle_id: vehicle_id.map(Into::into),
            offered: domain::trade_in::OfferedVehicle {
                make: make.into(),
                model: model.into(),
                year: vehicle::year_of("TradeInInput.year", year)?,
                mileage: vehicle::mileage_of("TradeInInput.mileage", mileage)?,
                condition: condition.into(),
            },
            estimated_value,
            location: api::parse("TradeInInput.location", &location)?,
            registered_owner: api::parse(
                "TradeInInput.registeredOwner",
                &registered_owner,
            )?,
            contact_number: api::parse(
                "TradeInInput.contactNumber",
                &contact_number,
            )?,
            preferred_visit_time: api::parse_opt(
                "TradeInInput.preferredVisitTime",
                preferred_visit_time.as_deref(),
            )?,
            description: api::parse_opt(
                "TradeInInput.description",
                description.as_deref(),
            )?,
            images: images
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        })
    }
}

impl AsError for command::submit_trade_in::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}
