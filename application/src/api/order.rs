//! [`Order`]-related definitions.

use common::{DateTime, Money};
use derive_more::{Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLObject,
    GraphQLScalar,
};
use service::{command, domain, query, Query as _};
use uuid::Uuid;

use crate::{
    api::{self, vehicle},
    AsError, Context, Error,
};

/// An order of a `Vehicle`.
#[derive(Clone, Debug, From, Into)]
pub struct Order(domain::Order);

/// An order of a `Vehicle`.
#[graphql_object(context = Context)]
impl Order {
    /// Unique identifier of this `Order`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Ordered `Vehicle`, unless it's withdrawn from sale already.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.vehicle",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn vehicle(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Vehicle>, Error> {
        ctx.service()
            .execute(query::vehicle::ById::by(self.0.vehicle_id.clone()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|v| v.map(Into::into))
    }

    /// ID of the ordered `Vehicle`.
    pub fn vehicle_id(&self) -> vehicle::Id {
        self.0.vehicle_id.clone().into()
    }

    /// Contact details of the buyer.
    pub fn contact(&self) -> Contact {
        self.0.contact.clone().into()
    }

    /// How the `Vehicle` is handed over.
    pub fn delivery(&self) -> DeliveryPreference {
        self.0.delivery.into()
    }

    /// Current status of this `Order`.
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// Tracking steps of this `Order`.
    ///
    /// Empty for a cancelled `Order`.
    pub fn tracking(&self) -> Vec<TrackingStep> {
        use domain::order::Status as S;

        if self.0.status == S::Cancelled {
            return vec![];
        }
        S::TRACKED
            .into_iter()
            .map(|step| TrackingStep {
                status: step.into(),
                progress: self.0.status.progress(step).into(),
            })
            .collect()
    }

    /// Total amount of this `Order`.
    pub fn total_amount(&self) -> Money {
        self.0.total_amount
    }

    /// `DateTime` when this `Order` was placed.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of an `Order`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::order::Id)]
#[into(domain::order::Id)]
#[graphql(name = "OrderId", transparent)]
pub struct Id(Uuid);

/// Contact details of a buyer.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context, name = "OrderContact")]
pub struct Contact {
    /// Full name of the buyer.
    pub full_name: String,

    /// Email of the buyer.
    pub email: String,

    /// Phone number of the buyer.
    pub phone: String,

    /// Street address of the buyer.
    pub address: String,

    /// City of the buyer.
    pub city: String,

    /// State or province of the buyer.
    pub state: String,

    /// Postal code of the buyer.
    pub zip_code: String,
}

impl From<domain::order::Contact> for Contact {
    fn from(contact: domain::order::Contact) -> Self {
        let domain::order::Contact {
            full_name,
            email,
            phone,
            address,
            city,
            state,
            zip_code,
        } = contact;
        Self {
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            address: address.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip_code: zip_code.to_string(),
        }
    }
}

/// Contact details of a buyer.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "OrderContactInput")]
pub struct ContactInput {
    /// Full name of the buyer.
    pub full_name: String,

    /// Email of the buyer.
    pub email: api::user::Email,

    /// Phone number of the buyer.
    pub phone: String,

    /// Street address of the buyer.
    pub address: String,

    /// City of the buyer.
    pub city: String,

    /// State or province of the buyer.
    pub state: String,

    /// Postal code of the buyer.
    pub zip_code: String,
}

impl TryFrom<ContactInput> for domain::order::Contact {
    type Error = Error;

    fn try_from(input: ContactInput) -> Result<Self, Self::Error> {
        let ContactInput {
            full_name,
            email,
            phone,
            address,
            city,
            state,
            zip_code,
        } = input;
        Ok(Self {
            full_name: api::parse("OrderContactInput.fullName", &full_name)?,
            email: email.into(),
            phone: api::parse("OrderContactInput.phone", &phone)?,
            address: api::parse("OrderContactInput.address", &address)?,
            city: api::parse("OrderContactInput.city", &city)?,
            state: api::parse("OrderContactInput.state", &state)?,
            zip_code: api::parse("OrderContactInput.zipCode", &zip_code)?,
        })
    }
}

/// Way an ordered `Vehicle` is handed over to its buyer.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "OrderDeliveryPreference")]
pub enum DeliveryPreference {
    /// Buyer picks the `Vehicle` up.
    Pickup,

    /// `Vehicle` is delivered to the buyer's address.
    Delivery,
}

impl From<domain::order::DeliveryPreference> for DeliveryPreference {
    fn from(pref: domain::order::DeliveryPreference) -> Self {
        use domain::order::DeliveryPreference as D;
        match pref {
            D::Pickup => Self::Pickup,
            D::Delivery => Self::Delivery,
        }
    }
}

impl From<DeliveryPreference> for domain::order::DeliveryPreference {
    fn from(pref: DeliveryPreference) -> Self {
        match pref {
            DeliveryPreference::Pickup => Self::Pickup,
            DeliveryPreference::Delivery => Self::Delivery,
        }
    }
}

/// Status of an `Order`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "OrderStatus")]
pub enum Status {
    /// `Order` is placed, but not processed yet.
    Pending,

    /// `Order` is being processed.
    Processing,

    /// Ordered `Vehicle` is on its way.
    Shipped,

    /// Ordered `Vehicle` is handed over.
    Delivered,

    /// `Order` is cancelled.
    Cancelled,
}

impl From<domain::order::Status> for Status {
    fn from(status: domain::order::Status) -> Self {
        use domain::order::Status as S;
        match status {
            S::Pending => Self::Pending,
            S::Processing => Self::Processing,
            S::Shipped => Self::Shipped,
            S::Delivered => Self::Delivered,
            S::Cancelled => Self::Cancelled,
        }
    }
}

/// Progress of an `Order` tracking step.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "OrderTrackingProgress")]
pub enum Progress {
    /// Step is already passed.
    Completed,

    /// `Order` is at this step now.
    Current,

    /// Step is not reached yet.
    Upcoming,
}

impl From<domain::order::Progress> for Progress {
    fn from(progress: domain::order::Progress) -> Self {
        use domain::order::Progress as P;
        match progress {
            P::Completed => Self::Completed,
            P::Current => Self::Current,
            P::Upcoming => Self::Upcoming,
        }
    }
}

/// Single tracking step of an `Order`.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(context = Context, name = "OrderTrackingStep")]
pub struct TrackingStep {
    /// Status this step stands for.
    pub status: Status,

    /// Progress of the `Order` at this step.
    pub progress: Progress,
}

impl AsError for command::place_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::VehicleNotExists(_) => {
                Some(api::query::VehicleError::NotExists.into())
            }
        }
    }
}
