//! [`Listing`]-related definitions.

use common::DateTime;
use derive_more::{From, Into};
use juniper::graphql_object;
use service::{command, read};

use crate::{api, AsError, Context, Error};

/// A `Vehicle` listed for sale by the current `User`.
#[derive(Clone, Debug, From, Into)]
pub struct Listing(read::listing::Owned);

/// A `Vehicle` listed for sale by the current `User`.
#[graphql_object(context = Context)]
impl Listing {
    /// Listed `Vehicle`.
    pub fn vehicle(&self) -> api::Vehicle {
        self.0.vehicle.clone().into()
    }

    /// `DateTime` when the `Vehicle` was listed.
    pub fn listed_at(&self) -> DateTime {
        self.0.listing.created_at.coerce()
    }
}

impl AsError for command::create_vehicle_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Inconsistent(_) => None,
        }
    }
}

impl AsError for command::delete_vehicle_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotOwner(_) => Some(ListingError::NotOwner.into()),
        }
    }
}

crate::define_error! {
    enum ListingError {
        #[code = "NOT_OWNER"]
        #[status = FORBIDDEN]
        #[message = "Current `User` doesn't own the `Vehicle`"]
        NotOwner,
    }
}
