//! GraphQL API definitions.

pub mod cart;
pub mod image;
pub mod korea_order;
pub mod kyc;
pub mod listing;
mod mutation;
pub mod order;
mod query;
pub mod scalar;
pub mod spare_part;
mod subscription;
pub mod trade_in;
pub mod user;
pub mod vehicle;

use std::str::FromStr;

use crate::Error;

pub use self::{
    cart::Cart, korea_order::KoreaOrder, listing::Listing,
    mutation::Mutation, order::Order, query::Query, spare_part::SparePart,
    subscription::Subscription, trade_in::TradeIn, user::User,
    vehicle::Vehicle,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

/// Parses the provided free-form input `value` of the named `field`.
///
/// # Errors
///
/// With `INVALID_INPUT` code, if the `value` cannot be parsed.
pub(crate) fn parse<T: FromStr>(field: &str, value: &str) -> Result<T, Error> {
    value.parse().map_err(|_| Error::invalid_input(field))
}

/// Parses the provided optional free-form input `value` of the named
/// `field`, treating an empty one as absent.
///
/// # Errors
///
/// With `INVALID_INPUT` code, if the `value` cannot be parsed.
pub(crate) fn parse_opt<T: FromStr>(
    field: &str,
    value: Option<&str>,
) -> Result<Option<T>, Error> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| parse(field, v))
        .transpose()
}
