//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Vehicle`s catalogue narrowed down by the provided
    /// `filter`.
    ///
    /// The result is always recomputed from the whole catalogue, so it keeps
    /// the catalogue's order (newest first).
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_INPUT` - the provided `filter` is malformed.
    #[tracing::instrument(
        skip_all,
        fields(
            filter = ?filter,
            gql.name = "vehicles",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn vehicles(
        filter: Option<api::vehicle::Filter>,
        ctx: &Context,
    ) -> Result<Vec<api::Vehicle>, Error> {
        let filter = read::vehicle::list::Filter::try_from(
            filter.unwrap_or_default(),
        )
        .map_err(ctx.error())?;

        ctx.service()
            .execute(query::vehicles::Filtered(filter))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|vs| vs.into_iter().map(Into::into).collect())
    }

    /// Returns the `Vehicle`s catalogue page of the provided `condition`
    /// (the whole catalogue, if omitted), newest first.
    #[tracing::instrument(
        skip_all,
        fields(
            condition = ?condition,
            gql.name = "catalogue",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn catalogue(
        condition: Option<api::vehicle::Condition>,
        ctx: &Context,
    ) -> Result<Vec<api::Vehicle>, Error> {
        ctx.service()
            .execute(query::vehicles::List::by(read::vehicle::list::Selector {
                condition: condition.map(Into::into),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|vs| vs.into_iter().map(Into::into).collect())
    }

    /// Returns the `Vehicle` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `VEHICLE_NOT_EXISTS` - the `Vehicle` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "vehicle",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn vehicle(
        id: api::vehicle::Id,
        ctx: &Context,
    ) -> Result<api::Vehicle, Error> {
        ctx.service()
            .execute(query::vehicle::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| VehicleError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the whole `SparePart`s catalogue, newest first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "spareParts",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn spare_parts(
        ctx: &Context,
    ) -> Result<Vec<api::SparePart>, Error> {
        ctx.service()
            .execute(query::spare_parts::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ps| ps.into_iter().map(Into::into).collect())
    }

    /// Returns the `SparePart`s listed by the current `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "mySpareParts",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_spare_parts(
        ctx: &Context,
    ) -> Result<Vec<api::SparePart>, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::spare_parts::BySeller::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ps| ps.into_iter().map(Into::into).collect())
    }

    /// Returns the `Vehicle`s listed by the current `User`, newest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myListings",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_listings(
        ctx: &Context,
    ) -> Result<Vec<api::Listing>, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::listings::ByOwner::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ls| ls.into_iter().map(Into::into).collect())
    }

    /// Returns the `Order`s placed by the current `User`, newest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myOrders",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_orders(ctx: &Context) -> Result<Vec<api::Order>, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::orders::ByUser::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|os| os.into_iter().map(Into::into).collect())
    }

    /// Returns the still in progress `Order`s of the current `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myActiveOrders",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_active_orders(
        ctx: &Context,
    ) -> Result<Vec<api::Order>, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::orders::Active(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|os| os.into_iter().map(Into::into).collect())
    }

    /// Returns the `TradeIn`s submitted by the current `User`, newest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myTradeIns",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_trade_ins(
        ctx: &Context,
    ) -> Result<Vec<api::TradeIn>, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::trade_ins::ByUser::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ts| ts.into_iter().map(Into::into).collect())
    }

    /// Returns the purchases in Korea requested by the current `User`, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myKoreaOrders",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_korea_orders(
        ctx: &Context,
    ) -> Result<Vec<api::KoreaOrder>, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::korea_orders::ByUser::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|os| os.into_iter().map(Into::into).collect())
    }

    /// Returns the profile of the currently authenticated `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in;
    /// - `USER_NOT_EXISTS` - the profile hasn't been created yet.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_user(ctx: &Context) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::user::ById::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the shopping `Cart` of the current `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myCart",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_cart(ctx: &Context) -> Result<api::Cart, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::cart::ByUser(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum VehicleError {
        #[code = "VEHICLE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Vehicle` with the specified ID does not exist"]
        NotExists,
    }
}
