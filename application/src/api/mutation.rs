//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, domain, Command as _};

use crate::{api, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Signs in with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTH_REJECTED` - the auth provider rejected the credentials.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "signIn",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn sign_in(
        email: api::user::Email,
        password: api::user::Password,
        ctx: &Context,
    ) -> Result<api::user::session::SignInResult, Error> {
        let session = ctx
            .service()
            .execute(command::SignIn {
                email: email.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session::from(&session)).await;

        Ok(session.into())
    }

    /// Registers a new account with the provided credentials.
    ///
    /// Returns `null` if the account must be confirmed before signing in.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTH_REJECTED` - the auth provider rejected the registration.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "signUp",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn sign_up(
        email: api::user::Email,
        password: api::user::Password,
        name: api::user::Name,
        ctx: &Context,
    ) -> Result<Option<api::user::session::SignInResult>, Error> {
        let session = ctx
            .service()
            .execute(command::SignUp {
                email: email.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
                name: name.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        if let Some(s) = &session {
            ctx.set_current_session(Session::from(s)).await;
        }

        Ok(session.map(Into::into))
    }

    /// Signs the current `User` out.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "signOut",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn sign_out(ctx: &Context) -> Result<bool, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(command::SignOut)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Updates the current `User`'s display name to the provided one.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in;
    /// - `USER_NOT_EXISTS` - the profile hasn't been created yet.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateMyName",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_my_name(
        name: api::user::Name,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateUserName {
                user_id: my_id.into(),
                name: name.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists a new `Vehicle` for sale by the current `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in;
    /// - `INVALID_INPUT` - the provided `vehicle` is malformed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createVehicleListing",
            make = %vehicle.make,
            model = %vehicle.model,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_vehicle_listing(
        vehicle: api::vehicle::Input,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let cmd = vehicle.into_command(my_id.into()).map_err(ctx.error())?;

        ctx.service()
            .execute(cmd)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Withdraws the `Vehicle` listed by the current `User` from sale.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in;
    /// - `NOT_OWNER` - the current `User` doesn't own the `Vehicle`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteVehicleListing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_vehicle_listing(
        id: api::vehicle::Id,
        ctx: &Context,
    ) -> Result<api::vehicle::Id, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteVehicleListing {
                user_id: my_id.into(),
                vehicle_id: id.clone().into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| id)
    }

    /// Lists a new `SparePart` for sale by the current `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in;
    /// - `INVALID_INPUT` - the provided `part` is malformed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createSparePartListing",
            name = %part.name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_spare_part_listing(
        part: api::spare_part::Input,
        ctx: &Context,
    ) -> Result<api::SparePart, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let cmd = part.into_command(my_id.into()).map_err(ctx.error())?;

        ctx.service()
            .execute(cmd)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Withdraws the `SparePart` listed by the current `User` from sale.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in;
    /// - `SPARE_PART_NOT_EXISTS` - the `SparePart` doesn't exist;
    /// - `NOT_SELLER` - the current `User` doesn't sell the `SparePart`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteSparePartListing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_spare_part_listing(
        id: api::spare_part::Id,
        ctx: &Context,
    ) -> Result<api::spare_part::Id, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteSparePartListing {
                seller_id: my_id.into(),
                part_id: id.clone().into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| id)
    }

    /// Places an `Order` of the specified `Vehicle` by the current `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in;
    /// - `INVALID_INPUT` - the provided `contact` is malformed;
    /// - `VEHICLE_NOT_EXISTS` - the `Vehicle` doesn't exist.
    #[tracing::instrument(
        skip_all,
        fields(
            delivery = ?delivery,
            gql.name = "placeOrder",
            otel.name = Self::SPAN_NAME,
            vehicle_id = %vehicle_id,
        ),
    )]
    pub async fn place_order(
        vehicle_id: api::vehicle::Id,
        contact: api::order::ContactInput,
        delivery: api::order::DeliveryPreference,
        ctx: &Context,
    ) -> Result<api::Order, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let contact = domain::order::Contact::try_from(contact)
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::PlaceOrder {
                user_id: my_id.into(),
                vehicle_id: vehicle_id.into(),
                contact,
                delivery: delivery.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Offers a vehicle of the current `User` in a trade-in.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in;
    /// - `INVALID_INPUT` - the provided `tradeIn` is malformed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "submitTradeIn",
            make = %trade_in.make,
            model = %trade_in.model,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn submit_trade_in(
        trade_in: api::trade_in::Input,
        ctx: &Context,
    ) -> Result<api::TradeIn, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let cmd = trade_in.into_command(my_id.into()).map_err(ctx.error())?;

        ctx.service()
            .execute(cmd)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Requests a purchase in Korea on behalf of the current `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in;
    /// - `INVALID_INPUT` - the provided `order` is malformed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "submitKoreaOrder",
            otel.name = Self::SPAN_NAME,
            product = %order.product_name,
        ),
    )]
    pub async fn submit_korea_order(
        order: api::korea_order::Input,
        ctx: &Context,
    ) -> Result<api::KoreaOrder, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let cmd = order.into_command(my_id.into()).map_err(ctx.error())?;

        ctx.service()
            .execute(cmd)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Submits an identity verification of the current `User`.
    ///
    /// The submitted verification awaits a manual review.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in;
    /// - `INVALID_INPUT` - the provided `verification` is malformed.
    #[tracing::instrument(
        skip_all,
        fields(
            document = ?verification.document_type,
            gql.name = "submitKycVerification",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn submit_kyc_verification(
        verification: api::kyc::Input,
        ctx: &Context,
    ) -> Result<api::kyc::Verification, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let cmd = verification
            .into_command(my_id.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(cmd)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Adds the specified item to the current `User`'s `Cart`.
    ///
    /// Adding an item already in the `Cart` increases its quantity.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in;
    /// - `INVALID_INPUT` - the `quantity` is not positive;
    /// - `ITEM_NOT_EXISTS` - the item doesn't exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "addToCart",
            item = ?item,
            otel.name = Self::SPAN_NAME,
            quantity = ?quantity,
        ),
    )]
    pub async fn add_to_cart(
        item: api::cart::ItemInput,
        quantity: Option<i32>,
        ctx: &Context,
    ) -> Result<api::Cart, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let item: domain::cart::Item =
            item.try_into().map_err(ctx.error())?;
        let quantity = match quantity {
            None => Some(domain::cart::Quantity::ONE),
            Some(n) => u32::try_from(n)
                .ok()
                .and_then(domain::cart::Quantity::new),
        }
        .ok_or_else(|| Error::invalid_input("quantity"))
        .map_err(ctx.error())?;

        ctx.service()
            .execute(command::AddToCart {
                user_id: my_id.into(),
                item,
                quantity,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Sets quantity of the specified item in the current `User`'s `Cart`.
    ///
    /// Non-positive `quantity` removes the item.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateCartQuantity",
            item = ?item,
            otel.name = Self::SPAN_NAME,
            quantity = quantity,
        ),
    )]
    pub async fn update_cart_quantity(
        item: api::cart::ItemInput,
        quantity: i32,
        ctx: &Context,
    ) -> Result<api::Cart, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let item: domain::cart::Item =
            item.try_into().map_err(ctx.error())?;

        ctx.service()
            .execute(command::UpdateCartQuantity {
                user_id: my_id.into(),
                item,
                quantity: u32::try_from(quantity).unwrap_or_default(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Removes the specified item from the current `User`'s `Cart`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - nobody is signed in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "removeFromCart",
            item = ?item,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn remove_from_cart(
        item: api::cart::ItemInput,
        ctx: &Context,
    ) -> Result<api::Cart, Error> {
        let my_id = ctx.current_session().await?.user_id;
        let item: domain::cart::Item =
            item.try_into().map_err(ctx.error())?;

        ctx.service()
            .execute(command::RemoveFromCart {
                user_id: my_id.into(),
                item,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}
