//! GraphQL [`Subscription`]s definitions.

use futures::{
    future,
    stream::{self, BoxStream},
    StreamExt as _,
};
use juniper::graphql_subscription;
use service::state::Mirror;

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL subscription.
#[derive(Clone, Copy, Debug)]
pub struct Subscription;

#[graphql_subscription(context = Context)]
impl Subscription {
    /// Subscription to the authentication state of this connection.
    ///
    /// Emits the state right after probing the current session once, and
    /// then on every sign in, sign out or session expiration happening on
    /// this connection.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "authState",
            otel.name = "GraphQL subscription",
        ),
    )]
    pub async fn auth_state(
        &self,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<api::user::AuthState, Error>>, Error>
    {
        _ = ctx.try_current_session().await?;

        let mut mirror = Mirror::new(ctx.service().auth().clone())
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        let initial = mirror.start().await;

        Ok(stream::once(future::ready(Ok(initial.into())))
            .chain(stream::unfold(mirror, |mut mirror| async move {
                let state = mirror.process().await?;
                Some((Ok(state.into()), mirror))
            }))
            .boxed())
    }
}
