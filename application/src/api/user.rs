//! [`User`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLObject, GraphQLScalar};
use service::{command, domain, state};
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A [`User`] profile of the marketplace.
#[derive(Clone, Debug, From, Into)]
pub struct User(domain::User);

/// A `User` profile of the marketplace.
#[graphql_object(context = Context)]
impl User {
    /// Unique identifier of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Display name of this `User`.
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Email this `User` signs in with.
    pub fn email(&self) -> Email {
        self.0.email.clone().into()
    }

    /// `DateTime` when this `User` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `User`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::user::Id)]
#[into(domain::user::Id)]
#[graphql(name = "UserId", transparent)]
pub struct Id(Uuid);

/// Display name of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserName",
    with = scalar::Text::<domain::user::Name>,
)]
pub struct Name(domain::user::Name);

/// Password of a `User`.
#[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserPassword",
    with = scalar::Text::<domain::user::Password>,
)]
pub struct Password(domain::user::Password);

/// Email of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserEmail",
    with = scalar::Text::<domain::user::Email>,
)]
pub struct Email(domain::user::Email);

/// Authentication state of the current connection.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct AuthState {
    /// Indicator whether a `User` is signed in.
    pub is_authenticated: bool,

    /// Indicator whether the initial session lookup is still in progress.
    pub is_loading: bool,

    /// Signed in `User`, if any.
    pub user: Option<SessionUser>,
}

impl From<state::AuthState> for AuthState {
    fn from(state: state::AuthState) -> Self {
        Self {
            is_authenticated: state.is_authenticated(),
            is_loading: state.is_loading(),
            user: state.user().cloned().map(Into::into),
        }
    }
}

/// `User` signed in on the current connection.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct SessionUser {
    /// Unique identifier of the `User`.
    pub id: Id,

    /// Email of the `User`.
    pub email: Email,

    /// Name the `User` is displayed with.
    pub display_name: Name,
}

impl From<state::session::User> for SessionUser {
    fn from(user: state::session::User) -> Self {
        Self {
            id: user.id.into(),
            email: user.email.into(),
            display_name: user.display_name.into(),
        }
    }
}

pub mod session {
    //! [`Session`]-related definitions.
    //!
    //! [`Session`]: crate::Session

    use common::DateTime;
    use derive_more::{AsRef, From, Into};
    use juniper::{GraphQLObject, GraphQLScalar};
    use service::domain;

    use crate::{
        api::{self, scalar},
        Context,
    };

    /// `Session` access token.
    #[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
    #[graphql(
        name = "UserAuthToken",
        with = scalar::Text::<domain::user::session::Token>,
    )]
    pub struct Token(domain::user::session::Token);

    /// Result of signing in.
    #[derive(Clone, Debug, From, GraphQLObject)]
    #[graphql(context = Context, name = "SignInResult")]
    pub struct SignInResult {
        /// Access token of the established `Session`.
        pub token: Token,

        /// `User` the `Session` is established for.
        pub user: api::User,

        /// `DateTime` when the established `Session` expires.
        pub expires_at: DateTime,
    }

    impl From<domain::user::session::Authenticated> for SignInResult {
        fn from(session: domain::user::session::Authenticated) -> Self {
            let domain::user::session::Authenticated {
                token,
                user,
                expires_at,
            } = session;
            Self {
                token: token.into(),
                user: user.into(),
                expires_at: expires_at.coerce(),
            }
        }
    }
}

impl AsError for command::update_user_name::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => {
                Some(api::query::UserError::NotExists.into())
            },
        }
    }
}

impl AsError for command::sign_in::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Auth(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::sign_up::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Auth(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::sign_out::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Auth(e) => e.try_as_error(),
        }
    }
}
