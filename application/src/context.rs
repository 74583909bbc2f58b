//! Per-request [`Context`] of the GraphQL API.

use std::sync::atomic::{AtomicU16, Ordering};

use axum::{async_trait, extract::FromRequestParts};
use axum_extra::headers::{
    authorization::Bearer, Authorization, HeaderMapExt as _,
};
use common::DateTime;
use juniper::{
    http::{GraphQLBatchResponse, GraphQLResponse},
    IntoFieldError as _,
};
use service::{
    command::{self, Command as _},
    domain::{self, user::session},
};
use tokio::sync::OnceCell;

#[cfg(doc)]
use crate::api::User;
use crate::{api, define_error, AsError, Error, JuniperResponse, Service};

/// Name of the connection parameter carrying an access token of a GraphQL
/// subscription.
const TOKEN_PARAM: &str = "authToken";

/// Context of a single HTTP request or websocket connection.
///
/// Owns an [`Auth`] scope of its own, so signing in or out through one
/// [`Context`] never affects the others.
///
/// [`Auth`]: service::infra::supabase::Auth
#[derive(Debug)]
pub struct Context {
    /// [`Service`] bound to the [`Auth`] scope of this [`Context`].
    ///
    /// [`Auth`]: service::infra::supabase::Auth
    service: Service,

    /// HTTP status code to respond with, if any error happens.
    status: AtomicU16,

    /// Headers of the HTTP request.
    headers: http::HeaderMap,

    /// Outcome of the [`Session`] authentication, performed at most once.
    session: OnceCell<Result<Session, Error>>,
}

impl Context {
    /// Creates a new [`Context`] forking the [`Auth`] scope of the provided
    /// [`Service`].
    ///
    /// [`Auth`]: service::infra::supabase::Auth
    #[must_use]
    pub fn new(service: &Service, headers: http::HeaderMap) -> Self {
        Self {
            service: service.with_auth(service.auth().fork()),
            status: AtomicU16::new(
                http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            ),
            headers,
            session: OnceCell::new(),
        }
    }

    /// Returns [`Service`] of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the HTTP status code to respond with on errors.
    #[must_use]
    pub fn error_status_code(&self) -> http::StatusCode {
        http::StatusCode::from_u16(self.status.load(Ordering::Relaxed))
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Remembers the status code of the provided [`Error`] to respond with,
    /// and passes the [`Error`] through.
    ///
    /// Meant for [`Result::map_err()`].
    pub fn error(&self) -> impl FnOnce(Error) -> Error + '_ {
        move |err| {
            self.status
                .store(err.status_code.as_u16(), Ordering::Relaxed);
            err
        }
    }

    /// Binds the provided [`Session`] to this [`Context`], unless it's
    /// authenticated already.
    pub async fn set_current_session(&self, session: Session) {
        _ = self.session.get_or_init(|| async { Ok(session) }).await;
    }

    /// Returns the [`Session`] of this [`Context`], if any.
    ///
    /// # Errors
    ///
    /// If the provided access token is invalid.
    pub async fn try_current_session(&self) -> Result<Option<Session>, Error> {
        match self.authenticated().await {
            Ok(s) => Ok(Some(s.clone())),
            Err(e) if e.code == Error::from(AuthError::Unauthorized).code => {
                Ok(None)
            }
            Err(e) => Err(self.error()(e.clone())),
        }
    }

    /// Returns the [`Session`] of this [`Context`].
    ///
    /// # Errors
    ///
    /// If nobody is signed in, or the provided access token is invalid.
    pub async fn current_session(&self) -> Result<Session, Error> {
        self.authenticated()
            .await
            .clone()
            .map_err(self.error())
    }

    /// Takes the access token from the connection parameters of a GraphQL
    /// subscription, as browsers cannot set headers of websockets.
    ///
    /// # Errors
    ///
    /// If the access token is not a valid header value.
    pub(crate) fn apply_subscription_variables(
        &mut self,
        params: &juniper::Variables,
    ) -> Result<(), Error> {
        if let Some(header) = authorization_param(params)? {
            drop(self.headers.insert(http::header::AUTHORIZATION, header));
        }
        Ok(())
    }

    /// Authenticates the [`Session`] of this [`Context`] on the first call,
    /// returning the memoized outcome afterwards.
    async fn authenticated(&self) -> &Result<Session, Error> {
        self.session.get_or_init(|| self.authenticate()).await
    }

    /// Verifies the bearer token of the request and restores it into the
    /// [`Auth`] scope of this [`Context`].
    ///
    /// [`Auth`]: service::infra::supabase::Auth
    async fn authenticate(&self) -> Result<Session, Error> {
        let token = self.bearer_token()?;
        let claims = self
            .service
            .execute(command::AuthorizeUserSession {
                token: token.clone(),
            })
            .await
            .map_err(AsError::into_error)?;
        self.service
            .auth()
            .restore_session(token.clone(), claims.expires_at);

        Ok(Session {
            user_id: claims.user_id.into(),
            email: claims.email,
            token,
            expires_at: claims.expires_at.coerce(),
        })
    }

    /// Extracts the bearer token from the `Authorization` header.
    fn bearer_token(&self) -> Result<session::Token, Error> {
        bearer_of(&self.headers).map_err(Into::into)
    }
}

/// Extracts the bearer token from the `Authorization` header of the provided
/// `headers`.
fn bearer_of(headers: &http::HeaderMap) -> Result<session::Token, AuthError> {
    let Authorization(bearer) = headers
        .typed_try_get::<Authorization<Bearer>>()
        .map_err(|_| AuthError::MalformedHeader)?
        .ok_or(AuthError::Unauthorized)?;

    // SAFETY: Verified by `AuthorizeUserSession` before any use.
    #[expect(unsafe_code, reason = "verified right after")]
    let token =
        unsafe { session::Token::new_unchecked(bearer.token().to_owned()) };
    Ok(token)
}

/// Builds an `Authorization` header from the access token in the provided
/// subscription connection `params`, if any.
fn authorization_param(
    params: &juniper::Variables,
) -> Result<Option<http::HeaderValue>, AuthError> {
    params
        .get(TOKEN_PARAM)
        .map(|token| {
            token
                .as_string_value()
                .and_then(|t| format!("Bearer {t}").parse().ok())
                .ok_or(AuthError::InvalidVariables)
        })
        .transpose()
}

impl juniper::Context for Context {}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = JuniperResponse;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let Some(service) = parts.extensions.get::<Service>() else {
            let err = Error::internal(&"missing `Service` extension");
            return Err(JuniperResponse {
                status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
                response: GraphQLBatchResponse::Single(
                    GraphQLResponse::error(err.into_field_error()),
                ),
            });
        };
        Ok(Self::new(service, parts.headers.clone()))
    }
}

/// Authenticated session of a [`User`].
#[derive(Clone, Debug)]
pub struct Session {
    /// ID of the signed-in [`User`].
    pub user_id: api::user::Id,

    /// Email of the signed-in [`User`], if the access token carries it.
    pub email: Option<domain::user::Email>,

    /// Access token of this [`Session`].
    pub token: session::Token,

    /// [`DateTime`] when this [`Session`] expires.
    pub expires_at: DateTime,
}

impl From<&session::Authenticated> for Session {
    fn from(session: &session::Authenticated) -> Self {
        Self {
            user_id: session.user.id.into(),
            email: Some(session.user.email.clone()),
            token: session.token.clone(),
            expires_at: session.expires_at.coerce(),
        }
    }
}

impl AsError for command::authorize_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::JsonWebTokenDecodeError(_) => {
                Some(AuthError::Unauthorized.into())
            }
        }
    }
}

define_error! {
    enum AuthError {
        #[code = "AUTHORIZATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Authorization required"]
        Unauthorized,

        #[code = "MALFORMED_AUTHORIZATION"]
        #[status = BAD_REQUEST]
        #[message = "`Authorization` header is not a bearer token"]
        MalformedHeader,

        #[code = "INVALID_VARIABLES"]
        #[status = BAD_REQUEST]
        #[message = "Invalid subscription authorization variables"]
        InvalidVariables,
    }
}

#[cfg(test)]
mod spec {
    use juniper::{InputValue, Variables};

    use super::{authorization_param, bearer_of, AuthError};

    fn headers(authorization: Option<&str>) -> http::HeaderMap {
        let mut headers = http::HeaderMap::new();
        if let Some(v) = authorization {
            drop(headers.insert(
                http::header::AUTHORIZATION,
                v.parse().unwrap(),
            ));
        }
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let token = bearer_of(&headers(Some("Bearer eyJ.abc.def"))).unwrap();
        assert_eq!(token.as_ref(), "eyJ.abc.def");

        assert!(matches!(
            bearer_of(&headers(None)),
            Err(AuthError::Unauthorized),
        ));
        assert!(matches!(
            bearer_of(&headers(Some("Basic dXNlcjpwYXNz"))),
            Err(AuthError::MalformedHeader),
        ));
    }

    #[test]
    fn takes_token_from_connection_params() {
        let mut params = Variables::new();
        assert_eq!(authorization_param(&params).unwrap(), None);

        drop(params.insert(
            "authToken".into(),
            InputValue::scalar("eyJ.abc.def".to_owned()),
        ));
        assert_eq!(
            authorization_param(&params).unwrap().unwrap(),
            "Bearer eyJ.abc.def",
        );

        drop(params.insert("authToken".into(), InputValue::scalar(42)));
        assert!(matches!(
            authorization_param(&params),
            Err(AuthError::InvalidVariables),
        ));
    }
}
