//! [GoTrue] [`Auth`] implementation.
//!
//! [GoTrue]: https://github.com/supabase/auth

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use common::DateTime;
use reqwest::Method;
use secrecy::ExposeSecret as _;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        user::{
            self,
            session::{Authenticated, ExpirationDateTime, Token},
        },
        User,
    },
    infra::auth::{
        self, CurrentSession, Event, SignIn, SignOut, SignUp, Subscribe,
    },
};

use super::{send, send_json, Error, Supabase};

/// Scope of a [GoTrue] session.
///
/// Every [`Auth`] scope holds at most one session and pushes its own
/// [`Event`]s. Clones share the scope, while [`Auth::fork()`] creates a new
/// one.
///
/// [GoTrue]: https://github.com/supabase/auth
#[derive(Clone, Debug)]
pub struct Auth {
    /// [`Supabase`] client to talk to [GoTrue] with.
    ///
    /// [GoTrue]: https://github.com/supabase/auth
    supabase: Supabase,

    /// Current session of this scope, if any.
    session: Arc<Mutex<Option<Credentials>>>,

    /// Sender of the [`Event`]s of this scope.
    events: broadcast::Sender<Event>,
}

impl Auth {
    /// Capacity of the [`Event`]s channel of a scope.
    const EVENTS_CAPACITY: usize = 16;

    /// Creates a new anonymous [`Auth`] scope.
    #[must_use]
    pub fn new(supabase: Supabase) -> Self {
        let (events, _) = broadcast::channel(Self::EVENTS_CAPACITY);
        Self {
            supabase,
            session: Arc::default(),
            events,
        }
    }

    /// Creates a new anonymous [`Auth`] scope talking to the same
    /// [`Supabase`] project.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self::new(self.supabase.clone())
    }

    /// Restores the session of the provided [`Token`] in this [`Auth`] scope
    /// (and all its clones), replacing the current one.
    ///
    /// No [`Event`] is pushed.
    pub fn restore_session(
        &self,
        token: Token,
        expires_at: ExpirationDateTime,
    ) {
        self.set_credentials(Some(Credentials { token, expires_at }));
    }

    /// Returns [`Credentials`] of the current session of this scope.
    fn credentials(&self) -> Option<Credentials> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces [`Credentials`] of the current session of this scope.
    fn set_credentials(&self, creds: Option<Credentials>) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = creds;
    }

    /// Pushes the provided [`Event`] to the subscribers of this scope.
    fn emit(&self, event: Event) {
        // No subscribers is fine.
        _ = self.events.send(event);
    }

    /// Establishes the provided [GoTrue] session in this scope.
    ///
    /// [GoTrue]: https://github.com/supabase/auth
    fn establish(&self, body: SessionBody) -> Result<Authenticated, Error> {
        let auth = body.into_authenticated()?;
        self.set_credentials(Some(Credentials {
            token: auth.token.clone(),
            expires_at: auth.expires_at,
        }));
        log::debug!("`User(id: {})` signed in", auth.user.id);
        self.emit(Event::SignedIn(auth.clone()));
        Ok(auth)
    }
}

/// Credentials of a [GoTrue] session.
///
/// [GoTrue]: https://github.com/supabase/auth
#[derive(Clone, Debug)]
struct Credentials {
    /// Access [`Token`] of the session.
    token: Token,

    /// [`DateTime`] when the session expires.
    expires_at: ExpirationDateTime,
}

/// [GoTrue] user.
///
/// [GoTrue]: https://github.com/supabase/auth
#[derive(Debug, Deserialize)]
struct UserBody {
    id: user::Id,
    #[serde(default)]
    email: Option<String>,
    created_at: String,
    #[serde(default)]
    user_metadata: Metadata,
}

/// Metadata of a [GoTrue] user.
///
/// [GoTrue]: https://github.com/supabase/auth
#[derive(Debug, Default, Deserialize, Serialize)]
struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl TryFrom<UserBody> for User {
    type Error = Error;

    fn try_from(body: UserBody) -> Result<Self, Self::Error> {
        let email = body
            .email
            .as_deref()
            .and_then(|e| e.parse::<user::Email>().ok())
            .ok_or_else(|| {
                Error::Malformed(format!(
                    "`User(id: {})` has no valid email",
                    body.id,
                ))
            })?;
        let name = body
            .user_metadata
            .name
            .and_then(user::Name::new)
            .unwrap_or_else(|| user::Name::from_email(&email));
        let created_at = DateTime::from_rfc3339(&body.created_at)
            .map_err(|e| {
                Error::Malformed(format!("invalid `created_at`: {e}"))
            })?
            .coerce();
        Ok(Self {
            id: body.id,
            email,
            name,
            created_at,
        })
    }
}

/// [GoTrue] session.
///
/// [GoTrue]: https://github.com/supabase/auth
#[derive(Debug, Deserialize)]
struct SessionBody {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: UserBody,
}

impl SessionBody {
    /// Converts this [`SessionBody`] into an [`Authenticated`] session.
    fn into_authenticated(self) -> Result<Authenticated, Error> {
        let expires_at = self
            .expires_at
            .and_then(DateTime::from_unix_timestamp)
            .map(Ok)
            .or_else(|| {
                self.expires_in.map(|s| {
                    DateTime::now()
                        .checked_add(Duration::from_secs(s))
                        .ok_or_else(|| {
                            Error::Malformed(format!(
                                "session expiration out of range: {s}s",
                            ))
                        })
                })
            })
            .ok_or_else(|| {
                Error::Malformed("session without expiration".into())
            })??
            .coerce();

        // SAFETY: The token is issued by the auth provider itself.
        #[expect(unsafe_code, reason = "issued by provider")]
        let token = unsafe { Token::new_unchecked(self.access_token) };

        Ok(Authenticated {
            token,
            user: self.user.try_into()?,
            expires_at,
        })
    }
}

/// [GoTrue] response to a sign up.
///
/// [GoTrue]: https://github.com/supabase/auth
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    /// Account is confirmed and signed in.
    Session(SessionBody),

    /// Account awaits a confirmation.
    Pending(UserBody),
}

/// Credentials sent to [GoTrue].
///
/// [GoTrue]: https://github.com/supabase/auth
#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Metadata>,
}

impl crate::infra::Auth<SignIn> for Auth {
    type Ok = Authenticated;
    type Err = Traced<auth::Error>;

    async fn execute(&self, op: SignIn) -> Result<Self::Ok, Self::Err> {
        let SignIn { email, password } = op;

        let body: SessionBody = send_json(
            self.supabase
                .request(Method::POST, "auth/v1/token")
                .query(&[("grant_type", "password")])
                .json(&CredentialsBody {
                    email: email.as_ref(),
                    password: password.expose_secret().as_ref(),
                    data: None,
                }),
        )
        .await
        .map_err(tracerr::map_from_and_wrap!(=> auth::Error))?;

        self.establish(body)
            .map_err(tracerr::from_and_wrap!(=> auth::Error))
    }
}

impl crate::infra::Auth<SignUp> for Auth {
    type Ok = Option<Authenticated>;
    type Err = Traced<auth::Error>;

    async fn execute(&self, op: SignUp) -> Result<Self::Ok, Self::Err> {
        let SignUp {
            email,
            password,
            name,
        } = op;

        let body: SignUpBody = send_json(
            self.supabase.request(Method::POST, "auth/v1/signup").json(
                &CredentialsBody {
                    email: email.as_ref(),
                    password: password.expose_secret().as_ref(),
                    data: Some(Metadata {
                        name: Some(name.to_string()),
                    }),
                },
            ),
        )
        .await
        .map_err(tracerr::map_from_and_wrap!(=> auth::Error))?;

        match body {
            SignUpBody::Session(body) => self
                .establish(body)
                .map(Some)
                .map_err(tracerr::from_and_wrap!(=> auth::Error)),
            SignUpBody::Pending(user) => {
                log::debug!(
                    "`User(id: {})` signed up, awaiting confirmation",
                    user.id,
                );
                Ok(None)
            }
        }
    }
}

impl crate::infra::Auth<SignOut> for Auth {
    type Ok = ();
    type Err = Traced<auth::Error>;

    async fn execute(&self, _: SignOut) -> Result<Self::Ok, Self::Err> {
        if let Some(creds) = self.credentials() {
            let res = send(self.supabase.authorized(
                Method::POST,
                "auth/v1/logout",
                &creds.token,
            ))
            .await;
            match res {
                Ok(_) => {}
                // Already revoked or expired session is signed out anyway.
                Err(e) if e.as_ref().is_unauthorized() => {}
                Err(e) => {
                    return Err(e)
                        .map_err(tracerr::map_from_and_wrap!(=> auth::Error));
                }
            }
        }

        self.set_credentials(None);
        self.emit(Event::SignedOut);
        Ok(())
    }
}

impl crate::infra::Auth<CurrentSession> for Auth {
    type Ok = Option<Authenticated>;
    type Err = Traced<auth::Error>;

    async fn execute(&self, _: CurrentSession) -> Result<Self::Ok, Self::Err> {
        let Some(creds) = self.credentials() else {
            return Ok(None);
        };
        if creds.expires_at.remaining().is_zero() {
            self.set_credentials(None);
            return Ok(None);
        }

        let res = send_json::<UserBody>(self.supabase.authorized(
            Method::GET,
            "auth/v1/user",
            &creds.token,
        ))
        .await;
        let body = match res {
            Ok(body) => body,
            Err(e) if e.as_ref().is_unauthorized() => {
                self.set_credentials(None);
                return Ok(None);
            }
            Err(e) => {
                return Err(e)
                    .map_err(tracerr::map_from_and_wrap!(=> auth::Error));
            }
        };

        Ok(Some(Authenticated {
            token: creds.token,
            user: body
                .try_into()
                .map_err(tracerr::from_and_wrap!(=> auth::Error))?,
            expires_at: creds.expires_at,
        }))
    }
}

impl crate::infra::Auth<Subscribe> for Auth {
    type Ok = broadcast::Receiver<Event>;
    type Err = Traced<auth::Error>;

    async fn execute(&self, _: Subscribe) -> Result<Self::Ok, Self::Err> {
        Ok(self.events.subscribe())
    }
}

#[cfg(test)]
mod spec {
    use super::{SessionBody, SignUpBody};

    const USER: &str = r#"{
        "id": "0b6c7f9e-2d1a-4b7e-8c3f-6a5d4e3c2b1a",
        "email": "jane@example.com",
        "created_at": "2024-03-01T10:15:30.123456Z",
        "user_metadata": {"name": "Jane"}
    }"#;

    #[test]
    fn maps_session() {
        let body = format!(
            r#"{{
                "access_token": "eyJ.abc.def",
                "token_type": "bearer",
                "expires_in": 3600,
                "expires_at": 1709288130,
                "refresh_token": "r",
                "user": {USER}
            }}"#,
        );
        let auth = serde_json::from_str::<SessionBody>(&body)
            .unwrap()
            .into_authenticated()
            .unwrap();

        assert_eq!(auth.token.as_ref(), "eyJ.abc.def");
        assert_eq!(auth.user.name.to_string(), "Jane");
        assert_eq!(auth.user.email.to_string(), "jane@example.com");
        assert_eq!(auth.expires_at.unix_timestamp(), 1_709_288_130);
    }

    #[test]
    fn rejects_out_of_range_expiration() {
        let body = format!(
            r#"{{"access_token": "t", "expires_in": {}, "user": {USER}}}"#,
            u64::MAX,
        );
        let res = serde_json::from_str::<SessionBody>(&body)
            .unwrap()
            .into_authenticated();

        assert!(matches!(res, Err(super::Error::Malformed(_))));
    }

    #[test]
    fn distinguishes_pending_sign_up() {
        let pending = serde_json::from_str::<SignUpBody>(USER).unwrap();
        assert!(matches!(pending, SignUpBody::Pending(_)));

        let body = format!(
            r#"{{"access_token": "t", "expires_in": 60, "user": {USER}}}"#,
        );
        let session = serde_json::from_str::<SignUpBody>(&body).unwrap();
        assert!(matches!(session, SignUpBody::Session(_)));
    }
}
