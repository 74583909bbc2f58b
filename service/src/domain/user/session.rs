//! [`Session`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit::Expiration, DateTimeOf};
use derive_more::{AsRef, Display, FromStr};
use serde::{Deserialize, Serialize};

use crate::domain::{user, User};

/// Claims of an access token issued by the auth provider.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    /// ID of the [`User`] this [`Session`] belongs to.
    #[serde(rename = "sub")]
    pub user_id: user::Id,

    /// [`user::Email`] of the [`User`] this [`Session`] belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<user::Email>,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Debug, Display, Eq, FromStr, PartialEq)]
#[as_ref(str)]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The provided `token` must be a valid [`Token`] representation.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(token: String) -> Self {
        Self(token)
    }
}

/// [`Session`] issued by the auth provider on a successful sign in or sign up.
#[derive(Clone, Debug)]
pub struct Authenticated {
    /// Access [`Token`] of the issued [`Session`].
    pub token: Token,

    /// [`User`] the [`Session`] has been issued for.
    pub user: User,

    /// [`DateTime`] when the issued [`Session`] expires.
    pub expires_at: ExpirationDateTime,
}

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, Expiration)>;
