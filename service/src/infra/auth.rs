//! [`Auth`]-related definitions.

use derive_more::{Display, Error as StdError, From};
use secrecy::SecretBox;

#[cfg(feature = "supabase")]
use super::supabase;
use crate::domain::user::{self, session::Authenticated};

/// Auth provider operation.
pub use common::Handler as Auth;

/// [`Auth`] operation signing in with credentials.
///
/// Emits [`Event::SignedIn`] on success.
#[derive(Clone, Debug)]
pub struct SignIn {
    /// [`user::Email`] to sign in with.
    pub email: user::Email,

    /// [`user::Password`] to sign in with.
    pub password: SecretBox<user::Password>,
}

/// [`Auth`] operation registering a new account.
///
/// Resolves to [`None`] if the provider requires the account to be confirmed
/// before the first sign in. Otherwise, emits [`Event::SignedIn`].
#[derive(Clone, Debug)]
pub struct SignUp {
    /// [`user::Email`] of the new account.
    pub email: user::Email,

    /// [`user::Password`] of the new account.
    pub password: SecretBox<user::Password>,

    /// Display [`user::Name`] of the new account.
    pub name: user::Name,
}

/// [`Auth`] operation terminating the current session.
///
/// Emits [`Event::SignedOut`].
#[derive(Clone, Copy, Debug)]
pub struct SignOut;

/// [`Auth`] operation probing the current session, if any.
#[derive(Clone, Copy, Debug)]
pub struct CurrentSession;

/// [`Auth`] operation subscribing to [`Event`]s pushed by the provider.
#[derive(Clone, Copy, Debug)]
pub struct Subscribe;

/// Authentication event pushed by an [`Auth`] provider.
#[derive(Clone, Debug)]
pub enum Event {
    /// A session has been established.
    SignedIn(Authenticated),

    /// The current session has been terminated.
    SignedOut,
}

/// [`Auth`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`supabase`] GoTrue error.
    #[cfg(feature = "supabase")]
    Supabase(supabase::Error),
}

impl Error {
    /// Returns the human-readable message reported by the provider, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match *self {
            #[cfg(feature = "supabase")]
            Self::Supabase(ref e) => e.message(),
        }
    }

    /// Indicates whether the provider refused the operation itself (e.g.
    /// because of wrong credentials), rather than failed to perform it.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        match *self {
            #[cfg(feature = "supabase")]
            Self::Supabase(ref e) => {
                e.status().is_some_and(|s| (400..500).contains(&s))
            }
        }
    }
}
