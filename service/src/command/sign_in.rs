//! [`Command`] for signing a [`User`] in.

use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user::{self, session::Authenticated},
    infra::{auth, Auth},
    Service,
};

use super::Command;

/// [`Command`] for signing a [`User`] in with credentials.
#[derive(Clone, Debug)]
pub struct SignIn {
    /// [`user::Email`] of the [`User`].
    pub email: user::Email,

    /// [`user::Password`] of the [`User`].
    pub password: SecretBox<user::Password>,
}

impl<Db, Au, St> Command<SignIn> for Service<Db, Au, St>
where
    Au: Auth<auth::SignIn, Ok = Authenticated, Err = Traced<auth::Error>>,
{
    type Ok = Authenticated;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SignIn) -> Result<Self::Ok, Self::Err> {
        let SignIn { email, password } = cmd;

        self.auth()
            .execute(auth::SignIn { email, password })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`SignIn`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Auth`] provider error.
    #[display("`Auth` operation failed: {_0}")]
    Auth(auth::Error),
}
