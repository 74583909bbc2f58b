//! [`Command`] for registering a new [`User`].

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

/// [`Command`] for registering a new [`User`].
///
/// Resolves to [`None`] if the new account must be confirmed before signing
/// in.
#[derive(Clone, Debug)]
pub struct SignUp {
    /// [`user::Email`] of the new [`User`].
    pub email: user::Email,

    /// [`user::Password`] of the new [`User`].
    pub password: SecretBox<user::Password>,

    /// [`user::Name`] of the new [`User`].
    pub name: user::Name,
}

impl<Db, Au, St> Command<SignUp> for Service<Db, Au, St>
where
    Au: Auth<
        auth::SignUp,
        Ok = Option<Authenticated>,
        Err = Traced<auth::Error>,
    >,
{
    type Ok = Option<Authenticated>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SignUp) -> Result<Self::Ok, Self::Err> {
        let SignUp {
            email,
            password,
            name,
        } = cmd;

        self.auth()
            .execute(auth::SignUp {
                email,
                password,
                name,
            })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`SignUp`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Auth`] provider error.
    #[display("`Auth` operation failed: {_0}")]
    Auth(auth::Error),
}
