//! [`Command`] for signing the current [`User`] out.
//!
//! [`User`]: crate::domain::User

use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    infra::{auth, Auth},
    Service,
};

use super::Command;

/// [`Command`] for terminating the current session.
#[derive(Clone, Copy, Debug)]
pub struct SignOut;

impl<Db, Au, St> Command<SignOut> for Service<Db, Au, St>
where
    Au: Auth<auth::SignOut, Ok = (), Err = Traced<auth::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: SignOut) -> Result<Self::Ok, Self::Err> {
        self.auth()
            .execute(auth::SignOut)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`SignOut`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Auth`] provider error.
    #[display("`Auth` operation failed: {_0}")]
    Auth(auth::Error),
}
