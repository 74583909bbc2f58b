//! [`Query`] collection related to a [`Cart`].

use std::convert::Infallible;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{user, Cart},
    Query, Service,
};

/// [`Query`] of the current [`Cart`] of a [`User`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ByUser(pub user::Id);

impl<Db, Au, St> Query<ByUser> for Service<Db, Au, St> {
    type Ok = Cart;
    type Err = Infallible;

    async fn execute(
        &self,
        ByUser(user_id): ByUser,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.carts().of(user_id).snapshot())
    }
}
