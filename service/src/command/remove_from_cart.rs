//! [`Command`] for removing a line from a [`Cart`].

use std::convert::Infallible;

use crate::{
    domain::{cart::Item, user, Cart},
    Service,
};

use super::Command;

/// [`Command`] for removing an [`Item`] from a [`Cart`], whatever its
/// quantity is.
#[derive(Clone, Debug)]
pub struct RemoveFromCart {
    /// ID of the [`User`] owning the [`Cart`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// [`Item`] to remove.
    pub item: Item,
}

impl<Db, Au, St> Command<RemoveFromCart> for Service<Db, Au, St> {
    type Ok = Cart;
    type Err = Infallible;

    async fn execute(
        &self,
        cmd: RemoveFromCart,
    ) -> Result<Self::Ok, Self::Err> {
        let RemoveFromCart { user_id, item } = cmd;

        Ok(self.carts().of(user_id).remove(&item))
    }
}
