//! [`Command`] for changing quantity of a [`Cart`] line.

use std::convert::Infallible;

use crate::{
    domain::{cart::Item, user, Cart},
    Service,
};

use super::Command;

/// [`Command`] for setting quantity of an [`Item`] in a [`Cart`].
///
/// Zero quantity removes the [`Item`] from the [`Cart`]. Setting quantity of
/// an [`Item`] absent in the [`Cart`] changes nothing.
#[derive(Clone, Debug)]
pub struct UpdateCartQuantity {
    /// ID of the [`User`] owning the [`Cart`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// [`Item`] to change quantity of.
    pub item: Item,

    /// New quantity of the [`Item`].
    pub quantity: u32,
}

impl<Db, Au, St> Command<UpdateCartQuantity> for Service<Db, Au, St> {
    type Ok = Cart;
    type Err = Infallible;

    async fn execute(
        &self,
        cmd: UpdateCartQuantity,
    ) -> Result<Self::Ok, Self::Err> {
        let UpdateCartQuantity {
            user_id,
            item,
            quantity,
        } = cmd;

        Ok(self.carts().of(user_id).update_quantity(&item, quantity))
    }
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        command::{Command as _, RemoveFromCart, UpdateCartQuantity},
        domain::{
            cart::{Item, ItemName, Line, Quantity},
            user,
        },
        infra::database::fake::{self, Fake},
    };

    fn line(item: Item, price: u32) -> Line {
        Line {
            item,
            name: ItemName::new("Item").unwrap(),
            unit_price: Money::from(price),
            image: None,
            quantity: Quantity::ONE,
        }
    }

    #[tokio::test]
    async fn zero_quantity_removes_line_from_total() {
        let service = fake::service(Fake::default());
        let user_id = user::Id::new();
        let cart = service.carts().of(user_id);
        _ = cart.add(line(Item::Vehicle("1".into()), 100));
        _ = cart.add(line(Item::Part("2".into()), 10));

        let updated = service
            .execute(UpdateCartQuantity {
                user_id,
                item: Item::Part("2".into()),
                quantity: 4,
            })
            .await
            .unwrap();
        assert_eq!(updated.total(), Money::from(140));

        let updated = service
            .execute(UpdateCartQuantity {
                user_id,
                item: Item::Vehicle("1".into()),
                quantity: 0,
            })
            .await
            .unwrap();
        assert_eq!(updated.lines().len(), 1);
        assert_eq!(updated.total(), Money::from(40));
    }

    #[tokio::test]
    async fn removes_line_unconditionally() {
        let service = fake::service(Fake::default());
        let user_id = user::Id::new();
        _ = service
            .carts()
            .of(user_id)
            .add(line(Item::Vehicle("1".into()), 100));

        let removed = service
            .execute(RemoveFromCart {
                user_id,
                item: Item::Vehicle("1".into()),
            })
            .await
            .unwrap();
        assert!(removed.is_empty());

        let again = service
            .execute(RemoveFromCart {
                user_id,
                item: Item::Vehicle("1".into()),
            })
            .await
            .unwrap();
        assert!(again.is_empty());
    }
}
