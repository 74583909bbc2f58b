//! [`Command`] for adding an item to a [`Cart`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        cart::{Item, Line, Quantity},
        spare_part, user, vehicle, Cart, SparePart, Vehicle,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for adding an [`Item`] to the [`Cart`] of a [`User`].
///
/// Name, price and image of the [`Item`] are taken from the stored record at
/// the moment of adding.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct AddToCart {
    /// ID of the [`User`] owning the [`Cart`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// [`Item`] to add.
    pub item: Item,

    /// [`Quantity`] of the [`Item`] to add.
    pub quantity: Quantity,
}

impl<Db, Au, St> Command<AddToCart> for Service<Db, Au, St>
where
    Db: Database<
            Select<By<Option<Vehicle>, vehicle::Id>>,
            Ok = Option<Vehicle>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<SparePart>, spare_part::Id>>,
            Ok = Option<SparePart>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Cart;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: AddToCart) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddToCart {
            user_id,
            item,
            quantity,
        } = cmd;

        let line = match &item {
            Item::Vehicle(id) => self
                .database()
                .execute(Select(By::<Option<Vehicle>, _>::new(id.clone())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .map(|v| Line::of_vehicle(&v, quantity)),
            Item::Part(id) => self
                .database()
                .execute(Select(By::<Option<SparePart>, _>::new(id.clone())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .map(|p| Line::of_part(&p, quantity)),
        }
        .ok_or(E::ItemNotExists(item))
        .map_err(tracerr::wrap!())?;

        Ok(self.carts().of(user_id).add(line))
    }
}

/// Error of [`AddToCart`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Item`] doesn't exist.
    #[display("`{}(id: {})` does not exist", _0.kind(), _0.id())]
    #[from(ignore)]
    ItemNotExists(#[error(not(source))] Item),
}
