//! [`Command`] for requesting a purchase in Korea.

use common::{operations::Insert, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{cart, korea_order, order, user, KoreaOrder},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for requesting a purchase in Korea on behalf of a [`User`].
#[derive(Clone, Debug)]
pub struct SubmitKoreaOrder {
    /// ID of the [`User`] requesting the purchase.
    pub user_id: user::Id,

    /// Requested product.
    pub product: korea_order::Product,

    /// Number of the product units.
    pub quantity: cart::Quantity,

    /// Budget of the whole purchase.
    pub budget: korea_order::BudgetRange,

    /// Where and how to ship the purchase.
    pub shipping: korea_order::Shipping,

    /// Additional notes.
    pub notes: Option<korea_order::Notes>,

    /// Phone number to contact the [`User`] by.
    pub contact_number: order::Phone,

    /// Email to contact the [`User`] by.
    pub email: user::Email,
}

impl<Db, Au, St> Command<SubmitKoreaOrder> for Service<Db, Au, St>
where
    Db: Database<Insert<KoreaOrder>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = KoreaOrder;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SubmitKoreaOrder,
    ) -> Result<Self::Ok, Self::Err> {
        let SubmitKoreaOrder {
            user_id,
            product,
            quantity,
            budget,
            shipping,
            notes,
            contact_number,
            email,
        } = cmd;

        let korea_order = KoreaOrder {
            id: korea_order::Id::new(),
            user_id,
            product,
            quantity,
            budget,
            shipping,
            notes,
            contact_number,
            email,
            status: order::Status::Pending,
            tracking_number: None,
            created_at: DateTime::now().coerce(),
        };
        self.database()
            .execute(Insert(korea_order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        Ok(korea_order)
    }
}

/// Error of [`SubmitKoreaOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
