//! [`Command`] for listing a new [`SparePart`] for sale.

use common::{operations::Insert, DateTime, Money};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{spare_part, user, ImageUrl, SparePart},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for listing a new [`SparePart`] for sale.
#[derive(Clone, Debug)]
pub struct CreateSparePartListing {
    /// ID of the [`User`] selling the [`SparePart`].
    ///
    /// [`User`]: crate::domain::User
    pub seller_id: user::Id,

    /// [`spare_part::Name`] of the new [`SparePart`].
    pub name: spare_part::Name,

    /// [`spare_part::Category`] of the new [`SparePart`].
    pub category: spare_part::Category,

    /// Price of the new [`SparePart`].
    pub price: Money,

    /// Vehicle models the new [`SparePart`] fits.
    pub compatibility: Vec<spare_part::Compatibility>,

    /// [`spare_part::Description`] of the new [`SparePart`].
    pub description: Option<spare_part::Description>,

    /// [`ImageUrl`] of the new [`SparePart`].
    pub image_url: Option<ImageUrl>,
}

impl<Db, Au, St> Command<CreateSparePartListing> for Service<Db, Au, St>
where
    Db: Database<Insert<SparePart>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = SparePart;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateSparePartListing,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateSparePartListing {
            seller_id,
            name,
            category,
            price,
            compatibility,
            description,
            image_url,
        } = cmd;

        let part = SparePart {
            id: spare_part::Id::new(),
            seller_id: Some(seller_id),
            name,
            category,
            price,
            compatibility,
            description,
            image_url,
            created_at: DateTime::now().coerce(),
        };
        self.database()
            .execute(Insert(part.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        Ok(part)
    }
}

/// Error of [`CreateSparePartListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
