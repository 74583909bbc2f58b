//! [`Command`] for withdrawing a [`SparePart`] from sale.

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{spare_part, user, SparePart},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for withdrawing a [`SparePart`] from sale by its seller.
#[derive(Clone, Debug)]
pub struct DeleteSparePartListing {
    /// ID of the [`User`] withdrawing the [`SparePart`].
    ///
    /// [`User`]: crate::domain::User
    pub seller_id: user::Id,

    /// ID of the [`SparePart`] to withdraw.
    pub part_id: spare_part::Id,
}

impl<Db, Au, St> Command<DeleteSparePartListing> for Service<Db, Au, St>
where
    Db: Database<
            Select<By<Option<SparePart>, spare_part::Id>>,
            Ok = Option<SparePart>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<SparePart, spare_part::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteSparePartListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteSparePartListing { seller_id, part_id } = cmd;

        let part = self
            .database()
            .execute(Select(By::<Option<SparePart>, _>::new(part_id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::PartNotExists(part_id.clone()))
            .map_err(tracerr::wrap!())?;
        if part.seller_id != Some(seller_id) {
            return Err(tracerr::new!(E::NotSeller(part_id)));
        }

        self.database()
            .execute(Delete(By::<SparePart, _>::new(part_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeleteSparePartListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`SparePart`] doesn't exist.
    #[display("`SparePart(id: {_0})` does not exist")]
    #[from(ignore)]
    PartNotExists(#[error(not(source))] spare_part::Id),

    /// [`SparePart`] is sold by another [`User`].
    ///
    /// [`User`]: crate::domain::User
    #[display("`SparePart(id: {_0})` is not sold by the `User`")]
    #[from(ignore)]
    NotSeller(#[error(not(source))] spare_part::Id),
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        command::{
            Command as _, CreateSparePartListing, DeleteSparePartListing,
        },
        domain::{spare_part, user},
        infra::database::fake::{self, Fake},
    };

    use super::ExecutionError;

    fn create(seller_id: user::Id) -> CreateSparePartListing {
        CreateSparePartListing {
            seller_id,
            name: spare_part::Name::new("Brake pads").unwrap(),
            category: spare_part::Category::new("Brakes").unwrap(),
            price: Money::from(120),
            compatibility: vec![
                spare_part::Compatibility::new("BMW M4").unwrap(),
            ],
            description: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn seller_withdraws_own_part() {
        let db = Fake::default();
        let service = fake::service(db.clone());
        let seller = user::Id::new();

        let part = service.execute(create(seller)).await.unwrap();
        assert_eq!(part.seller_id, Some(seller));

        service
            .execute(DeleteSparePartListing {
                seller_id: seller,
                part_id: part.id,
            })
            .await
            .unwrap();

        assert!(db.tables().parts.is_empty());
    }

    #[tokio::test]
    async fn refuses_foreign_part() {
        let db = Fake::default();
        let service = fake::service(db.clone());
        let part = service.execute(create(user::Id::new())).await.unwrap();

        let err = service
            .execute(DeleteSparePartListing {
                seller_id: user::Id::new(),
                part_id: part.id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotSeller(_)));
        assert_eq!(db.tables().parts.len(), 1);
    }

    #[tokio::test]
    async fn reports_missing_part() {
        let db = Fake::default();

        let err = fake::service(db)
            .execute(DeleteSparePartListing {
                seller_id: user::Id::new(),
                part_id: spare_part::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::PartNotExists(_)));
    }
}
