//! [`Command`] for withdrawing a [`Vehicle`] from sale.

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{listing, user, vehicle, Listing, Vehicle},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for withdrawing a [`Vehicle`] from sale by its owner.
#[derive(Clone, Debug)]
pub struct DeleteVehicleListing {
    /// ID of the [`User`] withdrawing the [`Vehicle`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// ID of the [`Vehicle`] to withdraw.
    pub vehicle_id: vehicle::Id,
}

impl<Db, Au, St> Command<DeleteVehicleListing> for Service<Db, Au, St>
where
    Db: Database<
            Select<By<Option<Listing>, (user::Id, vehicle::Id)>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Listing, listing::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Vehicle, vehicle::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteVehicleListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteVehicleListing {
            user_id,
            vehicle_id,
        } = cmd;

        let listing = self
            .database()
            .execute(Select(By::<Option<Listing>, _>::new((
                user_id,
                vehicle_id.clone(),
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|l| l.is_owner)
            .ok_or_else(|| E::NotOwner(vehicle_id.clone()))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Delete(By::<Listing, _>::new(listing.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        self.database()
            .execute(Delete(By::<Vehicle, _>::new(vehicle_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeleteVehicleListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Vehicle`] is not listed by the [`User`].
    ///
    /// [`User`]: crate::domain::User
    #[display("`Vehicle(id: {_0})` is not owned by the `User`")]
    #[from(ignore)]
    NotOwner(#[error(not(source))] vehicle::Id),
}

#[cfg(test)]
mod spec {
    use common::{DateTime, Money};

    use crate::{
        command::{Command as _, DeleteVehicleListing},
        domain::{
            listing,
            user,
            vehicle::{self, Condition, FuelType, Transmission},
            Listing, Vehicle,
        },
        infra::database::fake::{self, Fake},
    };

    use super::ExecutionError;

    fn seed(db: &Fake, owner: user::Id) -> vehicle::Id {
        let vehicle = Vehicle {
            id: vehicle::Id::new(),
            make: vehicle::Make::new("Tesla").unwrap(),
            model: vehicle::Model::new("Model 3").unwrap(),
            year: vehicle::Year::new(2023).unwrap(),
            price: Money::from(60_000),
            mileage: vehicle::Mileage::from(0),
            condition: Condition::New,
            transmission: Transmission::Automatic,
            fuel_type: FuelType::Electric,
            body_type: None,
            color: None,
            description: None,
            image_url: None,
            gallery: vec![],
            features: vec![],
            created_at: DateTime::now().coerce(),
        };
        let id = vehicle.id.clone();
        let mut tables = db.tables();
        tables.listings.push(Listing {
            id: listing::Id::new(),
            user_id: owner,
            vehicle_id: id.clone(),
            is_owner: true,
            created_at: DateTime::now().coerce(),
        });
        tables.vehicles.push(vehicle);
        id
    }

    #[tokio::test]
    async fn deletes_link_then_vehicle() {
        let db = Fake::default();
        let owner = user::Id::new();
        let vehicle_id = seed(&db, owner);

        fake::service(db.clone())
            .execute(DeleteVehicleListing {
                user_id: owner,
                vehicle_id,
            })
            .await
            .unwrap();

        assert_eq!(
            db.log(),
            ["select user_cars", "delete user_cars", "delete cars"],
        );
        assert!(db.vehicles().is_empty());
        assert!(db.tables().listings.is_empty());
    }

    #[tokio::test]
    async fn refuses_non_owner() {
        let db = Fake::default();
        let vehicle_id = seed(&db, user::Id::new());

        let err = fake::service(db.clone())
            .execute(DeleteVehicleListing {
                user_id: user::Id::new(),
                vehicle_id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotOwner(_)));
        assert_eq!(db.vehicles().len(), 1);
    }
}
