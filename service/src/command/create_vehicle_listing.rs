//! [`Command`] for listing a new [`Vehicle`] for sale.

use common::{
    operations::{By, Delete, Insert},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{listing, user, vehicle, ImageUrl, Listing, Vehicle},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for listing a new [`Vehicle`] for sale by its owner.
///
/// Creates the [`Vehicle`] and the ownership [`Listing`] one after another.
/// If the [`Listing`] cannot be created, the [`Vehicle`] is deleted back.
#[derive(Clone, Debug)]
pub struct CreateVehicleListing {
    /// ID of the [`User`] listing the [`Vehicle`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// [`vehicle::Make`] of the new [`Vehicle`].
    pub make: vehicle::Make,

    /// [`vehicle::Model`] of the new [`Vehicle`].
    pub model: vehicle::Model,

    /// [`vehicle::Year`] of the new [`Vehicle`].
    pub year: vehicle::Year,

    /// Asking price of the new [`Vehicle`].
    pub price: Money,

    /// [`vehicle::Mileage`] of the new [`Vehicle`].
    pub mileage: vehicle::Mileage,

    /// [`vehicle::Condition`] of the new [`Vehicle`].
    pub condition: vehicle::Condition,

    /// [`vehicle::Transmission`] of the new [`Vehicle`].
    pub transmission: vehicle::Transmission,

    /// [`vehicle::FuelType`] of the new [`Vehicle`].
    pub fuel_type: vehicle::FuelType,

    /// [`vehicle::BodyType`] of the new [`Vehicle`].
    pub body_type: Option<vehicle::BodyType>,

    /// [`vehicle::Color`] of the new [`Vehicle`].
    pub color: Option<vehicle::Color>,

    /// [`vehicle::Description`] of the new [`Vehicle`].
    pub description: Option<vehicle::Description>,

    /// Main [`ImageUrl`] of the new [`Vehicle`].
    pub image_url: Option<ImageUrl>,

    /// Additional [`ImageUrl`]s of the new [`Vehicle`].
    pub gallery: Vec<ImageUrl>,

    /// [`vehicle::Feature`]s of the new [`Vehicle`].
    pub features: Vec<vehicle::Feature>,
}

impl<Db, Au, St> Command<CreateVehicleListing> for Service<Db, Au, St>
where
    Db: Database<Insert<Vehicle>, Ok = (), Err = Traced<database::Error>>
        + Database<Insert<Listing>, Ok = (), Err = Traced<database::Error>>
        + Database<
            Delete<By<Vehicle, vehicle::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = read::listing::Owned;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateVehicleListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateVehicleListing {
            user_id,
            make,
            model,
            year,
            price,
            mileage,
            condition,
            transmission,
            fuel_type,
            body_type,
            color,
            description,
            image_url,
            gallery,
            features,
        } = cmd;

        let now = DateTime::now();
        let vehicle = Vehicle {
            id: vehicle::Id::new(),
            make,
            model,
            year,
            price,
            mileage,
            condition,
            transmission,
            fuel_type,
            body_type,
            color,
            description,
            image_url,
            gallery,
            features,
            created_at: now.coerce(),
        };
        self.database()
            .execute(Insert(vehicle.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let listing = Listing {
            id: listing::Id::new(),
            user_id,
            vehicle_id: vehicle.id.clone(),
            is_owner: true,
            created_at: now.coerce(),
        };
        if let Err(e) = self.database().execute(Insert(listing.clone())).await {
            log::warn!(
                "failed to link `Vehicle(id: {})` to `User(id: {user_id})`, \
                 deleting it: {e}",
                vehicle.id,
            );

            let compensation = self
                .database()
                .execute(Delete(By::<Vehicle, _>::new(
                    vehicle.id.clone(),
                )))
                .await;
            return match compensation {
                Ok(()) => Err(e).map_err(tracerr::map_from_and_wrap!(=> E)),
                Err(err) => {
                    log::error!(
                        "`Vehicle(id: {})` is left without an owner: {err}",
                        vehicle.id,
                    );
                    Err(tracerr::new!(E::Inconsistent(vehicle.id)))
                }
            };
        }

        Ok(read::listing::Owned { listing, vehicle })
    }
}

/// Error of [`CreateVehicleListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Vehicle`] is created, but neither linked to its owner, nor deleted.
    #[display("`Vehicle(id: {_0})` is created without an owner")]
    #[from(ignore)]
    Inconsistent(#[error(not(source))] vehicle::Id),
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        command::{Command as _, CreateVehicleListing},
        domain::{
            user,
            vehicle::{
                Condition, FuelType, Make, Mileage, Model, Transmission, Year,
            },
        },
        infra::database::fake::{self, Fake},
    };

    use super::ExecutionError;

    fn cmd(user_id: user::Id) -> CreateVehicleListing {
        CreateVehicleListing {
            user_id,
            make: Make::new("BMW").unwrap(),
            model: Model::new("M4").unwrap(),
            year: Year::new(2021).unwrap(),
            price: Money::from(45_000),
            mileage: Mileage::from(12_000),
            condition: Condition::Used,
            transmission: Transmission::Automatic,
            fuel_type: FuelType::Petrol,
            body_type: None,
            color: None,
            description: None,
            image_url: None,
            gallery: vec![],
            features: vec![],
        }
    }

    #[tokio::test]
    async fn creates_vehicle_then_listing() {
        let db = Fake::default();
        let user_id = user::Id::new();

        let owned = fake::service(db.clone())
            .execute(cmd(user_id))
            .await
            .unwrap();

        assert_eq!(db.log(), ["insert cars", "insert user_cars"]);
        assert_eq!(owned.listing.vehicle_id, owned.vehicle.id);
        assert_eq!(owned.listing.user_id, user_id);
        assert!(owned.listing.is_owner);
        assert_eq!(db.vehicles().len(), 1);
    }

    #[tokio::test]
    async fn compensates_failed_link() {
        let db = Fake::failing(&["insert user_cars"]);

        let err = fake::service(db.clone())
            .execute(cmd(user::Id::new()))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Db(_)));
        assert_eq!(
            db.log(),
            ["insert cars", "insert user_cars", "delete cars"],
        );
        assert!(db.vehicles().is_empty());
    }

    #[tokio::test]
    async fn reports_failed_compensation() {
        let db = Fake::failing(&["insert user_cars", "delete cars"]);

        let err = fake::service(db.clone())
            .execute(cmd(user::Id::new()))
            .await
            .unwrap_err();

        let ExecutionError::Inconsistent(id) = err.as_ref() else {
            panic!("expected `Inconsistent`, got: {err}");
        };
        assert_eq!(&db.vehicles()[0].id, id);
    }

    #[tokio::test]
    async fn stops_when_vehicle_is_not_created() {
        let db = Fake::failing(&["insert cars"]);

        let res = fake::service(db.clone()).execute(cmd(user::Id::new())).await;

        assert!(res.is_err());
        assert_eq!(db.log(), ["insert cars"]);
    }
}
