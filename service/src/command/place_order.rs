//! [`Command`] for ordering a [`Vehicle`].

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{order, user, vehicle, Order, Vehicle},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for ordering a [`Vehicle`].
///
/// The [`Order`] total is the asking price of the [`Vehicle`] at the moment
/// of ordering.
#[derive(Clone, Debug)]
pub struct PlaceOrder {
    /// ID of the [`User`] placing the [`Order`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// ID of the ordered [`Vehicle`].
    pub vehicle_id: vehicle::Id,

    /// [`order::Contact`] details of the buyer.
    pub contact: order::Contact,

    /// How the [`Vehicle`] should be handed over.
    pub delivery: order::DeliveryPreference,
}

impl<Db, Au, St> Command<PlaceOrder> for Service<Db, Au, St>
where
    Db: Database<
            Select<By<Option<Vehicle>, vehicle::Id>>,
            Ok = Option<Vehicle>,
            Err = Traced<database::Error>,
        > + Database<Insert<Order>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: PlaceOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let PlaceOrder {
            user_id,
            vehicle_id,
            contact,
            delivery,
        } = cmd;

        let vehicle = self
            .database()
            .execute(Select(By::<Option<Vehicle>, _>::new(vehicle_id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::VehicleNotExists(vehicle_id.clone()))
            .map_err(tracerr::wrap!())?;

        let order = Order {
            id: order::Id::new(),
            user_id,
            vehicle_id,
            contact,
            delivery,
            status: order::Status::Pending,
            total_amount: vehicle.price,
            created_at: DateTime::now().coerce(),
        };
        self.database()
            .execute(Insert(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!(
            "`User(id: {user_id})` ordered `Vehicle(id: {})`",
            order.vehicle_id,
        );
        Ok(order)
    }
}

/// Error of [`PlaceOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Vehicle`] doesn't exist.
    #[display("`Vehicle(id: {_0})` does not exist")]
    #[from(ignore)]
    VehicleNotExists(#[error(not(source))] vehicle::Id),
}

#[cfg(test)]
mod spec {
    use common::{DateTime, Money};

    use crate::{
        command::{Command as _, PlaceOrder},
        domain::{
            order::{self, Contact, DeliveryPreference, Status},
            user,
            vehicle::{self, Condition, FuelType, Transmission},
            Vehicle,
        },
        infra::database::fake::{self, Fake},
    };

    use super::ExecutionError;

    fn contact() -> Contact {
        Contact {
            full_name: order::FullName::new("Jane Doe").unwrap(),
            email: user::Email::new("jane@example.com").unwrap(),
            phone: order::Phone::new("+82 10-1234-5678").unwrap(),
            address: order::Address::new("1 Main St").unwrap(),
            city: order::City::new("Seoul").unwrap(),
            state: order::State::new("Seoul").unwrap(),
            zip_code: order::ZipCode::new("04524").unwrap(),
        }
    }

    fn vehicle(price: u32) -> Vehicle {
        Vehicle {
            id: vehicle::Id::from("42"),
            make: vehicle::Make::new("BMW").unwrap(),
            model: vehicle::Model::new("X5").unwrap(),
            year: vehicle::Year::new(2020).unwrap(),
            price: Money::from(price),
            mileage: vehicle::Mileage::from(30_000),
            condition: Condition::Used,
            transmission: Transmission::Automatic,
            fuel_type: FuelType::Diesel,
            body_type: None,
            color: None,
            description: None,
            image_url: None,
            gallery: vec![],
            features: vec![],
            created_at: DateTime::now().coerce(),
        }
    }

    #[tokio::test]
    async fn totals_vehicle_price_and_starts_pending() {
        let db = Fake::default();
        db.tables().vehicles.push(vehicle(45_000));
        let user_id = user::Id::new();

        let order = fake::service(db.clone())
            .execute(PlaceOrder {
                user_id,
                vehicle_id: vehicle::Id::from("42"),
                contact: contact(),
                delivery: DeliveryPreference::Delivery,
            })
            .await
            .unwrap();

        assert_eq!(order.total_amount, Money::from(45_000));
        assert_eq!(order.status, Status::Pending);
        assert_eq!(order.user_id, user_id);
        assert_eq!(db.tables().orders, [order]);
    }

    #[tokio::test]
    async fn refuses_unknown_vehicle() {
        let db = Fake::default();

        let err = fake::service(db.clone())
            .execute(PlaceOrder {
                user_id: user::Id::new(),
                vehicle_id: vehicle::Id::from("missing"),
                contact: contact(),
                delivery: DeliveryPreference::Pickup,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::VehicleNotExists(_)));
        assert!(db.tables().orders.is_empty());
    }
}
