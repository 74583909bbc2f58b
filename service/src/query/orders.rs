//! [`Query`] collection related to the multiple [`Order`]s.

use common::operations::{By, Select};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{user, Order},
    infra::{database, Database},
    Query, Service,
};

use super::DatabaseQuery;

/// Queries all the [`Order`]s of a [`User`], newest first.
pub type ByUser = DatabaseQuery<By<Vec<Order>, user::Id>>;

/// [`Query`] of the [`Order`]s of a [`User`] still being tracked.
///
/// See [`order::Status::is_active()`] for details.
///
/// [`order::Status::is_active()`]: crate::domain::order::Status::is_active
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Active(pub user::Id);

impl<Db, Au, St> Query<Active> for Service<Db, Au, St>
where
    Db: Database<
        Select<By<Vec<Order>, user::Id>>,
        Ok = Vec<Order>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Active(user_id): Active,
    ) -> Result<Self::Ok, Self::Err> {
        let mut orders = self
            .database()
            .execute(Select(By::<Vec<Order>, _>::new(user_id)))
            .await
            .map_err(tracerr::wrap!())?;
        orders.retain(|o| o.status.is_active());
        Ok(orders)
    }
}

#[cfg(test)]
mod spec {
    use common::{DateTime, Money};

    use crate::{
        domain::{
            order::{self, Contact, DeliveryPreference, Status},
            user, vehicle, Order,
        },
        infra::database::fake::{self, Fake},
        Query as _,
    };

    use super::{Active, ByUser};

    fn order(user_id: user::Id, status: Status) -> Order {
        Order {
            id: order::Id::new(),
            user_id,
            vehicle_id: vehicle::Id::from("1"),
            contact: Contact {
                full_name: order::FullName::new("Jane Doe").unwrap(),
                email: user::Email::new("jane@example.com").unwrap(),
                phone: order::Phone::new("010-1234-5678").unwrap(),
                address: order::Address::new("1 Main St").unwrap(),
                city: order::City::new("Seoul").unwrap(),
                state: order::State::new("Seoul").unwrap(),
                zip_code: order::ZipCode::new("04524").unwrap(),
            },
            delivery: DeliveryPreference::Pickup,
            status,
            total_amount: Money::from(1_000),
            created_at: DateTime::now().coerce(),
        }
    }

    #[tokio::test]
    async fn active_skips_finished_orders() {
        let db = Fake::default();
        let user_id = user::Id::new();
        db.tables().orders.extend([
            order(user_id, Status::Pending),
            order(user_id, Status::Delivered),
            order(user_id, Status::Shipped),
            order(user_id, Status::Cancelled),
            order(user::Id::new(), Status::Processing),
        ]);
        let service = fake::service(db);

        let all = service.execute(ByUser::by(user_id)).await.unwrap();
        let active = service.execute(Active(user_id)).await.unwrap();

        assert_eq!(all.len(), 4);
        assert_eq!(
            active.iter().map(|o| o.status).collect::<Vec<_>>(),
            [Status::Pending, Status::Shipped],
        );
    }
}
