//! [`Query`] collection related to the multiple [`Vehicle`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Vehicle,
    infra::{database, Database},
    read::vehicle::list::{Filter, Selector},
    Query, Service,
};

use super::DatabaseQuery;

/// Queries a list of [`Vehicle`]s, newest first.
pub type List = DatabaseQuery<By<Vec<Vehicle>, Selector>>;

/// [`Query`] of the whole [`Vehicle`]s catalogue narrowed down by a
/// [`Filter`].
///
/// The catalogue is fetched anew on every execution, so the result always
/// reflects the current [`Filter`] over the current catalogue.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filtered(pub Filter);

impl<Db, Au, St> Query<Filtered> for Service<Db, Au, St>
where
    Db: Database<
        Select<By<Vec<Vehicle>, Selector>>,
        Ok = Vec<Vehicle>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Vehicle>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Filtered(filter): Filtered,
    ) -> Result<Self::Ok, Self::Err> {
        let all = self
            .database()
            .execute(Select(By::<Vec<Vehicle>, _>::new(Selector::default())))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(filter.apply(&all))
    }
}

#[cfg(test)]
mod spec {
    use common::{DateTime, Money};

    use crate::{
        domain::{
            vehicle::{self, Condition, FuelType, Transmission},
            Vehicle,
        },
        infra::database::fake::{self, Fake},
        read::vehicle::list::{Filter, Selector},
        Query as _,
    };

    use super::{Filtered, List};

    fn vehicle(
        id: &str,
        make: &str,
        price: u32,
        condition: Condition,
        fuel_type: FuelType,
    ) -> Vehicle {
        Vehicle {
            id: vehicle::Id::from(id),
            make: vehicle::Make::new(make).unwrap(),
            model: vehicle::Model::new("Base").unwrap(),
            year: vehicle::Year::new(2022).unwrap(),
            price: Money::from(price),
            mileage: vehicle::Mileage::default(),
            condition,
            transmission: Transmission::Automatic,
            fuel_type,
            body_type: None,
            color: None,
            description: None,
            image_url: None,
            gallery: vec![],
            features: vec![],
            created_at: DateTime::now().coerce(),
        }
    }

    fn seeded() -> Fake {
        let db = Fake::default();
        db.tables().vehicles.extend([
            vehicle("1", "BMW", 20_000, Condition::Used, FuelType::Petrol),
            vehicle("2", "Tesla", 90_000, Condition::New, FuelType::Electric),
        ]);
        db
    }

    fn ids(vehicles: &[Vehicle]) -> Vec<&str> {
        vehicles.iter().map(|v| v.id.as_ref()).collect()
    }

    #[tokio::test]
    async fn recomputes_from_full_catalogue() {
        let db = seeded();
        let service = fake::service(db.clone());

        let all = service.execute(Filtered(Filter::default())).await.unwrap();
        assert_eq!(ids(&all), ["1", "2"]);

        let cheap = service
            .execute(Filtered(Filter {
                max_price: Money::from(50_000),
                ..Filter::default()
            }))
            .await
            .unwrap();
        assert_eq!(ids(&cheap), ["1"]);

        db.tables().vehicles.push(vehicle(
            "3",
            "Kia",
            30_000,
            Condition::Used,
            FuelType::Hybrid,
        ));
        let cheap = service
            .execute(Filtered(Filter {
                max_price: Money::from(50_000),
                ..Filter::default()
            }))
            .await
            .unwrap();
        assert_eq!(ids(&cheap), ["1", "3"]);
    }

    #[tokio::test]
    async fn lists_by_condition() {
        let service = fake::service(seeded());

        let new = service
            .execute(List::by(Selector {
                condition: Some(Condition::New),
            }))
            .await
            .unwrap();

        assert_eq!(ids(&new), ["2"]);
    }
}
