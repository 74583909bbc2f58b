//! [`Command`] for offering a [`User`]'s vehicle in a trade-in.
//!
//! [`User`]: crate::domain::User

use common::{operations::Insert, DateTime, Money};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{order, trade_in, user, vehicle, ImageUrl, TradeIn},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for offering a [`User`]'s vehicle in a trade-in.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct SubmitTradeIn {
    /// ID of the [`User`] offering the vehicle.
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// ID of the marketplace [`Vehicle`] the trade-in is requested for, if
    /// any.
    ///
    /// [`Vehicle`]: crate::domain::Vehicle
    pub vehicle_id: Option<vehicle::Id>,

    /// Offered vehicle.
    pub offered: trade_in::OfferedVehicle,

    /// Value the [`User`] expects for the offered vehicle.
    ///
    /// [`User`]: crate::domain::User
    pub estimated_value: Money,

    /// Where the offered vehicle can be inspected.
    pub location: trade_in::Location,

    /// Registered owner of the offered vehicle.
    pub registered_owner: order::FullName,

    /// Phone number to contact the owner by.
    pub contact_number: order::Phone,

    /// Preferred time of the inspection visit.
    pub preferred_visit_time: Option<trade_in::VisitTime>,

    /// Description of the offered vehicle.
    pub description: Option<vehicle::Description>,

    /// Uploaded photos of the offered vehicle.
    pub images: Vec<ImageUrl>,
}

impl<Db, Au, St> Command<SubmitTradeIn> for Service<Db, Au, St>
where
    Db: Database<Insert<TradeIn>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = TradeIn;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SubmitTradeIn,
    ) -> Result<Self::Ok, Self::Err> {
        let SubmitTradeIn {
            user_id,
            vehicle_id,
            offered,
            estimated_value,
            location,
            registered_owner,
            contact_number,
            preferred_visit_time,
            description,
            images,
        } = cmd;

        let trade_in = TradeIn {
            id: trade_in::Id::new(),
            user_id,
            vehicle_id,
            offered,
            estimated_value,
            location,
            registered_owner,
            contact_number,
            preferred_visit_time,
            description,
            images,
            status: trade_in::Status::Pending,
            created_at: DateTime::now().coerce(),
        };
        self.database()
            .execute(Insert(trade_in.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        Ok(trade_in)
    }
}

/// Error of [`SubmitTradeIn`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        command::{Command as _, SubmitTradeIn},
        domain::{order, trade_in, user, vehicle},
        infra::database::fake::{self, Fake},
    };

    fn cmd() -> SubmitTradeIn {
        SubmitTradeIn {
            user_id: user::Id::new(),
            vehicle_id: None,
            offered: trade_in::OfferedVehicle {
                make: vehicle::Make::new("Hyundai").unwrap(),
                model: vehicle::Model::new("Sonata").unwrap(),
                year: vehicle::Year::new(2015).unwrap(),
                mileage: vehicle::Mileage::from(98_000),
                condition: vehicle::Condition::Used,
            },
            estimated_value: Money::from(9_000),
            location: trade_in::Location::new("Busan").unwrap(),
            registered_owner: order::FullName::new("Kim Minsu").unwrap(),
            contact_number: order::Phone::new("010-1234-5678").unwrap(),
            preferred_visit_time: None,
            description: None,
            images: vec![],
        }
    }

    #[tokio::test]
    async fn starts_pending() {
        let db = Fake::default();

        let submitted =
            fake::service(db.clone()).execute(cmd()).await.unwrap();

        assert_eq!(submitted.status, trade_in::Status::Pending);
        assert_eq!(db.tables().trade_ins, [submitted]);
    }

    #[tokio::test]
    async fn surfaces_store_failure() {
        let db = Fake::failing(&["insert trade_ins"]);

        let res = fake::service(db.clone()).execute(cmd()).await;

        assert!(res.is_err());
        assert!(db.tables().trade_ins.is_empty());
    }
}
