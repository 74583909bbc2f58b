//! In-memory [`Database`] recording the operations it executes.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{
        kyc, listing, spare_part, user, vehicle, KoreaOrder, Listing, Order,
        SparePart, TradeIn, User, Vehicle,
    },
    infra::{database, supabase, Database},
    read, Config, Service,
};

/// Tables of a [`Fake`] along with its operations log.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) vehicles: Vec<Vehicle>,
    pub(crate) listings: Vec<Listing>,
    pub(crate) parts: Vec<SparePart>,
    pub(crate) orders: Vec<Order>,
    pub(crate) trade_ins: Vec<TradeIn>,
    pub(crate) korea_orders: Vec<KoreaOrder>,
    pub(crate) kyc_verifications: Vec<kyc::Verification>,
    pub(crate) users: Vec<User>,
    log: Vec<String>,
    failing: HashSet<String>,
}

/// In-memory [`Database`] failing the configured operations.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fake(Arc<Mutex<Tables>>);

impl Fake {
    /// Creates a new [`Fake`] failing the given operations, named as
    /// `"{operation} {table}"` (e.g. `"insert cars"`).
    pub(crate) fn failing(ops: &[&str]) -> Self {
        let fake = Self::default();
        fake.tables().failing =
            ops.iter().map(ToString::to_string).collect();
        fake
    }

    /// Locks the [`Tables`] of this [`Fake`].
    pub(crate) fn tables(&self) -> MutexGuard<'_, Tables> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the log of the executed operations.
    pub(crate) fn log(&self) -> Vec<String> {
        self.tables().log.clone()
    }

    /// Returns all the stored [`Vehicle`]s.
    pub(crate) fn vehicles(&self) -> Vec<Vehicle> {
        self.tables().vehicles.clone()
    }

    /// Logs the given operation, failing it if configured so.
    fn record(&self, op: &str) -> Result<MutexGuard<'_, Tables>, Error> {
        let mut tables = self.tables();
        tables.log.push(op.to_owned());
        if tables.failing.contains(op) {
            return Err(tracerr::new!(database::Error::from(
                supabase::Error::Api {
                    status: 503,
                    message: format!("`{op}` is unavailable"),
                },
            )));
        }
        Ok(tables)
    }
}

/// Shortcut for a [`Traced`] [`database::Error`].
type Error = Traced<database::Error>;

/// Creates a new [`Service`] backed by the given [`Fake`].
pub(crate) fn service(db: Fake) -> Service<Fake, (), ()> {
    let config = Config {
        jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(b"secret"),
        images_bucket: "images".into(),
    };
    Service::new(config, db, (), ())
}

impl Database<Insert<Vehicle>> for Fake {
    type Ok = ();
    type Err = Error;

    async fn execute(&self, op: Insert<Vehicle>) -> Result<(), Error> {
        self.record("insert cars")?.vehicles.push(op.0);
        Ok(())
    }
}

impl Database<Select<By<Option<Vehicle>, vehicle::Id>>> for Fake {
    type Ok = Option<Vehicle>;
    type Err = Error;

    async fn execute(
        &self,
        op: Select<By<Option<Vehicle>, vehicle::Id>>,
    ) -> Result<Self::Ok, Error> {
        let id = op.0.into_inner();
        let tables = self.record("select cars")?;
        Ok(tables.vehicles.iter().find(|v| v.id == id).cloned())
    }
}

impl Database<Select<By<Vec<Vehicle>, read::vehicle::list::Selector>>>
    for Fake
{
    type Ok = Vec<Vehicle>;
    type Err = Error;

    async fn execute(
        &self,
        op: Select<By<Vec<Vehicle>, read::vehicle::list::Selector>>,
    ) -> Result<Self::Ok, Error> {
        let selector = op.0.into_inner();
        let tables = self.record("select cars")?;
        Ok(tables
            .vehicles
            .iter()
            .filter(|v| selector.condition.is_none_or(|c| v.condition == c))
            .cloned()
            .collect())
    }
}

impl Database<Delete<By<Vehicle, vehicle::Id>>> for Fake {
    type Ok = ();
    type Err = Error;

    async fn execute(
        &self,
        op: Delete<By<Vehicle, vehicle::Id>>,
    ) -> Result<(), Error> {
        let id = op.0.into_inner();
        self.record("delete cars")?.vehicles.retain(|v| v.id != id);
        Ok(())
    }
}

impl Database<Insert<Listing>> for Fake {
    type Ok = ();
    type Err = Error;

    async fn execute(&self, op: Insert<Listing>) -> Result<(), Error> {
        self.record("insert user_cars")?.listings.push(op.0);
        Ok(())
    }
}

impl Database<Select<By<Option<Listing>, (user::Id, vehicle::Id)>>>
    for Fake
{
    type Ok = Option<Listing>;
    type Err = Error;

    async fn execute(
        &self,
        op: Select<By<Option<Listing>, (user::Id, vehicle::Id)>>,
    ) -> Result<Self::Ok, Error> {
        let (user_id, vehicle_id) = op.0.into_inner();
        let tables = self.record("select user_cars")?;
        Ok(tables
            .listings
            .iter()
            .find(|l| l.user_id == user_id && l.vehicle_id == vehicle_id)
            .cloned())
    }
}

impl Database<Delete<By<Listing, listing::Id>>> for Fake {
    type Ok = ();
    type Err = Error;

    async fn execute(
        &self,
        op: Delete<By<Listing, listing::Id>>,
    ) -> Result<(), Error> {
        let id = op.0.into_inner();
        self.record("delete user_cars")?.listings.retain(|l| l.id != id);
        Ok(())
    }
}

impl Database<Select<By<Option<SparePart>, spare_part::Id>>> for Fake {
    type Ok = Option<SparePart>;
    type Err = Error;

    async fn execute(
        &self,
        op: Select<By<Option<SparePart>, spare_part::Id>>,
    ) -> Result<Self::Ok, Error> {
        let id = op.0.into_inner();
        let tables = self.record("select spare_parts")?;
        Ok(tables.parts.iter().find(|p| p.id == id).cloned())
    }
}

impl Database<Insert<SparePart>> for Fake {
    type Ok = ();
    type Err = Error;

    async fn execute(&self, op: Insert<SparePart>) -> Result<(), Error> {
        self.record("insert spare_parts")?.parts.push(op.0);
        Ok(())
    }
}

impl Database<Delete<By<SparePart, spare_part::Id>>> for Fake {
    type Ok = ();
    type Err = Error;

    async fn execute(
        &self,
        op: Delete<By<SparePart, spare_part::Id>>,
    ) -> Result<(), Error> {
        let id = op.0.into_inner();
        self.record("delete spare_parts")?.parts.retain(|p| p.id != id);
        Ok(())
    }
}

impl Database<Insert<Order>> for Fake {
    type Ok = ();
    type Err = Error;

    async fn execute(&self, op: Insert<Order>) -> Result<(), Error> {
        self.record("insert orders")?.orders.push(op.0);
        Ok(())
    }
}

impl Database<Select<By<Vec<Order>, user::Id>>> for Fake {
    type Ok = Vec<Order>;
    type Err = Error;

    async fn execute(
        &self,
        op: Select<By<Vec<Order>, user::Id>>,
    ) -> Result<Self::Ok, Error> {
        let user_id = op.0.into_inner();
        let tables = self.record("select orders")?;
        Ok(tables
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }
}

impl Database<Insert<TradeIn>> for Fake {
    type Ok = ();
    type Err = Error;

    async fn execute(&self, op: Insert<TradeIn>) -> Result<(), Error> {
        self.record("insert trade_ins")?.trade_ins.push(op.0);
        Ok(())
    }
}

impl Database<Insert<KoreaOrder>> for Fake {
    type Ok = ();
    type Err = Error;

    async fn execute(&self, op: Insert<KoreaOrder>) -> Result<(), Error> {
        self.record("insert korea_orders")?.korea_orders.push(op.0);
        Ok(())
    }
}

impl Database<Select<By<Vec<KoreaOrder>, user::Id>>> for Fake {
    type Ok = Vec<KoreaOrder>;
    type Err = Error;

    async fn execute(
        &self,
        op: Select<By<Vec<KoreaOrder>, user::Id>>,
    ) -> Result<Self::Ok, Error> {
        let user_id = op.0.into_inner();
        let tables = self.record("select korea_orders")?;
        Ok(tables
            .korea_orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }
}

impl Database<Insert<kyc::Verification>> for Fake {
    type Ok = ();
    type Err = Error;

    async fn execute(
        &self,
        op: Insert<kyc::Verification>,
    ) -> Result<(), Error> {
        self.record("insert kyc_verifications")?
            .kyc_verifications
            .push(op.0);
        Ok(())
    }
}

impl Database<Select<By<Option<User>, user::Id>>> for Fake {
    type Ok = Option<User>;
    type Err = Error;

    async fn execute(
        &self,
        op: Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Error> {
        let id = op.0.into_inner();
        let tables = self.record("select profiles")?;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }
}

impl Database<Update<User>> for Fake {
    type Ok = ();
    type Err = Error;

    async fn execute(&self, op: Update<User>) -> Result<(), Error> {
        let user = op.0;
        let mut tables = self.record("update profiles")?;
        tables.users.retain(|u| u.id != user.id);
        tables.users.push(user);
        Ok(())
    }
}
