//! [`Listing`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{listing, user, vehicle, Listing, Vehicle},
    infra::{
        database,
        supabase::{Error, Supabase},
        Database,
    },
    read,
};

use super::{eq, map_rows, parse, vehicle::Row as VehicleRow, NEWEST_FIRST};

/// Table linking [`User`]s to the [`Vehicle`]s they list.
///
/// [`User`]: crate::domain::User
const TABLE: &str = "user_cars";

/// Raw `user_cars` row.
#[derive(Debug, Deserialize)]
struct Row {
    id: String,
    user_id: String,
    #[serde(deserialize_with = "super::string_or_number")]
    car_id: String,
    #[serde(default = "default_is_owner")]
    is_owner: bool,
    created_at: String,
}

/// Rows created before the `is_owner` column existed were created by owners.
const fn default_is_owner() -> bool {
    true
}

impl TryFrom<Row> for Listing {
    type Error = Error;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse(&row.id, "listing ID")?,
            user_id: parse(&row.user_id, "user ID")?,
            vehicle_id: row.car_id.into(),
            is_owner: row.is_owner,
            created_at: super::timestamp(&row.created_at)?,
        })
    }
}

/// Raw `user_cars` row with the embedded `cars` row.
#[derive(Debug, Deserialize)]
struct OwnedRow {
    #[serde(flatten)]
    listing: Row,
    cars: Option<VehicleRow>,
}

impl TryFrom<OwnedRow> for read::listing::Owned {
    type Error = Error;

    fn try_from(row: OwnedRow) -> Result<Self, Self::Error> {
        let listing = Listing::try_from(row.listing)?;
        let vehicle = row
            .cars
            .ok_or_else(|| {
                Error::Malformed(format!(
                    "`{TABLE}({})` references no vehicle",
                    listing.id,
                ))
            })
            .and_then(Vehicle::try_from)?;
        Ok(Self { listing, vehicle })
    }
}

/// New `user_cars` row.
#[derive(Debug, Serialize)]
struct NewRow<'a> {
    id: listing::Id,
    user_id: user::Id,
    car_id: &'a str,
    is_owner: bool,
    created_at: String,
}

impl Database<Insert<Listing>> for Supabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let row = NewRow {
            id: listing.id,
            user_id: listing.user_id,
            car_id: listing.vehicle_id.as_ref(),
            is_owner: listing.is_owner,
            created_at: listing.created_at.to_rfc3339(),
        };
        self.insert(TABLE, &row)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))
    }
}

impl Database<Select<By<Option<Listing>, (user::Id, vehicle::Id)>>>
    for Supabase
{
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, (user::Id, vehicle::Id)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (user_id, vehicle_id) = by.into_inner();
        self.select::<Row>(
            TABLE,
            &[eq("user_id", user_id), eq("car_id", &vehicle_id)],
        )
        .await
        .map_err(tracerr::map_from_and_wrap!(=> database::Error))?
        .into_iter()
        .next()
        .map(Listing::try_from)
        .transpose()
        .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl Database<Select<By<Vec<read::listing::Owned>, user::Id>>> for Supabase {
    type Ok = Vec<read::listing::Owned>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::listing::Owned>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();
        let rows = self
            .select_columns::<OwnedRow>(
                TABLE,
                "*,cars(*)",
                &[
                    eq("user_id", user_id),
                    (NEWEST_FIRST.0, NEWEST_FIRST.1.into()),
                ],
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        Ok(map_rows(TABLE, rows))
    }
}

impl Database<Delete<By<Listing, listing::Id>>> for Supabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Listing, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.delete(TABLE, &[eq("id", id)])
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))
    }
}
