//! [`TradeIn`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select},
    Money,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        trade_in::{self, OfferedVehicle},
        user, vehicle, TradeIn,
    },
    infra::{
        database,
        supabase::{Error, Supabase},
        Database,
    },
};

use super::{
    eq, map_rows, parse, parse_all, parse_opt, string_list, NEWEST_FIRST,
};

/// Table storing [`TradeIn`]s.
const TABLE: &str = "trade_ins";

/// Raw `trade_ins` row.
#[derive(Debug, Deserialize)]
struct Row {
    id: String,
    user_id: String,
    #[serde(default)]
    car_id: Option<serde_json::Value>,
    make: String,
    model: String,
    year: i64,
    mileage: i64,
    condition: String,
    estimated_value: Decimal,
    location: String,
    registered_owner: String,
    contact_number: String,
    #[serde(default)]
    preferred_visit_time: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    images: Vec<String>,
    status: String,
    created_at: String,
}

impl TryFrom<Row> for TradeIn {
    type Error = Error;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        let malformed = |what: &str| {
            Error::Malformed(format!("{what} of `{TABLE}({})`", row.id))
        };

        let year = u16::try_from(row.year)
            .ok()
            .and_then(vehicle::Year::new)
            .ok_or_else(|| malformed("invalid year"))?;
        let mileage = u32::try_from(row.mileage)
            .map_err(|_| malformed("invalid mileage"))?;
        let estimated_value = Money::new(row.estimated_value)
            .ok_or_else(|| malformed("negative estimated value"))?;
        let vehicle_id = match row.car_id {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s.into()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string().into()),
            Some(_) => return Err(malformed("invalid car ID")),
        };

        Ok(Self {
            id: parse(&row.id, "trade-in ID")?,
            user_id: parse(&row.user_id, "user ID")?,
            vehicle_id,
            offered: OfferedVehicle {
                make: parse(&row.make, "make")?,
                model: parse(&row.model, "model")?,
                year,
                mileage: mileage.into(),
                condition: parse(&row.condition, "condition")?,
            },
            estimated_value,
            location: parse(&row.location, "location")?,
            registered_owner: parse(&row.registered_owner, "registered owner")?,
            contact_number: parse(&row.contact_number, "contact number")?,
            preferred_visit_time: parse_opt(
                row.preferred_visit_time,
                "preferred visit time",
            )?,
            description: parse_opt(row.description, "description")?,
            images: parse_all(row.images, "image URL")?,
            status: parse(&row.status, "status")?,
            created_at: super::timestamp(&row.created_at)?,
        })
    }
}

/// New `trade_ins` row.
#[derive(Debug, Serialize)]
struct NewRow<'a> {
    id: trade_in::Id,
    user_id: user::Id,
    car_id: Option<&'a str>,
    make: &'a str,
    model: &'a str,
    year: u16,
    mileage: u32,
    condition: String,
    estimated_value: Money,
    location: &'a str,
    registered_owner: &'a str,
    contact_number: &'a str,
    preferred_visit_time: Option<&'a str>,
    description: Option<&'a str>,
    images: Vec<&'a str>,
    status: String,
    created_at: String,
}

impl<'a> From<&'a TradeIn> for NewRow<'a> {
    fn from(t: &'a TradeIn) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            car_id: t.vehicle_id.as_ref().map(AsRef::as_ref),
            make: t.offered.make.as_ref(),
            model: t.offered.model.as_ref(),
            year: t.offered.year.into(),
            mileage: t.offered.mileage.into(),
            condition: t.offered.condition.as_str().to_lowercase(),
            estimated_value: t.estimated_value,
            location: t.location.as_ref(),
            registered_owner: t.registered_owner.as_ref(),
            contact_number: t.contact_number.as_ref(),
            preferred_visit_time: t
                .preferred_visit_time
                .as_ref()
                .map(AsRef::as_ref),
            description: t.description.as_ref().map(AsRef::as_ref),
            images: t.images.iter().map(AsRef::as_ref).collect(),
            status: t.status.as_str().to_lowercase(),
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

impl Database<Insert<TradeIn>> for Supabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(trade_in): Insert<TradeIn>,
    ) -> Result<Self::Ok, Self::Err> {
        self.insert(TABLE, &NewRow::from(&trade_in))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))
    }
}

impl Database<Select<By<Vec<TradeIn>, user::Id>>> for Supabase {
    type Ok = Vec<TradeIn>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<TradeIn>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();
        let rows = self
            .select::<Row>(
                TABLE,
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
