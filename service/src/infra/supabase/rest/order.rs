//! [`Order`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select},
    Money,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        order::{self, Contact},
        user, Order,
    },
    infra::{
        database,
        supabase::{Error, Supabase},
        Database,
    },
};

use super::{eq, map_rows, parse, NEWEST_FIRST};

/// Table storing [`Order`]s.
const TABLE: &str = "orders";

/// Raw `orders` row.
#[derive(Debug, Deserialize)]
struct Row {
    id: String,
    user_id: String,
    #[serde(deserialize_with = "super::string_or_number")]
    car_id: String,
    full_name: String,
    email: String,
    phone: String,
    address: String,
    city: String,
    state: String,
    zip_code: String,
    delivery_preference: String,
    status: String,
    total_amount: Decimal,
    created_at: String,
}

impl TryFrom<Row> for Order {
    type Error = Error;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        let total_amount = Money::new(row.total_amount).ok_or_else(|| {
            Error::Malformed(format!("negative total of `{TABLE}({})`", row.id))
        })?;

        Ok(Self {
            id: parse(&row.id, "order ID")?,
            user_id: parse(&row.user_id, "user ID")?,
            vehicle_id: row.car_id.into(),
            contact: Contact {
                full_name: parse(&row.full_name, "full name")?,
                email: parse(&row.email, "email")?,
                phone: parse(&row.phone, "phone")?,
                address: parse(&row.address, "address")?,
                city: parse(&row.city, "city")?,
                state: parse(&row.state, "state")?,
                zip_code: parse(&row.zip_code, "ZIP code")?,
            },
            delivery: parse(&row.delivery_preference, "delivery preference")?,
            status: parse(&row.status, "status")?,
            total_amount,
            created_at: super::timestamp(&row.created_at)?,
        })
    }
}

/// New `orders` row.
#[derive(Debug, Serialize)]
struct NewRow<'a> {
    id: order::Id,
    user_id: user::Id,
    car_id: &'a str,
    full_name: &'a str,
    email: &'a str,
    phone: &'a str,
    address: &'a str,
    city: &'a str,
    state: &'a str,
    zip_code: &'a str,
    delivery_preference: String,
    status: String,
    total_amount: Money,
    created_at: String,
}

impl<'a> From<&'a Order> for NewRow<'a> {
    fn from(o: &'a Order) -> Self {
        Self {
            id: o.id,
            user_id: o.user_id,
            car_id: o.vehicle_id.as_ref(),
            full_name: o.contact.full_name.as_ref(),
            email: o.contact.email.as_ref(),
            phone: o.contact.phone.as_ref(),
            address: o.contact.address.as_ref(),
            city: o.contact.city.as_ref(),
            state: o.contact.state.as_ref(),
            zip_code: o.contact.zip_code.as_ref(),
            delivery_preference: o.delivery.as_str().to_lowercase(),
            status: o.status.as_str().to_lowercase(),
            total_amount: o.total_amount,
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

impl Database<Insert<Order>> for Supabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(order): Insert<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        self.insert(TABLE, &NewRow::from(&order))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))
    }
}

impl Database<Select<By<Vec<Order>, user::Id>>> for Supabase {
    type Ok = Vec<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Order>, user::Id>>,
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

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::domain::{
        order::{DeliveryPreference, Status},
        Order,
    };

    use super::{NewRow, Row};

    #[test]
    fn maps_lowercase_kinds() {
        let order: Order = serde_json::from_str::<Row>(
            r#"{
                "id": "5f0e9c52-8f4c-4c2e-9a53-3b1a2f7f0d11",
                "user_id": "0b6c7f9e-2d1a-4b7e-8c3f-6a5d4e3c2b1a",
                "car_id": "1",
                "full_name": "Jane Doe",
                "email": "jane@example.com",
                "phone": "+1 555 0100",
                "address": "1 Main St",
                "city": "Springfield",
                "state": "IL",
                "zip_code": "62701",
                "delivery_preference": "pickup",
                "status": "processing",
                "total_amount": 45000,
                "created_at": "2024-03-01T10:15:30+00:00"
            }"#,
        )
        .unwrap()
        .try_into()
        .unwrap();

        assert_eq!(order.delivery, DeliveryPreference::Pickup);
        assert_eq!(order.status, Status::Processing);
        assert_eq!(order.total_amount, Money::from(45_000));

        let row = serde_json::to_value(NewRow::from(&order)).unwrap();
        assert_eq!(row["status"], "processing");
        assert_eq!(row["delivery_preference"], "pickup");
    }
}
