//! [`KoreaOrder`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        cart,
        korea_order::{self, BudgetRange, Product, Shipping},
        user, KoreaOrder,
    },
    infra::{
        database,
        supabase::{Error, Supabase},
        Database,
    },
};

use super::{
    eq, map_rows, parse, parse_kind, parse_opt, snake_case, NEWEST_FIRST,
};

/// Table storing [`KoreaOrder`]s.
const TABLE: &str = "korea_orders";

/// Raw `korea_orders` row.
#[derive(Debug, Deserialize)]
struct Row {
    id: String,
    user_id: String,
    product_name: String,
    product_type: String,
    #[serde(default)]
    product_link: Option<String>,
    quantity: i64,
    budget_range: String,
    shipping_address: String,
    destination_country: String,
    preferred_shipping: String,
    #[serde(default)]
    additional_notes: Option<String>,
    contact_number: String,
    email: String,
    #[serde(default = "pending")]
    status: String,
    #[serde(default)]
    tracking_number: Option<String>,
    created_at: String,
}

/// Default status of a `korea_orders` row.
fn pending() -> String {
    "pending".into()
}

impl TryFrom<Row> for KoreaOrder {
    type Error = Error;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        let malformed = |what: &str| {
            Error::Malformed(format!("{what} of `{TABLE}({})`", row.id))
        };

        let quantity = u32::try_from(row.quantity)
            .ok()
            .and_then(cart::Quantity::new)
            .ok_or_else(|| malformed("invalid quantity"))?;
        let budget = BudgetRange::from_label(row.budget_range.trim())
            .ok_or_else(|| malformed("invalid budget range"))?;

        Ok(Self {
            id: parse(&row.id, "Korea order ID")?,
            user_id: parse(&row.user_id, "user ID")?,
            product: Product {
                name: parse(&row.product_name, "product name")?,
                kind: parse_kind(&row.product_type, "product type")?,
                link: parse_opt(row.product_link, "product link")?,
            },
            quantity,
            budget,
            shipping: Shipping {
                address: parse(&row.shipping_address, "shipping address")?,
                country: parse(&row.destination_country, "country")?,
                method: parse_kind(&row.preferred_shipping, "shipping")?,
            },
            notes: parse_opt(row.additional_notes, "notes")?,
            contact_number: parse(&row.contact_number, "contact number")?,
            email: parse(&row.email, "email")?,
            status: parse(&row.status, "status")?,
            tracking_number: parse_opt(
                row.tracking_number,
                "tracking number",
            )?,
            created_at: super::timestamp(&row.created_at)?,
        })
    }
}

/// New `korea_orders` row.
#[derive(Debug, Serialize)]
struct NewRow<'a> {
    id: korea_order::Id,
    user_id: user::Id,
    product_name: &'a str,
    product_type: String,
    product_link: Option<&'a str>,
    quantity: u32,
    budget_range: &'static str,
    shipping_address: &'a str,
    destination_country: &'a str,
    preferred_shipping: String,
    additional_notes: Option<&'a str>,
    contact_number: &'a str,
    email: &'a str,
    status: String,
    created_at: String,
}

impl<'a> From<&'a KoreaOrder> for NewRow<'a> {
    fn from(o: &'a KoreaOrder) -> Self {
        Self {
            id: o.id,
            user_id: o.user_id,
            product_name: o.product.name.as_ref(),
            product_type: snake_case(o.product.kind.as_str()),
            product_link: o.product.link.as_ref().map(AsRef::as_ref),
            quantity: o.quantity.get(),
            budget_range: o.budget.label(),
            shipping_address: o.shipping.address.as_ref(),
            destination_country: o.shipping.country.as_ref(),
            preferred_shipping: snake_case(o.shipping.method.as_str()),
            additional_notes: o.notes.as_ref().map(AsRef::as_ref),
            contact_number: o.contact_number.as_ref(),
            email: o.email.as_ref(),
            status: o.status.as_str().to_lowercase(),
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

impl Database<Insert<KoreaOrder>> for Supabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(korea_order): Insert<KoreaOrder>,
    ) -> Result<Self::Ok, Self::Err> {
        self.insert(TABLE, &NewRow::from(&korea_order))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))
    }
}

impl Database<Select<By<Vec<KoreaOrder>, user::Id>>> for Supabase {
    type Ok = Vec<KoreaOrder>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<KoreaOrder>, user::Id>>,
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
    use crate::domain::{
        korea_order::{BudgetRange, ProductType, ShippingMethod},
        order, KoreaOrder,
    };

    use super::{NewRow, Row};

    const ROW: &str = r#"{
        "id": "7d8c2f7e-1b6a-4c5d-9e3f-2a1b0c9d8e7f",
        "user_id": "0b6c7f9e-2d1a-4b7e-8c3f-6a5d4e3c2b1a",
        "product_name": "Brake pads",
        "product_type": "auto_parts",
        "product_link": "",
        "quantity": 4,
        "budget_range": "0-1000",
        "shipping_address": "12 Harbour Rd",
        "destination_country": "Kenya",
        "preferred_shipping": "sea",
        "additional_notes": null,
        "contact_number": "+254 700 000000",
        "email": "jane@example.com",
        "status": "shipped",
        "tracking_number": "KR123456789",
        "created_at": "2024-03-01T10:15:30+00:00"
    }"#;

    #[test]
    fn maps_form_values() {
        let ko: KoreaOrder = serde_json::from_str::<Row>(ROW)
            .unwrap()
            .try_into()
            .unwrap();

        assert_eq!(ko.product.kind, ProductType::AutoParts);
        assert_eq!(ko.product.link, None);
        assert_eq!(ko.quantity.get(), 4);
        assert_eq!(ko.budget, BudgetRange::UpTo1000);
        assert_eq!(ko.shipping.method, ShippingMethod::Sea);
        assert_eq!(ko.status, order::Status::Shipped);
        assert_eq!(
            ko.tracking_number.as_ref().map(AsRef::as_ref),
            Some("KR123456789"),
        );

        let row = serde_json::to_value(NewRow::from(&ko)).unwrap();
        assert_eq!(row["product_type"], "auto_parts");
        assert_eq!(row["budget_range"], "0-1000");
        assert_eq!(row["preferred_shipping"], "sea");
        assert_eq!(row["status"], "shipped");
    }

    #[test]
    fn rejects_zero_quantity() {
        let row = ROW.replace(r#""quantity": 4"#, r#""quantity": 0"#);

        let res =
            KoreaOrder::try_from(serde_json::from_str::<Row>(&row).unwrap());

        assert!(res.is_err());
    }
}
