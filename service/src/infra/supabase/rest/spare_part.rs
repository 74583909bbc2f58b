//! [`SparePart`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select},
    Money,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{spare_part, user, SparePart},
    infra::{
        database,
        supabase::{Error, Supabase},
        Database,
    },
};

use super::{
    eq, map_rows, parse, parse_all, parse_opt, string_list, NEWEST_FIRST,
};

/// Table storing [`SparePart`]s.
const TABLE: &str = "spare_parts";

/// Raw `spare_parts` row.
#[derive(Debug, Deserialize)]
struct Row {
    #[serde(deserialize_with = "super::string_or_number")]
    id: String,
    #[serde(default)]
    user_id: Option<String>,
    name: String,
    category: String,
    price: Decimal,
    #[serde(default, deserialize_with = "string_list")]
    compatibility: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    created_at: String,
}

impl TryFrom<Row> for SparePart {
    type Error = Error;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        let price = Money::new(row.price).ok_or_else(|| {
            Error::Malformed(format!("negative price of `{TABLE}({})`", row.id))
        })?;

        Ok(Self {
            seller_id: parse_opt::<user::Id>(row.user_id, "seller ID")?,
            name: parse(&row.name, "name")?,
            category: parse(&row.category, "category")?,
            price,
            compatibility: parse_all(row.compatibility, "compatibility")?,
            description: parse_opt(row.description, "description")?,
            image_url: parse_opt(row.image.or(row.image_url), "image URL")?,
            created_at: super::timestamp(&row.created_at)?,
            id: row.id.into(),
        })
    }
}

/// New `spare_parts` row.
#[derive(Debug, Serialize)]
struct NewRow<'a> {
    id: &'a str,
    user_id: Option<user::Id>,
    name: &'a str,
    category: &'a str,
    price: Money,
    compatibility: Vec<&'a str>,
    description: Option<&'a str>,
    image: Option<&'a str>,
    created_at: String,
}

impl<'a> From<&'a SparePart> for NewRow<'a> {
    fn from(p: &'a SparePart) -> Self {
        Self {
            id: p.id.as_ref(),
            user_id: p.seller_id,
            name: p.name.as_ref(),
            category: p.category.as_ref(),
            price: p.price,
            compatibility: p.compatibility.iter().map(AsRef::as_ref).collect(),
            description: p.description.as_ref().map(AsRef::as_ref),
            image: p.image_url.as_ref().map(AsRef::as_ref),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

impl Database<Select<By<Vec<SparePart>, ()>>> for Supabase {
    type Ok = Vec<SparePart>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<SparePart>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let rows = self
            .select::<Row>(TABLE, &[(NEWEST_FIRST.0, NEWEST_FIRST.1.into())])
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        Ok(map_rows(TABLE, rows))
    }
}

impl Database<Select<By<Vec<SparePart>, user::Id>>> for Supabase {
    type Ok = Vec<SparePart>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<SparePart>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let seller_id = by.into_inner();
        let rows = self
            .select::<Row>(
                TABLE,
                &[
                    eq("user_id", seller_id),
                    (NEWEST_FIRST.0, NEWEST_FIRST.1.into()),
                ],
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        Ok(map_rows(TABLE, rows))
    }
}

impl Database<Select<By<Option<SparePart>, spare_part::Id>>> for Supabase {
    type Ok = Option<SparePart>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<SparePart>, spare_part::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.select::<Row>(TABLE, &[eq("id", &id)])
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?
            .into_iter()
            .next()
            .map(SparePart::try_from)
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl Database<Insert<SparePart>> for Supabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(part): Insert<SparePart>,
    ) -> Result<Self::Ok, Self::Err> {
        self.insert(TABLE, &NewRow::from(&part))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))
    }
}

impl Database<Delete<By<SparePart, spare_part::Id>>> for Supabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<SparePart, spare_part::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.delete(TABLE, &[eq("id", &id)])
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))
    }
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::domain::SparePart;

    use super::Row;

    #[test]
    fn maps_row() {
        let part: SparePart = serde_json::from_str::<Row>(
            r#"{
                "id": 3,
                "user_id": null,
                "name": "Brake pads",
                "category": "Brakes",
                "price": 89.99,
                "compatibility": ["BMW 3 Series", "BMW 5 Series"],
                "image": "https://cdn.example.com/pads.jpg",
                "created_at": "2024-03-01T10:15:30+00:00"
            }"#,
        )
        .unwrap()
        .try_into()
        .unwrap();

        assert_eq!(part.id.as_ref(), "3");
        assert!(part.seller_id.is_none());
        assert_eq!(part.price.to_string(), "$89.99");
        assert!(part.price > Money::from(89));
        assert_eq!(part.compatibility.len(), 2);
        assert!(part.image_url.is_some());
    }
}
