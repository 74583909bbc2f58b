//! [`Vehicle`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select},
    Money,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{
        vehicle::{self, Condition},
        ImageUrl, Vehicle,
    },
    infra::{
        database,
        supabase::{Error, Supabase},
        Database,
    },
    read,
};

use super::{
    eq, map_rows, parse, parse_all, parse_opt, string_list, NEWEST_FIRST,
};

/// Table storing [`Vehicle`]s.
const TABLE: &str = "cars";

/// Raw `cars` row.
///
/// Different clients wrote the same data under different column names, so
/// all of them are accepted here.
#[derive(Debug, Deserialize)]
pub(super) struct Row {
    #[serde(deserialize_with = "super::string_or_number")]
    id: String,
    make: String,
    model: String,
    year: i64,
    price: Decimal,
    #[serde(default)]
    mileage: Option<i64>,
    #[serde(default)]
    condition: Option<String>,
    #[serde(default)]
    flag: Option<String>,
    #[serde(default)]
    transmission: Option<String>,
    #[serde(default)]
    fuel_type: Option<String>,
    #[serde(default, rename = "fuelType")]
    fuel_type_camel: Option<String>,
    #[serde(default)]
    body_type: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    gallery_images: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    images: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    features: Vec<String>,
    created_at: String,
}

impl TryFrom<Row> for Vehicle {
    type Error = Error;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        let malformed = |what: &str| {
            Error::Malformed(format!("{what} of `cars(id: {})`", row.id))
        };

        let condition = row
            .condition
            .as_deref()
            .or(row.flag.as_deref())
            .and_then(parse_condition)
            .ok_or_else(|| malformed("missing condition"))?;
        let year = u16::try_from(row.year)
            .ok()
            .and_then(vehicle::Year::new)
            .ok_or_else(|| malformed("invalid year"))?;
        let mileage = row
            .mileage
            .map(u32::try_from)
            .transpose()
            .map_err(|_| malformed("invalid mileage"))?
            .unwrap_or_default();
        let price =
            Money::new(row.price).ok_or_else(|| malformed("negative price"))?;
        let fuel_type = row
            .fuel_type
            .clone()
            .or(row.fuel_type_camel.clone())
            .ok_or_else(|| malformed("missing fuel type"))?;
        let transmission = row
            .transmission
            .clone()
            .ok_or_else(|| malformed("missing transmission"))?;

        Ok(Self {
            id: row.id.into(),
            make: parse(&row.make, "make")?,
            model: parse(&row.model, "model")?,
            year,
            price,
            mileage: mileage.into(),
            condition,
            transmission: parse(&transmission, "transmission")?,
            fuel_type: parse(&fuel_type, "fuel type")?,
            body_type: parse_opt(row.body_type, "body type")?,
            color: parse_opt(row.color, "color")?,
            description: parse_opt(row.description, "description")?,
            image_url: parse_opt::<ImageUrl>(
                row.image_url.or(row.image),
                "image URL",
            )?,
            gallery: parse_all(
                row.gallery_images.into_iter().chain(row.images).collect(),
                "image URL",
            )?,
            features: parse_all(row.features, "feature")?,
            created_at: super::timestamp(&row.created_at)?,
        })
    }
}

/// Parses a [`Condition`] out of a `condition` or a `flag` column value.
///
/// Imported vehicles are brand new ones.
fn parse_condition(raw: &str) -> Option<Condition> {
    if raw.trim().eq_ignore_ascii_case("import") {
        return Some(Condition::New);
    }
    raw.trim().parse().ok()
}

/// Returns the `flag` column value of the provided [`Condition`].
const fn flag(condition: Condition) -> &'static str {
    match condition {
        Condition::New => "import",
        Condition::Used => "used",
    }
}

/// New `cars` row.
#[derive(Debug, Serialize)]
struct NewRow<'a> {
    id: &'a str,
    make: &'a str,
    model: &'a str,
    year: u16,
    price: Money,
    mileage: u32,
    condition: &'static str,
    flag: &'static str,
    transmission: &'static str,
    fuel_type: &'static str,
    body_type: Option<&'a str>,
    color: Option<&'a str>,
    description: Option<&'a str>,
    image_url: Option<&'a str>,
    gallery_images: Vec<&'a str>,
    features: Vec<&'a str>,
    created_at: String,
}

impl<'a> From<&'a Vehicle> for NewRow<'a> {
    fn from(v: &'a Vehicle) -> Self {
        Self {
            id: v.id.as_ref(),
            make: v.make.as_ref(),
            model: v.model.as_ref(),
            year: v.year.into(),
            price: v.price,
            mileage: v.mileage.into(),
            condition: v.condition.as_str(),
            flag: flag(v.condition),
            transmission: v.transmission.as_str(),
            fuel_type: v.fuel_type.as_str(),
            body_type: v.body_type.as_ref().map(AsRef::as_ref),
            color: v.color.as_ref().map(AsRef::as_ref),
            description: v.description.as_ref().map(AsRef::as_ref),
            image_url: v.image_url.as_ref().map(AsRef::as_ref),
            gallery_images: v.gallery.iter().map(AsRef::as_ref).collect(),
            features: v.features.iter().map(AsRef::as_ref).collect(),
            created_at: v.created_at.to_rfc3339(),
        }
    }
}

impl Database<Select<By<Vec<Vehicle>, read::vehicle::list::Selector>>>
    for Supabase
{
    type Ok = Vec<Vehicle>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Vehicle>, read::vehicle::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::vehicle::list::Selector { condition } = by.into_inner();

        let mut query = vec![(NEWEST_FIRST.0, NEWEST_FIRST.1.to_owned())];
        if let Some(c) = condition {
            query.push(eq("flag", flag(c)));
        }

        let rows = self
            .select::<Row>(TABLE, &query)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        Ok(map_rows(TABLE, rows))
    }
}

impl Database<Select<By<Option<Vehicle>, vehicle::Id>>> for Supabase {
    type Ok = Option<Vehicle>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Vehicle>, vehicle::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.select::<Row>(TABLE, &[eq("id", &id)])
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?
            .into_iter()
            .next()
            .map(Vehicle::try_from)
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl Database<Insert<Vehicle>> for Supabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(vehicle): Insert<Vehicle>,
    ) -> Result<Self::Ok, Self::Err> {
        self.insert(TABLE, &NewRow::from(&vehicle))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))
    }
}

impl Database<Delete<By<Vehicle, vehicle::Id>>> for Supabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Vehicle, vehicle::Id>>,
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

    use crate::domain::{
        vehicle::{Condition, FuelType, Transmission},
        Vehicle,
    };

    use super::Row;

    fn vehicle(json: &str) -> Vehicle {
        serde_json::from_str::<Row>(json).unwrap().try_into().unwrap()
    }

    #[test]
    fn maps_snake_case_row() {
        let v = vehicle(
            r#"{
                "id": "1",
                "make": "BMW",
                "model": "M4",
                "year": 2021,
                "price": 45000,
                "mileage": 12000,
                "condition": "used",
                "transmission": "Automatic",
                "fuel_type": "petrol",
                "image_url": "https://cdn.example.com/bmw.jpg",
                "features": "Sunroof, Heated seats",
                "created_at": "2024-03-01T10:15:30.123456+00:00"
            }"#,
        );

        assert_eq!(v.id.as_ref(), "1");
        assert_eq!(v.condition, Condition::Used);
        assert_eq!(v.fuel_type, FuelType::Petrol);
        assert_eq!(v.transmission, Transmission::Automatic);
        assert_eq!(v.price, Money::from(45_000));
        assert_eq!(v.features.len(), 2);
        assert!(v.image_url.is_some());
    }

    #[test]
    fn maps_legacy_column_names() {
        let v = vehicle(
            r#"{
                "id": 7,
                "make": "Tesla",
                "model": "Model 3",
                "year": 2024,
                "price": "60000.00",
                "flag": "import",
                "transmission": "automatic",
                "fuelType": "Electric",
                "image": "https://cdn.example.com/t.jpg",
                "images": "https://cdn.example.com/1.jpg,https://x.io/2.jpg",
                "features": null,
                "created_at": "2024-03-01T10:15:30+00:00"
            }"#,
        );

        assert_eq!(v.id.as_ref(), "7");
        assert_eq!(v.condition, Condition::New);
        assert_eq!(v.fuel_type, FuelType::Electric);
        assert_eq!(v.gallery.len(), 2);
        assert!(v.features.is_empty());
    }

    #[test]
    fn rejects_row_without_condition() {
        let row = serde_json::from_str::<Row>(
            r#"{
                "id": "1", "make": "BMW", "model": "M4", "year": 2021,
                "price": 1, "transmission": "Manual", "fuel_type": "Diesel",
                "created_at": "2024-03-01T10:15:30+00:00"
            }"#,
        )
        .unwrap();

        assert!(Vehicle::try_from(row).is_err());
    }
}
