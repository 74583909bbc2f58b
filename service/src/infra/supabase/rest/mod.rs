//! [PostgREST] [`Database`] implementations.
//!
//! [`Database`]: crate::infra::Database
//! [PostgREST]: https://postgrest.org

mod korea_order;
mod kyc;
mod listing;
mod order;
mod spare_part;
mod trade_in;
mod user;
mod vehicle;

use common::DateTimeOf;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracerr::Traced;
use tracing as log;

use super::{send, send_json, Error, Supabase};

/// Filter of a [PostgREST] request, as a list of query parameters.
///
/// [PostgREST]: https://postgrest.org
type Query<'a> = &'a [(&'a str, String)];

/// `ORDER BY created_at DESC` clause.
const NEWEST_FIRST: (&str, &str) = ("order", "created_at.desc");

impl Supabase {
    /// Selects rows of the provided `table` matching the provided [`Query`].
    async fn select<R>(
        &self,
        table: &str,
        query: Query<'_>,
    ) -> Result<Vec<R>, Traced<Error>>
    where
        R: for<'de> Deserialize<'de>,
    {
        self.select_columns(table, "*", query)
            .await
            .map_err(tracerr::wrap!())
    }

    /// Selects the provided `columns` of the `table` rows matching the
    /// provided [`Query`].
    ///
    /// Allows embedding rows of the referenced tables.
    async fn select_columns<R>(
        &self,
        table: &str,
        columns: &str,
        query: Query<'_>,
    ) -> Result<Vec<R>, Traced<Error>>
    where
        R: for<'de> Deserialize<'de>,
    {
        send_json(
            self.request(Method::GET, &format!("rest/v1/{table}"))
                .query(&[("select", columns)])
                .query(query),
        )
        .await
        .map_err(tracerr::wrap!())
    }

    /// Inserts the provided `row` into the provided `table`.
    async fn insert<R>(&self, table: &str, row: &R) -> Result<(), Traced<Error>>
    where
        R: Serialize + ?Sized,
    {
        send(
            self.request(Method::POST, &format!("rest/v1/{table}"))
                .header("Prefer", "return=minimal")
                .json(row),
        )
        .await
        .map(drop)
        .map_err(tracerr::wrap!())
    }

    /// Inserts the provided `row` into the provided `table`, or merges it
    /// into the existing one with the same primary key.
    async fn upsert<R>(&self, table: &str, row: &R) -> Result<(), Traced<Error>>
    where
        R: Serialize + ?Sized,
    {
        send(
            self.request(Method::POST, &format!("rest/v1/{table}"))
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(row),
        )
        .await
        .map(drop)
        .map_err(tracerr::wrap!())
    }

    /// Deletes rows of the provided `table` matching the provided [`Query`].
    async fn delete(
        &self,
        table: &str,
        query: Query<'_>,
    ) -> Result<(), Traced<Error>> {
        send(
            self.request(Method::DELETE, &format!("rest/v1/{table}"))
                .query(query),
        )
        .await
        .map(drop)
        .map_err(tracerr::wrap!())
    }
}

/// Builds an `eq` predicate of a [PostgREST] filter.
///
/// [PostgREST]: https://postgrest.org
fn eq(column: &'static str, value: impl ToString) -> (&'static str, String) {
    (column, format!("eq.{}", value.to_string()))
}

/// Builds an `in` predicate of a [PostgREST] filter.
///
/// [PostgREST]: https://postgrest.org
fn one_of<I>(column: &'static str, values: I) -> (&'static str, String)
where
    I: IntoIterator<Item: ToString>,
{
    let values = values
        .into_iter()
        .map(|v| format!("\"{}\"", v.to_string()))
        .collect::<Vec<_>>()
        .join(",");
    (column, format!("in.({values})"))
}

/// Maps the provided `rows` of the `table` into domain entities.
///
/// Rows not fitting the domain are skipped with a warning, so a single
/// malformed record doesn't hide the whole list.
fn map_rows<R, T>(table: &str, rows: Vec<R>) -> Vec<T>
where
    T: TryFrom<R, Error = Error>,
{
    rows.into_iter()
        .filter_map(|row| {
            T::try_from(row)
                .map_err(|e| {
                    log::warn!("skipping malformed `{table}` row: {e}");
                })
                .ok()
        })
        .collect()
}

/// Deserializes an identifier, stored either as a string or as a number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}

/// Parses the provided `raw` [RFC 3339] timestamp.
///
/// # Errors
///
/// With [`Error::Malformed`] if the timestamp is invalid.
///
/// [RFC 3339]: https://tools.ietf.org/html/rfc3339
fn timestamp<Of: ?Sized>(raw: &str) -> Result<DateTimeOf<Of>, Error> {
    DateTimeOf::from_rfc3339(raw).map_err(|e| {
        Error::Malformed(format!("invalid timestamp `{raw}`: {e}"))
    })
}

/// Deserializes a list of strings, stored either as a JSON array or as a
/// single comma-separated string.
///
/// Blank entries are dropped and `null` is an empty list.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Many(Vec<String>),
        One(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => vec![],
        Some(Raw::Many(v)) => v,
        Some(Raw::One(s)) => s.split(',').map(str::to_owned).collect(),
    }
    .into_iter()
    .map(|s| s.trim().to_owned())
    .filter(|s| !s.is_empty())
    .collect())
}

/// Parses the provided optional `raw` value, treating blank strings as
/// absent.
///
/// # Errors
///
/// With [`Error::Malformed`] if the value is present but invalid.
fn parse_opt<T>(
    raw: Option<String>,
    what: &str,
) -> Result<Option<T>, Error>
where
    T: std::str::FromStr,
{
    raw.filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.trim()
                .parse()
                .map_err(|_| Error::Malformed(format!("invalid {what}: `{s}`")))
        })
        .transpose()
}

/// Parses the provided required `raw` value.
///
/// # Errors
///
/// With [`Error::Malformed`] if the value is invalid.
fn parse<T>(raw: &str, what: &str) -> Result<T, Error>
where
    T: std::str::FromStr,
{
    raw.trim()
        .parse()
        .map_err(|_| Error::Malformed(format!("invalid {what}: `{raw}`")))
}

/// Renders the provided `PascalCase` kind in `snake_case`, as stored in the
/// tables.
fn snake_case(kind: &str) -> String {
    let mut out = String::with_capacity(kind.len() + 4);
    for (i, c) in kind.char_indices() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parses the provided `snake_case` kind.
///
/// # Errors
///
/// With [`Error::Malformed`] if the kind is unknown.
fn parse_kind<T>(raw: &str, what: &str) -> Result<T, Error>
where
    T: std::str::FromStr,
{
    raw.trim()
        .replace('_', "")
        .parse()
        .map_err(|_| Error::Malformed(format!("invalid {what}: `{raw}`")))
}

/// Parses all the provided `raw` values.
///
/// # Errors
///
/// With [`Error::Malformed`] if any of the values is invalid.
fn parse_all<T>(raw: Vec<String>, what: &str) -> Result<Vec<T>, Error>
where
    T: std::str::FromStr,
{
    raw.iter().map(|s| parse(s, what)).collect()
}

#[cfg(test)]
mod spec {
    use serde::Deserialize;

    use crate::domain::kyc::DocumentType;

    use super::{eq, one_of, parse_kind, snake_case};

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::string_list")]
        list: Vec<String>,
    }

    fn list(json: &str) -> Vec<String> {
        serde_json::from_str::<Row>(json).unwrap().list
    }

    #[test]
    fn string_list_accepts_every_shape() {
        assert_eq!(list(r#"{"list": ["a", "b"]}"#), ["a", "b"]);
        assert_eq!(list(r#"{"list": "a, b,,"}"#), ["a", "b"]);
        assert!(list(r#"{"list": null}"#).is_empty());
        assert!(list("{}").is_empty());
    }

    #[test]
    fn kinds_round_trip_through_snake_case() {
        assert_eq!(snake_case("DrivingLicense"), "driving_license");
        assert_eq!(snake_case("Passport"), "passport");
        assert_eq!(
            parse_kind::<DocumentType>("driving_license", "ID type").unwrap(),
            DocumentType::DrivingLicense,
        );
        assert!(parse_kind::<DocumentType>("visa", "ID type").is_err());
    }

    #[test]
    fn builds_predicates() {
        assert_eq!(eq("user_id", "42"), ("user_id", "eq.42".to_owned()));
        assert_eq!(
            one_of("id", ["a", "b"]),
            ("id", r#"in.("a","b")"#.to_owned()),
        );
    }
}
