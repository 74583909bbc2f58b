//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Select, Update};
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        database,
        supabase::{Error, Supabase},
        Database,
    },
};

use super::{eq, parse, parse_opt};

/// Table storing [`User`] profiles.
const TABLE: &str = "profiles";

/// Raw `profiles` row.
#[derive(Debug, Deserialize)]
struct Row {
    id: String,
    #[serde(default)]
    username: Option<String>,
    email: String,
    created_at: String,
}

impl TryFrom<Row> for User {
    type Error = Error;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        let email: user::Email = parse(&row.email, "email")?;
        let name = parse_opt(row.username, "username")?
            .unwrap_or_else(|| user::Name::from_email(&email));
        Ok(Self {
            id: parse(&row.id, "user ID")?,
            email,
            name,
            created_at: super::timestamp(&row.created_at)?,
        })
    }
}

/// Upserted `profiles` row.
#[derive(Debug, Serialize)]
struct NewRow<'a> {
    id: user::Id,
    username: &'a str,
    email: &'a str,
    created_at: String,
}

impl Database<Select<By<Option<User>, user::Id>>> for Supabase {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.select::<Row>(TABLE, &[eq("id", id)])
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?
            .into_iter()
            .next()
            .map(User::try_from)
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl Database<Update<User>> for Supabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(user): Update<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let row = NewRow {
            id: user.id,
            username: user.name.as_ref(),
            email: user.email.as_ref(),
            created_at: user.created_at.to_rfc3339(),
        };
        self.upsert(TABLE, &row)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::User;

    use super::Row;

    #[test]
    fn falls_back_to_email_name() {
        let user: User = serde_json::from_str::<Row>(
            r#"{
                "id": "0b6c7f9e-2d1a-4b7e-8c3f-6a5d4e3c2b1a",
                "username": null,
                "email": "jane.doe@example.com",
                "created_at": "2024-03-01T10:15:30+00:00"
            }"#,
        )
        .unwrap()
        .try_into()
        .unwrap();

        assert_eq!(user.name.to_string(), "jane.doe");
    }
}
