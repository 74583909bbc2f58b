//! [`Query`] collection related to the multiple [`KoreaOrder`]s.

use common::operations::By;

use crate::domain::{user, KoreaOrder};
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries [`KoreaOrder`]s requested by a [`User`], newest first.
pub type ByUser = DatabaseQuery<By<Vec<KoreaOrder>, user::Id>>;
