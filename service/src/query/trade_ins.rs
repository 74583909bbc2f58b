//! [`Query`] collection related to the multiple [`TradeIn`]s.

use common::operations::By;

use crate::domain::{user, TradeIn};
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries [`TradeIn`]s submitted by a [`User`], newest first.
pub type ByUser = DatabaseQuery<By<Vec<TradeIn>, user::Id>>;
