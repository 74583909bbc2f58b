//! [`Query`] collection related to the multiple [`SparePart`]s.

use common::operations::By;

use crate::domain::{user, SparePart};
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries the whole [`SparePart`]s catalogue, newest first.
pub type List = DatabaseQuery<By<Vec<SparePart>, ()>>;

/// Queries [`SparePart`]s sold by a [`User`].
pub type BySeller = DatabaseQuery<By<Vec<SparePart>, user::Id>>;
