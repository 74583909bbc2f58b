//! [`Query`] collection related to the multiple [`Listing`]s.

use common::operations::By;

use crate::{domain::user, read};
#[cfg(doc)]
use crate::{
    domain::{Listing, User, Vehicle},
    Query,
};

use super::DatabaseQuery;

/// Queries [`Listing`]s of a [`User`] along with the listed [`Vehicle`]s.
pub type ByOwner = DatabaseQuery<By<Vec<read::listing::Owned>, user::Id>>;
