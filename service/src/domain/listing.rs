//! [`Listing`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{User, Vehicle};
use crate::domain::{user, vehicle};

/// Link between a [`User`] and a [`Vehicle`] they published for sale.
///
/// A [`Vehicle`] record is created first, and then linked to its owner with
/// a [`Listing`], so the two are never written atomically.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// ID of the [`User`] who published the [`Vehicle`].
    pub user_id: user::Id,

    /// ID of the listed [`Vehicle`].
    pub vehicle_id: vehicle::Id,

    /// Indicator whether the [`User`] owns the listed [`Vehicle`].
    pub is_owner: bool,

    /// [`DateTime`] when this [`Listing`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;
