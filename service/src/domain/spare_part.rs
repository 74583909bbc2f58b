//! [`SparePart`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{define_text, user, ImageUrl};

/// Spare part offered on the marketplace.
#[derive(Clone, Debug, PartialEq)]
pub struct SparePart {
    /// ID of this [`SparePart`].
    pub id: Id,

    /// ID of the [`User`] selling this [`SparePart`], if it's listed by a
    /// marketplace user rather than the marketplace itself.
    ///
    /// [`User`]: crate::domain::User
    pub seller_id: Option<user::Id>,

    /// [`Name`] of this [`SparePart`].
    pub name: Name,

    /// [`Category`] of this [`SparePart`].
    pub category: Category,

    /// Price of this [`SparePart`].
    pub price: Money,

    /// Vehicle models this [`SparePart`] is compatible with.
    pub compatibility: Vec<Compatibility>,

    /// [`Description`] of this [`SparePart`], if any.
    pub description: Option<Description>,

    /// [`ImageUrl`] of this [`SparePart`], if any.
    pub image_url: Option<ImageUrl>,

    /// [`DateTime`] when this [`SparePart`] was listed.
    pub created_at: CreationDateTime,
}

/// ID of a [`SparePart`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[from(String, &str)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        (!s.is_empty())
            .then(|| Self(s.to_owned()))
            .ok_or("empty `spare_part::Id`")
    }
}

define_text! {
    #[doc = "Name of a [`SparePart`]."]
    struct Name;
}

define_text! {
    #[doc = "Category of a [`SparePart`], e.g. `Brakes`."]
    struct Category;
}

define_text! {
    #[doc = "Vehicle model a [`SparePart`] fits, e.g. `BMW M4`."]
    struct Compatibility;
}

define_text! {
    #[doc = "Free-form description of a [`SparePart`]."]
    struct Description;
}

/// [`DateTime`] when a [`SparePart`] was listed.
pub type CreationDateTime = DateTimeOf<(SparePart, unit::Creation)>;
