//! [`Listing`]-related read definitions.

use crate::domain::{Listing, Vehicle};

/// [`Vehicle`] listed by a user, along with its ownership [`Listing`].
#[derive(Clone, Debug, PartialEq)]
pub struct Owned {
    /// Ownership [`Listing`] of the [`Vehicle`].
    pub listing: Listing,

    /// Listed [`Vehicle`].
    pub vehicle: Vehicle,
}
