//! [`Database`]-related definitions.

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "supabase")]
use super::supabase;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`supabase`] PostgREST error.
    #[cfg(feature = "supabase")]
    Supabase(supabase::Error),
}

#[cfg(all(test, feature = "supabase"))]
pub(crate) mod fake;
