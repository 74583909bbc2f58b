//! Infrastructure layer.

pub mod auth;
pub mod database;
pub mod storage;
#[cfg(feature = "supabase")]
pub mod supabase;

pub use self::{auth::Auth, database::Database, storage::Storage};
#[cfg(feature = "supabase")]
pub use self::supabase::Supabase;
