//! [`Storage`]-related definitions.

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "supabase")]
use super::supabase;

/// Object storage operation.
pub use common::Handler as Storage;

/// [`Storage`] operation uploading an object.
///
/// Uploading to an existing path overwrites the object.
#[derive(Clone, Debug)]
pub struct Upload {
    /// Name of the bucket to upload into.
    pub bucket: String,

    /// Path of the object inside the bucket.
    pub path: String,

    /// Contents of the object.
    pub bytes: Vec<u8>,

    /// MIME type of the object.
    pub content_type: String,
}

/// [`Storage`] operation resolving a public URL of an object.
#[derive(Clone, Debug)]
pub struct PublicUrl {
    /// Name of the bucket the object lives in.
    pub bucket: String,

    /// Path of the object inside the bucket.
    pub path: String,
}

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`supabase`] Storage API error.
    #[cfg(feature = "supabase")]
    Supabase(supabase::Error),
}
