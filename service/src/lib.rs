//! Service contains the business logic of the vehicle marketplace.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod state;

use derive_more::Debug;

#[cfg(doc)]
use infra::{Auth, Database, Storage};

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [JWT] decoding key of the access tokens issued by the [`Auth`]
    /// provider.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_decoding_key: jsonwebtoken::DecodingKey,

    /// Name of the [`Storage`] bucket to upload images into.
    pub images_bucket: String,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, Au, St> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Auth`] provider of this [`Service`].
    auth: Au,

    /// [`Storage`] of this [`Service`].
    storage: St,

    /// Shopping carts of this [`Service`].
    carts: state::Carts,
}

impl<Db, Au, St> Service<Db, Au, St> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, database: Db, auth: Au, storage: St) -> Self {
        Self {
            config,
            database,
            auth,
            storage,
            carts: state::Carts::default(),
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Auth`] provider of this [`Service`].
    #[must_use]
    pub fn auth(&self) -> &Au {
        &self.auth
    }

    /// Returns [`Storage`] of this [`Service`].
    #[must_use]
    pub fn storage(&self) -> &St {
        &self.storage
    }

    /// Returns shopping carts of this [`Service`].
    #[must_use]
    pub fn carts(&self) -> &state::Carts {
        &self.carts
    }

    /// Returns a copy of this [`Service`] using the provided [`Auth`]
    /// provider, while sharing everything else.
    #[must_use]
    pub fn with_auth<A>(&self, auth: A) -> Service<Db, A, St>
    where
        Db: Clone,
        St: Clone,
    {
        Service {
            config: self.config.clone(),
            database: self.database.clone(),
            auth,
            storage: self.storage.clone(),
            carts: self.carts.clone(),
        }
    }
}
