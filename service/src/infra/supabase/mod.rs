//! [Supabase] platform infrastructure.
//!
//! Covers the hosted auth provider ([GoTrue]), the object storage and the
//! [PostgREST] relational data store, all spoken to over HTTP.
//!
//! [GoTrue]: https://github.com/supabase/auth
//! [PostgREST]: https://postgrest.org
//! [Supabase]: https://supabase.com

pub mod auth;
mod rest;
mod storage;

use std::{sync::Arc, time::Duration};

use derive_more::{Debug, Display, Error as StdError, From};
use reqwest::{header, Method, RequestBuilder, Response};
use serde::Deserialize;
use smart_default::SmartDefault;
use tracerr::Traced;

use crate::domain::user::session;

pub use self::auth::Auth;

/// [`Supabase`] client configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Base URL of the [`Supabase`] project.
    #[default("http://127.0.0.1:54321")]
    pub url: String,

    /// Public (anon) API key of the [`Supabase`] project.
    #[debug(skip)]
    pub api_key: String,

    /// Timeout of a single HTTP request.
    #[default(Duration::from_secs(10))]
    pub timeout: Duration,
}

/// [Supabase] HTTP client.
///
/// Implements [`Database`] over [PostgREST] and [`Storage`] over the Storage
/// API.
///
/// [`Database`]: crate::infra::Database
/// [`Storage`]: crate::infra::Storage
/// [PostgREST]: https://postgrest.org
/// [Supabase]: https://supabase.com
#[derive(Clone, Debug)]
pub struct Supabase {
    /// Underlying HTTP client.
    http: reqwest::Client,

    /// Base URL of the project, without a trailing slash.
    url: Arc<str>,

    /// Public API key of the project.
    #[debug(skip)]
    api_key: Arc<str>,
}

impl Supabase {
    /// Creates a new [`Supabase`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to build the underlying HTTP client.
    pub fn new(conf: &Config) -> Result<Self, Traced<Error>> {
        let http = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!())?;
        Ok(Self {
            http,
            url: conf.url.trim_end_matches('/').into(),
            api_key: conf.api_key.as_str().into(),
        })
    }

    /// Returns the absolute URL of the provided `path` in the project.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }

    /// Starts a new request to the provided `path` on behalf of the project
    /// itself.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.endpoint(path))
            .header("apikey", &*self.api_key)
            .bearer_auth(&*self.api_key)
    }

    /// Starts a new request to the provided `path` on behalf of the user
    /// owning the provided [`session::Token`].
    fn authorized(
        &self,
        method: Method,
        path: &str,
        token: &session::Token,
    ) -> RequestBuilder {
        self.http
            .request(method, self.endpoint(path))
            .header("apikey", &*self.api_key)
            .bearer_auth(token)
    }
}

/// Sends the provided request, turning non-successful responses into an
/// [`Error::Api`].
async fn send(req: RequestBuilder) -> Result<Response, Traced<Error>> {
    let resp = req.send().await.map_err(tracerr::from_and_wrap!())?;
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(tracerr::new!(Error::from_response(status.as_u16(), &body)))
}

/// Sends the provided request, expecting a JSON response.
async fn send_json<T>(req: RequestBuilder) -> Result<T, Traced<Error>>
where
    T: for<'de> Deserialize<'de>,
{
    send(req.header(header::ACCEPT, "application/json"))
        .await
        .map_err(tracerr::wrap!())?
        .json()
        .await
        .map_err(tracerr::from_and_wrap!())
}

/// [`Supabase`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// HTTP transport error.
    #[display("HTTP request failed: {_0}")]
    Http(reqwest::Error),

    /// Request has been rejected by the platform.
    #[display("{message}")]
    #[from(ignore)]
    Api {
        /// HTTP status code of the response.
        status: u16,

        /// Human-readable message reported by the platform.
        message: String,
    },

    /// Platform responded with data not fitting the domain.
    #[display("Malformed response: {_0}")]
    #[from(ignore)]
    Malformed(#[error(not(source))] String),
}

impl Error {
    /// Creates a new [`Error::Api`] out of the provided response parts.
    ///
    /// Different platform services report errors with different JSON
    /// shapes, so the message is looked up in all of them.
    fn from_response(status: u16, body: &str) -> Self {
        /// Union of the error bodies of the platform services.
        #[derive(Default, Deserialize)]
        struct Body {
            error_description: Option<String>,
            msg: Option<String>,
            message: Option<String>,
            error: Option<String>,
        }

        let body = serde_json::from_str::<Body>(body).unwrap_or_default();
        let message = body
            .error_description
            .or(body.msg)
            .or(body.message)
            .or(body.error)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Self::Api { status, message }
    }

    /// Returns the human-readable message reported by the platform, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            Self::Http(_) | Self::Malformed(_) => None,
        }
    }

    /// Returns the HTTP status code the platform rejected the request with,
    /// if it did.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Malformed(_) => None,
        }
    }

    /// Indicates whether the platform rejected the request as unauthorized.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }
}

#[cfg(test)]
mod spec {
    use super::Error;

    #[test]
    fn extracts_message_of_any_service() {
        let gotrue = Error::from_response(
            400,
            r#"{"error":"invalid_grant",
                "error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(gotrue.message(), Some("Invalid login credentials"));

        let postgrest = Error::from_response(
            409,
            r#"{"code":"23505","message":"duplicate key value"}"#,
        );
        assert_eq!(postgrest.message(), Some("duplicate key value"));

        let signup = Error::from_response(
            422,
            r#"{"code":422,"msg":"User already registered"}"#,
        );
        assert_eq!(signup.to_string(), "User already registered");
    }

    #[test]
    fn falls_back_to_status() {
        let err = Error::from_response(502, "<html>Bad gateway</html>");
        assert_eq!(err.message(), Some("request failed with status 502"));
        assert!(!err.is_unauthorized());
        assert!(Error::from_response(401, "{}").is_unauthorized());
    }
}
