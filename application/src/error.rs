//! [`Error`]-related definitions.

use std::{convert::Infallible, fmt};

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use derive_more::Error as StdError;
use itertools::Itertools as _;
use juniper::IntoFieldError;
use serde::Serialize;
use service::infra::{auth, database, storage};
use tracerr::{Trace, Traced};
use tracing as log;

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// GraphQL API [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] representing an invalid value of the
    /// provided input `field`.
    #[must_use]
    pub fn invalid_input(field: &str) -> Self {
        Self {
            code: "INVALID_INPUT",
            status_code: http::StatusCode::BAD_REQUEST,
            message: format!("Invalid `{field}` value"),
            backtrace: None,
        }
    }

    /// Create a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_SERVER_ERROR",
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        /// JSON body of a failed non-GraphQL response.
        #[derive(Serialize)]
        struct Body<'a> {
            code: &'a str,
            message: &'a str,
        }

        let body = Body {
            code: self.code,
            message: &self.message,
        };
        (self.status_code, Json(body)).into_response()
    }
}

impl<S> IntoFieldError<S> for Error
where
    S: From<String>,
{
    fn into_field_error(self) -> juniper::FieldError<S> {
        let mut ext = juniper::Object::with_capacity(1);
        drop(
            ext.add_field("code", juniper::Value::scalar(self.code.to_owned())),
        );
        drop(
            ext.add_field(
                "backtrace",
                juniper::Value::list(
                    self.backtrace
                        .iter()
                        .flat_map(|trace| trace.iter())
                        .map(|frame| juniper::Value::scalar(frame.to_string()))
                        .collect(),
                ),
            ),
        );
        juniper::FieldError::new(self.message, juniper::Value::object(ext))
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error().unwrap_or_else(|| {
            log::error!("{self}");
            Error::internal(&self)
        })
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for storage::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for auth::Error {
    fn try_as_error(&self) -> Option<Error> {
        if !self.is_rejected() {
            return None;
        }
        Some(Error {
            code: "AUTH_REJECTED",
            status_code: http::StatusCode::BAD_REQUEST,
            message: self.message().map_or_else(
                || "Auth provider rejected the request".to_owned(),
                ToOwned::to_owned,
            ),
            backtrace: None,
        })
    }
}

impl AsError for Infallible {
    fn try_as_error(&self) -> Option<Error> {
        match *self {}
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, FieldError, IntoFieldError as _};
    use service::infra::{auth, supabase};

    use super::{AsError as _, Error};

    define_error! {
        enum Sample {
            #[code = "SAMPLE_GONE"]
            #[status = NOT_FOUND]
            #[message = "Sample is gone"]
            Gone,
        }
    }

    #[test]
    fn carries_code_into_extensions() {
        let err = Error::from(Sample::Gone);
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "[SAMPLE_GONE]: Sample is gone");

        let field: FieldError<DefaultScalarValue> = err.into_field_error();
        assert_eq!(field.message(), "Sample is gone");
        let code = field
            .extensions()
            .as_object_value()
            .and_then(|ext| ext.get_field_value("code"))
            .and_then(|v| v.as_scalar_value::<String>().cloned());
        assert_eq!(code.as_deref(), Some("SAMPLE_GONE"));
    }

    #[test]
    fn exposes_only_rejections_of_auth_provider() {
        let rejected = auth::Error::Supabase(supabase::Error::Api {
            status: 400,
            message: "Invalid login credentials".into(),
        });
        let err = rejected.as_error();
        assert_eq!(err.code, "AUTH_REJECTED");
        assert_eq!(err.message, "Invalid login credentials");

        let failed = auth::Error::Supabase(supabase::Error::Api {
            status: 503,
            message: "upstream down".into(),
        });
        assert!(failed.try_as_error().is_none());
        assert_eq!(failed.as_error().code, "INTERNAL_SERVER_ERROR");
    }
}
