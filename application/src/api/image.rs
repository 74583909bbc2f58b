//! Image-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::GraphQLScalar;
use service::{command::upload_image, domain};

use crate::{api::scalar, AsError, Error};

/// Public URL of an uploaded image.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ImageUrl", with = scalar::Text::<domain::ImageUrl>)]
pub struct Url(domain::ImageUrl);

impl AsError for upload_image::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        let code = match self {
            Self::Storage(_) | Self::MalformedUrl(_) => return None,
            Self::InvalidFolder(_) => "INVALID_FOLDER",
            Self::Empty => "EMPTY_IMAGE",
            Self::NotImage(_) => "NOT_IMAGE",
        };
        Some(Error {
            code,
            status_code: http::StatusCode::BAD_REQUEST,
            message: self.to_string(),
            backtrace: None,
        })
    }
}
