//! [`Command`] for uploading an image.

use std::sync::LazyLock;

use derive_more::{Debug, Display, Error, From};
use regex::Regex;
use tracerr::Traced;
use xxhash_rust::xxh3::xxh3_64;

use crate::{
    domain::ImageUrl,
    infra::{
        storage::{self, PublicUrl, Upload},
        Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] for uploading an image into the images bucket.
///
/// Images are named by the hash of their contents, so uploading the same
/// image twice resolves to the same [`ImageUrl`].
#[derive(Clone, Debug)]
pub struct UploadImage {
    /// Folder to put the image into (e.g. `cars`, `trade-ins`).
    pub folder: String,

    /// MIME type of the image.
    pub content_type: String,

    /// Contents of the image.
    #[debug("{} bytes", bytes.len())]
    pub bytes: Vec<u8>,
}

impl UploadImage {
    /// Returns the file extension matching the `content_type` of this
    /// [`UploadImage`], if it's an image one.
    fn extension(&self) -> Option<&str> {
        let subtype = self.content_type.strip_prefix("image/")?;
        let subtype = subtype.split(';').next().unwrap_or_default().trim();
        let ext = match subtype {
            "jpeg" | "pjpeg" => "jpg",
            "svg+xml" => "svg",
            other => other,
        };
        let valid = !ext.is_empty()
            && ext.chars().all(|c| c.is_ascii_alphanumeric());
        valid.then_some(ext)
    }

    /// Returns the path of the uploaded object inside its bucket.
    fn path(&self, ext: &str) -> String {
        format!("{}/{:016x}.{ext}", self.folder, xxh3_64(&self.bytes))
    }
}

impl<Db, Au, St> Command<UploadImage> for Service<Db, Au, St>
where
    St: Storage<Upload, Ok = (), Err = Traced<storage::Error>>
        + Storage<PublicUrl, Ok = String, Err = Traced<storage::Error>>,
{
    type Ok = ImageUrl;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UploadImage) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        static FOLDER: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[a-z0-9][a-z0-9_-]{0,63}$").expect("valid regex")
        });

        if !FOLDER.is_match(&cmd.folder) {
            return Err(tracerr::new!(E::InvalidFolder(cmd.folder)));
        }
        if cmd.bytes.is_empty() {
            return Err(tracerr::new!(E::Empty));
        }
        let Some(ext) = cmd.extension() else {
            return Err(tracerr::new!(E::NotImage(cmd.content_type)));
        };

        let bucket = self.config().images_bucket.clone();
        let path = cmd.path(ext);
        self.storage()
            .execute(Upload {
                bucket: bucket.clone(),
                path: path.clone(),
                bytes: cmd.bytes,
                content_type: cmd.content_type,
            })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let url = self
            .storage()
            .execute(PublicUrl { bucket, path })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        ImageUrl::new(url.clone())
            .ok_or(E::MalformedUrl(url))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`UploadImage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),

    /// Folder name is not a plain lowercase slug.
    #[display("invalid folder `{_0}`")]
    #[from(ignore)]
    InvalidFolder(#[error(not(source))] String),

    /// Uploaded body is empty.
    #[display("image is empty")]
    Empty,

    /// Content type of the upload is not an image one.
    #[display("`{_0}` is not an image content type")]
    #[from(ignore)]
    NotImage(#[error(not(source))] String),

    /// [`Storage`] returned an unusable public URL.
    #[display("`Storage` returned malformed URL `{_0}`")]
    #[from(ignore)]
    MalformedUrl(#[error(not(source))] String),
}
