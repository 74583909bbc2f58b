//! [`Storage`] implementations.

use reqwest::{header, Method};
use tracerr::Traced;

use crate::infra::{
    storage::{self, PublicUrl, Upload},
    Storage,
};

use super::{send, Supabase};

impl Storage<Upload> for Supabase {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(&self, op: Upload) -> Result<Self::Ok, Self::Err> {
        let Upload {
            bucket,
            path,
            bytes,
            content_type,
        } = op;

        send(
            self.request(
                Method::POST,
                &format!("storage/v1/object/{bucket}/{path}"),
            )
            .header(header::CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes),
        )
        .await
        .map(drop)
        .map_err(tracerr::map_from_and_wrap!(=> storage::Error))
    }
}

impl Storage<PublicUrl> for Supabase {
    type Ok = String;
    type Err = Traced<storage::Error>;

    async fn execute(&self, op: PublicUrl) -> Result<Self::Ok, Self::Err> {
        let PublicUrl { bucket, path } = op;
        Ok(self.endpoint(&format!("storage/v1/object/public/{bucket}/{path}")))
    }
}
