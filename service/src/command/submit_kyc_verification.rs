//! [`Command`] for submitting an identity verification of a [`User`].
//!
//! [`User`]: crate::domain::User

use common::{operations::Insert, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{kyc, order, user, ImageUrl},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for submitting an identity verification of a [`User`].
#[derive(Clone, Debug)]
pub struct SubmitKycVerification {
    /// ID of the [`User`] being verified.
    pub user_id: user::Id,

    /// Identity document of the [`User`].
    pub document: kyc::Document,

    /// Uploaded scan of the identity document.
    pub document_url: ImageUrl,

    /// Uploaded scan of a proof of address.
    pub proof_of_address_url: ImageUrl,

    /// Residential address of the [`User`].
    pub address: kyc::Address,

    /// Phone number of the [`User`].
    pub phone: order::Phone,
}

impl<Db, Au, St> Command<SubmitKycVerification> for Service<Db, Au, St>
where
    Db: Database<
        Insert<kyc::Verification>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = kyc::Verification;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SubmitKycVerification,
    ) -> Result<Self::Ok, Self::Err> {
        let SubmitKycVerification {
            user_id,
            document,
            document_url,
            proof_of_address_url,
            address,
            phone,
        } = cmd;

        let verification = kyc::Verification {
            id: kyc::Id::new(),
            user_id,
            document,
            document_url,
            proof_of_address_url,
            address,
            phone,
            status: kyc::Status::Pending,
            created_at: DateTime::now().coerce(),
        };
        self.database()
            .execute(Insert(verification.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        Ok(verification)
    }
}

/// Error of [`SubmitKycVerification`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{Command as _, SubmitKycVerification},
        domain::{kyc, order, user, ImageUrl},
        infra::database::fake::{self, Fake},
    };

    fn cmd() -> SubmitKycVerification {
        SubmitKycVerification {
            user_id: user::Id::new(),
            document: kyc::Document {
                kind: kyc::DocumentType::Passport,
                number: kyc::DocumentNumber::new("M12345678").unwrap(),
                expires_on: kyc::ExpiryDate::new("2031-05-20").unwrap(),
            },
            document_url: ImageUrl::new("https://cdn.example.com/id.jpg")
                .unwrap(),
            proof_of_address_url: ImageUrl::new(
                "https://cdn.example.com/bill.jpg",
            )
            .unwrap(),
            address: kyc::Address {
                line1: order::Address::new("1 Main St").unwrap(),
                line2: None,
                city: order::City::new("Springfield").unwrap(),
                state: order::State::new("IL").unwrap(),
                postal_code: order::ZipCode::new("62701").unwrap(),
                country: kyc::Country::new("USA").unwrap(),
            },
            phone: order::Phone::new("+1 555 0100").unwrap(),
        }
    }

    #[tokio::test]
    async fn starts_pending() {
        let db = Fake::default();

        let submitted =
            fake::service(db.clone()).execute(cmd()).await.unwrap();

        assert_eq!(submitted.status, kyc::Status::Pending);
        assert_eq!(db.tables().kyc_verifications, [submitted]);
    }

    #[tokio::test]
    async fn surfaces_store_failure() {
        let db = Fake::failing(&["insert kyc_verifications"]);

        let res = fake::service(db.clone()).execute(cmd()).await;

        assert!(res.is_err());
        assert!(db.tables().kyc_verifications.is_empty());
    }
}
