//! Identity verification (know your customer) definitions.

use common::DateTime;
use derive_more::{Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar,
};
use service::{command, domain};
use uuid::Uuid;

use crate::{
    api::{self, image},
    AsError, Context, Error,
};

/// Identity verification submitted by a `User`.
#[derive(Clone, Debug, From, Into)]
pub struct Verification(domain::kyc::Verification);

/// Identity verification submitted by a `User`.
#[graphql_object(name = "KycVerification", context = Context)]
impl Verification {
    /// Unique identifier of this `KycVerification`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Type of the identity document.
    pub fn document_type(&self) -> DocumentType {
        self.0.document.kind.into()
    }

    /// Expiry date of the identity document in `YYYY-MM-DD` format.
    pub fn document_expires_on(&self) -> String {
        self.0.document.expires_on.to_string()
    }

    /// Review status of this `KycVerification`.
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// `DateTime` when this `KycVerification` was submitted.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `KycVerification`.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[from(domain::kyc::Id)]
#[into(domain::kyc::Id)]
#[graphql(name = "KycVerificationId", transparent)]
pub struct Id(Uuid);

/// Type of an identity document.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "KycDocumentType")]
pub enum DocumentType {
    /// International passport.
    Passport,

    /// Driving license.
    DrivingLicense,

    /// National identity card.
    NationalId,
}

impl From<domain::kyc::DocumentType> for DocumentType {
    fn from(kind: domain::kyc::DocumentType) -> Self {
        use domain::kyc::DocumentType as T;
        match kind {
            T::Passport => Self::Passport,
            T::DrivingLicense => Self::DrivingLicense,
            T::NationalId => Self::NationalId,
        }
    }
}

impl From<DocumentType> for domain::kyc::DocumentType {
    fn from(kind: DocumentType) -> Self {
        match kind {
            DocumentType::Passport => Self::Passport,
            DocumentType::DrivingLicense => Self::DrivingLicense,
            DocumentType::NationalId => Self::NationalId,
        }
    }
}

/// Review status of a `KycVerification`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "KycStatus")]
pub enum Status {
    /// `KycVerification` awaits a review.
    Pending,

    /// Identity of the `User` is confirmed.
    Verified,

    /// `KycVerification` is declined.
    Rejected,
}

impl From<domain::kyc::Status> for Status {
    fn from(status: domain::kyc::Status) -> Self {
        use domain::kyc::Status as S;
        match status {
            S::Pending => Self::Pending,
            S::Verified => Self::Verified,
            S::Rejected => Self::Rejected,
        }
    }
}

/// Identity verification details of a `User`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "KycVerificationInput")]
pub struct Input {
    /// Type of the identity document.
    pub document_type: DocumentType,

    /// Number of the identity document.
    pub document_number: String,

    /// Expiry date of the identity document in `YYYY-MM-DD` format.
    pub document_expires_on: String,

    /// Uploaded scan of the identity document.
    pub document_url: image::Url,

    /// Uploaded scan of a proof of address.
    pub proof_of_address_url: image::Url,

    /// First line of the residential address.
    pub address_line1: String,

    /// Second line of the residential address.
    pub address_line2: Option<String>,

    /// City of the residential address.
    pub city: String,

    /// State or province of the residential address.
    pub state: String,

    /// Postal code of the residential address.
    pub postal_code: String,

    /// Country of the residential address.
    pub country: String,

    /// Phone number of the `User`.
    pub phone: String,
}

impl Input {
    /// Converts this [`Input`] into a [`command::SubmitKycVerification`] of
    /// the provided [`domain::User`].
    ///
    /// # Errors
    ///
    /// With `INVALID_INPUT` code, if any of the free-form fields is invalid.
    pub fn into_command(
        self,
        user_id: domain::user::Id,
    ) -> Result<command::SubmitKycVerification, Error> {
        const INPUT: &str = "KycVerificationInput";

        let field = |name: &str| format!("{INPUT}.{name}");
        let Self {
            document_type,
            document_number,
            document_expires_on,
            document_url,
            proof_of_address_url,
            address_line1,
            address_line2,
            city,
            state,
            postal_code,
            country,
            phone,
        } = self;

        Ok(command::SubmitKycVerification {
            user_id,
            document: domain::kyc::Document {
                kind: document_type.into(),
                number: api::parse(
                    &field("documentNumber"),
                    &document_number,
                )?,
                expires_on: api::parse(
                    &field("documentExpiresOn"),
                    &document_expires_on,
                )?,
            },
            document_url: document_url.into(),
            proof_of_address_url: proof_of_address_url.into(),
            address: domain::kyc::Address {
                line1: api::parse(&field("addressLine1"), &address_line1)?,
                line2: api::parse_opt(
                    &field("addressLine2"),
                    address_line2.as_deref(),
                )?,
                city: api::parse(&field("city"), &city)?,
                state: api::parse(&field("state"), &state)?,
                postal_code: api::parse(&field("postalCode"), &postal_code)?,
                country: api::parse(&field("country"), &country)?,
            },
            phone: api::parse(&field("phone"), &phone)?,
        })
    }
}

impl AsError for command::submit_kyc_verification::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::domain;

    use crate::api::image;

    use super::{DocumentType, Input};

    fn input() -> Input {
        let url = |s: &str| -> image::Url {
            domain::ImageUrl::new(s).unwrap().into()
        };
        Input {
            document_type: DocumentType::DrivingLicense,
            document_number: "D1234567".into(),
            document_expires_on: "2029-08-15".into(),
            document_url: url("https://cdn.example.com/id.jpg"),
            proof_of_address_url: url("https://cdn.example.com/bill.jpg"),
            address_line1: "1 Main St".into(),
            address_line2: Some("  ".into()),
            city: "Springfield".into(),
            state: "IL".into(),
            postal_code: "62701".into(),
            country: "USA".into(),
            phone: "+1 555 0100".into(),
        }
    }

    #[test]
    fn converts_valid_input() {
        let cmd = input().into_command(domain::user::Id::new()).unwrap();

        assert_eq!(
            cmd.document.kind,
            domain::kyc::DocumentType::DrivingLicense,
        );
        assert_eq!(cmd.address.line2, None);
    }

    #[test]
    fn names_invalid_field() {
        let err = Input {
            document_expires_on: "15.08.2029".into(),
            ..input()
        }
        .into_command(domain::user::Id::new())
        .unwrap_err();

        assert_eq!(err.code, "INVALID_INPUT");
        assert!(err
            .message
            .contains("KycVerificationInput.documentExpiresOn"));
    }
}
