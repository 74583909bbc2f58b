//! [`kyc::Verification`]-related [`Database`] implementations.

use common::operations::Insert;
use serde::Serialize;
use tracerr::Traced;

use crate::{
    domain::{kyc, user},
    infra::{database, supabase::Supabase, Database},
};

use super::snake_case;

/// Table storing [`kyc::Verification`]s.
const TABLE: &str = "kyc_verifications";

/// New `kyc_verifications` row.
#[derive(Debug, Serialize)]
struct NewRow<'a> {
    id: kyc::Id,
    user_id: user::Id,
    id_type: String,
    id_number: &'a str,
    id_expiry_date: &'a str,
    id_document_url: &'a str,
    proof_of_address_url: &'a str,
    address_line1: &'a str,
    address_line2: Option<&'a str>,
    city: &'a str,
    state: &'a str,
    postal_code: &'a str,
    country: &'a str,
    phone_number: &'a str,
    verification_status: String,
    created_at: String,
}

impl<'a> From<&'a kyc::Verification> for NewRow<'a> {
    fn from(v: &'a kyc::Verification) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            id_type: snake_case(v.document.kind.as_str()),
            id_number: v.document.number.as_ref(),
            id_expiry_date: v.document.expires_on.as_ref(),
            id_document_url: v.document_url.as_ref(),
            proof_of_address_url: v.proof_of_address_url.as_ref(),
            address_line1: v.address.line1.as_ref(),
            address_line2: v.address.line2.as_ref().map(AsRef::as_ref),
            city: v.address.city.as_ref(),
            state: v.address.state.as_ref(),
            postal_code: v.address.postal_code.as_ref(),
            country: v.address.country.as_ref(),
            phone_number: v.phone.as_ref(),
            verification_status: v.status.as_str().to_lowercase(),
            created_at: v.created_at.to_rfc3339(),
        }
    }
}

impl Database<Insert<kyc::Verification>> for Supabase {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(verification): Insert<kyc::Verification>,
    ) -> Result<Self::Ok, Self::Err> {
        self.insert(TABLE, &NewRow::from(&verification))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))
    }
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::domain::{kyc, order, user, ImageUrl};

    use super::NewRow;

    #[test]
    fn writes_form_columns() {
        let verification = kyc::Verification {
            id: kyc::Id::new(),
            user_id: user::Id::new(),
            document: kyc::Document {
                kind: kyc::DocumentType::NationalId,
                number: kyc::DocumentNumber::new("AB123").unwrap(),
                expires_on: kyc::ExpiryDate::new("2030-01-31").unwrap(),
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
            status: kyc::Status::Pending,
            created_at: DateTime::now().coerce(),
        };

        let row = serde_json::to_value(NewRow::from(&verification)).unwrap();

        assert_eq!(row["id_type"], "national_id");
        assert_eq!(row["id_expiry_date"], "2030-01-31");
        assert_eq!(row["address_line2"], serde_json::Value::Null);
        assert_eq!(row["verification_status"], "pending");
    }
}
