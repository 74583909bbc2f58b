//! [`Command`] for authorizing a [`Session`].

use derive_more::{Display, Error, From};
use jsonwebtoken::{Algorithm, Validation};
use tracerr::Traced;

use crate::{
    domain::user::{session, Session},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a [`Session`] by its access token.
#[derive(Clone, Debug, From)]
pub struct AuthorizeUserSession {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

impl AuthorizeUserSession {
    /// Audience the auth provider issues tokens of signed in users for.
    const AUDIENCE: &'static str = "authenticated";
}

impl<Db, Au, St> Command<AuthorizeUserSession> for Service<Db, Au, St> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        let AuthorizeUserSession { token } = cmd;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AuthorizeUserSession::AUDIENCE]);

        Ok(jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &validation,
        )
        .map_err(tracerr::from_and_wrap!(=> ExecutionError))?
        .claims)
    }
}

/// Error of [`AuthorizeUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use jsonwebtoken::{DecodingKey, EncodingKey, Header};
    use serde::Serialize;

    use crate::{
        command::{AuthorizeUserSession, Command as _},
        domain::user::session::Token,
        Config, Service,
    };

    const SECRET: &[u8] = b"super-secret-jwt-token-with-at-least-32-characters";

    #[derive(Serialize)]
    struct Claims<'a> {
        sub: &'a str,
        email: &'a str,
        aud: &'a str,
        exp: i64,
    }

    fn service() -> Service<(), (), ()> {
        Service::new(
            Config {
                jwt_decoding_key: DecodingKey::from_secret(SECRET),
                images_bucket: "carimages".into(),
            },
            (),
            (),
            (),
        )
    }

    fn token(aud: &str, exp: i64) -> Token {
        let jwt = jsonwebtoken::encode(
            &Header::default(),
            &Claims {
                sub: "0b6c7f9e-2d1a-4b7e-8c3f-6a5d4e3c2b1a",
                email: "jane@example.com",
                aud,
                exp,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        #[expect(unsafe_code, reason = "encoded above")]
        let token = unsafe { Token::new_unchecked(jwt) };
        token
    }

    #[tokio::test]
    async fn accepts_provider_token() {
        let exp = DateTime::now().unix_timestamp() + 3600;

        let session = service()
            .execute(AuthorizeUserSession {
                token: token("authenticated", exp),
            })
            .await
            .unwrap();

        assert_eq!(
            session.user_id.to_string(),
            "0b6c7f9e-2d1a-4b7e-8c3f-6a5d4e3c2b1a",
        );
        assert_eq!(session.email.unwrap().to_string(), "jane@example.com");
        assert_eq!(session.expires_at.unix_timestamp(), exp);
    }

    #[tokio::test]
    async fn rejects_foreign_audience_and_expired_tokens() {
        let exp = DateTime::now().unix_timestamp() + 3600;
        assert!(service()
            .execute(AuthorizeUserSession {
                token: token("anon", exp),
            })
            .await
            .is_err());

        let expired = DateTime::now().unix_timestamp() - 3600;
        assert!(service()
            .execute(AuthorizeUserSession {
                token: token("authenticated", expired),
            })
            .await
            .is_err());
    }
}
