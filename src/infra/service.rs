pub mod security {
    use std::str::FromStr;

    use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
    use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
    use serde::{de::DeserializeOwned, Serialize};

    use crate::domain::datatype::security::{
        PasswordHash, PasswordHashError, TokenEncryptionError, TokenIssuer, TokenPayload,
    };
    use crate::domain::service::{PasswordHashService, TokenEncryptionService};

    pub struct Argon2HashService(Argon2<'static>);

    impl Argon2HashService {
        pub fn new() -> Self {
            Self(Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(
                    Params::DEFAULT_M_COST,
                    Params::DEFAULT_T_COST,
                    Params::DEFAULT_P_COST,
                    Some(Params::DEFAULT_OUTPUT_LEN),
                )
                .expect("Expect valid default Argon2 params"),
            ))
        }
    }

    impl Default for Argon2HashService {
        fn default() -> Self {
            Self::new()
        }
    }

    impl PasswordHashService for Argon2HashService {
        fn hash_password(&self, pwd: &str) -> Result<PasswordHash, PasswordHashError> {
            let salt = password_hash::SaltString::generate(&mut rand_core::OsRng);
            let hash = self.0.hash_password(pwd.as_bytes(), &salt)?;

            PasswordHash::from_str(&hash.to_string())
                .map_err(|_| PasswordHashError::InvalidPasswordHash)
        }

        fn verify_password(&self, pwd: &str, hash: &PasswordHash) -> Result<(), PasswordHashError> {
            let parsed = password_hash::PasswordHash::new(hash.as_str())?;
            self.0.verify_password(pwd.as_bytes(), &parsed)?;
            Ok(())
        }
    }

    pub struct JwtEncryptionService {
        header: Header,
        encoding_key: EncodingKey,
        decoding_key: DecodingKey,
        validation: Validation,
    }

    impl JwtEncryptionService {
        pub fn new(secret: String) -> Self {
            let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
            validation.set_required_spec_claims(&["exp", "iss", "sub"]);
            validation.set_issuer(&[TokenIssuer::as_str()]);
            validation.leeway = 60;
            validation.validate_exp = true;
            validation.validate_nbf = false;

            Self {
                encoding_key: EncodingKey::from_secret(secret.as_ref()),
                decoding_key: DecodingKey::from_secret(secret.as_ref()),
                header: Header::new(jsonwebtoken::Algorithm::HS256),
                validation,
            }
        }
    }

    impl TokenEncryptionService for JwtEncryptionService {
        fn issue_token<T>(&self, payload: &TokenPayload<T>) -> Result<String, TokenEncryptionError>
        where
            T: Serialize,
        {
            let token = jsonwebtoken::encode(&self.header, payload, &self.encoding_key)?;
            Ok(token)
        }

        fn verify_token<T>(&self, token: &str) -> Result<TokenPayload<T>, TokenEncryptionError>
        where
            T: DeserializeOwned,
        {
            let token_data = jsonwebtoken::decode::<TokenPayload<T>>(
                token,
                &self.decoding_key,
                &self.validation,
            )?;
            Ok(token_data.claims)
        }
    }

    #[cfg(test)]
    mod tests {
        use std::time::Duration;

        use uuid::Uuid;

        use super::*;
        use crate::domain::datatype::security::{Token, TokenSubject};

        #[test]
        fn password_hash_verifies_the_original_password_only() {
            let service = Argon2HashService::new();
            let hash = service.hash_password("s3cur3-p4ss").unwrap();

            assert!(service.verify_password("s3cur3-p4ss", &hash).is_ok());
            assert!(service.verify_password("wrong-pass", &hash).is_err());
        }

        #[test]
        fn token_round_trips_its_payload() {
            let service = JwtEncryptionService::new("a-unit-test-secret".into());
            let sub = TokenSubject::User(Uuid::new_v4());
            let payload = TokenPayload::new(Duration::from_secs(60), sub, ());

            let token = service.issue_token(&payload).unwrap();
            let verified: TokenPayload<()> = service.verify_token(&token).unwrap();

            assert_eq!(verified.sub, sub);
            assert_eq!(verified.iss, TokenIssuer::as_str());
            assert_eq!(verified.exp, payload.exp);
        }

        #[test]
        fn signed_token_verifies_through_the_token_datatype() {
            let service = JwtEncryptionService::new("a-unit-test-secret".into());
            let sub = TokenSubject::User(Uuid::new_v4());
            let payload = TokenPayload::new(Duration::from_secs(60), sub, ());

            let token = Token::new(payload, &service).unwrap();
            let verified: Token<()> = Token::verify(token.as_str().into(), &service).unwrap();

            assert_eq!(verified.payload().sub, sub);
            assert_eq!(verified.as_str(), token.as_str());
        }

        #[test]
        fn expired_token_is_rejected() {
            let service = JwtEncryptionService::new("a-unit-test-secret".into());
            let mut payload =
                TokenPayload::new(Duration::from_secs(0), TokenSubject::User(Uuid::new_v4()), ());
            // beyond the validation leeway
            payload.iat -= 3600;
            payload.exp = payload.iat + 1;

            let token = service.issue_token(&payload).unwrap();
            let verified = service.verify_token::<()>(&token);

            assert!(matches!(verified, Err(TokenEncryptionError::Expired)));
        }

        #[test]
        fn token_signed_with_another_secret_is_rejected() {
            let issuer = JwtEncryptionService::new("first-secret".into());
            let verifier = JwtEncryptionService::new("second-secret".into());
            let payload = TokenPayload::new(
                Duration::from_secs(60),
                TokenSubject::User(Uuid::new_v4()),
                (),
            );

            let token = issuer.issue_token(&payload).unwrap();
            assert!(verifier.verify_token::<()>(&token).is_err());
        }
    }
}
