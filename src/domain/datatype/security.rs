use std::str::FromStr;
use std::time::Duration;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::base::ResourceID;
use crate::error::resource::{ValidationErrorKind, ValidationFieldError};

/// Password hash in the [PHC string format][1].
///
/// Only the serialized form is kept; the PHC string is validated on parse and
/// interpreted again by the hashing service on verification.
///
/// [1]: https://github.com/P-H-C/phc-string-format/blob/master/phc-sf-spec.md
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ResourceID for PasswordHash {
    fn resource_id() -> &'static str {
        "base::password_hash"
    }
}

impl FromStr for PasswordHash {
    type Err = ValidationFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        password_hash::PasswordHash::new(s).map_err(|_| {
            ValidationFieldError::from_resource::<Self>(
                s.into(),
                String::new(),
                vec![ValidationErrorKind::Invalid],
            )
        })?;
        Ok(Self(s.into()))
    }
}

#[derive(Debug)]
pub enum PasswordHashError {
    /// Unsupported algorithm.
    UnsupportedAlgorithm,
    /// Invalid password.
    InvalidPassword,
    /// Invalid password hash.
    InvalidPasswordHash,
    /// Cryptographic error.
    Cryptographic,
    /// Error in the hasher configuration.
    Config,
    Unknown,
}

impl From<password_hash::Error> for PasswordHashError {
    fn from(err: password_hash::Error) -> Self {
        match err {
            password_hash::Error::Algorithm => Self::UnsupportedAlgorithm,
            password_hash::Error::Version => Self::UnsupportedAlgorithm,
            password_hash::Error::Password => Self::InvalidPassword,
            password_hash::Error::B64Encoding(_) => Self::InvalidPasswordHash,
            password_hash::Error::PhcStringInvalid
            | password_hash::Error::PhcStringTooShort
            | password_hash::Error::PhcStringTooLong => Self::InvalidPasswordHash,
            password_hash::Error::Crypto
            | password_hash::Error::OutputTooShort
            | password_hash::Error::OutputTooLong => Self::Cryptographic,
            password_hash::Error::ParamNameDuplicated
            | password_hash::Error::ParamNameInvalid
            | password_hash::Error::ParamValueInvalid(_)
            | password_hash::Error::ParamsMaxExceeded
            | password_hash::Error::SaltInvalid(_) => Self::Config,
            _ => Self::Unknown,
        }
    }
}

impl From<argon2::Error> for PasswordHashError {
    fn from(err: argon2::Error) -> Self {
        match err {
            argon2::Error::AlgorithmInvalid | argon2::Error::VersionInvalid => {
                Self::UnsupportedAlgorithm
            }
            argon2::Error::PwdTooLong => Self::InvalidPassword,
            argon2::Error::KeyIdTooLong => Self::InvalidPasswordHash,
            _ => Self::Config,
        }
    }
}

#[derive(Debug, Display)]
pub enum TokenEncryptionError {
    /// Failure signing the token payload.
    #[display(fmt = "token_sign")]
    Sign,
    /// Token signature or structure is not valid.
    #[display(fmt = "token_invalid")]
    Invalid,
    /// Token expired.
    #[display(fmt = "token_expired")]
    Expired,
    /// Token claims do not match the expected issuer or shape.
    #[display(fmt = "token_claims")]
    Claims,
}

impl std::error::Error for TokenEncryptionError {}

impl From<jsonwebtoken::errors::Error> for TokenEncryptionError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidIssuer
            | ErrorKind::InvalidAudience
            | ErrorKind::InvalidSubject
            | ErrorKind::MissingRequiredClaim(_)
            | ErrorKind::ImmatureSignature => Self::Claims,
            ErrorKind::Json(_) | ErrorKind::Utf8(_) | ErrorKind::Base64(_) => Self::Invalid,
            _ => Self::Invalid,
        }
    }
}

pub struct TokenIssuer;

impl TokenIssuer {
    pub fn as_str() -> &'static str {
        "fleetops-api"
    }
}

/// Principal a token was issued for, serialized as `<kind>:<uuid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSubject {
    User(Uuid),
}

impl TokenSubject {
    pub fn user_id(&self) -> Uuid {
        match self {
            TokenSubject::User(id) => *id,
        }
    }
}

impl std::fmt::Display for TokenSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSubject::User(id) => write!(f, "user:{id}"),
        }
    }
}

impl FromStr for TokenSubject {
    type Err = TokenEncryptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .strip_prefix("user:")
            .ok_or(TokenEncryptionError::Claims)?;
        let id = id.parse().map_err(|_| TokenEncryptionError::Claims)?;
        Ok(TokenSubject::User(id))
    }
}

impl Serialize for TokenSubject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenSubject {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPayload<T> {
    pub iss: String,
    pub sub: TokenSubject,
    pub iat: u64,
    pub exp: u64,
    pub data: T,
}

impl<T> TokenPayload<T> {
    pub fn new(expiration: Duration, sub: TokenSubject, data: T) -> Self {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("Expect current time after the unix epoch")
            .as_secs();

        Self {
            iss: TokenIssuer::as_str().into(),
            sub,
            iat: now,
            exp: now + expiration.as_secs(),
            data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token<T> {
    pub(in crate::domain) token: String,
    pub(in crate::domain) payload: TokenPayload<T>,
}

impl<T> Token<T> {
    pub fn payload(&self) -> &TokenPayload<T> {
        &self.payload
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }
}

impl<T> From<Token<T>> for String {
    fn from(token: Token<T>) -> Self {
        token.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_rejects_non_phc_strings() {
        assert!(PasswordHash::from_str("hunter2").is_err());
        assert!(PasswordHash::from_str(
            "$argon2id$v=19$m=4096,t=3,p=1$c2FsdHNhbHQ$aGFzaG91dHB1dDEyMzQ1Ng"
        )
        .is_ok());
    }

    #[test]
    fn token_subject_round_trips_through_string() {
        let sub = TokenSubject::User(Uuid::new_v4());
        let parsed: TokenSubject = sub.to_string().parse().unwrap();
        assert_eq!(sub, parsed);
    }

    #[test]
    fn token_subject_rejects_foreign_prefix() {
        assert!("service:3fa85f64-5717-4562-b3fc-2c963f66afa6"
            .parse::<TokenSubject>()
            .is_err());
    }
}
