//! HMAC-signed bearer tokens implementing the [`TokenAuthority`] port.

use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, Secret};
use warden_core::{Claims, TokenAuthority, TokenError, User};

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub ttl_seconds: i64,
}

impl JwtConfig {
    fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

pub struct JwtTokenAuthority {
    config: JwtConfig,
}

impl JwtTokenAuthority {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl TokenAuthority for JwtTokenAuthority {
    fn issue(&self, user: &User) -> Result<(String, Claims), TokenError> {
        let claims = Claims::for_user(user, Utc::now().timestamp(), self.config.ttl_seconds);

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map_err(|e| TokenError::Issuance(e.to_string()))?;

        Ok((token, claims))
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::InvalidSignature(e.to_string()),
        })
    }
}
