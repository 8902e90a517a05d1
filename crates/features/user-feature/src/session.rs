//! Signed bearer tokens identifying a user

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::error::UserFeatureError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// HS256 signing keys plus the lifetime of issued tokens
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue a token whose subject is `user_id`
    pub fn issue(&self, user_id: i64) -> Result<String, UserFeatureError> {
        let now = OffsetDateTime::now_utc();
        let expires = now
            .checked_add(self.ttl)
            .ok_or(UserFeatureError::SessionLifetime)?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.unix_timestamp(),
            exp: expires.unix_timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Verify signature and expiry and return the user id the token was issued for.
    ///
    /// Every failure collapses into [`UserFeatureError::Unauthenticated`].
    pub fn verify(&self, token: &str) -> Result<i64, UserFeatureError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| UserFeatureError::Unauthenticated)?;

        data.claims
            .sub
            .parse::<i64>()
            .map_err(|_| UserFeatureError::Unauthenticated)
    }
}
