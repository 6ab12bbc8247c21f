use crate::config::parameter;
use crate::dto::token_dto::{TokenClaimsDto, TokenDetails};
use crate::error::token_error::TokenError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

pub const DEFAULT_ACCESS_MINUTES: i64 = 15;
pub const DEFAULT_REFRESH_DAYS: i64 = 7;

/// Stateless HS256 codec for access and refresh tokens.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    access_expiration_seconds: i64,
    refresh_expiration_seconds: i64,
}

pub trait TokenServiceTrait {
    fn new() -> Result<Self, TokenError> where Self: Sized;
    fn mint(&self, subject: &str) -> Result<TokenDetails, TokenError>;
    fn validate(&self, token: &str) -> Result<TokenClaimsDto, TokenError>;
}

impl TokenService {
    pub fn with_settings(
        secret: impl Into<String>,
        access_expiration_minutes: i64,
        refresh_expiration_days: i64,
    ) -> Result<Self, TokenError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(TokenError::TokenCreationError(
                "JWT_SECRET must not be empty".to_string(),
            ));
        }

        Ok(Self {
            secret,
            access_expiration_seconds: lifetime_seconds(access_expiration_minutes, 60)?,
            refresh_expiration_seconds: lifetime_seconds(refresh_expiration_days, 24 * 60 * 60)?,
        })
    }

    pub fn access_expiration_seconds(&self) -> i64 {
        self.access_expiration_seconds
    }

    pub fn refresh_expiration_seconds(&self) -> i64 {
        self.refresh_expiration_seconds
    }

    fn sign(&self, subject: &str, exp: i64, jti: &str) -> Result<String, TokenError> {
        let claims = TokenClaimsDto {
            sub: subject.to_string(),
            exp,
            jti: jti.to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| TokenError::TokenCreationError(e.to_string()))
    }
}

impl TokenServiceTrait for TokenService {
    fn new() -> Result<Self, TokenError> {
        let secret = parameter::get_optional("JWT_SECRET").unwrap_or_default();

        Self::with_settings(
            secret,
            parameter::get_positive_i64_or("JWT_ACCESS_TOKEN_EXPIRY_MINUTES", DEFAULT_ACCESS_MINUTES),
            parameter::get_positive_i64_or("JWT_REFRESH_TOKEN_EXPIRY_DAYS", DEFAULT_REFRESH_DAYS),
        )
    }

    fn mint(&self, subject: &str) -> Result<TokenDetails, TokenError> {
        let now = chrono::Utc::now().timestamp();

        let access_uuid = Uuid::new_v4().to_string();
        let refresh_uuid = Uuid::new_v4().to_string();
        let at_expires = expiry_after(now, self.access_expiration_seconds)?;
        let rt_expires = expiry_after(now, self.refresh_expiration_seconds)?;

        let access_token = self.sign(subject, at_expires, &access_uuid)?;
        let refresh_token = self.sign(subject, rt_expires, &refresh_uuid)?;

        Ok(TokenDetails {
            access_token,
            refresh_token,
            access_uuid,
            refresh_uuid,
            at_expires,
            rt_expires,
        })
    }

    fn validate(&self, token: &str) -> Result<TokenClaimsDto, TokenError> {
        // Only HS256 is accepted; `exp` is mandatory and checked with no leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0;

        let token_data = decode::<TokenClaimsDto>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            other => TokenError::InvalidToken(format!("{:?}", other)),
        })?;

        // jsonwebtoken lets `exp == now` through; a token is valid strictly before its expiry.
        if token_data.claims.exp <= chrono::Utc::now().timestamp() {
            return Err(TokenError::TokenExpired);
        }

        token_data.claims.user_id()?;

        Ok(token_data.claims)
    }
}

fn lifetime_seconds(amount: i64, unit_seconds: i64) -> Result<i64, TokenError> {
    amount
        .checked_mul(unit_seconds)
        .ok_or_else(|| TokenError::TokenCreationError(format!("Token lifetime {amount} is out of range")))
}

fn expiry_after(now: i64, lifetime_seconds: i64) -> Result<i64, TokenError> {
    now.checked_add(lifetime_seconds)
        .ok_or_else(|| TokenError::TokenCreationError("Token expiry is out of range".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "unit-test-secret-with-enough-entropy";

    fn service() -> TokenService {
        TokenService::with_settings(SECRET, 15, 7).unwrap()
    }

    fn forge(header: Header, claims: serde_json::Value, secret: &str) -> String {
        encode(&header, &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_mint_then_validate() {
        let service = service();
        let subject = Uuid::new_v4().to_string();
        let tokens = service.mint(&subject).unwrap();

        let access = service.validate(&tokens.access_token).unwrap();
        let refresh = service.validate(&tokens.refresh_token).unwrap();

        assert_eq!(access.sub, subject);
        assert_eq!(refresh.sub, subject);
        assert!(access.exp > chrono::Utc::now().timestamp());
        assert_ne!(access.jti, refresh.jti);
        assert_eq!(access.jti, tokens.access_uuid);
    }

    #[test]
    fn test_expiry_offsets() {
        let service = service();
        let before = chrono::Utc::now().timestamp();
        let tokens = service.mint(&Uuid::new_v4().to_string()).unwrap();
        let after = chrono::Utc::now().timestamp();

        assert!(tokens.at_expires >= before + 15 * 60 && tokens.at_expires <= after + 15 * 60);
        assert!(tokens.rt_expires >= before + 7 * 86_400 && tokens.rt_expires <= after + 7 * 86_400);
        assert_eq!(tokens.expires_in(), tokens.at_expires - tokens.rt_expires);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let claims = json!({
            "sub": Uuid::new_v4().to_string(),
            "exp": chrono::Utc::now().timestamp() + 600,
            "jti": Uuid::new_v4().to_string(),
        });
        let token = forge(Header::new(Algorithm::HS256), claims, "some-other-secret");

        assert!(matches!(service().validate(&token), Err(TokenError::InvalidToken(_))));
    }

    #[test]
    fn test_non_hs256_algorithm_is_rejected() {
        let claims = json!({
            "sub": Uuid::new_v4().to_string(),
            "exp": chrono::Utc::now().timestamp() + 600,
            "jti": Uuid::new_v4().to_string(),
        });
        // Same secret, different HMAC: must still be refused.
        let token = forge(Header::new(Algorithm::HS512), claims, SECRET);

        assert!(service().validate(&token).is_err());
    }

    #[test]
    fn test_non_hmac_headers_are_rejected() {
        // Payload: a valid subject expiring in 2100
        let payload = "eyJzdWIiOiI3ZjNjMmE5ZS00YjFkLTRjOGUtOWE2Zi0yZDVlOGIxYzBmNDciLCJleHAiOjQxMDI0NDQ4MDAsImp0aSI6Im5vbmUtYWxnIn0";
        // {"alg":"none","typ":"JWT"} with an empty signature
        let unsigned = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{payload}.");
        // {"alg":"RS256","typ":"JWT"} with a bogus signature
        let rs256 = format!("eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.{payload}.c2lnbmF0dXJl");

        for token in [unsigned, rs256] {
            assert!(
                matches!(service().validate(&token), Err(TokenError::InvalidToken(_))),
                "{token}"
            );
        }
    }

    #[test]
    fn test_absurd_lifetimes_are_refused() {
        assert!(matches!(
            TokenService::with_settings(SECRET, i64::MAX, 7),
            Err(TokenError::TokenCreationError(_))
        ));
        assert!(matches!(
            TokenService::with_settings(SECRET, 15, i64::MAX / 1000),
            Err(TokenError::TokenCreationError(_))
        ));

        // Fits in seconds but not once added to the current time
        let service = TokenService::with_settings(SECRET, i64::MAX / 60, 7).unwrap();
        assert!(matches!(
            service.mint(&Uuid::new_v4().to_string()),
            Err(TokenError::TokenCreationError(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = json!({
            "sub": Uuid::new_v4().to_string(),
            "exp": chrono::Utc::now().timestamp() - 1,
            "jti": Uuid::new_v4().to_string(),
        });
        let token = forge(Header::new(Algorithm::HS256), claims, SECRET);

        assert!(matches!(service().validate(&token), Err(TokenError::TokenExpired)));
    }

    #[test]
    fn test_missing_exp_is_rejected() {
        let claims = json!({
            "sub": Uuid::new_v4().to_string(),
            "jti": Uuid::new_v4().to_string(),
        });
        let token = forge(Header::new(Algorithm::HS256), claims, SECRET);

        assert!(service().validate(&token).is_err());
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let claims = json!({
            "sub": "alice",
            "exp": chrono::Utc::now().timestamp() + 600,
            "jti": Uuid::new_v4().to_string(),
        });
        let token = forge(Header::new(Algorithm::HS256), claims, SECRET);

        assert!(matches!(service().validate(&token), Err(TokenError::InvalidSubject)));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(service().validate("not.a.jwt").is_err());
        assert!(service().validate("").is_err());
    }

    #[test]
    fn test_empty_secret_is_refused() {
        assert!(TokenService::with_settings("", 15, 7).is_err());
    }
}
