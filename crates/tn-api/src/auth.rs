use axum::async_trait;
use axum::extract::FromRef;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use clap::ValueEnum;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum AuthMode {
    ApiKey,
    Jwt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum JwtAlgorithm {
    Hs256,
    Hs512,
    Rs256,
    Es256,
}

pub enum JwtKeyKind {
    Secret,
    Rsa,
    Ec,
}

impl JwtAlgorithm {
    pub fn key_kind(&self) -> JwtKeyKind {
        match self {
            JwtAlgorithm::Hs256 | JwtAlgorithm::Hs512 => JwtKeyKind::Secret,
            JwtAlgorithm::Rs256 => JwtKeyKind::Rsa,
            JwtAlgorithm::Es256 => JwtKeyKind::Ec,
        }
    }

    fn algorithm(&self) -> Algorithm {
        match self {
            JwtAlgorithm::Hs256 => Algorithm::HS256,
            JwtAlgorithm::Hs512 => Algorithm::HS512,
            JwtAlgorithm::Rs256 => Algorithm::RS256,
            JwtAlgorithm::Es256 => Algorithm::ES256,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub mode: AuthMode,
    pub api_key: Option<String>,
    pub jwt_secret: Option<String>,
    pub jwt_public_key: Option<String>,
    pub jwt_algorithm: JwtAlgorithm,
}

/// The authenticated caller. `subject` is the platform user id as issued in
/// the JWT `sub` claim (or the `X-User-Id` header under API-key auth for
/// service-to-service calls acting on a user's behalf).
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: String,
}

impl AuthUser {
    pub fn user_id(&self) -> Result<i64, ApiError> {
        self.subject
            .parse()
            .map_err(|_| ApiError::Unauthorized("subject is not a user id".into()))
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)]
    exp: Option<usize>,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AuthConfig::from_ref(state);

        match config.mode {
            AuthMode::ApiKey => authorize_api_key(parts, &config),
            AuthMode::Jwt => authorize_jwt(parts, &config),
        }
    }
}

fn authorize_api_key(parts: &Parts, config: &AuthConfig) -> Result<AuthUser, ApiError> {
    let expected = config
        .api_key
        .as_deref()
        .ok_or_else(|| ApiError::Unauthorized("missing TN_API_KEY".into()))?;

    let provided = parts
        .headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing X-API-Key header".into()))?;

    if provided != expected {
        return Err(ApiError::Unauthorized("invalid API key".into()));
    }

    let subject = parts
        .headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing X-User-Id header".into()))?;

    Ok(AuthUser {
        subject: subject.to_string(),
    })
}

fn authorize_jwt(parts: &Parts, config: &AuthConfig) -> Result<AuthUser, ApiError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("expected Bearer token".into()))?;

    let key = decoding_key(config)?;
    let validation = Validation::new(config.jwt_algorithm.algorithm());

    let data = decode::<Claims>(token, &key, &validation)
        .map_err(|err| ApiError::Unauthorized(format!("invalid token: {err}")))?;

    Ok(AuthUser {
        subject: data.claims.sub,
    })
}

fn decoding_key(config: &AuthConfig) -> Result<DecodingKey, ApiError> {
    match config.jwt_algorithm.key_kind() {
        JwtKeyKind::Secret => {
            let secret = config
                .jwt_secret
                .as_deref()
                .ok_or_else(|| ApiError::Unauthorized("missing JWT_SECRET".into()))?;
            Ok(DecodingKey::from_secret(secret.as_bytes()))
        }
        JwtKeyKind::Rsa => {
            let pem = config
                .jwt_public_key
                .as_deref()
                .ok_or_else(|| ApiError::Unauthorized("missing JWT_PUBLIC_KEY".into()))?;
            DecodingKey::from_rsa_pem(pem.as_bytes())
                .map_err(|err| ApiError::Unauthorized(format!("invalid public key: {err}")))
        }
        JwtKeyKind::Ec => {
            let pem = config
                .jwt_public_key
                .as_deref()
                .ok_or_else(|| ApiError::Unauthorized("missing JWT_PUBLIC_KEY".into()))?;
            DecodingKey::from_ec_pem(pem.as_bytes())
                .map_err(|err| ApiError::Unauthorized(format!("invalid public key: {err}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn api_key_config() -> AuthConfig {
        AuthConfig {
            mode: AuthMode::ApiKey,
            api_key: Some("secret".into()),
            jwt_secret: None,
            jwt_public_key: None,
            jwt_algorithm: JwtAlgorithm::Hs256,
        }
    }

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn api_key_auth_requires_matching_key_and_user() {
        let config = api_key_config();

        let ok = authorize_api_key(
            &parts_with_headers(&[("x-api-key", "secret"), ("x-user-id", "42")]),
            &config,
        )
        .unwrap();
        assert_eq!(ok.user_id().unwrap(), 42);

        let wrong_key = authorize_api_key(
            &parts_with_headers(&[("x-api-key", "nope"), ("x-user-id", "42")]),
            &config,
        );
        assert!(matches!(wrong_key, Err(ApiError::Unauthorized(_))));

        let missing_user = authorize_api_key(&parts_with_headers(&[("x-api-key", "secret")]), &config);
        assert!(matches!(missing_user, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn non_numeric_subject_is_rejected() {
        let user = AuthUser {
            subject: "alice".into(),
        };
        assert!(matches!(user.user_id(), Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn jwt_round_trip_with_symmetric_secret() {
        use jsonwebtoken::{EncodingKey, Header, encode};

        let config = AuthConfig {
            mode: AuthMode::Jwt,
            api_key: None,
            jwt_secret: Some("jwt-secret".into()),
            jwt_public_key: None,
            jwt_algorithm: JwtAlgorithm::Hs256,
        };

        #[derive(serde::Serialize)]
        struct TestClaims {
            sub: String,
            exp: usize,
        }

        let token = encode(
            &Header::default(),
            &TestClaims {
                sub: "7".into(),
                exp: 4_102_444_800, // far future
            },
            &EncodingKey::from_secret("jwt-secret".as_bytes()),
        )
        .unwrap();

        let bearer = format!("Bearer {token}");
        let parts = parts_with_headers(&[("authorization", bearer.as_str())]);
        let user = authorize_jwt(&parts, &config).unwrap();
        assert_eq!(user.user_id().unwrap(), 7);

        let bad = parts_with_headers(&[("authorization", "Bearer not-a-token")]);
        assert!(matches!(
            authorize_jwt(&bad, &config),
            Err(ApiError::Unauthorized(_))
        ));
    }
}
