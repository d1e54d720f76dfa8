// Authentication module
//
// Admin authorization gate: bearer-token extraction, HMAC JWT validation and
// the admin role check. The gate fails closed: a disabled or misconfigured
// gate rejects every request.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use http::StatusCode;

use crate::config::JwtConfig;
use crate::constants::DEFAULT_USER_ROLE;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has no subject")]
    MissingSubject,

    #[error("Admin authentication is not configured")]
    Disabled,

    #[error("Role '{role}' is not allowed to perform admin actions")]
    Forbidden { role: String },
}

impl AuthError {
    /// 403 for an authenticated non-admin, 401 for everything else.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub exp: Option<u64>,
    pub iat: Option<u64>,
    pub iss: Option<String>,
    #[serde(flatten)]
    pub custom: serde_json::Map<String, serde_json::Value>,
}

/// Caller identity taken from a validated token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self, admin_role: &str) -> bool {
        self.role == admin_role
    }
}

// Helper function to get header value with case-insensitive matching
fn get_header_case_insensitive<'a>(
    headers: &'a HashMap<String, String>,
    header_name: &str,
) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(header_name))
        .map(|(_, value)| value.as_str())
}

pub fn extract_bearer_token(headers: &HashMap<String, String>) -> Option<String> {
    get_header_case_insensitive(headers, "Authorization")
        .and_then(|value| value.trim().strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

fn algorithm(config: &JwtConfig) -> Result<Algorithm, AuthError> {
    match Algorithm::from_str(&config.algorithm) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(AuthError::Disabled),
    }
}

/// Verify signature, expiry and (if configured) issuer.
pub fn validate_jwt(token: &str, config: &JwtConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(algorithm(config)?);
    validation.leeway = config.leeway_secs;
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

/// Authenticate the caller from request headers.
pub fn authenticate(
    headers: &HashMap<String, String>,
    config: &JwtConfig,
) -> Result<AuthenticatedUser, AuthError> {
    if !config.enabled || config.secret.is_empty() {
        return Err(AuthError::Disabled);
    }

    let token = extract_bearer_token(headers).ok_or(AuthError::MissingToken)?;
    let claims = validate_jwt(&token, config)?;

    let id = claims
        .sub
        .filter(|sub| !sub.trim().is_empty())
        .ok_or(AuthError::MissingSubject)?;

    Ok(AuthenticatedUser {
        id,
        email: claims.email.unwrap_or_default(),
        role: claims
            .role
            .filter(|role| !role.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_ROLE.to_string()),
    })
}

/// Authenticate and require the admin role.
pub fn require_admin(
    headers: &HashMap<String, String>,
    config: &JwtConfig,
) -> Result<AuthenticatedUser, AuthError> {
    let user = authenticate(headers, config).map_err(|e| {
        tracing::warn!(error = %e, "Admin request rejected");
        e
    })?;

    if !user.is_admin(&config.admin_role) {
        tracing::warn!(user_id = %user.id, role = %user.role, "Non-admin caller on admin path");
        return Err(AuthError::Forbidden { role: user.role });
    }

    Ok(user)
}

/// Authorization check run before every admin mutation.
pub trait AdminGate {
    fn require_admin(
        &self,
        headers: &HashMap<String, String>,
    ) -> Result<AuthenticatedUser, AuthError>;
}

/// [`AdminGate`] backed by HMAC-signed JWTs.
#[derive(Debug, Clone)]
pub struct JwtAdminGate {
    config: JwtConfig,
}

impl JwtAdminGate {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl AdminGate for JwtAdminGate {
    fn require_admin(
        &self,
        headers: &HashMap<String, String>,
    ) -> Result<AuthenticatedUser, AuthError> {
        require_admin(headers, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "test_secret_key_123";

    fn config() -> JwtConfig {
        JwtConfig {
            enabled: true,
            secret: SECRET.to_string(),
            ..Default::default()
        }
    }

    fn token_with(claims: serde_json::Value, alg: Algorithm, secret: &str) -> String {
        encode(
            &Header::new(alg),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token")
    }

    fn exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    fn bearer(token: &str) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("authorization".to_string(), format!("Bearer {}", token));
        headers
    }

    #[test]
    fn test_extracts_token_from_authorization_header_with_bearer_prefix() {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Bearer abc123token".to_string());
        assert_eq!(extract_bearer_token(&headers), Some("abc123token".to_string()));
    }

    #[test]
    fn test_case_insensitive_header_name_matching() {
        let mut headers = HashMap::new();
        headers.insert("AUTHORIZATION".to_string(), "Bearer tok".to_string());
        assert_eq!(extract_bearer_token(&headers), Some("tok".to_string()));
    }

    #[test]
    fn test_returns_none_when_authorization_header_malformed() {
        for value in ["Basic abc", "Bearer", "Bearer    ", "abc123"] {
            let mut headers = HashMap::new();
            headers.insert("Authorization".to_string(), value.to_string());
            assert_eq!(extract_bearer_token(&headers), None, "{}", value);
        }
        assert_eq!(extract_bearer_token(&HashMap::new()), None);
    }

    #[test]
    fn test_authenticate_reads_identity() {
        let token = token_with(
            json!({"sub": "user-1", "email": "a@example.com", "role": "admin", "exp": exp()}),
            Algorithm::HS256,
            SECRET,
        );
        let user = authenticate(&bearer(&token), &config()).unwrap();
        assert_eq!(
            user,
            AuthenticatedUser {
                id: "user-1".to_string(),
                email: "a@example.com".to_string(),
                role: "admin".to_string(),
            }
        );
    }

    #[test]
    fn test_role_defaults_to_user() {
        let token = token_with(json!({"sub": "user-2", "exp": exp()}), Algorithm::HS256, SECRET);
        let user = authenticate(&bearer(&token), &config()).unwrap();
        assert_eq!(user.role, "user");
        assert_eq!(user.email, "");
    }

    #[test]
    fn test_rejects_jwt_with_invalid_signature() {
        let token = token_with(json!({"sub": "u", "exp": exp()}), Algorithm::HS256, "wrong");
        let err = authenticate(&bearer(&token), &config()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_rejects_expired_token() {
        let expired = chrono::Utc::now().timestamp() - 3600;
        let token = token_with(json!({"sub": "u", "exp": expired}), Algorithm::HS256, SECRET);
        assert!(matches!(
            authenticate(&bearer(&token), &config()),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_rejects_token_without_subject() {
        let token = token_with(json!({"exp": exp()}), Algorithm::HS256, SECRET);
        assert!(matches!(
            authenticate(&bearer(&token), &config()),
            Err(AuthError::MissingSubject)
        ));
    }

    #[test]
    fn test_hs512_and_issuer() {
        let config = JwtConfig {
            algorithm: "HS512".to_string(),
            issuer: Some("pis-auth".to_string()),
            ..config()
        };
        let good = token_with(
            json!({"sub": "u", "iss": "pis-auth", "exp": exp()}),
            Algorithm::HS512,
            SECRET,
        );
        assert!(authenticate(&bearer(&good), &config).is_ok());

        let wrong_iss = token_with(
            json!({"sub": "u", "iss": "other", "exp": exp()}),
            Algorithm::HS512,
            SECRET,
        );
        assert!(authenticate(&bearer(&wrong_iss), &config).is_err());
    }

    #[test]
    fn test_require_admin_fails_closed() {
        // Missing token
        let err = require_admin(&HashMap::new(), &config()).unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));

        // Gate disabled: even a valid admin token is rejected
        let token = token_with(
            json!({"sub": "u", "role": "admin", "exp": exp()}),
            Algorithm::HS256,
            SECRET,
        );
        let disabled = JwtConfig {
            enabled: false,
            ..config()
        };
        let err = require_admin(&bearer(&token), &disabled).unwrap_err();
        assert!(matches!(err, AuthError::Disabled));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_require_admin_forbids_other_roles() {
        let token = token_with(
            json!({"sub": "u", "role": "editor", "exp": exp()}),
            Algorithm::HS256,
            SECRET,
        );
        let gate = JwtAdminGate::new(config());
        let err = gate.require_admin(&bearer(&token)).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "Role 'editor' is not allowed to perform admin actions");
    }

    #[test]
    fn test_require_admin_accepts_admin() {
        let token = token_with(
            json!({"sub": "u", "role": "admin", "exp": exp()}),
            Algorithm::HS256,
            SECRET,
        );
        let user = JwtAdminGate::new(config()).require_admin(&bearer(&token)).unwrap();
        assert_eq!(user.id, "u");
    }
}
