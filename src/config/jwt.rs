//! JWT configuration for the admin authorization gate.
//!
//! Only HMAC algorithms (HS256/384/512) are supported. When `enabled: true`
//! the secret must be non-empty; this is checked by
//! [`Config::validate()`](super::Config::validate). A disabled gate rejects
//! every admin request rather than letting it through.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ADMIN_ROLE;

pub const VALID_ALGORITHMS: &[&str] = &["HS256", "HS384", "HS512"];

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_admin_role() -> String {
    DEFAULT_ADMIN_ROLE.to_string()
}

fn default_leeway() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(default)]
    pub enabled: bool,
    /// HMAC secret
    #[serde(default)]
    pub secret: String,
    /// One of HS256, HS384, HS512 (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Role value that grants admin access (default: admin)
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
    /// Expected `iss` claim, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Clock skew allowed on `exp`, in seconds (default: 60)
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            secret: String::new(),
            algorithm: default_algorithm(),
            admin_role: default_admin_role(),
            issuer: None,
            leeway_secs: default_leeway(),
        }
    }
}
