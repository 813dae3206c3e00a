//! Authorizer configuration.
//!
//! Built once at startup and handed to the [`Authorizer`](crate::Authorizer);
//! nothing in the request path reads the process environment.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::{AuthorizerError, AuthorizerResult};

/// Table queried when `AUTH_TABLE_NAME` is unset or empty.
pub const DEFAULT_TABLE_NAME: &str = "AUTH";

/// Attribute holding the token in each authorization record.
pub const DEFAULT_KEY_ATTRIBUTE: &str = "key";

/// Header carrying the credential on WebSocket upgrade requests.
pub const DEFAULT_TOKEN_HEADER: &str = "Sec-WebSocket-Protocol";

/// Principal reported in policy responses.
pub const DEFAULT_PRINCIPAL_ID: &str = "user";

/// Shape of the response handed back to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// IAM policy document (`principalId` + `policyDocument`).
    #[default]
    Policy,
    /// Simple `{"isAuthorized": bool}` response (HTTP API payload v2).
    Simple,
}

impl FromStr for ResponseFormat {
    type Err = AuthorizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "policy" | "iam" => Ok(Self::Policy),
            "simple" => Ok(Self::Simple),
            other => Err(AuthorizerError::Config {
                message: format!(
                    "unknown response format '{}' (expected 'policy' or 'simple')",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Policy => f.write_str("policy"),
            Self::Simple => f.write_str("simple"),
        }
    }
}

/// Authorizer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizerConfig {
    /// Backing table holding one record per valid token.
    pub table_name: String,

    /// Partition key attribute of the table.
    pub key_attribute: String,

    /// Request header carrying the token.
    pub token_header: String,

    /// Response shape for this deployment.
    pub response_format: ResponseFormat,

    /// Principal reported in policy responses.
    pub principal_id: String,

    /// Static context passed through to the gateway integration.
    pub context: BTreeMap<String, String>,
}

impl Default for AuthorizerConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            key_attribute: DEFAULT_KEY_ATTRIBUTE.to_string(),
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            response_format: ResponseFormat::default(),
            principal_id: DEFAULT_PRINCIPAL_ID.to_string(),
            context: BTreeMap::new(),
        }
    }
}

impl AuthorizerConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `AUTH_TABLE_NAME` | Table holding valid tokens (default: `AUTH`) |
    /// | `AUTH_TOKEN_HEADER` | Header carrying the token (default: `Sec-WebSocket-Protocol`) |
    /// | `AUTH_RESPONSE_FORMAT` | `policy` or `simple` (default: `policy`) |
    /// | `AUTH_PRINCIPAL_ID` | Principal in policy responses (default: `user`) |
    ///
    /// Empty values fall back to the defaults. An unknown response format is
    /// rejected so a misconfigured deployment fails at startup.
    pub fn from_env() -> AuthorizerResult<Self> {
        let mut cfg = Self::default();

        if let Some(v) = non_empty_var("AUTH_TABLE_NAME") {
            cfg.table_name = v;
        }

        if let Some(v) = non_empty_var("AUTH_TOKEN_HEADER") {
            cfg.token_header = v;
        }

        if let Some(v) = non_empty_var("AUTH_RESPONSE_FORMAT") {
            cfg.response_format = v.parse()?;
        }

        if let Some(v) = non_empty_var("AUTH_PRINCIPAL_ID") {
            cfg.principal_id = v;
        }

        Ok(cfg)
    }

    /// Set the table name.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Set the header carrying the token.
    pub fn with_token_header(mut self, header: impl Into<String>) -> Self {
        self.token_header = header.into();
        self
    }

    /// Set the response format.
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    /// Set the principal reported in policy responses.
    pub fn with_principal_id(mut self, principal_id: impl Into<String>) -> Self {
        self.principal_id = principal_id.into();
        self
    }

    /// Add a context entry passed through to the integration.
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
