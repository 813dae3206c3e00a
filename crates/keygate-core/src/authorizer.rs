//! Authorization decision: extract → normalize → look up → decide.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::AuthorizerConfig;
use crate::decision::Decision;
use crate::gateway::AuthRequest;
use crate::policy::{Effect, PolicyDocument};
use crate::store::CredentialStore;
use crate::token::{extract_token, fingerprint};

/// Token-lookup authorizer.
///
/// Holds no per-request state; one instance serves every invocation of the
/// process and may be shared across tasks.
#[derive(Clone)]
pub struct Authorizer {
    config: Arc<AuthorizerConfig>,
    store: Arc<dyn CredentialStore>,
}

impl Authorizer {
    pub fn new(config: AuthorizerConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    pub fn config(&self) -> &AuthorizerConfig {
        &self.config
    }

    /// Decide whether `request` may connect.
    ///
    /// A missing credential short-circuits to [`Decision::Unauthorized`]
    /// without touching the store. Store failures become
    /// [`Decision::Error`] and are never reported as a denial.
    pub async fn authorize(&self, request: &AuthRequest) -> Decision {
        let Some(token) = extract_token(request, &self.config.token_header) else {
            info!(
                header = %self.config.token_header,
                "no credential in request"
            );
            return Decision::Unauthorized;
        };

        let token_fp = fingerprint(&token);
        debug!(
            token_fp = %token_fp,
            table = %self.config.table_name,
            store = self.store.name(),
            "looking up credential"
        );

        match self.store.contains(&token).await {
            Err(e) => {
                warn!(token_fp = %token_fp, error = %e, "credential lookup failed");
                Decision::Error(e)
            }
            Ok(false) => {
                info!(token_fp = %token_fp, "unknown credential");
                Decision::Unauthorized
            }
            Ok(true) => {
                info!(
                    token_fp = %token_fp,
                    resource = request.resource.as_deref().unwrap_or(""),
                    "credential accepted"
                );
                let policy = request
                    .resource
                    .as_deref()
                    .filter(|r| !r.is_empty())
                    .map(|r| PolicyDocument::invoke(Effect::Allow, r));
                Decision::Authorized(policy)
            }
        }
    }
}

impl std::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorizer")
            .field("config", &self.config)
            .field("store", &self.store.name())
            .finish()
    }
}
