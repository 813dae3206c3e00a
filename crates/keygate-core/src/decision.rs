//! Authorization outcome.

use crate::error::{AuthorizerError, AuthorizerResult};
use crate::policy::PolicyDocument;

/// Result of a single authorization attempt.
///
/// Response shape (boolean flag vs. policy document) is chosen later by the
/// gateway adapter; this type only carries the decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// A record exists for the token. Carries an Allow policy when the
    /// request named a resource.
    Authorized(Option<PolicyDocument>),

    /// No credential, or no record for it.
    Unauthorized,

    /// The lookup itself failed.
    Error(AuthorizerError),
}

impl Decision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized(_))
    }

    /// Split into the non-error outcome and the propagated error.
    pub fn into_result(self) -> AuthorizerResult<Self> {
        match self {
            Self::Error(err) => Err(err),
            other => Ok(other),
        }
    }
}
