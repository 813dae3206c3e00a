//! IAM policy documents returned by policy-style authorizers.

use serde::{Deserialize, Serialize};

/// IAM policy language version.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Action granting invocation of an API gateway route.
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// Statement effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// Policy document (`policyDocument` in the authorizer response).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

/// A single policy statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub action: Vec<String>,
    pub effect: Effect,
    pub resource: Vec<String>,
}

impl PolicyDocument {
    /// Single-statement policy applying `effect` to invoking `resource`.
    pub fn invoke(effect: Effect, resource: impl Into<String>) -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement: vec![PolicyStatement {
                action: vec![INVOKE_ACTION.to_string()],
                effect,
                resource: vec![resource.into()],
            }],
        }
    }

    /// Whether any statement allows `action` on `resource`.
    pub fn allows(&self, action: &str, resource: &str) -> bool {
        self.statement.iter().any(|s| {
            s.effect == Effect::Allow
                && s.action.iter().any(|a| a == action)
                && s.resource.iter().any(|r| r == resource)
        })
    }
}
