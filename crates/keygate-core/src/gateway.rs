//! Gateway boundary: authorizer events in, authorizer responses out.
//!
//! Accepted event shapes:
//!
//! | Shape | Credential | Resource |
//! |-------|------------|----------|
//! | REST `TOKEN` | `authorizationToken` | `methodArn` |
//! | REST / WebSocket `REQUEST` | `headers` | `methodArn` |
//! | HTTP API payload v2 | `headers` | `routeArn`, else `requestContext.domainName` |
//!
//! The response shape is picked per deployment through
//! [`ResponseFormat`]; the decision itself does not depend on it.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::authorizer::Authorizer;
use crate::config::{AuthorizerConfig, ResponseFormat};
use crate::decision::Decision;
use crate::error::{AuthorizerError, AuthorizerResult};
use crate::policy::{Effect, PolicyDocument};

/// Raw authorizer event as delivered by the gateway.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerEvent {
    /// `TOKEN` or `REQUEST`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Payload version (`"2.0"` for HTTP APIs).
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub authorization_token: Option<String>,

    #[serde(default)]
    pub method_arn: Option<String>,

    #[serde(default)]
    pub route_arn: Option<String>,

    /// Absent on `TOKEN` events, sometimes explicitly `null`.
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,

    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

/// Subset of `requestContext` the authorizer reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub domain_name: Option<String>,

    #[serde(default)]
    pub route_key: Option<String>,

    #[serde(default)]
    pub connection_id: Option<String>,
}

/// Normalized request handed to the [`Authorizer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthRequest {
    pub headers: HashMap<String, String>,

    /// Single-field credential (`TOKEN` authorizers).
    pub authorization_token: Option<String>,

    /// Identifier the generated policy grants access to.
    pub resource: Option<String>,
}

impl From<AuthorizerEvent> for AuthRequest {
    fn from(event: AuthorizerEvent) -> Self {
        let domain_name = event.request_context.and_then(|ctx| ctx.domain_name);
        let resource = event
            .method_arn
            .filter(|s| !s.is_empty())
            .or(event.route_arn.filter(|s| !s.is_empty()))
            .or(domain_name.filter(|s| !s.is_empty()));

        Self {
            headers: event.headers.unwrap_or_default(),
            authorization_token: event.authorization_token,
            resource,
        }
    }
}

/// IAM-policy style response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResponse {
    pub principal_id: String,

    pub policy_document: PolicyDocument,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

/// Simple boolean response (HTTP API payload v2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponse {
    pub is_authorized: bool,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

/// Response returned to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuthorizerResponse {
    Policy(PolicyResponse),
    Simple(SimpleResponse),
}

/// Render a decision in the deployment's response shape.
///
/// Unauthorized is rendered declaratively (Deny policy or
/// `isAuthorized: false`). [`Decision::Error`] becomes `Err`, which fails
/// the invocation. The policy format needs a resource to grant or deny;
/// without one the event is rejected as invalid rather than rendered as a
/// policy that says nothing.
pub fn render(
    decision: Decision,
    resource: Option<&str>,
    config: &AuthorizerConfig,
) -> AuthorizerResult<AuthorizerResponse> {
    let decision = decision.into_result()?;
    let authorized = decision.is_authorized();
    let context = if authorized {
        config.context.clone()
    } else {
        BTreeMap::new()
    };

    let response = match config.response_format {
        ResponseFormat::Simple => AuthorizerResponse::Simple(SimpleResponse {
            is_authorized: authorized,
            context,
        }),
        ResponseFormat::Policy => {
            let resource = require_resource(resource)?;
            let policy_document = match decision {
                Decision::Authorized(Some(policy)) => policy,
                Decision::Authorized(None) => PolicyDocument::invoke(Effect::Allow, resource),
                _ => PolicyDocument::invoke(Effect::Deny, resource),
            };
            AuthorizerResponse::Policy(PolicyResponse {
                principal_id: config.principal_id.clone(),
                policy_document,
                context,
            })
        }
    };

    Ok(response)
}

fn require_resource(resource: Option<&str>) -> AuthorizerResult<&str> {
    resource
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AuthorizerError::InvalidEvent {
            message: "policy response requires methodArn, routeArn or requestContext.domainName"
                .to_string(),
        })
}

/// Handle one raw gateway event end to end.
///
/// Events that cannot be rendered in the configured format are rejected
/// before the store is queried.
pub async fn handle_event(
    authorizer: &Authorizer,
    event: serde_json::Value,
) -> AuthorizerResult<serde_json::Value> {
    let event: AuthorizerEvent = serde_json::from_value(event)?;
    debug!(
        kind = event.kind.as_deref().unwrap_or("-"),
        version = event.version.as_deref().unwrap_or("-"),
        route_key = event
            .request_context
            .as_ref()
            .and_then(|c| c.route_key.as_deref())
            .unwrap_or("-"),
        connection_id = event
            .request_context
            .as_ref()
            .and_then(|c| c.connection_id.as_deref())
            .unwrap_or("-"),
        "received authorizer event"
    );

    let request = AuthRequest::from(event);
    if authorizer.config().response_format == ResponseFormat::Policy {
        require_resource(request.resource.as_deref())?;
    }
    let decision = authorizer.authorize(&request).await;
    let response = render(decision, request.resource.as_deref(), authorizer.config())?;

    Ok(serde_json::to_value(response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ARN: &str = "arn:aws:execute-api:us-east-1:123456789012:abcdef/prod/$connect";

    #[test]
    fn test_parse_websocket_request_event() {
        let event: AuthorizerEvent = serde_json::from_value(json!({
            "type": "REQUEST",
            "methodArn": ARN,
            "headers": {
                "Host": "abcdef.execute-api.us-east-1.amazonaws.com",
                "Sec-WebSocket-Protocol": "tok-A, chat"
            },
            "requestContext": {
                "routeKey": "$connect",
                "connectionId": "Lk3abc=",
                "domainName": "abcdef.execute-api.us-east-1.amazonaws.com"
            }
        }))
        .unwrap();

        let request = AuthRequest::from(event);
        assert_eq!(request.resource.as_deref(), Some(ARN));
        assert_eq!(
            request.headers.get("Sec-WebSocket-Protocol").map(String::as_str),
            Some("tok-A, chat")
        );
        assert!(request.authorization_token.is_none());
    }

    #[test]
    fn test_parse_token_event() {
        let event: AuthorizerEvent = serde_json::from_value(json!({
            "type": "TOKEN",
            "authorizationToken": "secret123",
            "methodArn": ARN
        }))
        .unwrap();

        let request = AuthRequest::from(event);
        assert!(request.headers.is_empty());
        assert_eq!(request.authorization_token.as_deref(), Some("secret123"));
        assert_eq!(request.resource.as_deref(), Some(ARN));
    }

    #[test]
    fn test_parse_v2_event_resource_precedence() {
        let event: AuthorizerEvent = serde_json::from_value(json!({
            "version": "2.0",
            "type": "REQUEST",
            "routeArn": "arn:aws:execute-api:us-east-1:123456789012:api/$default/GET/ws",
            "headers": null,
            "requestContext": { "domainName": "api.example.com" }
        }))
        .unwrap();
        let request = AuthRequest::from(event);
        assert_eq!(
            request.resource.as_deref(),
            Some("arn:aws:execute-api:us-east-1:123456789012:api/$default/GET/ws")
        );

        let event: AuthorizerEvent = serde_json::from_value(json!({
            "version": "2.0",
            "requestContext": { "domainName": "api.example.com" }
        }))
        .unwrap();
        let request = AuthRequest::from(event);
        assert_eq!(request.resource.as_deref(), Some("api.example.com"));
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_render_policy_allow() {
        let config = AuthorizerConfig::default().with_context_entry("plan", "pro");
        let decision = Decision::Authorized(Some(PolicyDocument::invoke(Effect::Allow, ARN)));

        let value = serde_json::to_value(render(decision, Some(ARN), &config).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "principalId": "user",
                "policyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Action": ["execute-api:Invoke"],
                        "Effect": "Allow",
                        "Resource": [ARN]
                    }]
                },
                "context": { "plan": "pro" }
            })
        );
    }

    #[test]
    fn test_render_policy_unauthorized_denies_resource() {
        let config = AuthorizerConfig::default().with_context_entry("plan", "pro");

        let value =
            serde_json::to_value(render(Decision::Unauthorized, Some(ARN), &config).unwrap())
                .unwrap();
        assert_eq!(value["principalId"], "user");
        assert_eq!(value["policyDocument"]["Statement"][0]["Effect"], "Deny");
        assert!(value.get("context").is_none());
    }

    #[test]
    fn test_render_policy_without_resource_is_invalid() {
        let config = AuthorizerConfig::default();

        for decision in [Decision::Authorized(None), Decision::Unauthorized] {
            assert!(matches!(
                render(decision.clone(), None, &config),
                Err(AuthorizerError::InvalidEvent { .. })
            ));
            assert!(matches!(
                render(decision, Some(""), &config),
                Err(AuthorizerError::InvalidEvent { .. })
            ));
        }
    }

    #[test]
    fn test_render_policy_authorized_without_document_allows_resource() {
        let config = AuthorizerConfig::default();

        let value =
            serde_json::to_value(render(Decision::Authorized(None), Some(ARN), &config).unwrap())
                .unwrap();
        assert_eq!(value["policyDocument"]["Statement"][0]["Effect"], "Allow");
        assert_eq!(value["policyDocument"]["Statement"][0]["Resource"][0], ARN);
    }

    #[test]
    fn test_render_simple_without_resource() {
        let config = AuthorizerConfig::default().with_response_format(ResponseFormat::Simple);

        let value =
            serde_json::to_value(render(Decision::Authorized(None), None, &config).unwrap())
                .unwrap();
        assert_eq!(value, json!({ "isAuthorized": true }));
    }

    #[test]
    fn test_render_simple() {
        let config = AuthorizerConfig::default().with_response_format(ResponseFormat::Simple);

        let allow = render(
            Decision::Authorized(Some(PolicyDocument::invoke(Effect::Allow, ARN))),
            Some(ARN),
            &config,
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(allow).unwrap(),
            json!({ "isAuthorized": true })
        );

        let deny = render(Decision::Unauthorized, Some(ARN), &config).unwrap();
        assert_eq!(
            serde_json::to_value(deny).unwrap(),
            json!({ "isAuthorized": false })
        );
    }

    #[test]
    fn test_render_error_propagates() {
        let err = AuthorizerError::StoreUnavailable {
            message: "throttled".into(),
        };
        for format in [ResponseFormat::Policy, ResponseFormat::Simple] {
            let config = AuthorizerConfig::default().with_response_format(format);
            let result = render(Decision::Error(err.clone()), Some(ARN), &config);
            assert_eq!(result, Err(err.clone()));
        }
    }
}
