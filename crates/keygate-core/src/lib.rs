//! Token-lookup authorizer for API gateway connection requests.
//!
//! A caller presents a token (typically in the `Sec-WebSocket-Protocol`
//! header of a WebSocket upgrade). The authorizer takes the first
//! comma-separated entry, trims it, and looks it up in a key-value table.
//! A record means the connection is allowed; no record means it is not.
//!
//! - [`Authorizer`]: extract → normalize → look up → [`Decision`]
//! - [`CredentialStore`]: point lookups against DynamoDB or memory
//! - [`gateway`]: event parsing and response rendering
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use keygate_core::{gateway, Authorizer, AuthorizerConfig, DynamoStore};
//!
//! # async fn example(event: serde_json::Value) -> Result<(), keygate_core::AuthorizerError> {
//! let config = AuthorizerConfig::from_env()?;
//! let store = DynamoStore::from_env(&config).await;
//! let authorizer = Authorizer::new(config, Arc::new(store));
//!
//! let response = gateway::handle_event(&authorizer, event).await?;
//! println!("{response}");
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `AUTH_TABLE_NAME` | Table holding valid tokens (default: `AUTH`) |
//! | `AUTH_TOKEN_HEADER` | Header carrying the token (default: `Sec-WebSocket-Protocol`) |
//! | `AUTH_RESPONSE_FORMAT` | `policy` or `simple` (default: `policy`) |
//! | `AUTH_PRINCIPAL_ID` | Principal in policy responses (default: `user`) |

pub mod authorizer;
pub mod config;
pub mod decision;
pub mod error;
pub mod gateway;
pub mod policy;
pub mod store;
pub mod token;

pub use authorizer::Authorizer;
pub use config::{AuthorizerConfig, ResponseFormat, DEFAULT_TABLE_NAME};
pub use decision::Decision;
pub use error::{AuthorizerError, AuthorizerResult};
pub use gateway::{handle_event, AuthRequest, AuthorizerEvent, AuthorizerResponse};
pub use policy::{Effect, PolicyDocument, PolicyStatement};
pub use store::{CredentialStore, DynamoStore, MemoryStore};
pub use token::{extract_token, normalize_token};
