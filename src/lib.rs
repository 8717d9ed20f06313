//! Appwrite server SDK
//!
//! Typed access to the Appwrite REST API. Build a [`Client`] from a
//! [`ClientConfig`] and hand it to the service façades:
//!
//! ```no_run
//! use appwrite::{Client, ClientConfig, Users};
//!
//! async fn example() -> appwrite::Result<()> {
//!     let config = ClientConfig::new("https://cloud.appwrite.io/v1", "my-project")
//!         .with_key("secret-api-key");
//!     let client = Client::new(config)?;
//!
//!     let users = Users::new(&client);
//!     let prefs = users.get_prefs("abc123").await?;
//!     println!("theme = {:?}", prefs.get("theme"));
//!     Ok(())
//! }
//! ```
//!
//! The SDK performs exactly one HTTP round trip per call. There is no retry,
//! caching or pagination layer; wrap calls yourself where needed.

pub mod api;
pub mod config;
pub mod error;
pub mod services;

/// Crate version, sent as `X-SDK-Version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use api::{Client, ClientConfig, Params};
pub use error::{format_error, Error, Result};
pub use services::{Database, Functions, Health, Storage, Users};
