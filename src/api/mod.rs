//! Appwrite REST plumbing
//!
//! Everything the resource façades share: configuration, HTTP dispatch,
//! route templating, parameter assembly and response decoding.
//!
//! # Module Structure
//!
//! - [`client`] - Client configuration and the dispatch entry points
//! - [`http`] - HTTP transport (headers, query/body rendering, status handling)
//! - [`route`] - `{placeholder}` route templates
//! - [`params`] - Request parameter assembly
//! - [`decode`] - JSON response decoding
//!
//! # Example
//!
//! ```no_run
//! use appwrite::api::{Client, ClientConfig, Params};
//! use reqwest::Method;
//!
//! async fn example() -> appwrite::Result<()> {
//!     let client = Client::new(ClientConfig::new("https://cloud.appwrite.io/v1", "my-project"))?;
//!     let health = client.call(Method::GET, "/health", None, Params::new()).await?;
//!     println!("{:?}", health.get("status"));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod decode;
pub mod http;
pub mod params;
pub mod route;

pub use client::{Client, ClientConfig};
pub use decode::decode;
pub use params::Params;
pub use route::render;
