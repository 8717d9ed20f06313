//! Resource façades
//!
//! One struct per Appwrite service, each holding its own clone of the
//! [`Client`](crate::api::Client). Every method renders its route, assembles
//! its parameters, performs a single round trip and decodes the typed result.
//!
//! - [`database`] - Databases, collections and documents
//! - [`functions`] - Functions, deployments, executions and variables
//! - [`storage`] - Buckets and files
//! - [`users`] - Users, preferences, logs and sessions
//! - [`health`] - Service health probes

pub mod database;
pub mod functions;
pub mod health;
pub mod storage;
pub mod users;

pub use database::Database;
pub use functions::Functions;
pub use health::Health;
pub use storage::Storage;
pub use users::Users;
