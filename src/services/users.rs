//! Users
//!
//! Server-side user management: accounts, preferences, logs and sessions.

use crate::api::{route, Client, Params};
use crate::error::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    #[serde(rename = "$updatedAt")]
    pub updated_at: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: bool,
    pub labels: Vec<String>,
    pub registration: String,
    pub email_verification: bool,
    pub phone_verification: bool,
    /// Free-form preferences
    pub prefs: Map<String, Value>,
    #[serde(alias = "passwordUpdated")]
    pub password_update: String,
    /// Password hash, only present for imported users
    pub password: Option<String>,
    /// Hash algorithm name
    pub hash: Option<String>,
    /// Algorithm parameters (cost factors, salt, ...)
    pub hash_options: Map<String, Value>,
    pub accessed_at: String,
}

/// Page of users
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserList {
    #[serde(alias = "sum")]
    pub total: u64,
    pub users: Vec<User>,
}

/// User preferences, exactly as stored on the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences {
    pub prefs: Map<String, Value>,
}

impl Preferences {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.prefs.get(key)
    }
}

/// Audit log entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Log {
    pub event: String,
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
    pub mode: String,
    pub ip: String,
    pub time: String,
    pub os_name: String,
    pub client_name: String,
    pub device_name: String,
    pub country_code: String,
    pub country_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogList {
    pub total: u64,
    pub logs: Vec<Log>,
}

/// Login session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    pub user_id: String,
    pub expire: String,
    pub provider: String,
    pub provider_uid: String,
    pub ip: String,
    pub os_name: String,
    pub client_name: String,
    pub device_name: String,
    pub country_code: String,
    pub current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionList {
    pub total: u64,
    pub sessions: Vec<Session>,
}

/// Users service
#[derive(Clone, Debug)]
pub struct Users {
    client: Client,
}

impl Users {
    pub fn new(client: &Client) -> Self {
        Self {
            client: client.clone(),
        }
    }

    /// List project users, optionally filtered by a search term and queries
    pub async fn list(&self, search: Option<&str>, queries: &[&str]) -> Result<UserList> {
        let params = Params::new()
            .insert_opt("search", search)
            .insert("queries", queries);
        self.client.request(Method::GET, "/users", params).await
    }

    /// Create a user. Pass `unique()` as `user_id` to let the server pick one.
    pub async fn create(
        &self,
        user_id: &str,
        email: Option<&str>,
        password: Option<&str>,
        name: Option<&str>,
    ) -> Result<User> {
        let params = Params::new()
            .insert("userId", user_id)
            .insert_opt("email", email)
            .insert_opt("password", password)
            .insert_opt("name", name);
        self.client.request(Method::POST, "/users", params).await
    }

    pub async fn get(&self, user_id: &str) -> Result<User> {
        let path = route::render("/users/{userId}", &[("userId", user_id)])?;
        self.client.request(Method::GET, &path, Params::new()).await
    }

    pub async fn delete(&self, user_id: &str) -> Result<()> {
        let path = route::render("/users/{userId}", &[("userId", user_id)])?;
        self.client.request_empty(Method::DELETE, &path, Params::new()).await
    }

    /// Activity log of a user
    pub async fn get_logs(&self, user_id: &str, queries: &[&str]) -> Result<LogList> {
        let path = route::render("/users/{userId}/logs", &[("userId", user_id)])?;
        let params = Params::new().insert("queries", queries);
        self.client.request(Method::GET, &path, params).await
    }

    pub async fn get_prefs(&self, user_id: &str) -> Result<Preferences> {
        let path = route::render("/users/{userId}/prefs", &[("userId", user_id)])?;
        self.client.request(Method::GET, &path, Params::new()).await
    }

    /// Replace the preference object of a user
    pub async fn update_prefs(
        &self,
        user_id: &str,
        prefs: &Map<String, Value>,
    ) -> Result<Preferences> {
        let path = route::render("/users/{userId}/prefs", &[("userId", user_id)])?;
        let params = Params::new().insert("prefs", prefs.clone());
        self.client.request(Method::PATCH, &path, params).await
    }

    pub async fn list_sessions(&self, user_id: &str) -> Result<SessionList> {
        let path = route::render("/users/{userId}/sessions", &[("userId", user_id)])?;
        self.client.request(Method::GET, &path, Params::new()).await
    }

    /// Delete every session of a user
    pub async fn delete_sessions(&self, user_id: &str) -> Result<()> {
        let path = route::render("/users/{userId}/sessions", &[("userId", user_id)])?;
        self.client.request_empty(Method::DELETE, &path, Params::new()).await
    }

    pub async fn delete_session(&self, user_id: &str, session_id: &str) -> Result<()> {
        let path = route::render(
            "/users/{userId}/sessions/{sessionId}",
            &[("userId", user_id), ("sessionId", session_id)],
        )?;
        self.client.request_empty(Method::DELETE, &path, Params::new()).await
    }

    /// Block (`false`) or unblock (`true`) a user
    pub async fn update_status(&self, user_id: &str, status: bool) -> Result<User> {
        let path = route::render("/users/{userId}/status", &[("userId", user_id)])?;
        let params = Params::new().insert("status", status);
        self.client.request(Method::PATCH, &path, params).await
    }
}
