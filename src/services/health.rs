//! Health
//!
//! Snapshot probes of the Appwrite server and its dependencies.

use crate::api::{Client, Params};
use crate::error::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Status of one service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    /// Round trip time in milliseconds
    pub ping: u64,
    pub status: String,
}

impl HealthStatus {
    pub fn is_pass(&self) -> bool {
        self.status == "pass"
    }
}

/// Number of pending jobs in a queue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthQueue {
    pub size: u64,
}

/// Clock drift between the server and a remote time source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthTime {
    #[serde(alias = "realTime")]
    pub remote_time: i64,
    pub local_time: i64,
    pub diff: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthAntivirus {
    pub version: String,
    pub status: String,
}

/// Combined result of [`Health::check_all`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub http: HealthStatus,
    pub db: HealthStatus,
    pub cache: HealthStatus,
    pub storage: HealthStatus,
    pub time: HealthTime,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        [&self.http, &self.db, &self.cache, &self.storage]
            .iter()
            .all(|s| s.is_pass())
    }
}

/// Health service
#[derive(Clone, Debug)]
pub struct Health {
    client: Client,
}

impl Health {
    pub fn new(client: &Client) -> Self {
        Self {
            client: client.clone(),
        }
    }

    /// HTTP server status
    pub async fn get(&self) -> Result<HealthStatus> {
        self.probe("/health").await
    }

    pub async fn get_db(&self) -> Result<HealthStatus> {
        self.probe("/health/db").await
    }

    pub async fn get_cache(&self) -> Result<HealthStatus> {
        self.probe("/health/cache").await
    }

    pub async fn get_time(&self) -> Result<HealthTime> {
        self.probe("/health/time").await
    }

    pub async fn get_queue_webhooks(&self) -> Result<HealthQueue> {
        self.probe("/health/queue/webhooks").await
    }

    pub async fn get_queue_logs(&self) -> Result<HealthQueue> {
        self.probe("/health/queue/logs").await
    }

    pub async fn get_queue_certificates(&self) -> Result<HealthQueue> {
        self.probe("/health/queue/certificates").await
    }

    pub async fn get_queue_functions(&self) -> Result<HealthQueue> {
        self.probe("/health/queue/functions").await
    }

    /// Local storage device status
    pub async fn get_storage_local(&self) -> Result<HealthStatus> {
        self.probe("/health/storage/local").await
    }

    pub async fn get_antivirus(&self) -> Result<HealthAntivirus> {
        self.probe("/health/anti-virus").await
    }

    /// Run the status probes concurrently. Fails on the first failing probe.
    pub async fn check_all(&self) -> Result<HealthReport> {
        let (http, db, cache, storage, time) = futures::try_join!(
            self.get(),
            self.get_db(),
            self.get_cache(),
            self.get_storage_local(),
            self.get_time(),
        )?;

        Ok(HealthReport {
            http,
            db,
            cache,
            storage,
            time,
        })
    }

    async fn probe<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.client.request(Method::GET, path, Params::new()).await
    }
}
