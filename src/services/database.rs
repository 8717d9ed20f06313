//! Databases
//!
//! Databases, their collections and the documents stored in them.

use crate::api::{route, Client, Params};
use crate::error::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseObject {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    #[serde(rename = "$updatedAt")]
    pub updated_at: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseList {
    pub total: u64,
    pub databases: Vec<DatabaseObject>,
}

/// Collection attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribute {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// `available`, `processing`, `deleting`, `stuck` or `failed`
    pub status: String,
    pub required: bool,
    pub array: bool,
}

/// Collection index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Index {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub attributes: Vec<String>,
    pub orders: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Collection {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    #[serde(rename = "$updatedAt")]
    pub updated_at: String,
    #[serde(rename = "$permissions")]
    pub permissions: Vec<String>,
    pub database_id: String,
    pub enabled: bool,
    pub document_security: bool,
    /// Attributes in definition order
    pub attributes: Vec<Attribute>,
    pub indexes: Vec<Index>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionList {
    pub total: u64,
    pub collections: Vec<Collection>,
}

/// Document: system fields plus the free-form data of the collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collectionId")]
    pub collection_id: String,
    #[serde(rename = "$databaseId")]
    pub database_id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    #[serde(rename = "$updatedAt")]
    pub updated_at: String,
    #[serde(rename = "$permissions")]
    pub permissions: Vec<String>,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentList {
    pub total: u64,
    pub documents: Vec<Document>,
}

/// Database service
#[derive(Clone, Debug)]
pub struct Database {
    client: Client,
}

impl Database {
    pub fn new(client: &Client) -> Self {
        Self {
            client: client.clone(),
        }
    }

    // =========================================================================
    // Databases
    // =========================================================================

    pub async fn list_databases(
        &self,
        search: Option<&str>,
        queries: &[&str],
    ) -> Result<DatabaseList> {
        let params = Params::new()
            .insert_opt("search", search)
            .insert("queries", queries);
        self.client.request(Method::GET, "/databases", params).await
    }

    pub async fn create_database(&self, database_id: &str, name: &str) -> Result<DatabaseObject> {
        let params = Params::new()
            .insert("databaseId", database_id)
            .insert("name", name);
        self.client.request(Method::POST, "/databases", params).await
    }

    pub async fn get_database(&self, database_id: &str) -> Result<DatabaseObject> {
        let path = route::render("/databases/{databaseId}", &[("databaseId", database_id)])?;
        self.client.request(Method::GET, &path, Params::new()).await
    }

    pub async fn update_database(&self, database_id: &str, name: &str) -> Result<DatabaseObject> {
        let path = route::render("/databases/{databaseId}", &[("databaseId", database_id)])?;
        let params = Params::new().insert("name", name);
        self.client.request(Method::PUT, &path, params).await
    }

    pub async fn delete_database(&self, database_id: &str) -> Result<()> {
        let path = route::render("/databases/{databaseId}", &[("databaseId", database_id)])?;
        self.client.request_empty(Method::DELETE, &path, Params::new()).await
    }

    // =========================================================================
    // Collections
    // =========================================================================

    pub async fn list_collections(
        &self,
        database_id: &str,
        search: Option<&str>,
        queries: &[&str],
    ) -> Result<CollectionList> {
        let path = route::render(
            "/databases/{databaseId}/collections",
            &[("databaseId", database_id)],
        )?;
        let params = Params::new()
            .insert_opt("search", search)
            .insert("queries", queries);
        self.client.request(Method::GET, &path, params).await
    }

    pub async fn create_collection(
        &self,
        database_id: &str,
        collection_id: &str,
        name: &str,
        permissions: &[&str],
        document_security: bool,
    ) -> Result<Collection> {
        let path = route::render(
            "/databases/{databaseId}/collections",
            &[("databaseId", database_id)],
        )?;
        let params = Params::new()
            .insert("collectionId", collection_id)
            .insert("name", name)
            .insert("permissions", permissions)
            .insert("documentSecurity", document_security);
        self.client.request(Method::POST, &path, params).await
    }

    pub async fn get_collection(&self, database_id: &str, collection_id: &str) -> Result<Collection> {
        let path = collection_path(database_id, collection_id)?;
        self.client.request(Method::GET, &path, Params::new()).await
    }

    pub async fn update_collection(
        &self,
        database_id: &str,
        collection_id: &str,
        name: &str,
        permissions: Option<&[&str]>,
        document_security: Option<bool>,
        enabled: Option<bool>,
    ) -> Result<Collection> {
        let path = collection_path(database_id, collection_id)?;
        let params = Params::new()
            .insert("name", name)
            .insert_opt("permissions", permissions)
            .insert_opt("documentSecurity", document_security)
            .insert_opt("enabled", enabled);
        self.client.request(Method::PUT, &path, params).await
    }

    pub async fn delete_collection(&self, database_id: &str, collection_id: &str) -> Result<()> {
        let path = collection_path(database_id, collection_id)?;
        self.client.request_empty(Method::DELETE, &path, Params::new()).await
    }

    // =========================================================================
    // Documents
    // =========================================================================

    pub async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[&str],
    ) -> Result<DocumentList> {
        let path = format!("{}/documents", collection_path(database_id, collection_id)?);
        let params = Params::new().insert("queries", queries);
        self.client.request(Method::GET, &path, params).await
    }

    pub async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &Map<String, Value>,
        permissions: Option<&[&str]>,
    ) -> Result<Document> {
        let path = format!("{}/documents", collection_path(database_id, collection_id)?);
        let params = Params::new()
            .insert("documentId", document_id)
            .insert("data", data.clone())
            .insert_opt("permissions", permissions);
        self.client.request(Method::POST, &path, params).await
    }

    pub async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Document> {
        let path = document_path(database_id, collection_id, document_id)?;
        self.client.request(Method::GET, &path, Params::new()).await
    }

    /// Partially update a document; only the keys in `data` change
    pub async fn update_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &Map<String, Value>,
        permissions: Option<&[&str]>,
    ) -> Result<Document> {
        let path = document_path(database_id, collection_id, document_id)?;
        let params = Params::new()
            .insert("data", data.clone())
            .insert_opt("permissions", permissions);
        self.client.request(Method::PATCH, &path, params).await
    }

    pub async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<()> {
        let path = document_path(database_id, collection_id, document_id)?;
        self.client.request_empty(Method::DELETE, &path, Params::new()).await
    }
}

fn collection_path(database_id: &str, collection_id: &str) -> Result<String> {
    route::render(
        "/databases/{databaseId}/collections/{collectionId}",
        &[("databaseId", database_id), ("collectionId", collection_id)],
    )
}

fn document_path(database_id: &str, collection_id: &str, document_id: &str) -> Result<String> {
    route::render(
        "/databases/{databaseId}/collections/{collectionId}/documents/{documentId}",
        &[
            ("databaseId", database_id),
            ("collectionId", collection_id),
            ("documentId", document_id),
        ],
    )
}
