//! Storage
//!
//! Buckets and the files they hold.

use crate::api::{route, Client, Params};
use crate::error::{Error, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest file sent in a single request. Appwrite expects anything bigger
/// to be uploaded in chunks, which this SDK does not do.
pub const CHUNK_SIZE: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bucket {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    #[serde(rename = "$updatedAt")]
    pub updated_at: String,
    #[serde(rename = "$permissions", alias = "permissions")]
    pub permissions: Vec<String>,
    pub name: String,
    pub file_security: bool,
    pub enabled: bool,
    /// Bytes
    pub maximum_file_size: u64,
    pub allowed_file_extensions: Vec<String>,
    /// `none`, `gzip` or `zstd`
    pub compression: String,
    pub encryption: bool,
    pub antivirus: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketList {
    pub total: u64,
    pub buckets: Vec<Bucket>,
}

/// File metadata. A file always belongs to the bucket named by `bucket_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct File {
    #[serde(rename = "$id")]
    pub id: String,
    pub bucket_id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: String,
    #[serde(rename = "$updatedAt")]
    pub updated_at: String,
    #[serde(rename = "$permissions", alias = "permissions")]
    pub permissions: Vec<String>,
    pub name: String,
    pub signature: String,
    pub mime_type: String,
    pub size_original: u64,
    pub chunks_total: u64,
    pub chunks_uploaded: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileList {
    pub total: u64,
    pub files: Vec<File>,
}

/// File content to upload
#[derive(Debug, Clone, PartialEq)]
pub struct InputFile {
    pub filename: String,
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

impl InputFile {
    pub fn from_bytes(filename: &str, data: Vec<u8>) -> Self {
        Self {
            filename: filename.to_string(),
            mime_type: None,
            data,
        }
    }

    /// Read a file from disk, naming the upload after the file.
    ///
    /// Files larger than [`CHUNK_SIZE`] are rejected without being read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let size = tokio::fs::metadata(path).await?.len();
        if size > CHUNK_SIZE as u64 {
            return Err(Error::UploadTooLarge {
                size: usize::try_from(size).unwrap_or(usize::MAX),
                limit: CHUNK_SIZE,
            });
        }
        let data = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Ok(Self::from_bytes(&filename, data))
    }

    pub fn with_mime_type(mut self, mime_type: &str) -> Self {
        self.mime_type = Some(mime_type.to_string());
        self
    }
}

/// Preview rendering options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewOptions<'a> {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// 0-100
    pub quality: Option<u8>,
    /// Hex colour without `#`
    pub background: Option<&'a str>,
    /// `jpg`, `png`, `gif` or `webp`
    pub output: Option<&'a str>,
}

/// Storage service
#[derive(Clone, Debug)]
pub struct Storage {
    client: Client,
}

impl Storage {
    pub fn new(client: &Client) -> Self {
        Self {
            client: client.clone(),
        }
    }

    // =========================================================================
    // Buckets
    // =========================================================================

    pub async fn list_buckets(
        &self,
        search: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
        order_type: Option<&str>,
    ) -> Result<BucketList> {
        let params = list_params(search, limit, offset, order_type);
        self.client.request(Method::GET, "/storage/buckets", params).await
    }

    pub async fn get_bucket(&self, bucket_id: &str) -> Result<Bucket> {
        let path = route::render("/storage/buckets/{bucketId}", &[("bucketId", bucket_id)])?;
        self.client.request(Method::GET, &path, Params::new()).await
    }

    pub async fn delete_bucket(&self, bucket_id: &str) -> Result<()> {
        let path = route::render("/storage/buckets/{bucketId}", &[("bucketId", bucket_id)])?;
        self.client.request_empty(Method::DELETE, &path, Params::new()).await
    }

    // =========================================================================
    // Files
    // =========================================================================

    pub async fn list_files(
        &self,
        bucket_id: &str,
        search: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
        order_type: Option<&str>,
    ) -> Result<FileList> {
        let path = route::render("/storage/buckets/{bucketId}/files", &[("bucketId", bucket_id)])?;
        let params = list_params(search, limit, offset, order_type);
        self.client.request(Method::GET, &path, params).await
    }

    /// Upload a file in a single multipart request.
    ///
    /// Files larger than [`CHUNK_SIZE`] are rejected before anything is sent.
    pub async fn create_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        file: InputFile,
        permissions: Option<&[&str]>,
    ) -> Result<File> {
        if file.data.len() > CHUNK_SIZE {
            return Err(Error::UploadTooLarge {
                size: file.data.len(),
                limit: CHUNK_SIZE,
            });
        }

        let path = route::render("/storage/buckets/{bucketId}/files", &[("bucketId", bucket_id)])?;
        let params = Params::new()
            .insert("fileId", file_id)
            .insert_opt("permissions", permissions);

        let mut form = Form::new();
        for (name, value) in params.to_form_fields() {
            form = form.text(name, value);
        }

        let mut part = Part::bytes(file.data).file_name(file.filename);
        if let Some(mime_type) = &file.mime_type {
            part = part
                .mime_str(mime_type)
                .map_err(|_| Error::InvalidMimeType(mime_type.clone()))?;
        }
        form = form.part("file", part);

        self.client.call_multipart(&path, None, form).await
    }

    pub async fn get_file(&self, bucket_id: &str, file_id: &str) -> Result<File> {
        let path = file_path("", bucket_id, file_id)?;
        self.client.request(Method::GET, &path, Params::new()).await
    }

    /// Rename a file or change its permissions
    pub async fn update_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        name: Option<&str>,
        permissions: Option<&[&str]>,
    ) -> Result<File> {
        let path = file_path("", bucket_id, file_id)?;
        let params = Params::new()
            .insert_opt("name", name)
            .insert_opt("permissions", permissions);
        self.client.request(Method::PUT, &path, params).await
    }

    pub async fn delete_file(&self, bucket_id: &str, file_id: &str) -> Result<()> {
        let path = file_path("", bucket_id, file_id)?;
        self.client.request_empty(Method::DELETE, &path, Params::new()).await
    }

    /// File content, served as an attachment
    pub async fn get_file_download(&self, bucket_id: &str, file_id: &str) -> Result<Vec<u8>> {
        let path = file_path("/download", bucket_id, file_id)?;
        self.client.call_api(Method::GET, &path, None, Params::new()).await
    }

    /// File content, served inline
    pub async fn get_file_view(&self, bucket_id: &str, file_id: &str) -> Result<Vec<u8>> {
        let path = file_path("/view", bucket_id, file_id)?;
        self.client.call_api(Method::GET, &path, None, Params::new()).await
    }

    /// Preview image of a file. Non-image files yield their type icon.
    pub async fn get_file_preview(
        &self,
        bucket_id: &str,
        file_id: &str,
        options: &PreviewOptions<'_>,
    ) -> Result<Vec<u8>> {
        let path = file_path("/preview", bucket_id, file_id)?;
        let params = Params::new()
            .insert_opt("width", options.width)
            .insert_opt("height", options.height)
            .insert_opt("quality", options.quality)
            .insert_opt("background", options.background)
            .insert_opt("output", options.output);
        self.client.call_api(Method::GET, &path, None, params).await
    }
}

fn list_params(
    search: Option<&str>,
    limit: Option<u32>,
    offset: Option<u32>,
    order_type: Option<&str>,
) -> Params {
    Params::new()
        .insert_opt("search", search)
        .insert_opt("limit", limit)
        .insert_opt("offset", offset)
        .insert_opt("orderType", order_type)
}

fn file_path(suffix: &str, bucket_id: &str, file_id: &str) -> Result<String> {
    let path = route::render(
        "/storage/buckets/{bucketId}/files/{fileId}",
        &[("bucketId", bucket_id), ("fileId", file_id)],
    )?;
    Ok(format!("{}{}", path, suffix))
}
