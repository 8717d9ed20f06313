//! HTTP transport for Appwrite REST calls

use super::client::ClientConfig;
use super::params::Params;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Response format the models in this crate are written against
pub const RESPONSE_FORMAT: &str = "1.4.0";

/// Sanitize response body for logging
/// Truncates long responses and drops control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP transport shared by every façade
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference counted.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport for the given configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        // Validate up front so a bad endpoint fails at construction, not per call
        let endpoint = Url::parse(&config.endpoint)?;

        let client = Client::builder()
            .user_agent(format!("appwrite-rust/{}", crate::VERSION))
            .default_headers(default_headers(config)?)
            .danger_accept_invalid_certs(config.self_signed)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Base endpoint, without trailing slash
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the full URL for a path, appending a query string when given
    pub fn url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(query) if !query.is_empty() => {
                format!("{}{}?{}", self.endpoint, path, query)
            },
            _ => format!("{}{}", self.endpoint, path),
        }
    }

    /// Send a request and return the raw body of a 2xx response.
    ///
    /// GET and DELETE carry `params` in the query string, every other method
    /// sends them as a JSON body.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        headers: Option<&HeaderMap>,
        params: &Params,
    ) -> Result<Vec<u8>> {
        let request = if method == Method::GET || method == Method::DELETE {
            let url = self.url(path, Some(&params.to_query()));
            tracing::debug!("{} {}", method, url);
            self.client.request(method, url)
        } else {
            let url = self.url(path, None);
            tracing::debug!("{} {}", method, url);
            self.client.request(method, url).json(&params.to_body())
        };

        self.execute(with_headers(request, headers)).await
    }

    /// Send a multipart/form-data POST
    pub async fn send_multipart(
        &self,
        path: &str,
        headers: Option<&HeaderMap>,
        form: Form,
    ) -> Result<Vec<u8>> {
        let url = self.url(path, None);
        tracing::debug!("POST {} (multipart)", url);

        let request = self.client.post(url).multipart(form);
        self.execute(with_headers(request, headers)).await
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        let response = request.send().await?;
        read_response(response).await
    }
}

fn with_headers(request: RequestBuilder, headers: Option<&HeaderMap>) -> RequestBuilder {
    match headers {
        Some(headers) => request.headers(headers.clone()),
        None => request,
    }
}

async fn read_response(response: Response) -> Result<Vec<u8>> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let body = String::from_utf8_lossy(&body).into_owned();
        // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
        tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
        return Err(Error::api(status, body));
    }

    Ok(body.to_vec())
}

fn default_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("x-sdk-name"),
        HeaderValue::from_static("Rust"),
    );
    headers.insert(
        HeaderName::from_static("x-sdk-version"),
        HeaderValue::from_static(crate::VERSION),
    );
    headers.insert(
        HeaderName::from_static("x-appwrite-response-format"),
        HeaderValue::from_static(RESPONSE_FORMAT),
    );
    headers.insert(
        HeaderName::from_static("x-appwrite-project"),
        HeaderValue::from_str(&config.project)?,
    );

    if let Some(key) = &config.key {
        let mut value = HeaderValue::from_str(key)?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static("x-appwrite-key"), value);
    }
    if let Some(locale) = &config.locale {
        headers.insert(
            HeaderName::from_static("x-appwrite-locale"),
            HeaderValue::from_str(locale)?,
        );
    }

    Ok(headers)
}
