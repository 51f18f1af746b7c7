//! Main Tunify data store client.

use crate::auth::AuthClient;
use crate::categories::CategoriesClient;
use crate::error::{ClientError, Result};
use crate::playlists::PlaylistsClient;
use crate::songs::SongsClient;
use crate::types::{ClientConfig, ErrorBody};
use crate::users::UsersClient;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Client for the REST data store holding users, songs, playlists,
/// credentials and categories.
///
/// Every collection is reached through a borrowed sub-client:
///
/// ```ignore
/// use tunify_client::{ClientConfig, DataStoreClient};
///
/// let client = DataStoreClient::new(ClientConfig::default())?;
/// let user = client.auth().login("ana", "secret").await?;
/// let playlists = client.playlists().for_user(&user.id).await?;
/// println!("{} has {} playlists", user.username, playlists.len());
/// ```
#[derive(Debug, Clone)]
pub struct DataStoreClient {
    http: Client,
    base_url: String,
}

impl DataStoreClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = normalize_url(&config.store_url)?;
        let http = http_client(&config)?;
        Ok(Self { http, base_url })
    }

    /// Get the normalized data store URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Credentials: login and registration.
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url)
    }

    /// Profile records.
    pub fn users(&self) -> UsersClient<'_> {
        UsersClient::new(&self.http, &self.base_url)
    }

    /// Song catalog.
    pub fn songs(&self) -> SongsClient<'_> {
        SongsClient::new(&self.http, &self.base_url)
    }

    /// User playlists.
    pub fn playlists(&self) -> PlaylistsClient<'_> {
        PlaylistsClient::new(&self.http, &self.base_url)
    }

    /// Browse categories.
    pub fn categories(&self) -> CategoriesClient<'_> {
        CategoriesClient::new(&self.http, &self.base_url)
    }
}

/// Validate a base URL and strip trailing slashes.
pub(crate) fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let parsed = url::Url::parse(trimmed)
        .map_err(|e| ClientError::InvalidUrl(format!("{trimmed}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Build the shared HTTP client.
pub(crate) fn http_client(config: &ClientConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(format!("Tunify/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ClientError::Request)
}

/// Send a request, mapping connection failures.
pub(crate) async fn send(request: RequestBuilder, url: &str) -> Result<Response> {
    request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(url.to_string())
        } else {
            ClientError::Request(e)
        }
    })
}

/// Send a request and decode a JSON body on success.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    url: &str,
    what: &str,
) -> Result<T> {
    let response = check(send(request, url).await?, url).await?;
    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {what}: {e}")))
}

/// Send a request whose body is ignored.
pub(crate) async fn execute(request: RequestBuilder, url: &str) -> Result<()> {
    check(send(request, url).await?, url).await?;
    Ok(())
}

/// Turn a non-success status into an error.
///
/// The message is the body's `message` field when present, otherwise
/// `Server error: <status>`.
async fn check(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(url = %url, status = %status, "Data store returned an error");

    if status.as_u16() == 404 {
        return Err(ClientError::NotFound(url.to_string()));
    }

    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Server error: {}", status.as_u16()));

    Err(ClientError::ServerError {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(DataStoreClient::new(ClientConfig::new("https://example.com")).is_ok());
        assert!(DataStoreClient::new(ClientConfig::new("http://localhost:3000")).is_ok());

        // Invalid URLs
        assert!(DataStoreClient::new(ClientConfig::new("")).is_err());
        assert!(DataStoreClient::new(ClientConfig::new("not-a-url")).is_err());
        assert!(DataStoreClient::new(ClientConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = DataStoreClient::new(ClientConfig::new("http://localhost:3000//"))
            .expect("valid url");

        // URL should have trailing slashes removed
        assert_eq!(client.url(), "http://localhost:3000");
    }
}
