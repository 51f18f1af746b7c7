//! Login and registration against the `authUsers` collection.

use crate::client::{execute, fetch_json};
use crate::error::{ClientError, Result};
use crate::users::UsersClient;
use reqwest::Client;
use tracing::{debug, info, warn};
use tunify_core::{AuthUser, NewAuthUser, User};

/// Authentication client.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Login with username and password.
    ///
    /// Returns the profile record, creating it when the credentials exist
    /// but the profile does not.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let username = validate_credentials(username, password)?;
        debug!(username = %username, "Attempting login");

        let auth_user = self
            .find(username)
            .await?
            .ok_or(ClientError::UserNotFound)?;
        if auth_user.password != password {
            warn!(username = %username, "Login failed: incorrect password");
            return Err(ClientError::IncorrectPassword);
        }

        let user = self.users().ensure_record(username).await?;
        info!(username = %user.username, user_id = %user.id, "Login successful");
        Ok(user)
    }

    /// Register a new username.
    ///
    /// Creates the credentials record and the profile record. The caller
    /// still has to log in.
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        let username = validate_credentials(username, password)?;
        if self.find(username).await?.is_some() {
            return Err(ClientError::UserExists);
        }

        let url = format!("{}/authUsers", self.base_url);
        let body = NewAuthUser {
            username: username.to_string(),
            password: password.to_string(),
        };
        execute(self.http.post(&url).json(&body), &url).await?;

        let user = self.users().ensure_record(username).await?;
        info!(username = %user.username, "Registered user");
        Ok(user)
    }

    /// Look up the credentials record for a username.
    async fn find(&self, username: &str) -> Result<Option<AuthUser>> {
        let url = format!("{}/authUsers", self.base_url);
        let matches: Vec<AuthUser> = fetch_json(
            self.http.get(&url).query(&[("username", username)]),
            &url,
            "credentials",
        )
        .await?;
        Ok(matches.into_iter().next())
    }

    fn users(&self) -> UsersClient<'a> {
        UsersClient::new(self.http, self.base_url)
    }
}

/// Trim the username and reject empty fields.
fn validate_credentials<'u>(username: &'u str, password: &str) -> Result<&'u str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ClientError::InvalidInput(
            "Please provide username and password".into(),
        ));
    }
    Ok(username)
}
