//! FirebaseIdentityGateway - sign-in/sign-up over the Identity Toolkit
//! REST API.
//!
//! Upstream failures arrive as symbolic codes (`EMAIL_EXISTS`,
//! `INVALID_EMAIL`, ...). They are mapped to human-readable
//! `ButacaError::Auth` messages here, at the boundary, so nothing
//! downstream ever inspects upstream error identities.

use crate::config::FirebaseConfig;
use async_trait::async_trait;
use butaca_core::error::{ButacaError, Result};
use butaca_core::session::{AuthenticatedUser, IdentityGateway};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless gateway to the Firebase identity service.
#[derive(Clone)]
pub struct FirebaseIdentityGateway {
    client: Client,
    config: FirebaseConfig,
}

impl FirebaseIdentityGateway {
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn call(&self, endpoint: &str, email: &str, password: &str) -> Result<AuthenticatedUser> {
        let url = format!(
            "{}/accounts:{}?key={}",
            self.config.identity_base_url, endpoint, self.config.api_key
        );
        debug!(endpoint, "identity request");

        let body = CredentialsRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| ButacaError::network(format!("identity request failed: {err}")))?;

        if !response.status().is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read identity error body".to_string());
            return Err(map_identity_error(&body_text));
        }

        let parsed: CredentialsResponse = response.json().await.map_err(|err| {
            ButacaError::network(format!("failed to parse identity response: {err}"))
        })?;

        Ok(AuthenticatedUser {
            user_id: parsed.local_id,
            email: parsed.email,
            id_token: parsed.id_token,
        })
    }
}

#[async_trait]
impl IdentityGateway for FirebaseIdentityGateway {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        self.call("signInWithPassword", email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        self.call("signUp", email, password).await
    }
}

/// Maps an Identity Toolkit error body to a human-readable auth error.
fn map_identity_error(body: &str) -> ButacaError {
    let code = serde_json::from_str::<IdentityErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.to_string());

    // Codes may carry a suffix, e.g. "TOO_MANY_ATTEMPTS_TRY_LATER : ..."
    let message = match code.split_whitespace().next().unwrap_or_default() {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password".to_string()
        }
        "INVALID_EMAIL" | "MISSING_EMAIL" => "The email address is malformed".to_string(),
        "EMAIL_EXISTS" => "That email is already registered".to_string(),
        "WEAK_PASSWORD" | "MISSING_PASSWORD" => {
            "Password must be at least 6 characters".to_string()
        }
        "USER_DISABLED" => "This account has been disabled".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            "Too many attempts, try again later".to_string()
        }
        _ => code,
    };

    ButacaError::auth(message)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsResponse {
    local_id: String,
    email: String,
    id_token: String,
}

#[derive(Deserialize)]
struct IdentityErrorResponse {
    error: IdentityErrorBody,
}

#[derive(Deserialize)]
struct IdentityErrorBody {
    message: String,
}
