use common::error::{AppError, Res};
use log::warn;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Client for the external identity service. A bearer credential goes in,
/// the user it belongs to comes out.
pub struct IdentityClient {
    client: Client,
    service_url: String,
    service_key: String,
}

impl IdentityClient {
    pub fn new(service_url: String, service_key: String) -> Self {
        IdentityClient {
            client: Client::new(),
            service_url,
            service_key,
        }
    }

    /// Resolves a bearer credential to a verified user.
    ///
    /// A rejected credential and an unknown user both collapse into the same
    /// `Unauthorized` message, so callers cannot probe which users exist.
    /// Every other failure, transport included, is `BackendUnavailable`.
    pub async fn get_user(&self, token: &str) -> Res<VerifiedUser> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.service_url))
            .bearer_auth(token)
            .header("apikey", &self.service_key)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => response
                .json::<VerifiedUser>()
                .await
                .map_err(AppError::from),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                warn!("Credential rejected by identity service");
                Err(AppError::Unauthorized(
                    "Invalid token or user not found".to_string(),
                ))
            }
            status => Err(AppError::BackendUnavailable(format!(
                "Identity service returned {}",
                status
            ))),
        }
    }
}
