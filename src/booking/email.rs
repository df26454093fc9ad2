use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("email delivery is not configured")]
    NotConfigured,

    #[error("email provider requires a verified sending domain")]
    DomainNotVerified,

    #[error("email provider rejected the request ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("email transport failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEmailRequest {
    pub user_email: String,
    pub user_name: String,
    pub trip: TripSummary,
    pub buddy: BuddySummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub name: String,
    pub duration: String,
    pub approximate_cost: String,
    pub description: String,
    pub trip_highlights: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuddySummary {
    pub name: String,
    pub age: u8,
    pub location: String,
    pub bio: String,
    pub interests: Vec<String>,
    pub match_percentage: u8,
}

#[derive(Debug, Deserialize)]
struct ProviderRejection {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

/// Thin HTTP client for the confirmation-email provider. Without an
/// endpoint and key the client still constructs, and every send reports
/// `NotConfigured` so booking can degrade instead of failing.
#[derive(Clone)]
pub struct EmailClient {
    http: reqwest::Client,
    endpoint: Option<String>,
    api_key: Option<String>,
}

impl EmailClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.email_endpoint.clone(),
            api_key: config.email_api_key.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }

    pub async fn send_booking_email(
        &self,
        request: &BookingEmailRequest,
    ) -> Result<(), EmailError> {
        let (Some(endpoint), Some(api_key)) = (&self.endpoint, &self.api_key) else {
            return Err(EmailError::NotConfigured);
        };

        let response = self
            .http
            .post(endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(to = %request.user_email, "confirmation email accepted by provider");
            return Ok(());
        }

        let rejection: ProviderRejection = response.json().await.unwrap_or(ProviderRejection {
            name: String::new(),
            message: String::new(),
        });

        // Sandboxed provider accounts reject real recipients until a
        // sending domain is verified; callers treat that case specially.
        if rejection.name == "validation_error" && rejection.message.contains("verify a domain") {
            return Err(EmailError::DomainNotVerified);
        }

        Err(EmailError::Provider {
            status: status.as_u16(),
            message: rejection.message,
        })
    }
}
