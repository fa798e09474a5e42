use std::time::Duration;

use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{BankAggregator, BankAggregatorError, LinkedItem};

/// The Plaid deployment to talk to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PlaidEnvironment {
    Sandbox,
    Development,
    Production,
}

impl PlaidEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://sandbox.plaid.com",
            Self::Development => "https://development.plaid.com",
            Self::Production => "https://production.plaid.com",
        }
    }
}

#[derive(Serialize)]
struct ExchangeRequest<'a> {
    client_id: &'a str,
    secret: &'a str,
    public_token: &'a str,
}

#[derive(Deserialize)]
struct PlaidErrorBody {
    error_message: Option<String>,
}

/// A [`BankAggregator`] backed by the Plaid API.
pub struct PlaidClient {
    base_url: String,
    client_id: String,
    secret: String,
    http: reqwest::Client,
}

impl PlaidClient {
    pub fn new(
        environment: PlaidEnvironment,
        client_id: String,
        secret: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: environment.base_url().to_owned(),
            client_id,
            secret,
            http,
        })
    }
}

/// Pull the human readable message out of a Plaid error response, falling
/// back to the raw body.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<PlaidErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error_message)
        .unwrap_or_else(|| body.to_owned())
}

#[async_trait]
impl BankAggregator for PlaidClient {
    async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<LinkedItem, BankAggregatorError> {
        let response = self
            .http
            .post(format!("{}/item/public_token/exchange", self.base_url))
            .json(&ExchangeRequest {
                client_id: &self.client_id,
                secret: &self.secret,
                public_token,
            })
            .send()
            .await
            .map_err(|error| {
                error!(?error, "Failed to reach Plaid.");

                BankAggregatorError::Upstream(format!("Plaid token exchange failed: {}", error))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_message(&body);
            error!(%status, %message, "Plaid rejected token exchange.");

            return Err(BankAggregatorError::Upstream(format!(
                "Plaid token exchange failed: {}",
                message
            )));
        }

        let item = response.json::<LinkedItem>().await.map_err(|error| {
            error!(?error, "Failed to decode Plaid response.");

            BankAggregatorError::Upstream(format!("Plaid token exchange failed: {}", error))
        })?;
        debug!(item_id = %item.item_id, "Exchanged public token.");

        Ok(item)
    }
}
