//! Linking bank accounts through an external aggregator.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod http;
mod plaid;

pub use plaid::{PlaidClient, PlaidEnvironment};

/// Credentials for a linked bank account.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LinkedItem {
    pub access_token: String,
    pub item_id: String,
}

#[derive(Debug, Error)]
pub enum BankAggregatorError {
    /// The aggregator could not be reached or rejected the request. The
    /// message is safe to show to clients.
    #[error("{0}")]
    Upstream(String),
}

pub type DynBankAggregator = Arc<dyn BankAggregator + Send + Sync>;

#[async_trait]
pub trait BankAggregator {
    /// Exchange the short-lived public token produced when a user links an
    /// account for a durable access token.
    async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<LinkedItem, BankAggregatorError>;
}
