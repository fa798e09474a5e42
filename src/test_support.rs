//! Helpers for driving the router against in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use axum_extra::extract::cookie::Key;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    authentication::{DynTokenService, JwtTokenService},
    bank_links::{BankAggregator, BankAggregatorError, LinkedItem},
    budgeting::domain::EntryType,
    identities::services::UserService,
    models::Category,
    repos::memory::MemoryStore,
    server::{app, AppState},
};

pub const GLOBAL_INCOME_CATEGORY: Uuid = Uuid::from_u128(0x5b0c1c3e_6f4a_4a7e_9d51_0a1f7d0c0001);
pub const GLOBAL_EXPENSE_CATEGORY: Uuid = Uuid::from_u128(0x5b0c1c3e_6f4a_4a7e_9d51_0a1f7d0c0005);

/// Accepts the public token `"public-sandbox-good"` and rejects anything else
/// the way Plaid would.
pub struct StubAggregator;

#[async_trait]
impl BankAggregator for StubAggregator {
    async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<LinkedItem, BankAggregatorError> {
        if public_token == "public-sandbox-good" {
            Ok(LinkedItem {
                access_token: "access-sandbox-123".to_owned(),
                item_id: "item-123".to_owned(),
            })
        } else {
            Err(BankAggregatorError::Upstream(
                "Plaid token exchange failed: provided public token is expired".to_owned(),
            ))
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub tokens: DynTokenService,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::with_categories(vec![
            Category {
                id: GLOBAL_INCOME_CATEGORY,
                name: "Salary".to_owned(),
                user_id: None,
                entry_type: EntryType::Income,
                color: Some("#2e7d32".to_owned()),
            },
            Category {
                id: GLOBAL_EXPENSE_CATEGORY,
                name: "Housing".to_owned(),
                user_id: None,
                entry_type: EntryType::Expense,
                color: Some("#c62828".to_owned()),
            },
        ]));
        let secret = [42u8; 32];
        let tokens: DynTokenService =
            Arc::new(JwtTokenService::new(&secret, chrono::Duration::days(7)));

        let state = AppState {
            bank_aggregator: Arc::new(StubAggregator),
            budget_repo: store.clone(),
            category_repo: store.clone(),
            cookie_key: Key::derive_from(&secret),
            token_service: tokens.clone(),
            transaction_repo: store.clone(),
            user_service: UserService::new(store),
        };

        Self {
            router: app(state),
            tokens,
        }
    }

    /// A token for a user that exists only in the token's claims.
    pub fn token_for(&self, user_id: Uuid) -> String {
        self.tokens.issue(user_id).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, headers, body)
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let (status, _, body) = self.send(request).await;

        (status, body)
    }
}
