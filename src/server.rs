use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{bail, Context};
use axum::{extract::FromRef, Router};
use axum_extra::extract::cookie::Key;
use sqlx::postgres::PgPoolOptions;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use crate::{
    authentication::{self, DynTokenService, JwtTokenService},
    bank_links::{self, DynBankAggregator, PlaidClient, PlaidEnvironment},
    budgeting, cors,
    database::{DatabaseOptions, PostgresConnection},
    identities::{self, services::UserService},
    repos::{DynBudgetRepo, DynCategoryRepo, DynTransactionRepo, DynUserRepo},
};

/// Secrets shorter than this are rejected at startup.
const MIN_SECRET_KEY_BYTES: usize = 32;

pub struct Options {
    pub database: DatabaseOptions,
    pub database_pool_size: u32,
    pub database_timeout_seconds: u8,

    pub port: u16,
    pub request_timeout_seconds: u64,
    pub cors_allowed_origins: Vec<String>,

    pub plaid_client_id: String,
    pub plaid_environment: PlaidEnvironment,
    pub plaid_secret: String,

    pub secret_key: String,
    pub session_lifetime_days: u16,
}

#[derive(Clone)]
pub struct AppState {
    pub bank_aggregator: DynBankAggregator,
    pub budget_repo: DynBudgetRepo,
    pub category_repo: DynCategoryRepo,
    pub cookie_key: Key,
    pub token_service: DynTokenService,
    pub transaction_repo: DynTransactionRepo,
    pub user_service: UserService,
}

/// Decode the base64 application secret.
pub fn decode_secret_key(encoded: &str) -> anyhow::Result<Vec<u8>> {
    let secret = base64::decode(encoded.trim()).context("Secret key is not valid base64.")?;
    if secret.len() < MIN_SECRET_KEY_BYTES {
        bail!(
            "Secret key must be at least {} bytes, received {}.",
            MIN_SECRET_KEY_BYTES,
            secret.len()
        );
    }

    Ok(secret)
}

/// Build the application's routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(identities::http::routes())
        .merge(authentication::http::routes())
        .merge(budgeting::http::routes())
        .merge(bank_links::http::routes())
        .with_state(state)
}

pub async fn serve(opts: Options) -> anyhow::Result<()> {
    let secret = decode_secret_key(&opts.secret_key)?;
    let database_timeout = Duration::from_secs(opts.database_timeout_seconds.into());
    let request_timeout = Duration::from_secs(opts.request_timeout_seconds);

    let db_pool = PgPoolOptions::new()
        .max_connections(opts.database_pool_size)
        .acquire_timeout(database_timeout)
        .connect_with(opts.database.connect_options())
        .await
        .context("Failed to connect to the database.")?;

    let db_connection = PostgresConnection::new(db_pool, database_timeout);

    let user_repo: DynUserRepo = Arc::new(db_connection.clone());
    let token_service: DynTokenService = Arc::new(JwtTokenService::new(
        &secret,
        chrono::Duration::days(opts.session_lifetime_days.into()),
    ));
    let bank_aggregator: DynBankAggregator = Arc::new(PlaidClient::new(
        opts.plaid_environment,
        opts.plaid_client_id,
        opts.plaid_secret,
        request_timeout,
    )?);

    let state = AppState {
        bank_aggregator,
        budget_repo: Arc::new(db_connection.clone()),
        category_repo: Arc::new(db_connection.clone()),
        cookie_key: Key::derive_from(&secret),
        token_service,
        transaction_repo: Arc::new(db_connection),
        user_service: UserService::new(user_repo),
    };

    let app = app(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors::cors_layer(&opts.cors_allowed_origins)?);

    let address = SocketAddr::from(([0, 0, 0, 0], opts.port));
    info!(%address, "Starting server.");

    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

impl FromRef<AppState> for DynBankAggregator {
    fn from_ref(state: &AppState) -> Self {
        state.bank_aggregator.clone()
    }
}

impl FromRef<AppState> for DynBudgetRepo {
    fn from_ref(state: &AppState) -> Self {
        state.budget_repo.clone()
    }
}

impl FromRef<AppState> for DynCategoryRepo {
    fn from_ref(state: &AppState) -> Self {
        state.category_repo.clone()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl FromRef<AppState> for DynTokenService {
    fn from_ref(state: &AppState) -> Self {
        state.token_service.clone()
    }
}

impl FromRef<AppState> for DynTransactionRepo {
    fn from_ref(state: &AppState) -> Self {
        state.transaction_repo.clone()
    }
}

impl FromRef<AppState> for UserService {
    fn from_ref(state: &AppState) -> Self {
        state.user_service.clone()
    }
}
