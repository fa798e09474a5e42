use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::debug;

use crate::{
    authentication::domain::session::Session,
    extract::JsonBody,
    http_err::{ApiError, ApiResponse},
    server::AppState,
};

use super::{BankAggregatorError, DynBankAggregator, LinkedItem};

pub fn routes() -> Router<AppState> {
    Router::new().route("/exchange_token", post(exchange_token))
}

#[derive(Deserialize)]
struct ExchangeTokenRequest {
    #[serde(default)]
    public_token: String,
}

async fn exchange_token(
    session: Session,
    State(aggregator): State<DynBankAggregator>,
    JsonBody(request): JsonBody<ExchangeTokenRequest>,
) -> ApiResponse<Json<LinkedItem>> {
    if request.public_token.trim().is_empty() {
        return Err(ApiError::BadRequestReason(
            "Missing public_token".to_owned(),
        ));
    }

    debug!(user_id = %session.user_id(), "Exchanging public token.");

    match aggregator.exchange_public_token(&request.public_token).await {
        Ok(item) => Ok(Json(item)),
        Err(BankAggregatorError::Upstream(message)) => Err(ApiError::Upstream(message)),
    }
}
