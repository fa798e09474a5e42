use axum::{extract::State, http::StatusCode, Json};
use tracing::debug;
use uuid::Uuid;

use crate::{
    authentication::domain::session::Session,
    budgeting::domain::transactions::{NewTransaction, TransactionData, TransactionDetails},
    extract::{JsonBody, PathParams, QueryParams},
    http_err::{ApiError, ApiResponse},
    repos::{DynBudgetRepo, DynCategoryRepo, DynTransactionRepo},
};

use super::{references, reps};

pub(super) async fn create_transaction(
    session: Session,
    State(transactions): State<DynTransactionRepo>,
    State(budgets): State<DynBudgetRepo>,
    State(categories): State<DynCategoryRepo>,
    JsonBody(data): JsonBody<TransactionData>,
) -> ApiResponse<(StatusCode, Json<reps::Transaction>)> {
    let owner = session.owner(data.user_id)?;
    let transaction = NewTransaction::from_data(owner, data)?;
    references::check_category(&categories, owner, transaction.details.category_id).await?;
    references::check_budget(&budgets, owner, transaction.details.budget_id).await?;

    let saved = transactions.insert(&transaction).await?;
    debug!(transaction_id = %saved.id, user_id = %owner, "Created transaction.");

    Ok((StatusCode::CREATED, Json(saved.into())))
}

pub(super) async fn list_transactions(
    session: Session,
    State(transactions): State<DynTransactionRepo>,
    QueryParams(params): QueryParams<reps::TransactionListParams>,
) -> ApiResponse<Json<Vec<reps::Transaction>>> {
    let owner = session.owner(params.user_id)?;
    let found = transactions.list_for_user(owner).await?;

    Ok(Json(found.into_iter().map(reps::Transaction::from).collect()))
}

pub(super) async fn get_transaction(
    session: Session,
    State(transactions): State<DynTransactionRepo>,
    PathParams(transaction_id): PathParams<Uuid>,
) -> ApiResponse<Json<reps::Transaction>> {
    match transactions.get(session.user_id(), transaction_id).await? {
        Some(transaction) => Ok(Json(transaction.into())),
        None => Err(ApiError::NotFound("Transaction not found.".to_owned())),
    }
}

pub(super) async fn update_transaction(
    session: Session,
    State(transactions): State<DynTransactionRepo>,
    State(budgets): State<DynBudgetRepo>,
    State(categories): State<DynCategoryRepo>,
    PathParams(transaction_id): PathParams<Uuid>,
    JsonBody(data): JsonBody<TransactionData>,
) -> ApiResponse<Json<reps::Transaction>> {
    let owner = session.owner(data.user_id)?;
    let details = TransactionDetails::from_data(data)?;
    references::check_category(&categories, owner, details.category_id).await?;
    references::check_budget(&budgets, owner, details.budget_id).await?;

    match transactions.update(owner, transaction_id, &details).await? {
        Some(transaction) => Ok(Json(transaction.into())),
        None => Err(ApiError::NotFound(
            "No transaction found with the provided ID.".to_owned(),
        )),
    }
}

pub(super) async fn delete_transaction(
    session: Session,
    State(transactions): State<DynTransactionRepo>,
    PathParams(transaction_id): PathParams<Uuid>,
) -> ApiResponse<StatusCode> {
    transactions
        .delete(session.user_id(), transaction_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
