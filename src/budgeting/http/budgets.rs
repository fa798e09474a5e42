use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::{
    authentication::domain::session::Session,
    budgeting::domain::budgets::{month_end, BudgetData, BudgetDetails, NewBudget},
    extract::{JsonBody, PathParams, QueryParams},
    http_err::{ApiError, ApiResponse},
    repos::{DynBudgetRepo, DynCategoryRepo},
};

use super::{references, reps};

pub(super) async fn create_budget(
    session: Session,
    State(budgets): State<DynBudgetRepo>,
    State(categories): State<DynCategoryRepo>,
    JsonBody(data): JsonBody<BudgetData>,
) -> ApiResponse<(StatusCode, Json<reps::Budget>)> {
    let owner = session.owner(data.user_id)?;
    let budget = NewBudget::from_data(owner, data, Utc::now())?;
    references::check_category(&categories, owner, budget.details.category_id).await?;

    let saved = budgets.insert(&budget).await?;
    debug!(budget_id = %saved.id, user_id = %owner, "Created budget.");

    Ok((StatusCode::CREATED, Json(saved.into())))
}

/// List a user's budgets, optionally only those in effect during a month.
pub(super) async fn list_budgets(
    session: Session,
    State(budgets): State<DynBudgetRepo>,
    PathParams(user_id): PathParams<Uuid>,
    QueryParams(params): QueryParams<reps::BudgetListParams>,
) -> ApiResponse<Json<Vec<reps::Budget>>> {
    let owner = session.owner(Some(user_id))?;

    let starts_before = match (params.month, params.year) {
        (Some(month), Some(year)) => match month_end(year, month) {
            Some(end) => Some(end),
            None => {
                return Err(ApiError::BadRequestReason(
                    "Invalid month or year.".to_owned(),
                ))
            }
        },
        _ => None,
    };

    let found = budgets.list_for_user(owner, starts_before).await?;

    Ok(Json(found.into_iter().map(reps::Budget::from).collect()))
}

pub(super) async fn get_budget(
    session: Session,
    State(budgets): State<DynBudgetRepo>,
    PathParams(budget_id): PathParams<Uuid>,
) -> ApiResponse<Json<reps::Budget>> {
    match budgets.get(session.user_id(), budget_id).await? {
        Some(budget) => Ok(Json(budget.into())),
        None => Err(ApiError::NotFound("Budget not found.".to_owned())),
    }
}

pub(super) async fn update_budget(
    session: Session,
    State(budgets): State<DynBudgetRepo>,
    State(categories): State<DynCategoryRepo>,
    PathParams(budget_id): PathParams<Uuid>,
    JsonBody(data): JsonBody<BudgetData>,
) -> ApiResponse<Json<reps::Budget>> {
    let owner = session.owner(data.user_id)?;
    let details = BudgetDetails::from_data(data)?;
    references::check_category(&categories, owner, details.category_id).await?;

    match budgets
        .update(owner, budget_id, &details, Utc::now())
        .await?
    {
        Some(budget) => Ok(Json(budget.into())),
        None => Err(ApiError::NotFound("Budget not found.".to_owned())),
    }
}

pub(super) async fn delete_budget(
    session: Session,
    State(budgets): State<DynBudgetRepo>,
    PathParams(budget_id): PathParams<Uuid>,
) -> ApiResponse<StatusCode> {
    budgets.delete(session.user_id(), budget_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
