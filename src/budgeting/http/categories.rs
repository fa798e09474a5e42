use axum::{extract::State, http::StatusCode, Json};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::{
    authentication::domain::session::Session,
    budgeting::domain::categories::{CategoryUpdate, NewCategory, NewCategoryData},
    extract::{JsonBody, PathParams, QueryParams},
    http_err::{ApiError, ApiResponse},
    repos::DynCategoryRepo,
};

use super::reps;

/// List the shared categories of one type. Does not require a session.
pub(super) async fn list_global_categories(
    State(categories): State<DynCategoryRepo>,
    QueryParams(params): QueryParams<reps::CategoryListParams>,
) -> ApiResponse<Json<Vec<reps::Category>>> {
    let found = categories.list_global(params.entry_type).await?;

    Ok(Json(found.into_iter().map(reps::Category::from).collect()))
}

pub(super) async fn list_user_categories(
    session: Session,
    State(categories): State<DynCategoryRepo>,
    PathParams(user_id): PathParams<Uuid>,
) -> ApiResponse<Json<Vec<reps::Category>>> {
    let owner = session.owner(Some(user_id))?;
    let found = categories.list_for_user(owner).await?;

    Ok(Json(found.into_iter().map(reps::Category::from).collect()))
}

pub(super) async fn create_category(
    session: Session,
    State(categories): State<DynCategoryRepo>,
    JsonBody(data): JsonBody<NewCategoryData>,
) -> ApiResponse<(StatusCode, Json<reps::Category>)> {
    let owner = session.owner(data.user_id)?;
    let category = NewCategory::from_data(owner, data)?;

    let saved = categories.insert(&category).await?;
    debug!(category_id = %saved.id, user_id = %owner, "Created category.");

    Ok((StatusCode::CREATED, Json(saved.into())))
}

pub(super) async fn update_category(
    session: Session,
    State(categories): State<DynCategoryRepo>,
    PathParams(category_id): PathParams<Uuid>,
    JsonBody(update): JsonBody<CategoryUpdate>,
) -> ApiResponse<Json<reps::Category>> {
    update.validate()?;

    match categories
        .update(session.user_id(), category_id, &update)
        .await?
    {
        Some(category) => Ok(Json(category.into())),
        None => Err(ApiError::NotFound("Category not found.".to_owned())),
    }
}

pub(super) async fn delete_category(
    session: Session,
    State(categories): State<DynCategoryRepo>,
    PathParams(category_id): PathParams<Uuid>,
) -> ApiResponse<StatusCode> {
    categories.delete(session.user_id(), category_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
