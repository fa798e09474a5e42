use uuid::Uuid;

use crate::{
    http_err::{ApiError, ApiResponse},
    repos::{DynBudgetRepo, DynCategoryRepo},
};

/// A category may be referenced if it is global or owned by `owner`.
pub(super) async fn check_category(
    categories: &DynCategoryRepo,
    owner: Uuid,
    category_id: Option<Uuid>,
) -> ApiResponse<()> {
    if let Some(id) = category_id {
        if !categories.is_usable_by(owner, id).await? {
            return Err(ApiError::NotFound("Category not found.".to_owned()));
        }
    }

    Ok(())
}

pub(super) async fn check_budget(
    budgets: &DynBudgetRepo,
    owner: Uuid,
    budget_id: Option<Uuid>,
) -> ApiResponse<()> {
    if let Some(id) = budget_id {
        if budgets.get(owner, id).await?.is_none() {
            return Err(ApiError::NotFound("Budget not found.".to_owned()));
        }
    }

    Ok(())
}
