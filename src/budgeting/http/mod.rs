use axum::{
    routing::{get, post, put},
    Router,
};

use crate::server::AppState;

mod budgets;
mod categories;
mod references;
pub mod reps;
mod transactions;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(categories::list_global_categories).post(categories::create_category),
        )
        .route(
            "/categories/user/:user_id",
            get(categories::list_user_categories),
        )
        .route(
            "/categories/:category_id",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route("/budgets", post(budgets::create_budget))
        .route("/budgets/user/:user_id", get(budgets::list_budgets))
        .route(
            "/budgets/:budget_id",
            get(budgets::get_budget)
                .put(budgets::update_budget)
                .delete(budgets::delete_budget),
        )
        .route(
            "/transactions",
            get(transactions::list_transactions).post(transactions::create_transaction),
        )
        .route(
            "/transactions/:transaction_id",
            get(transactions::get_transaction)
                .put(transactions::update_transaction)
                .delete(transactions::delete_transaction),
        )
}
